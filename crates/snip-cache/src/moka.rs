use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use snip_core::cache::Result;
use snip_core::{ShortCode, UrlCache};
use std::time::{Duration, Instant};
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

const DEFAULT_MAX_CAPACITY: u64 = 10_000;

#[derive(Debug, Clone)]
struct CachedUrl {
    original_url: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with.
struct PerEntryTtl;

impl Expiry<String, CachedUrl> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedUrl,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedUrl,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// An in-process cache backed by Moka.
///
/// Entries expire after the TTL passed to [`UrlCache::set_url`], optionally
/// clamped by `max_ttl`. Suitable for single-node deployments and tests.
#[derive(Debug, Clone)]
pub struct MokaUrlCache {
    cache: Cache<String, CachedUrl>,
    max_ttl: Option<Duration>,
}

impl MokaUrlCache {
    /// Creates a cache holding up to 10,000 entries.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY)
    }

    /// Creates a cache with a custom maximum capacity.
    pub fn with_capacity(max_capacity: u64) -> Self {
        MokaCacheConfig::builder()
            .max_capacity(max_capacity)
            .build()
            .into()
    }

    /// Returns a builder for creating a custom cache configuration.
    pub fn builder() -> MokaCacheConfigBuilder {
        MokaCacheConfig::builder()
    }

    fn effective_ttl(&self, ttl: Duration) -> Duration {
        match self.max_ttl {
            Some(max) => ttl.min(max),
            None => ttl,
        }
    }
}

impl Default for MokaUrlCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlCache for MokaUrlCache {
    async fn get_url(&self, code: &ShortCode) -> Result<Option<String>> {
        match self.cache.get(code.as_str()).await {
            Some(entry) => {
                debug!(code = %code, "Cache hit in Moka");
                Ok(Some(entry.original_url))
            }
            None => {
                trace!(code = %code, "Cache miss in Moka");
                Ok(None)
            }
        }
    }

    async fn set_url(&self, code: &ShortCode, original_url: &str, ttl: Duration) -> Result<()> {
        let entry = CachedUrl {
            original_url: original_url.to_string(),
            ttl: self.effective_ttl(ttl),
        };
        self.cache.insert(code.as_str().to_string(), entry).await;
        trace!(code = %code, ?ttl, "Cached URL in Moka");
        Ok(())
    }

    async fn del(&self, code: &ShortCode) -> Result<()> {
        self.cache.invalidate(code.as_str()).await;
        trace!(code = %code, "Removed URL from Moka cache (if present)");
        Ok(())
    }
}

/// Configuration for creating a [`MokaUrlCache`].
#[derive(Debug, TypedBuilder, Default)]
pub struct MokaCacheConfig {
    /// Maximum number of entries the cache can hold.
    #[builder(default, setter(strip_option))]
    max_capacity: Option<u64>,
    /// Upper bound applied to every per-entry TTL.
    #[builder(default, setter(strip_option))]
    max_ttl: Option<Duration>,
}

impl From<MokaCacheConfig> for MokaUrlCache {
    fn from(config: MokaCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity.unwrap_or(DEFAULT_MAX_CAPACITY))
            .expire_after(PerEntryTtl)
            .build();

        MokaUrlCache {
            cache,
            max_ttl: config.max_ttl,
        }
    }
}
