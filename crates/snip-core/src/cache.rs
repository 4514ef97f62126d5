use crate::error::CacheError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// A time-bounded lookup cache from [`ShortCode`] to original URL.
///
/// The cache is never authoritative. `Ok(None)` means "unknown", not "does
/// not exist", and callers treat every `Err` the same way.
#[async_trait]
pub trait UrlCache: Send + Sync + 'static {
    /// Get the cached URL for a code.
    ///
    /// Returns `Ok(None)` if the key is not in the cache.
    async fn get_url(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Store a URL under `code`, expiring after `ttl`.
    ///
    /// Overwrites any existing entry and restarts its TTL.
    async fn set_url(&self, code: &ShortCode, original_url: &str, ttl: Duration) -> Result<()>;

    /// Remove the entry for `code`.
    ///
    /// It is not an error if the key does not exist.
    async fn del(&self, code: &ShortCode) -> Result<()>;
}

#[async_trait]
impl<T: UrlCache + ?Sized> UrlCache for Arc<T> {
    async fn get_url(&self, code: &ShortCode) -> Result<Option<String>> {
        (**self).get_url(code).await
    }

    async fn set_url(&self, code: &ShortCode, original_url: &str, ttl: Duration) -> Result<()> {
        (**self).set_url(code, original_url, ttl).await
    }

    async fn del(&self, code: &ShortCode) -> Result<()> {
        (**self).del(code).await
    }
}
