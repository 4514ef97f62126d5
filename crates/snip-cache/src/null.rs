use async_trait::async_trait;
use snip_core::cache::Result;
use snip_core::{ShortCode, UrlCache};
use std::time::Duration;
use tracing::debug;

/// A cache that stores nothing. Every lookup is a miss.
///
/// Used when caching is disabled; every resolve then goes to the store and
/// counts as a visit.
#[derive(Debug, Clone, Copy)]
pub struct NullUrlCache;

impl NullUrlCache {
    pub fn new() -> Self {
        debug!("Using NullUrlCache (caching disabled)");
        Self
    }
}

impl Default for NullUrlCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlCache for NullUrlCache {
    async fn get_url(&self, _code: &ShortCode) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set_url(&self, _code: &ShortCode, _original_url: &str, _ttl: Duration) -> Result<()> {
        Ok(())
    }

    async fn del(&self, _code: &ShortCode) -> Result<()> {
        Ok(())
    }
}
