use crate::error::Result;
use async_trait::async_trait;
use snip_core::{ShortCode, UrlRecord};

/// The operations the HTTP surface is written against.
#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Stores `original_url` under a freshly generated code and returns the code.
    ///
    /// Success means the record is durably stored. The cache may or may not
    /// have been populated.
    async fn create(&self, original_url: &str) -> Result<ShortCode>;

    /// Returns the original URL for `code`, or `None` if the code is unknown.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Returns the full stored record for `code`, read from the store.
    async fn stats(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;
}
