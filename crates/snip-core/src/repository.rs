use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// The authoritative record for one short code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// Primary key. Never reused or reassigned.
    pub code: ShortCode,
    /// The original URL, immutable after creation.
    pub original_url: String,
    /// When the record was created.
    pub created_at: Timestamp,
    /// Number of resolves served by the durable store.
    pub visit_count: u64,
}

/// A record about to be inserted. The store starts `visit_count` at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub code: ShortCode,
    pub original_url: String,
    pub created_at: Timestamp,
}

impl NewRecord {
    /// Creates a new record stamped with the current time.
    pub fn now(code: ShortCode, original_url: impl Into<String>) -> Self {
        Self {
            code,
            original_url: original_url.into(),
            created_at: Timestamp::now(),
        }
    }

    pub fn into_record(self) -> UrlRecord {
        UrlRecord {
            code: self.code,
            original_url: self.original_url,
            created_at: self.created_at,
            visit_count: 0,
        }
    }
}

/// The durable record store.
///
/// Implementations must enforce uniqueness of the code on [`put`](Self::put)
/// and must make [`increment_visit_count`](Self::increment_visit_count)
/// atomic with respect to concurrent callers.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Inserts a new record with `visit_count = 0`.
    ///
    /// Returns `Err(DuplicateCode)` if the code already exists; the existing
    /// record is left untouched.
    async fn put(&self, record: &NewRecord) -> Result<()>;

    /// Retrieves the record for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;

    /// Adds one to the record's visit counter.
    ///
    /// Incrementing a code that does not exist is not an error.
    async fn increment_visit_count(&self, code: &ShortCode) -> Result<()>;
}

#[async_trait]
impl<T: Repository + ?Sized> Repository for Arc<T> {
    async fn put(&self, record: &NewRecord) -> Result<()> {
        (**self).put(record).await
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        (**self).get(code).await
    }

    async fn increment_visit_count(&self, code: &ShortCode) -> Result<()> {
        (**self).increment_visit_count(code).await
    }
}
