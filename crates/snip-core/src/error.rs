use thiserror::Error;

/// Errors raised while constructing core values.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Errors reported by a [`UrlCache`](crate::UrlCache) driver.
///
/// None of these ever fail a request: the shortening service folds every
/// variant into a cache miss.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
    #[error("cache operation timed out: {0}")]
    Timeout(String),
    #[error("cache initialization failed: {0}")]
    Initialization(String),
    #[error("cache operation failed: {0}")]
    Operation(String),
}

/// Errors reported by a [`Repository`](crate::Repository) driver.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The code is already taken. Expected under random generation and
    /// retried by the service.
    #[error("short code already exists: {0}")]
    DuplicateCode(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

impl StorageError {
    /// Returns `true` if this error is a uniqueness violation on the code.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StorageError::DuplicateCode(_))
    }
}
