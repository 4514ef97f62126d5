use snip_core::StorageError;
use snip_generator::GeneratorError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShortenerError>;

#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("entropy source unavailable: {0}")]
    EntropySource(String),
    #[error("no free short code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },
    #[error("failed to store record")]
    StoreWrite(#[source] StorageError),
    #[error("failed to read record")]
    StoreRead(#[source] StorageError),
}

impl From<GeneratorError> for ShortenerError {
    fn from(value: GeneratorError) -> Self {
        match value {
            GeneratorError::EntropySource(message) => Self::EntropySource(message),
        }
    }
}
