//! Short code generators.

pub mod random;

pub use random::{EntropySource, OsEntropy, RandomGenerator};

use snip_core::ShortCode;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum GeneratorError {
    /// The random source could not be read. There is no weaker fallback.
    #[error("entropy source unavailable: {0}")]
    EntropySource(String),
}

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage, so
/// uniqueness is not guaranteed: the store's uniqueness constraint is the
/// backstop and the caller retries on conflict.
pub trait Generator: Send + Sync + 'static {
    /// Produces a fresh candidate code.
    fn generate(&self) -> Result<ShortCode, GeneratorError>;
}

impl<G: Generator + ?Sized> Generator for std::sync::Arc<G> {
    fn generate(&self) -> Result<ShortCode, GeneratorError> {
        (**self).generate()
    }
}
