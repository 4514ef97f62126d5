use crate::{Generator, GeneratorError};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::TryRngCore;
use snip_core::ShortCode;

/// Number of random bytes drawn per code. 6 bytes encode to exactly 8
/// base64 characters with no padding, giving a 2^48 code space.
pub const RANDOM_BYTES: usize = 6;

/// Length of every generated code.
pub const CODE_LENGTH: usize = 8;

/// A source of cryptographically strong random bytes.
pub trait EntropySource: Send + Sync + 'static {
    fn fill(&self, dest: &mut [u8]) -> Result<(), GeneratorError>;
}

/// The operating system's random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), GeneratorError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| GeneratorError::EntropySource(e.to_string()))
    }
}

/// Generates 8-character URL-safe codes from 6 random bytes.
///
/// Holds no counter, so any number of instances across processes can
/// generate concurrently without coordination.
#[derive(Debug, Clone, Default)]
pub struct RandomGenerator<S = OsEntropy> {
    source: S,
}

impl RandomGenerator<OsEntropy> {
    pub fn new() -> Self {
        Self { source: OsEntropy }
    }
}

impl<S: EntropySource> RandomGenerator<S> {
    /// Creates a generator drawing from a custom entropy source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }
}

impl<S: EntropySource> Generator for RandomGenerator<S> {
    fn generate(&self) -> Result<ShortCode, GeneratorError> {
        let mut bytes = [0u8; RANDOM_BYTES];
        self.source.fill(&mut bytes)?;
        Ok(ShortCode::new_unchecked(URL_SAFE_NO_PAD.encode(bytes)))
    }
}
