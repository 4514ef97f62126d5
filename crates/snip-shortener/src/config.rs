use std::time::Duration;
use typed_builder::TypedBuilder;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_millis(50);
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Settings for [`ShortenerService`](crate::ShortenerService).
///
/// Built once at startup and handed to the service; nothing in the service
/// reads the environment.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct ShortenerConfig {
    /// TTL of every cache entry written by the service.
    #[builder(default = DEFAULT_CACHE_TTL)]
    pub cache_ttl: Duration,
    /// Upper bound on a single cache call. A call that takes longer is
    /// abandoned and treated as a miss.
    #[builder(default = DEFAULT_CACHE_TIMEOUT)]
    pub cache_timeout: Duration,
    /// Upper bound on a single store call.
    #[builder(default = DEFAULT_STORE_TIMEOUT)]
    pub store_timeout: Duration,
    /// Total number of codes tried by one create before giving up.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
