//! Lookup cache drivers implementing [`snip_core::UrlCache`].

pub mod moka;
pub mod null;
pub mod redis;

pub use self::moka::{MokaCacheConfig, MokaUrlCache};
pub use self::null::NullUrlCache;
pub use self::redis::RedisUrlCache;
pub use snip_core::{CacheError, UrlCache};
