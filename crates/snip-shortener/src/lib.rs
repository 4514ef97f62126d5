//! The shortening service.
//!
//! [`ShortenerService`] owns the cache-aside policy between a durable
//! [`Repository`](snip_core::Repository) and an advisory
//! [`UrlCache`](snip_core::UrlCache):
//!
//! - **create** validates the URL, generates a random code, writes the record
//!   durably (retrying on code collisions) and then warms the cache.
//! - **resolve** answers from the cache when it can. On a miss it reads the
//!   store, repopulates the cache and bumps the visit counter.
//!
//! Cache hits do not count as visits. `visit_count` only reflects resolves
//! that reached the store, trading counting accuracy for latency.
//!
//! Cache failures never fail a request. They are reported to a
//! [`FailureSink`] and treated as misses.

pub mod config;
pub mod error;
pub mod service;
pub mod shortener;
pub mod sink;

pub use config::ShortenerConfig;
pub use error::{Result, ShortenerError};
pub use service::ShortenerService;
pub use shortener::Shortener;
pub use sink::{BestEffortFailure, FailureSink, MemorySink, Operation, TracingSink};
