//! Core types and traits for the snip URL shortener.
//!
//! This crate defines the record model and the two capability contracts the
//! shortening service is written against: the durable [`Repository`] and the
//! advisory [`UrlCache`]. Concrete drivers live in `snip-storage` and
//! `snip-cache`.

pub mod cache;
pub mod error;
pub mod repository;
pub mod shortcode;

pub use cache::UrlCache;
pub use error::{CacheError, CoreError, StorageError};
pub use repository::{NewRecord, Repository, UrlRecord};
pub use shortcode::ShortCode;
