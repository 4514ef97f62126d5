//! Durable record store drivers implementing [`snip_core::Repository`].

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::PostgresRepository;
pub use snip_core::{NewRecord, Repository, StorageError, UrlRecord};
