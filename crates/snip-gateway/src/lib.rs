//! HTTP front end for the shortener.
//!
//! The router only translates between HTTP and [`snip_shortener::Shortener`];
//! all caching and storage decisions live behind that trait.

pub mod app;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use state::AppState;
