//! Core library surface for the library-db menu tool.
//!
//! `db` owns the embedded SQLite store (opening, schema, seed data and the
//! fixed set of queries); `cli` owns the selection loop that drives them.
pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod logging;
pub mod models;

/// Convenience re-exports used by `main.rs` to open the store.
pub use db::{open, StoreOrigin};

pub use cli::{Console, Dispatcher};
pub use config::Config;
pub use errors::{LibraryError, Result};
pub use models::{BookRow, CheckoutRow, NewBook, NewStudent};
