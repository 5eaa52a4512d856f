//! SQLite backend for the Ember progression store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! pool without blocking the async runtime. The two dedup invariants (one
//! event per user/day/source, one award per user/reward) live in unique
//! indexes, so concurrent writers are serialised by SQLite itself.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
