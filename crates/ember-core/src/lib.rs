//! Core types and trait definitions for the Ember progression engine.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// Storage backends implement `ProgressionStore` with native async methods;
// the trait itself declares `impl Future` returns with explicit `Send`
// bounds so it works in multi-threaded runtimes.
#![allow(async_fn_in_trait)]

pub mod catalog;
pub mod error;
pub mod event;
pub mod reward;
pub mod stats;
pub mod store;
pub mod streak;

pub use error::{Error, Result};
