//! JSON REST API for the Ember progression engine.
//!
//! Exposes an axum [`Router`] backed by a [`Progression`] facade over any
//! [`ember_core::store::ProgressionStore`]. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", ember_api::api_router(progression.clone()))
//! ```

pub mod activity;
pub mod error;
pub mod rewards;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use ember_core::store::ProgressionStore;
use ember_engine::Progression;

pub use error::ApiError;

/// Build a fully-materialised API router for `progression`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(progression: Arc<Progression<S>>) -> Router<()>
where
  S: ProgressionStore + 'static,
{
  Router::new()
    // Stats bootstrap + collaborator counter hooks
    .route("/users/{id}", post(users::create::<S>))
    .route("/users/{id}/stats", get(users::get_stats::<S>))
    .route("/users/{id}/counters", post(users::increment::<S>))
    // Activity recording and the derived streak
    .route("/users/{id}/activity", post(activity::record::<S>))
    .route("/users/{id}/streak", get(activity::streak::<S>))
    // Rewards
    .route("/users/{id}/rewards", get(rewards::list::<S>))
    .route("/users/{id}/rewards/check", post(rewards::check::<S>))
    .route("/users/{id}/progress", get(rewards::progress::<S>))
    .with_state(progression)
}

// ─── Integration tests ────────────────────────────────────────────────────────
