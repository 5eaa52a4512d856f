//! Handlers for `/users` endpoints — stats bootstrap and the collaborator
//! counter hooks.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/users/:id` | Idempotently create a zeroed stats record |
//! | `GET`  | `/users/:id/stats` | Raw stats snapshot |
//! | `POST` | `/users/:id/counters` | Body: [`IncrementBody`]; bumps one counter |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use ember_core::{stats::UserStats, store::ProgressionStore};
use ember_engine::Progression;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

/// `POST /users/:id` — create the stats record if missing; returns it either
/// way. Called by the host at account creation.
pub async fn create<S>(
  State(progression): State<Arc<Progression<S>>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ProgressionStore,
{
  let stats = progression
    .create_stats(id)
    .await
    .map_err(ApiError::from_engine)?;
  Ok((StatusCode::CREATED, Json(stats)))
}

/// `GET /users/:id/stats`
pub async fn get_stats<S>(
  State(progression): State<Arc<Progression<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<UserStats>, ApiError>
where
  S: ProgressionStore,
{
  let stats = progression.stats(id).await.map_err(ApiError::from_engine)?;
  Ok(Json(stats))
}

/// Which collaborator-owned counter to bump. The streak is not listed: it is
/// derived from events and cannot be incremented directly.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Counter {
  TasksDone,
  QuizzesTaken,
}

/// JSON body accepted by `POST /users/:id/counters`.
#[derive(Debug, Deserialize)]
pub struct IncrementBody {
  pub counter: Counter,
}

/// `POST /users/:id/counters` — collaborator hook; returns the updated stats.
pub async fn increment<S>(
  State(progression): State<Arc<Progression<S>>>,
  Path(id): Path<Uuid>,
  Json(body): Json<IncrementBody>,
) -> Result<Json<UserStats>, ApiError>
where
  S: ProgressionStore,
{
  let stats = match body.counter {
    Counter::TasksDone => progression.increment_tasks_done(id).await,
    Counter::QuizzesTaken => progression.increment_quizzes_taken(id).await,
  }
  .map_err(ApiError::from_engine)?;
  Ok(Json(stats))
}
