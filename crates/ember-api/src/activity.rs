//! Handlers for `/users/:id/activity` and `/users/:id/streak`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use ember_core::{event::Source, store::ProgressionStore};
use ember_engine::{ActivityRecorded, Progression};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// JSON body accepted by `POST /users/:id/activity`.
#[derive(Debug, Deserialize)]
pub struct RecordActivityBody {
  pub source:   Source,
  /// Opaque payload stored alongside the event; never interpreted.
  pub metadata: Option<serde_json::Value>,
}

/// `POST /users/:id/activity` — record a qualifying action for today.
///
/// The caller has already decided the action qualifies (task first marked
/// done, quiz passed, rewarded focus session finished); this endpoint only
/// deduplicates per day and source, then returns the recomputed streak.
pub async fn record<S>(
  State(progression): State<Arc<Progression<S>>>,
  Path(id): Path<Uuid>,
  Json(body): Json<RecordActivityBody>,
) -> Result<Json<ActivityRecorded>, ApiError>
where
  S: ProgressionStore,
{
  let outcome = progression
    .record_activity(id, body.source, body.metadata)
    .await
    .map_err(ApiError::from_engine)?;
  Ok(Json(outcome))
}

#[derive(Debug, Serialize)]
pub struct StreakResponse {
  pub streak: u32,
}

/// `GET /users/:id/streak` — the current streak, recomputed lazily.
pub async fn streak<S>(
  State(progression): State<Arc<Progression<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<StreakResponse>, ApiError>
where
  S: ProgressionStore,
{
  let streak = progression
    .current_streak(id)
    .await
    .map_err(ApiError::from_engine)?;
  Ok(Json(StreakResponse { streak }))
}
