//! Handlers for `/users/:id/rewards` and `/users/:id/progress`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use ember_core::{
  reward::{EarnedReward, ProgressReport, RewardDefinition},
  store::ProgressionStore,
};
use ember_engine::Progression;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct RewardsResponse {
  pub rewards:      Vec<EarnedReward>,
  pub total_points: u32,
}

/// `GET /users/:id/rewards` — everything the user has earned, plus the sum
/// of its points.
pub async fn list<S>(
  State(progression): State<Arc<Progression<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<RewardsResponse>, ApiError>
where
  S: ProgressionStore,
{
  let rewards = progression
    .earned_rewards(id)
    .await
    .map_err(ApiError::from_engine)?;
  let total_points = rewards.iter().map(|r| r.points).sum();
  Ok(Json(RewardsResponse { rewards, total_points }))
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
  pub new_rewards: Vec<RewardDefinition>,
}

/// `POST /users/:id/rewards/check` — evaluate the catalog against current
/// stats and grant anything newly qualified. The response contains only
/// rewards persisted by this call.
pub async fn check<S>(
  State(progression): State<Arc<Progression<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<CheckResponse>, ApiError>
where
  S: ProgressionStore,
{
  let new_rewards = progression
    .check_and_award(id)
    .await
    .map_err(ApiError::from_engine)?;
  Ok(Json(CheckResponse { new_rewards }))
}

/// `GET /users/:id/progress` — progress towards every catalog entry.
pub async fn progress<S>(
  State(progression): State<Arc<Progression<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ProgressReport>, ApiError>
where
  S: ProgressionStore,
{
  let report = progression
    .progress(id)
    .await
    .map_err(ApiError::from_engine)?;
  Ok(Json(report))
}
