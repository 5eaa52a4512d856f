//! The progression facade — the single entry point collaborators call.
//!
//! [`Progression`] ties together the event store, the streak calculator, and
//! the reward evaluator behind two write operations (`record_activity`,
//! `check_and_award`) and a handful of read models. It is generic over any
//! [`ProgressionStore`] backend; the reward catalog is injected at
//! construction so tests can run against synthetic thresholds.

pub mod error;

pub use error::Error;

use std::{collections::HashSet, sync::Arc};

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use ember_core::{
  catalog::RewardCatalog,
  event::{NewActivityEvent, Source},
  reward::{EarnedReward, ProgressReport, RewardDefinition, RewardProgress},
  stats::UserStats,
  store::ProgressionStore,
  streak,
};

// ─── Outcomes ────────────────────────────────────────────────────────────────

/// Result of [`Progression::record_activity`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ActivityRecorded {
  /// Whether a new event row was created. `false` means this source already
  /// contributed to today's streak credit — an expected outcome, not an
  /// error.
  pub created: bool,
  /// The streak after recomputation, already written back to the stats
  /// record.
  pub streak:  u32,
}

// ─── Facade ──────────────────────────────────────────────────────────────────

fn utc_today() -> NaiveDate { Utc::now().date_naive() }

/// The progression engine facade.
///
/// Cloning is cheap; the store is reference-counted and the catalog is
/// immutable after construction.
#[derive(Clone)]
pub struct Progression<S> {
  store:   Arc<S>,
  catalog: RewardCatalog,
  today:   fn() -> NaiveDate,
}

impl<S: ProgressionStore> Progression<S> {
  /// Build a facade over `store` with the given catalog, using the UTC
  /// calendar day as the process-wide clock.
  pub fn new(store: Arc<S>, catalog: RewardCatalog) -> Self {
    Self { store, catalog, today: utc_today }
  }

  /// Like [`Progression::new`], but with an explicit day source. Day-boundary
  /// behaviour (the grace day in particular) is tested through this.
  pub fn with_clock(
    store: Arc<S>,
    catalog: RewardCatalog,
    today: fn() -> NaiveDate,
  ) -> Self {
    Self { store, catalog, today }
  }

  pub fn catalog(&self) -> &RewardCatalog { &self.catalog }

  async fn require_stats(&self, user_id: Uuid) -> Result<UserStats, Error<S::Error>> {
    self
      .store
      .stats(user_id)
      .await
      .map_err(Error::Store)?
      .ok_or(Error::UserNotFound(user_id))
  }

  async fn recompute_streak(&self, user_id: Uuid) -> Result<u32, Error<S::Error>> {
    let days: HashSet<NaiveDate> = self
      .store
      .event_days(user_id)
      .await
      .map_err(Error::Store)?
      .into_iter()
      .collect();
    Ok(streak::current_streak(&days, (self.today)()))
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Record that `user_id` completed a qualifying action of `source` today.
  ///
  /// Appends to the event log (deduplicated per user/day/source), recomputes
  /// the streak from the full day set, and writes the new value into the
  /// stats record unconditionally. Calling this twice on the same day for
  /// the same source is a no-op the second time, with an identical streak in
  /// the result.
  pub async fn record_activity(
    &self,
    user_id: Uuid,
    source: Source,
    metadata: Option<serde_json::Value>,
  ) -> Result<ActivityRecorded, Error<S::Error>> {
    self.require_stats(user_id).await?;

    let created = self
      .store
      .insert_event(NewActivityEvent {
        user_id,
        day: (self.today)(),
        source,
        metadata,
      })
      .await
      .map_err(Error::Store)?;

    let streak = self.recompute_streak(user_id).await?;
    self
      .store
      .set_streak(user_id, streak)
      .await
      .map_err(Error::Store)?;

    Ok(ActivityRecorded { created, streak })
  }

  /// Grant every reward whose condition the user's current stats satisfy
  /// and which has not been granted before; return only the definitions
  /// newly persisted by *this* call.
  ///
  /// Safe under concurrent invocation: the unique constraint on
  /// `(user, reward)` decides the winner, and the loser silently drops the
  /// reward from its result.
  pub async fn check_and_award(
    &self,
    user_id: Uuid,
  ) -> Result<Vec<RewardDefinition>, Error<S::Error>> {
    let stats = self.require_stats(user_id).await?;
    let earned = self
      .store
      .awarded_ids(user_id)
      .await
      .map_err(Error::Store)?;

    let mut newly_granted = Vec::new();
    for def in self.catalog.all() {
      if earned.contains(&def.id) {
        continue;
      }
      if !def.condition.is_met(&stats) {
        continue;
      }

      let created = self
        .store
        .insert_award(user_id, def.id.clone(), Utc::now())
        .await
        .map_err(Error::Store)?;

      if created {
        tracing::info!(%user_id, reward = %def.id, points = def.points,
          "reward granted");
        newly_granted.push(def.clone());
      }
    }

    Ok(newly_granted)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// The current streak, recomputed lazily from the event log. Read-only:
  /// the cached stats value is not refreshed here.
  pub async fn current_streak(&self, user_id: Uuid) -> Result<u32, Error<S::Error>> {
    self.require_stats(user_id).await?;
    self.recompute_streak(user_id).await
  }

  /// All rewards the user has earned, enriched with catalog fields, oldest
  /// first. An award whose id is missing from the catalog is skipped — an
  /// orphaned row is a deployment artefact, not a caller error.
  pub async fn earned_rewards(
    &self,
    user_id: Uuid,
  ) -> Result<Vec<EarnedReward>, Error<S::Error>> {
    self.require_stats(user_id).await?;
    let awards = self.store.awards(user_id).await.map_err(Error::Store)?;

    let mut earned = Vec::with_capacity(awards.len());
    for award in awards {
      match self.catalog.by_id(&award.reward_id) {
        Some(def) => earned.push(EarnedReward::new(award, def)),
        None => {
          tracing::warn!(%user_id, reward = %award.reward_id,
            "award references a reward id absent from the catalog; skipping");
        }
      }
    }
    Ok(earned)
  }

  /// Sum of points over exactly the rewards in [`Progression::earned_rewards`].
  pub async fn total_points(&self, user_id: Uuid) -> Result<u32, Error<S::Error>> {
    let earned = self.earned_rewards(user_id).await?;
    Ok(earned.iter().map(|r| r.points).sum())
  }

  /// Progress towards every catalog entry, for the progress UI.
  pub async fn progress(
    &self,
    user_id: Uuid,
  ) -> Result<ProgressReport, Error<S::Error>> {
    let stats = self.require_stats(user_id).await?;
    let earned_ids = self
      .store
      .awarded_ids(user_id)
      .await
      .map_err(Error::Store)?;

    let rewards = self
      .catalog
      .all()
      .iter()
      .map(|def| {
        RewardProgress::new(
          def,
          stats.metric(def.condition.metric),
          earned_ids.contains(&def.id),
        )
      })
      .collect();

    let total_points = self
      .catalog
      .all()
      .iter()
      .filter(|def| earned_ids.contains(&def.id))
      .map(|def| def.points)
      .sum();

    Ok(ProgressReport { rewards, total_points, stats })
  }

  // ── Collaborator passthroughs ─────────────────────────────────────────────

  /// Bootstrap a zeroed stats record; idempotent. The host calls this at
  /// account creation.
  pub async fn create_stats(&self, user_id: Uuid) -> Result<UserStats, Error<S::Error>> {
    self.store.create_stats(user_id).await.map_err(Error::Store)
  }

  /// Raw stats snapshot.
  pub async fn stats(&self, user_id: Uuid) -> Result<UserStats, Error<S::Error>> {
    self.require_stats(user_id).await
  }

  /// Collaborator hook: count a task completion. The caller decides what
  /// qualifies (e.g. only the first done-transition of a task); the engine
  /// only consumes the counter.
  pub async fn increment_tasks_done(
    &self,
    user_id: Uuid,
  ) -> Result<UserStats, Error<S::Error>> {
    self.require_stats(user_id).await?;
    self
      .store
      .increment_tasks_done(user_id)
      .await
      .map_err(Error::Store)
  }

  /// Collaborator hook: count a passed quiz.
  pub async fn increment_quizzes_taken(
    &self,
    user_id: Uuid,
  ) -> Result<UserStats, Error<S::Error>> {
    self.require_stats(user_id).await?;
    self
      .store
      .increment_quizzes_taken(user_id)
      .await
      .map_err(Error::Store)
  }
}

#[cfg(test)]
mod tests;
