//! The `ProgressionStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `ember-store-sqlite`).
//! Higher layers (`ember-engine`, `ember-api`) depend on this abstraction,
//! not on any concrete backend.

use std::{collections::HashSet, future::Future};

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
  event::NewActivityEvent,
  reward::RewardAward,
  stats::UserStats,
};

/// Abstraction over a progression store backend.
///
/// Events and awards are append-only; the two uniqueness invariants —
/// one event per `(user, day, source)`, one award per `(user, reward)` —
/// must be enforced *inside* the backend (a unique index or equivalent
/// conditional insert), so concurrent writers race on the storage layer
/// rather than on an application-level read check.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ProgressionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Stats ─────────────────────────────────────────────────────────────

  /// Create a zeroed stats record for `user_id` if none exists, then return
  /// the current record. Idempotent; called at account creation.
  fn create_stats(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<UserStats, Self::Error>> + Send + '_;

  /// Retrieve a user's stats. Returns `None` if the user has no record.
  fn stats(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Option<UserStats>, Self::Error>> + Send + '_;

  /// Collaborator hook: bump the completed-task counter.
  fn increment_tasks_done(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<UserStats, Self::Error>> + Send + '_;

  /// Collaborator hook: bump the quizzes-taken counter.
  fn increment_quizzes_taken(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<UserStats, Self::Error>> + Send + '_;

  /// Overwrite the cached streak value. A total update: always writes, even
  /// when the value is unchanged, and is safe to call repeatedly.
  fn set_streak(
    &self,
    user_id: Uuid,
    streak: u32,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Events — append-only writes ───────────────────────────────────────

  /// Insert an activity event unless one already exists for the same
  /// `(user, day, source)`. Returns whether a new row was created; a
  /// duplicate is an expected, silent outcome, never an error.
  fn insert_event(
    &self,
    input: NewActivityEvent,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// The distinct set of days (ignoring source) on which the user has at
  /// least one event. A stored day value that cannot be parsed as a
  /// calendar date is a fatal data-integrity error, not an empty result.
  fn event_days(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<NaiveDate>, Self::Error>> + Send + '_;

  // ── Awards — append-only writes ───────────────────────────────────────

  /// Persist an award unless the user already holds `reward_id`. Returns
  /// whether a new row was created; `false` means a concurrent (or earlier)
  /// call won, which callers treat as a normal outcome.
  fn insert_award(
    &self,
    user_id: Uuid,
    reward_id: String,
    earned_at: DateTime<Utc>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// The set of reward ids already awarded to this user.
  fn awarded_ids(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<HashSet<String>, Self::Error>> + Send + '_;

  /// All awards held by this user, oldest first.
  fn awards(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<RewardAward>, Self::Error>> + Send + '_;
}
