//! Per-user running counters.
//!
//! `tasks_done` and `quizzes_taken` are incremented by collaborators (the
//! host decides what counts as a completion); the engine only reads them.
//! `streak` is the one counter the engine owns: it is recomputed from the
//! event log and written back unconditionally after every recorded activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::reward::Metric;

/// A user's stats record. Created zeroed at account creation; never deleted
/// by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
  pub user_id:       Uuid,
  pub created_at:    DateTime<Utc>,
  pub tasks_done:    u32,
  pub quizzes_taken: u32,
  /// Cached value of the event-sourced streak; the event log is the source
  /// of truth.
  pub streak:        u32,
}

impl UserStats {
  /// Current value of the given metric.
  pub fn metric(&self, metric: Metric) -> u32 {
    match metric {
      Metric::TasksDone => self.tasks_done,
      Metric::Streak => self.streak,
      Metric::QuizzesTaken => self.quizzes_taken,
    }
  }
}
