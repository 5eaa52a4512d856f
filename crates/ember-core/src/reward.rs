//! Reward types — definitions, awards, and the derived read models.
//!
//! A reward is a one-time, permanent unlock triggered by a stat crossing a
//! threshold. Definitions are static catalog data; awards are append-only
//! persisted facts and are never revoked, even if the underlying stat
//! (notably the streak) later regresses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::stats::UserStats;

// ─── Condition ───────────────────────────────────────────────────────────────

/// The stat a reward condition is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
  TasksDone,
  Streak,
  QuizzesTaken,
}

/// A reward unlocks once the named metric reaches `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
  pub metric:    Metric,
  pub threshold: u32,
}

impl Condition {
  /// Whether `stats` currently satisfies this condition.
  pub fn is_met(&self, stats: &UserStats) -> bool {
    stats.metric(self.metric) >= self.threshold
  }
}

// ─── Tier ────────────────────────────────────────────────────────────────────

/// Coarse display grouping; carries no behavioural weight.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
  Bronze,
  Silver,
  Gold,
}

// ─── RewardDefinition ────────────────────────────────────────────────────────

/// One entry of the static reward catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardDefinition {
  pub id:          String,
  pub name:        String,
  pub description: String,
  pub icon:        String,
  /// Awarded exactly once, when the condition is first met.
  pub points:      u32,
  pub tier:        Tier,
  pub condition:   Condition,
}

// ─── RewardAward ─────────────────────────────────────────────────────────────

/// The persisted fact that a user earned a reward. At most one exists per
/// `(user_id, reward_id)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardAward {
  pub award_id:  Uuid,
  pub user_id:   Uuid,
  pub reward_id: String,
  pub earned_at: DateTime<Utc>,
}

// ─── Read models ─────────────────────────────────────────────────────────────

/// An award joined with its catalog entry, for client display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarnedReward {
  pub award_id:    Uuid,
  pub reward_id:   String,
  pub name:        String,
  pub description: String,
  pub icon:        String,
  pub points:      u32,
  pub tier:        Tier,
  pub earned_at:   DateTime<Utc>,
}

impl EarnedReward {
  pub fn new(award: RewardAward, def: &RewardDefinition) -> Self {
    Self {
      award_id:    award.award_id,
      reward_id:   award.reward_id,
      name:        def.name.clone(),
      description: def.description.clone(),
      icon:        def.icon.clone(),
      points:      def.points,
      tier:        def.tier,
      earned_at:   award.earned_at,
    }
  }
}

/// Progress towards a single catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardProgress {
  pub reward_id:        String,
  pub name:             String,
  pub description:      String,
  pub icon:             String,
  pub points:           u32,
  pub tier:             Tier,
  /// Current value of the condition's metric.
  pub current:          u32,
  pub threshold:        u32,
  pub earned:           bool,
  /// `min(100, current * 100 / threshold)`; 100 when the threshold is zero.
  pub progress_percent: u32,
}

impl RewardProgress {
  pub fn new(def: &RewardDefinition, current: u32, earned: bool) -> Self {
    let threshold = def.condition.threshold;
    let progress_percent = if threshold == 0 {
      100
    } else {
      (current.saturating_mul(100) / threshold).min(100)
    };
    Self {
      reward_id: def.id.clone(),
      name: def.name.clone(),
      description: def.description.clone(),
      icon: def.icon.clone(),
      points: def.points,
      tier: def.tier,
      current,
      threshold,
      earned,
      progress_percent,
    }
  }
}

/// Everything the progress UI needs in one response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
  pub rewards:      Vec<RewardProgress>,
  pub total_points: u32,
  pub stats:        UserStats,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tiers_order_for_display_grouping() {
    assert!(Tier::Bronze < Tier::Silver);
    assert!(Tier::Silver < Tier::Gold);
  }

  #[test]
  fn progress_percent_caps_at_100() {
    let def = RewardDefinition {
      id:          "streak_3".into(),
      name:        "On Fire".into(),
      description: "Maintain a 3-day streak".into(),
      icon:        "🔥".into(),
      points:      30,
      tier:        Tier::Bronze,
      condition:   Condition { metric: Metric::Streak, threshold: 3 },
    };
    assert_eq!(RewardProgress::new(&def, 0, false).progress_percent, 0);
    assert_eq!(RewardProgress::new(&def, 1, false).progress_percent, 33);
    assert_eq!(RewardProgress::new(&def, 9, true).progress_percent, 100);
  }
}
