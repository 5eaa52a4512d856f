//! Activity events — the fundamental unit of the progression engine.
//!
//! An event records that a user did at least one qualifying action of a
//! given source on a given calendar day. Events are never updated or
//! deleted; the store holds at most one event per `(user, day, source)`,
//! so repeated actions on the same day collapse into a single row.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Source ──────────────────────────────────────────────────────────────────

/// Which kind of activity contributed a day's streak credit.
///
/// Serialised as a bare snake_case string both on the wire and in storage;
/// unrecognised strings round-trip through [`Source::Custom`] so new
/// collaborators can contribute without a core change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
  Task,
  Quiz,
  FocusSession,
  Custom(String),
}

impl Source {
  /// The string stored in the `source` column.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Task => "task",
      Self::Quiz => "quiz",
      Self::FocusSession => "focus_session",
      Self::Custom(s) => s,
    }
  }
}

impl From<String> for Source {
  fn from(s: String) -> Self {
    match s.as_str() {
      "task" => Self::Task,
      "quiz" => Self::Quiz,
      "focus_session" => Self::FocusSession,
      _ => Self::Custom(s),
    }
  }
}

impl From<Source> for String {
  fn from(s: Source) -> Self { s.as_str().to_owned() }
}

// ─── ActivityEvent ───────────────────────────────────────────────────────────

/// A persisted daily activity event. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
  pub event_id:    Uuid,
  pub user_id:     Uuid,
  /// Calendar day, no time component — the unit of streak granularity.
  pub day:         NaiveDate,
  pub source:      Source,
  /// Opaque payload for display/debugging; never read by the calculator.
  pub metadata:    Option<serde_json::Value>,
  /// Server-assigned timestamp; never changes after creation.
  pub recorded_at: DateTime<Utc>,
}

// ─── NewActivityEvent ────────────────────────────────────────────────────────

/// Input to [`crate::store::ProgressionStore::insert_event`].
/// `event_id` and `recorded_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewActivityEvent {
  pub user_id:  Uuid,
  pub day:      NaiveDate,
  pub source:   Source,
  pub metadata: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn source_round_trips_known_tags() {
    for (tag, want) in [
      ("task", Source::Task),
      ("quiz", Source::Quiz),
      ("focus_session", Source::FocusSession),
    ] {
      assert_eq!(Source::from(tag.to_owned()), want);
      assert_eq!(want.as_str(), tag);
    }
  }

  #[test]
  fn source_preserves_unknown_tags() {
    let s = Source::from("reading".to_owned());
    assert_eq!(s, Source::Custom("reading".to_owned()));
    assert_eq!(s.as_str(), "reading");
  }

  #[test]
  fn source_serialises_as_bare_string() {
    let json = serde_json::to_string(&Source::FocusSession).unwrap();
    assert_eq!(json, "\"focus_session\"");
    let back: Source = serde_json::from_str("\"task\"").unwrap();
    assert_eq!(back, Source::Task);
  }
}
