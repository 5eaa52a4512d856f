//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, days as `YYYY-MM-DD`, UUIDs as
//! hyphenated lowercase strings, and event metadata as compact JSON.

use chrono::{DateTime, NaiveDate, Utc};
use ember_core::{reward::RewardAward, stats::UserStats};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DAY_FORMAT: &str = "%Y-%m-%d";

pub fn encode_day(day: NaiveDate) -> String {
  day.format(DAY_FORMAT).to_string()
}

/// Decode a stored day column. Failure here is data corruption, not absence
/// of activity, and must abort the computation that needed the value.
pub fn decode_day(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DAY_FORMAT)
    .map_err(|_| Error::InvalidStoredDay(s.to_owned()))
}

// ─── Raw row types ───────────────────────────────────────────────────────────

/// A `user_stats` row as read from SQLite, before decoding.
pub struct RawStats {
  pub user_id:       String,
  pub created_at:    String,
  pub tasks_done:    u32,
  pub quizzes_taken: u32,
  pub streak:        u32,
}

impl RawStats {
  pub fn into_stats(self) -> Result<UserStats> {
    Ok(UserStats {
      user_id:       decode_uuid(&self.user_id)?,
      created_at:    decode_dt(&self.created_at)?,
      tasks_done:    self.tasks_done,
      quizzes_taken: self.quizzes_taken,
      streak:        self.streak,
    })
  }
}

/// A `reward_awards` row as read from SQLite, before decoding.
pub struct RawAward {
  pub award_id:  String,
  pub user_id:   String,
  pub reward_id: String,
  pub earned_at: String,
}

impl RawAward {
  pub fn into_award(self) -> Result<RewardAward> {
    Ok(RewardAward {
      award_id:  decode_uuid(&self.award_id)?,
      user_id:   decode_uuid(&self.user_id)?,
      reward_id: self.reward_id,
      earned_at: decode_dt(&self.earned_at)?,
    })
  }
}
