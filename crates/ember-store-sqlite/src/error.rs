//! Error type for `ember-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored `day` value is not a valid `YYYY-MM-DD` date. This indicates
  /// corruption, not absence of activity, and aborts the streak computation.
  #[error("invalid stored day value: {0:?}")]
  InvalidStoredDay(String),

  /// A counter or streak write targeted a user with no stats record.
  #[error("user not found: {0}")]
  UserNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
