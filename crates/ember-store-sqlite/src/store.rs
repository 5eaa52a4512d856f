//! [`SqliteStore`] — the SQLite implementation of [`ProgressionStore`].

use std::{collections::HashSet, path::Path};

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use ember_core::{
  event::NewActivityEvent,
  reward::RewardAward,
  stats::UserStats,
  store::ProgressionStore,
};

use crate::{
  Error, Result,
  encode::{RawAward, RawStats, decode_day, encode_day, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A progression store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Read a `user_stats` row, undecoded.
  async fn raw_stats(&self, user_id: Uuid) -> Result<Option<RawStats>> {
    let id_str = encode_uuid(user_id);

    let raw: Option<RawStats> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT user_id, created_at, tasks_done, quizzes_taken, streak
             FROM user_stats WHERE user_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawStats {
                user_id:       row.get(0)?,
                created_at:    row.get(1)?,
                tasks_done:    row.get(2)?,
                quizzes_taken: row.get(3)?,
                streak:        row.get(4)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    Ok(raw)
  }

  /// Run `UPDATE user_stats SET <column> = <column> + 1` and return the
  /// updated record. The column name is compiled in by the two callers.
  async fn increment_counter(
    &self,
    user_id: Uuid,
    column: &'static str,
  ) -> Result<UserStats> {
    let id_str = encode_uuid(user_id);

    let changed: usize = self
      .conn
      .call(move |conn| {
        let sql =
          format!("UPDATE user_stats SET {column} = {column} + 1 WHERE user_id = ?1");
        Ok(conn.execute(&sql, rusqlite::params![id_str])?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::UserNotFound(user_id));
    }

    self
      .raw_stats(user_id)
      .await?
      .ok_or(Error::UserNotFound(user_id))?
      .into_stats()
  }
}

// ─── ProgressionStore impl ───────────────────────────────────────────────────

impl ProgressionStore for SqliteStore {
  type Error = Error;

  // ── Stats ─────────────────────────────────────────────────────────────────

  async fn create_stats(&self, user_id: Uuid) -> Result<UserStats> {
    let id_str = encode_uuid(user_id);
    let at_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO user_stats (user_id, created_at, tasks_done, quizzes_taken, streak)
           VALUES (?1, ?2, 0, 0, 0)
           ON CONFLICT (user_id) DO NOTHING",
          rusqlite::params![id_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    self
      .raw_stats(user_id)
      .await?
      .ok_or(Error::UserNotFound(user_id))?
      .into_stats()
  }

  async fn stats(&self, user_id: Uuid) -> Result<Option<UserStats>> {
    self
      .raw_stats(user_id)
      .await?
      .map(RawStats::into_stats)
      .transpose()
  }

  async fn increment_tasks_done(&self, user_id: Uuid) -> Result<UserStats> {
    self.increment_counter(user_id, "tasks_done").await
  }

  async fn increment_quizzes_taken(&self, user_id: Uuid) -> Result<UserStats> {
    self.increment_counter(user_id, "quizzes_taken").await
  }

  async fn set_streak(&self, user_id: Uuid, streak: u32) -> Result<()> {
    let id_str = encode_uuid(user_id);

    let changed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE user_stats SET streak = ?2 WHERE user_id = ?1",
          rusqlite::params![id_str, streak],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::UserNotFound(user_id));
    }
    Ok(())
  }

  // ── Events — append-only writes ───────────────────────────────────────────

  async fn insert_event(&self, input: NewActivityEvent) -> Result<bool> {
    let event_id_str    = encode_uuid(Uuid::new_v4());
    let user_id_str     = encode_uuid(input.user_id);
    let day_str         = encode_day(input.day);
    let source_str      = input.source.as_str().to_owned();
    let metadata_str    = input
      .metadata
      .as_ref()
      .map(serde_json::to_string)
      .transpose()?;
    let recorded_at_str = encode_dt(Utc::now());

    // The unique index on (user_id, day, source) is the dedup; DO NOTHING
    // turns the conflict into "0 rows changed" without an error.
    let changed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO activity_events
             (event_id, user_id, day, source, metadata, recorded_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)
           ON CONFLICT (user_id, day, source) DO NOTHING",
          rusqlite::params![
            event_id_str,
            user_id_str,
            day_str,
            source_str,
            metadata_str,
            recorded_at_str,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      tracing::debug!(user_id = %input.user_id, day = %input.day,
        source = input.source.as_str(), "duplicate activity event ignored");
    }

    Ok(changed > 0)
  }

  async fn event_days(&self, user_id: Uuid) -> Result<Vec<NaiveDate>> {
    let id_str = encode_uuid(user_id);

    let day_strings: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT DISTINCT day FROM activity_events WHERE user_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    day_strings.iter().map(|s| decode_day(s)).collect()
  }

  // ── Awards — append-only writes ───────────────────────────────────────────

  async fn insert_award(
    &self,
    user_id: Uuid,
    reward_id: String,
    earned_at: DateTime<Utc>,
  ) -> Result<bool> {
    let award_id_str  = encode_uuid(Uuid::new_v4());
    let user_id_str   = encode_uuid(user_id);
    let earned_at_str = encode_dt(earned_at);

    // First writer wins: a concurrent duplicate lands on the unique index
    // and reports 0 rows changed.
    let changed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO reward_awards (award_id, user_id, reward_id, earned_at)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (user_id, reward_id) DO NOTHING",
          rusqlite::params![award_id_str, user_id_str, reward_id, earned_at_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn awarded_ids(&self, user_id: Uuid) -> Result<HashSet<String>> {
    let id_str = encode_uuid(user_id);

    let ids: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn
          .prepare("SELECT reward_id FROM reward_awards WHERE user_id = ?1")?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(ids.into_iter().collect())
  }

  async fn awards(&self, user_id: Uuid) -> Result<Vec<RewardAward>> {
    let id_str = encode_uuid(user_id);

    let raws: Vec<RawAward> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT award_id, user_id, reward_id, earned_at
           FROM reward_awards WHERE user_id = ?1
           ORDER BY earned_at, reward_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| {
            Ok(RawAward {
              award_id:  row.get(0)?,
              user_id:   row.get(1)?,
              reward_id: row.get(2)?,
              earned_at: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAward::into_award).collect()
  }
}
