//! SQL schema for the Ember SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS user_stats (
    user_id        TEXT PRIMARY KEY,
    created_at     TEXT NOT NULL,
    tasks_done     INTEGER NOT NULL DEFAULT 0,
    quizzes_taken  INTEGER NOT NULL DEFAULT 0,
    streak         INTEGER NOT NULL DEFAULT 0
);

-- Daily activity events are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
-- The unique index is the dedup: inserting a second event for the same
-- (user, day, source) is a conflict, handled with DO NOTHING.
CREATE TABLE IF NOT EXISTS activity_events (
    event_id    TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL REFERENCES user_stats(user_id),
    day         TEXT NOT NULL,   -- calendar date, 'YYYY-MM-DD'
    source      TEXT NOT NULL,   -- 'task' | 'quiz' | 'focus_session' | custom
    metadata    TEXT,            -- JSON payload, informational only
    recorded_at TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    UNIQUE (user_id, day, source)
);

-- Awards are append-only and never revoked.
CREATE TABLE IF NOT EXISTS reward_awards (
    award_id  TEXT PRIMARY KEY,
    user_id   TEXT NOT NULL REFERENCES user_stats(user_id),
    reward_id TEXT NOT NULL,
    earned_at TEXT NOT NULL,
    UNIQUE (user_id, reward_id)
);

CREATE INDEX IF NOT EXISTS activity_events_user_idx ON activity_events(user_id);
CREATE INDEX IF NOT EXISTS reward_awards_user_idx   ON reward_awards(user_id);

PRAGMA user_version = 1;
";
