//! Engine tests against the in-memory SQLite store, with a fixed clock so
//! day-boundary behaviour is deterministic.

use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use ember_core::{
  catalog::RewardCatalog,
  event::{NewActivityEvent, Source},
  reward::{Condition, Metric, RewardDefinition, Tier},
  store::ProgressionStore,
};
use ember_store_sqlite::SqliteStore;
use uuid::Uuid;

use crate::{Error, Progression};

fn fixed_today() -> NaiveDate {
  NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

async fn engine() -> (Progression<SqliteStore>, Arc<SqliteStore>) {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  let progression = Progression::with_clock(
    Arc::clone(&store),
    RewardCatalog::builtin(),
    fixed_today,
  );
  (progression, store)
}

async fn user(p: &Progression<SqliteStore>) -> Uuid {
  let id = Uuid::new_v4();
  p.create_stats(id).await.unwrap();
  id
}

/// Seed an event `days_ago` days before the fixed today, bypassing the
/// facade's clock.
async fn seed_event(store: &SqliteStore, user_id: Uuid, days_ago: u64) {
  let created = store
    .insert_event(NewActivityEvent {
      user_id,
      day: fixed_today() - Days::new(days_ago),
      source: Source::Task,
      metadata: None,
    })
    .await
    .unwrap();
  assert!(created);
}

// ─── record_activity ─────────────────────────────────────────────────────────

#[tokio::test]
async fn record_activity_unknown_user_is_not_found() {
  let (p, _) = engine().await;
  let err = p
    .record_activity(Uuid::new_v4(), Source::Task, None)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::UserNotFound(_)));
}

#[tokio::test]
async fn record_activity_starts_a_streak_of_one() {
  let (p, _) = engine().await;
  let id = user(&p).await;

  let outcome = p.record_activity(id, Source::Task, None).await.unwrap();
  assert!(outcome.created);
  assert_eq!(outcome.streak, 1);

  // The new streak is written back to the stats record.
  assert_eq!(p.stats(id).await.unwrap().streak, 1);
}

#[tokio::test]
async fn record_activity_twice_same_day_is_idempotent() {
  let (p, store) = engine().await;
  let id = user(&p).await;

  let first = p.record_activity(id, Source::Task, None).await.unwrap();
  let second = p.record_activity(id, Source::Task, None).await.unwrap();

  assert!(first.created);
  assert!(!second.created);
  assert_eq!(first.streak, second.streak);
  assert_eq!(store.event_days(id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn record_activity_continues_yesterdays_run() {
  let (p, store) = engine().await;
  let id = user(&p).await;
  seed_event(&store, id, 1).await;
  seed_event(&store, id, 2).await;

  let outcome = p.record_activity(id, Source::Quiz, None).await.unwrap();
  assert_eq!(outcome.streak, 3);
}

#[tokio::test]
async fn record_activity_accepts_opaque_metadata() {
  let (p, _) = engine().await;
  let id = user(&p).await;

  let outcome = p
    .record_activity(
      id,
      Source::Quiz,
      Some(serde_json::json!({ "score": 7, "total": 10 })),
    )
    .await
    .unwrap();
  assert!(outcome.created);
}

// ─── current_streak (lazy read) ──────────────────────────────────────────────

#[tokio::test]
async fn streak_is_zero_with_no_events() {
  let (p, _) = engine().await;
  let id = user(&p).await;
  assert_eq!(p.current_streak(id).await.unwrap(), 0);
}

#[tokio::test]
async fn streak_survives_the_grace_day() {
  let (p, store) = engine().await;
  let id = user(&p).await;
  seed_event(&store, id, 1).await;
  seed_event(&store, id, 2).await;
  seed_event(&store, id, 3).await;

  // Nothing has happened today, but the run through yesterday still counts.
  assert_eq!(p.current_streak(id).await.unwrap(), 3);
}

#[tokio::test]
async fn streak_dies_after_a_full_skipped_day() {
  let (p, store) = engine().await;
  let id = user(&p).await;
  seed_event(&store, id, 2).await;

  assert_eq!(p.current_streak(id).await.unwrap(), 0);
}

#[tokio::test]
async fn current_streak_does_not_write_back() {
  let (p, store) = engine().await;
  let id = user(&p).await;
  seed_event(&store, id, 1).await;

  assert_eq!(p.current_streak(id).await.unwrap(), 1);
  // The cached value stays whatever it was (zero here); only
  // record_activity refreshes it.
  assert_eq!(p.stats(id).await.unwrap().streak, 0);
}

// ─── check_and_award ─────────────────────────────────────────────────────────

#[tokio::test]
async fn check_and_award_unknown_user_is_not_found() {
  let (p, _) = engine().await;
  let err = p.check_and_award(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::UserNotFound(_)));
}

#[tokio::test]
async fn first_task_grants_exactly_one_reward() {
  let (p, _) = engine().await;
  let id = user(&p).await;
  p.increment_tasks_done(id).await.unwrap();

  let granted = p.check_and_award(id).await.unwrap();
  assert_eq!(granted.len(), 1);
  assert_eq!(granted[0].id, "first_task");
  assert_eq!(granted[0].points, 10);
  assert_eq!(granted[0].tier, Tier::Bronze);
}

#[tokio::test]
async fn rewards_are_granted_at_most_once() {
  let (p, _) = engine().await;
  let id = user(&p).await;
  p.increment_tasks_done(id).await.unwrap();

  let first = p.check_and_award(id).await.unwrap();
  let second = p.check_and_award(id).await.unwrap();

  assert_eq!(first.len(), 1);
  assert!(second.is_empty());
}

#[tokio::test]
async fn streak_reward_unlocks_from_recorded_activity() {
  let (p, store) = engine().await;
  let id = user(&p).await;
  seed_event(&store, id, 1).await;
  seed_event(&store, id, 2).await;
  p.record_activity(id, Source::Task, None).await.unwrap();

  let granted = p.check_and_award(id).await.unwrap();
  let ids: Vec<_> = granted.iter().map(|d| d.id.as_str()).collect();
  assert_eq!(ids, vec!["streak_3"]);
}

#[tokio::test]
async fn crossing_several_thresholds_grants_all_in_catalog_order() {
  let (p, _) = engine().await;
  let id = user(&p).await;
  for _ in 0..5 {
    p.increment_tasks_done(id).await.unwrap();
  }

  let granted = p.check_and_award(id).await.unwrap();
  let ids: Vec<_> = granted.iter().map(|d| d.id.as_str()).collect();
  assert_eq!(ids, vec!["first_task", "task_master_5"]);
}

#[tokio::test]
async fn a_regressed_streak_does_not_revoke_rewards() {
  let (p, store) = engine().await;
  let id = user(&p).await;

  // Earn streak_3 the honest way, then let the streak die.
  seed_event(&store, id, 1).await;
  seed_event(&store, id, 2).await;
  p.record_activity(id, Source::Task, None).await.unwrap();
  assert_eq!(p.check_and_award(id).await.unwrap().len(), 1);

  store.set_streak(id, 0).await.unwrap();

  // The award is a historical fact; nothing is re-granted either.
  assert!(p.check_and_award(id).await.unwrap().is_empty());
  assert_eq!(p.total_points(id).await.unwrap(), 30);
}

#[tokio::test]
async fn injected_catalog_drives_evaluation() {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  let catalog = RewardCatalog::new(vec![RewardDefinition {
    id:          "tiny".into(),
    name:        "Tiny".into(),
    description: "Synthetic threshold".into(),
    icon:        "·".into(),
    points:      1,
    tier:        Tier::Bronze,
    condition:   Condition { metric: Metric::QuizzesTaken, threshold: 2 },
  }])
  .unwrap();
  let p = Progression::with_clock(Arc::clone(&store), catalog, fixed_today);

  let id = user(&p).await;
  p.increment_quizzes_taken(id).await.unwrap();
  assert!(p.check_and_award(id).await.unwrap().is_empty());

  p.increment_quizzes_taken(id).await.unwrap();
  let granted = p.check_and_award(id).await.unwrap();
  assert_eq!(granted.len(), 1);
  assert_eq!(granted[0].id, "tiny");
}

// ─── Read models ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn total_points_matches_earned_rewards() {
  let (p, _) = engine().await;
  let id = user(&p).await;
  p.increment_tasks_done(id).await.unwrap();
  p.increment_quizzes_taken(id).await.unwrap();
  p.check_and_award(id).await.unwrap();

  let earned = p.earned_rewards(id).await.unwrap();
  let sum: u32 = earned.iter().map(|r| r.points).sum();
  assert_eq!(p.total_points(id).await.unwrap(), sum);
  // first_task (10) + quiz_first (15)
  assert_eq!(sum, 25);
}

#[tokio::test]
async fn earned_rewards_carry_catalog_fields() {
  let (p, _) = engine().await;
  let id = user(&p).await;
  p.increment_tasks_done(id).await.unwrap();
  p.check_and_award(id).await.unwrap();

  let earned = p.earned_rewards(id).await.unwrap();
  assert_eq!(earned.len(), 1);
  assert_eq!(earned[0].reward_id, "first_task");
  assert_eq!(earned[0].name, "First Step");
  assert_eq!(earned[0].icon, "🎯");
  assert_eq!(earned[0].tier, Tier::Bronze);
}

#[tokio::test]
async fn orphaned_award_rows_are_skipped_not_fatal() {
  let (p, store) = engine().await;
  let id = user(&p).await;
  store
    .insert_award(id, "retired_reward".into(), Utc::now())
    .await
    .unwrap();

  assert!(p.earned_rewards(id).await.unwrap().is_empty());
  assert_eq!(p.total_points(id).await.unwrap(), 0);
}

#[tokio::test]
async fn progress_reports_every_catalog_entry() {
  let (p, _) = engine().await;
  let id = user(&p).await;
  p.increment_tasks_done(id).await.unwrap();
  p.check_and_award(id).await.unwrap();

  let report = p.progress(id).await.unwrap();
  assert_eq!(report.rewards.len(), p.catalog().len());
  assert_eq!(report.total_points, 10);
  assert_eq!(report.stats.tasks_done, 1);

  let first = report
    .rewards
    .iter()
    .find(|r| r.reward_id == "first_task")
    .unwrap();
  assert!(first.earned);
  assert_eq!(first.current, 1);
  assert_eq!(first.progress_percent, 100);

  let five = report
    .rewards
    .iter()
    .find(|r| r.reward_id == "task_master_5")
    .unwrap();
  assert!(!five.earned);
  assert_eq!(five.current, 1);
  assert_eq!(five.threshold, 5);
  assert_eq!(five.progress_percent, 20);
}

#[tokio::test]
async fn progress_unknown_user_is_not_found() {
  let (p, _) = engine().await;
  let err = p.progress(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::UserNotFound(_)));
}
