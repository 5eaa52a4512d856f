//! The streak calculator — a pure function over a user's active-day set.
//!
//! A streak is the number of consecutive calendar days, ending at today or
//! yesterday, on which the user has at least one activity event of any
//! source. The calculation is lazy: nothing decays on a timer, the walk
//! below is simply re-run against the event log whenever a caller asks.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};

/// Compute the current consecutive-day streak for the given active-day set.
///
/// Grace-day semantics: if nothing has happened yet *today*, a run ending
/// yesterday still counts in full — the streak number does not reset at
/// midnight, only after an entire day is skipped. Callers that render the
/// value live rely on this.
pub fn current_streak(days: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
  let Some(latest) = days.iter().max().copied() else {
    return 0;
  };

  // Most recent activity older than yesterday: the streak is dead.
  if latest < today - Days::new(1) {
    return 0;
  }

  // Anchor on today if it is active, else on yesterday.
  let mut day = if days.contains(&today) {
    today
  } else {
    today - Days::new(1)
  };

  let mut streak = 0;
  while days.contains(&day) {
    streak += 1;
    day = day - Days::new(1);
  }
  streak
}
