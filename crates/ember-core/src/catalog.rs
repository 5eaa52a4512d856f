//! The reward catalog — a static, ordered table of reward definitions.
//!
//! The catalog is constructed once at process start and injected into the
//! engine; it is never mutated at runtime. Catalog order is the evaluation
//! order, so reward unlock order is deterministic for a given stat snapshot.

use crate::{
  Error, Result,
  reward::{Condition, Metric, RewardDefinition, Tier},
};

/// An immutable, ordered collection of [`RewardDefinition`]s with unique ids.
#[derive(Debug, Clone)]
pub struct RewardCatalog {
  definitions: Vec<RewardDefinition>,
}

impl RewardCatalog {
  /// Build a catalog from `definitions`, rejecting duplicate ids.
  pub fn new(definitions: Vec<RewardDefinition>) -> Result<Self> {
    let mut seen = std::collections::HashSet::new();
    for def in &definitions {
      if !seen.insert(def.id.as_str()) {
        return Err(Error::DuplicateRewardId(def.id.clone()));
      }
    }
    Ok(Self { definitions })
  }

  /// All definitions, in evaluation order.
  pub fn all(&self) -> &[RewardDefinition] { &self.definitions }

  /// Look up a definition by id.
  pub fn by_id(&self, id: &str) -> Option<&RewardDefinition> {
    self.definitions.iter().find(|d| d.id == id)
  }

  pub fn len(&self) -> usize { self.definitions.len() }

  pub fn is_empty(&self) -> bool { self.definitions.is_empty() }

  /// The built-in catalog: task milestones, streak milestones, and quiz
  /// milestones across bronze/silver/gold tiers.
  pub fn builtin() -> Self {
    let defs = vec![
      def("first_task", "First Step", "Complete your first task", "🎯", 10, Tier::Bronze, Metric::TasksDone, 1),
      def("task_master_5", "Getting Started", "Complete 5 tasks", "⭐", 25, Tier::Bronze, Metric::TasksDone, 5),
      def("task_master_10", "Task Master", "Complete 10 tasks", "🌟", 50, Tier::Silver, Metric::TasksDone, 10),
      def("task_master_25", "Productivity Pro", "Complete 25 tasks", "💫", 100, Tier::Silver, Metric::TasksDone, 25),
      def("task_master_50", "Task Champion", "Complete 50 tasks", "🏆", 200, Tier::Gold, Metric::TasksDone, 50),
      def("task_master_100", "Legendary Achiever", "Complete 100 tasks", "👑", 500, Tier::Gold, Metric::TasksDone, 100),
      def("streak_3", "On Fire", "Maintain a 3-day streak", "🔥", 30, Tier::Bronze, Metric::Streak, 3),
      def("streak_7", "Week Warrior", "Maintain a 7-day streak", "🔥🔥", 75, Tier::Silver, Metric::Streak, 7),
      def("streak_14", "Unstoppable", "Maintain a 14-day streak", "🔥🔥🔥", 150, Tier::Silver, Metric::Streak, 14),
      def("streak_30", "Monthly Master", "Maintain a 30-day streak", "🌋", 300, Tier::Gold, Metric::Streak, 30),
      def("quiz_first", "Quiz Taker", "Complete your first quiz", "📝", 15, Tier::Bronze, Metric::QuizzesTaken, 1),
      def("quiz_5", "Knowledge Seeker", "Complete 5 quizzes", "📚", 50, Tier::Bronze, Metric::QuizzesTaken, 5),
      def("quiz_10", "Quiz Enthusiast", "Complete 10 quizzes", "🎓", 100, Tier::Silver, Metric::QuizzesTaken, 10),
      def("quiz_25", "Scholar", "Complete 25 quizzes", "🏅", 250, Tier::Gold, Metric::QuizzesTaken, 25),
    ];
    // Ids above are distinct by construction.
    Self { definitions: defs }
  }
}

fn def(
  id: &str,
  name: &str,
  description: &str,
  icon: &str,
  points: u32,
  tier: Tier,
  metric: Metric,
  threshold: u32,
) -> RewardDefinition {
  RewardDefinition {
    id: id.to_owned(),
    name: name.to_owned(),
    description: description.to_owned(),
    icon: icon.to_owned(),
    points,
    tier,
    condition: Condition { metric, threshold },
  }
}
