use serde::{Deserialize, Serialize};

use super::config::TaskDefinition;

/// One entry of the daily checklist.
///
/// `name` and `reward` are fixed when the session starts; only `completed`
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub(crate) name: String,
    pub(crate) completed: bool,
    pub(crate) reward: u32,
}

impl Task {
    fn from_definition(def: &TaskDefinition) -> Self {
        Self {
            name: def.name.clone(),
            completed: false,
            reward: def.reward,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn reward(&self) -> u32 {
        self.reward
    }
}

/// Where the current daily cycle stands. Derived from the state, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressPhase {
    /// At least one task is still open.
    InProgress,
    /// Every task is checked but the award has not fired yet.
    CompletedUnawarded,
    /// Every task is checked and today's award was already granted.
    CompletedAwarded,
}

/// The whole mutable state of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub(crate) level: u32,
    pub(crate) points: u32,
    pub(crate) tasks: Vec<Task>,
    pub(crate) points_awarded_today: bool,
}

impl ProgressState {
    pub(crate) fn new(definitions: &[TaskDefinition]) -> Self {
        Self {
            level: 1,
            points: 0,
            tasks: definitions.iter().map(Task::from_definition).collect(),
            points_awarded_today: false,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn points_awarded_today(&self) -> bool {
        self.points_awarded_today
    }

    pub fn all_completed(&self) -> bool {
        self.tasks.iter().all(|t| t.completed)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Sum of all task rewards, i.e. what one award grants.
    pub fn reward_total(&self) -> u64 {
        self.tasks.iter().map(|t| u64::from(t.reward)).sum()
    }

    pub fn phase(&self) -> ProgressPhase {
        match (self.all_completed(), self.points_awarded_today) {
            (false, _) => ProgressPhase::InProgress,
            (true, false) => ProgressPhase::CompletedUnawarded,
            (true, true) => ProgressPhase::CompletedAwarded,
        }
    }
}
