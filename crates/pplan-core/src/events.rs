use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::progress::{ProgressPhase, Task};

/// Every state change in the tracker produces an Event.
/// The shell drains them after each command and renders them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TaskToggled {
        index: usize,
        name: String,
        completed: bool,
        at: DateTime<Utc>,
    },
    /// Every task was checked and today's rewards were granted.
    PointsAwarded {
        points_gained: u64,
        /// Balance after level roll-over.
        points: u32,
        level: u32,
        at: DateTime<Utc>,
    },
    LeveledUp {
        level: u32,
        levels_gained: u32,
        at: DateTime<Utc>,
    },
    DayReset {
        level: u32,
        points: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: ProgressPhase,
        level: u32,
        points: u32,
        threshold: u32,
        points_to_next_level: u32,
        tasks: Vec<Task>,
        points_awarded_today: bool,
        at: DateTime<Utc>,
    },
}
