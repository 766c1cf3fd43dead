//! Daily progress state machine.
//!
//! The tracker owns one session's [`ProgressState`]. It has no clock and no
//! background work: the shell forwards each input event to exactly one
//! command and re-renders afterwards.
//!
//! ## State Transitions
//!
//! ```text
//! InProgress -> CompletedUnawarded -> CompletedAwarded -> (reset_day) -> InProgress
//! ```
//!
//! Unchecking a task after the award moves back to `InProgress` without
//! clearing the award flag; only `reset_day()` does that.
//!
//! ## Usage
//!
//! ```ignore
//! let mut tracker = ProgressTracker::new(&ProgressConfig::default())?;
//! tracker.toggle_task(0, true)?;
//! let outcome = tracker.check_completion_and_award();
//! for event in tracker.drain_events() { /* render */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::ProgressConfig;
use super::state::{ProgressPhase, ProgressState};
use crate::error::{ConfigError, CoreError, ValidationError};
use crate::events::Event;

/// Result of one `check_completion_and_award()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardOutcome {
    /// Whether this call granted today's award.
    pub awarded: bool,
    pub points_gained: u64,
    /// Levels actually added. The level caps at `u32::MAX`; levels earned
    /// beyond the cap are dropped and not counted here.
    pub levels_gained: u32,
    pub leveled_up: bool,
    /// Level after the call, whether or not it changed.
    pub new_level: u32,
}

impl AwardOutcome {
    fn unchanged(level: u32) -> Self {
        Self {
            awarded: false,
            points_gained: 0,
            levels_gained: 0,
            leveled_up: false,
            new_level: level,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProgressTracker {
    threshold: u32,
    state: ProgressState,
    /// Events produced since the last `drain_events()`.
    pending: Vec<Event>,
}

impl ProgressTracker {
    /// Start a session at level 1 with zero points and every task open.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`ProgressConfig::validate`].
    pub fn new(config: &ProgressConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            threshold: config.level_up_threshold,
            state: ProgressState::new(&config.tasks),
            pending: Vec::new(),
        })
    }

    /// Start a session from an existing level and point balance.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid, `level` is 0, or `points`
    /// is not below the level-up threshold.
    pub fn with_progress(
        config: &ProgressConfig,
        level: u32,
        points: u32,
    ) -> Result<Self, CoreError> {
        let mut tracker = Self::new(config)?;
        if level == 0 {
            return Err(ValidationError::InvalidValue {
                field: "level".into(),
                message: "must be at least 1".into(),
            }
            .into());
        }
        if points >= tracker.threshold {
            return Err(ValidationError::InvalidValue {
                field: "points".into(),
                message: format!(
                    "must be below the level-up threshold ({})",
                    tracker.threshold
                ),
            }
            .into());
        }
        tracker.state.level = level;
        tracker.state.points = points;
        Ok(tracker)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn phase(&self) -> ProgressPhase {
        self.state.phase()
    }

    pub fn points_to_next_level(&self) -> u32 {
        self.threshold - self.state.points
    }

    /// 0.0 .. 1.0 progress within the current level.
    pub fn level_progress(&self) -> f64 {
        f64::from(self.state.points) / f64::from(self.threshold)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.state.phase(),
            level: self.state.level,
            points: self.state.points,
            threshold: self.threshold,
            points_to_next_level: self.points_to_next_level(),
            tasks: self.state.tasks.clone(),
            points_awarded_today: self.state.points_awarded_today,
            at: Utc::now(),
        }
    }

    /// Take every event produced since the previous call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Check or uncheck a task. Never touches points or level.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::OutOfBounds` if `index` does not name a task;
    /// the state is left unchanged.
    pub fn toggle_task(&mut self, index: usize, value: bool) -> Result<(), ValidationError> {
        let len = self.state.tasks.len();
        let Some(task) = self.state.tasks.get_mut(index) else {
            warn!(index, len, "rejected toggle for unknown task");
            return Err(ValidationError::OutOfBounds {
                collection: "tasks".into(),
                index,
                len,
            });
        };

        task.completed = value;
        debug!(index, completed = value, task = %task.name, "task toggled");
        self.pending.push(Event::TaskToggled {
            index,
            name: task.name.clone(),
            completed: value,
            at: Utc::now(),
        });
        Ok(())
    }

    /// Grant today's award if every task is checked and it has not fired yet.
    ///
    /// Safe to call after every toggle: once the award fires, further calls
    /// are no-ops until `reset_day()`.
    ///
    /// The level saturates at `u32::MAX`, so point totals are only conserved
    /// below that cap.
    pub fn check_completion_and_award(&mut self) -> AwardOutcome {
        if self.state.phase() != ProgressPhase::CompletedUnawarded {
            return AwardOutcome::unchanged(self.state.level);
        }

        let gained = self.state.reward_total();
        let threshold = u64::from(self.threshold);
        let total = u64::from(self.state.points) + gained;
        let earned_levels = u32::try_from(total / threshold).unwrap_or(u32::MAX);
        let level = self.state.level.saturating_add(earned_levels);
        let levels_gained = level - self.state.level;

        self.state.points = (total % threshold) as u32;
        self.state.level = level;
        self.state.points_awarded_today = true;

        let now = Utc::now();
        info!(
            gained,
            points = self.state.points,
            level = self.state.level,
            "daily tasks completed, points awarded"
        );
        self.pending.push(Event::PointsAwarded {
            points_gained: gained,
            points: self.state.points,
            level: self.state.level,
            at: now,
        });

        let leveled_up = levels_gained > 0;
        if leveled_up {
            info!(level = self.state.level, levels_gained, "level up");
            self.pending.push(Event::LeveledUp {
                level: self.state.level,
                levels_gained,
                at: now,
            });
        }

        AwardOutcome {
            awarded: true,
            points_gained: gained,
            levels_gained,
            leveled_up,
            new_level: self.state.level,
        }
    }

    /// Start a new daily cycle. Points and level carry over.
    pub fn reset_day(&mut self) {
        for task in &mut self.state.tasks {
            task.completed = false;
        }
        self.state.points_awarded_today = false;
        debug!(
            level = self.state.level,
            points = self.state.points,
            "day reset"
        );
        self.pending.push(Event::DayReset {
            level: self.state.level,
            points: self.state.points,
            at: Utc::now(),
        });
    }
}
