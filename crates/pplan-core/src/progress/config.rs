//! Recognized progress options: level-up threshold and task definitions.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Points needed to gain one level.
pub const DEFAULT_LEVEL_UP_THRESHOLD: u32 = 100;
/// Points granted by each default task.
pub const DEFAULT_TASK_REWARD: u32 = 30;
/// The daily checklist always has this many tasks.
pub const TASK_COUNT: usize = 3;

/// Configuration-side description of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinition {
    pub name: String,
    #[serde(default = "default_task_reward")]
    pub reward: u32,
}

impl TaskDefinition {
    pub fn new(name: impl Into<String>, reward: u32) -> Self {
        Self {
            name: name.into(),
            reward,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default = "default_level_up_threshold")]
    pub level_up_threshold: u32,
    #[serde(default = "default_tasks")]
    pub tasks: Vec<TaskDefinition>,
}

fn default_level_up_threshold() -> u32 {
    DEFAULT_LEVEL_UP_THRESHOLD
}
fn default_task_reward() -> u32 {
    DEFAULT_TASK_REWARD
}
fn default_tasks() -> Vec<TaskDefinition> {
    vec![
        TaskDefinition::new("Read 10 pages 📖", DEFAULT_TASK_REWARD),
        TaskDefinition::new("Walk or work out for 20 minutes 👟", DEFAULT_TASK_REWARD),
        TaskDefinition::new("Pick one thing to do tomorrow 🤔", DEFAULT_TASK_REWARD),
    ]
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            level_up_threshold: default_level_up_threshold(),
            tasks: default_tasks(),
        }
    }
}

impl ProgressConfig {
    /// Check the options a tracker can be built from.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero threshold, a task list
    /// that is not exactly [`TASK_COUNT`] long, a blank task name, or a zero
    /// reward.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level_up_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                key: "progress.level_up_threshold".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.tasks.len() != TASK_COUNT {
            return Err(ConfigError::InvalidValue {
                key: "progress.tasks".into(),
                message: format!(
                    "expected exactly {TASK_COUNT} tasks, found {}",
                    self.tasks.len()
                ),
            });
        }
        for (i, task) in self.tasks.iter().enumerate() {
            if task.name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: format!("progress.tasks.{i}.name"),
                    message: "must not be empty".into(),
                });
            }
            if task.reward == 0 {
                return Err(ConfigError::InvalidValue {
                    key: format!("progress.tasks.{i}.reward"),
                    message: "must be greater than 0".into(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = ProgressConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.level_up_threshold, 100);
        assert_eq!(cfg.tasks.len(), 3);
        assert!(cfg.tasks.iter().all(|t| t.reward == 30));
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let cfg = ProgressConfig {
            level_up_threshold: 0,
            ..ProgressConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("progress.level_up_threshold"));
    }

    #[test]
    fn wrong_task_count_is_rejected() {
        let mut cfg = ProgressConfig::default();
        cfg.tasks.pop();
        assert!(cfg.validate().is_err());

        let mut cfg = ProgressConfig::default();
        cfg.tasks.push(TaskDefinition::new("Fourth", 10));
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn blank_name_and_zero_reward_are_rejected() {
        let mut cfg = ProgressConfig::default();
        cfg.tasks[1].name = "   ".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("progress.tasks.1.name"));

        let mut cfg = ProgressConfig::default();
        cfg.tasks[2].reward = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("progress.tasks.2.reward"));
    }

    #[test]
    fn missing_reward_uses_default() {
        let cfg: ProgressConfig = toml::from_str(
            r#"
            level_up_threshold = 50

            [[tasks]]
            name = "a"

            [[tasks]]
            name = "b"
            reward = 5

            [[tasks]]
            name = "c"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.level_up_threshold, 50);
        assert_eq!(cfg.tasks[0].reward, DEFAULT_TASK_REWARD);
        assert_eq!(cfg.tasks[1].reward, 5);
    }
}
