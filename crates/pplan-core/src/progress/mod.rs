mod config;
mod state;
mod tracker;

pub use config::{
    ProgressConfig, TaskDefinition, DEFAULT_LEVEL_UP_THRESHOLD, DEFAULT_TASK_REWARD, TASK_COUNT,
};
pub use state::{ProgressPhase, ProgressState, Task};
pub use tracker::{AwardOutcome, ProgressTracker};
