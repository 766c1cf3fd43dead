//! # pplan Core Library
//!
//! Core logic for pplan, a minimal daily plan tracker: check off three small
//! tasks each day, earn points when all of them are done, and level up every
//! time the points cross a threshold.
//!
//! The library holds no session state of its own. A shell (the `pplan` CLI)
//! creates a [`ProgressTracker`], forwards each input event to one command,
//! and renders the resulting state and [`Event`]s.
//!
//! ## Key Components
//!
//! - [`ProgressTracker`]: Daily progress state machine
//! - [`Event`]: Record of every state change, drained by the shell
//! - [`Config`]: TOML configuration (threshold, task definitions, display)

pub mod error;
pub mod events;
pub mod progress;
pub mod storage;

pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use progress::{
    AwardOutcome, ProgressConfig, ProgressPhase, ProgressState, ProgressTracker, Task,
    TaskDefinition,
};
pub use storage::{Config, UiConfig};
