mod config;

pub use config::{Config, UiConfig, MAX_PROGRESS_BAR_WIDTH};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/pplan[-dev]/` based on PPLAN_ENV.
///
/// Set PPLAN_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PPLAN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pplan-dev")
    } else {
        base_dir.join("pplan")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
