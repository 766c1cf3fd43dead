pub mod config;
pub mod session;
pub mod tasks;

use std::path::{Path, PathBuf};

use anyhow::Result;
use pplan_core::Config;

/// Resolve `--config`, falling back to the per-user location.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(Config::default_path()?),
    }
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = config_path(explicit)?;
    Ok(Config::load_from(&path)?)
}
