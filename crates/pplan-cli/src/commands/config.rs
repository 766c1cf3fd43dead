use std::path::Path;

use anyhow::{bail, Result};
use clap::Subcommand;
use pplan_core::Config;

use super::{config_path, load_config};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "progress.level_up_threshold", "progress.tasks.0.name")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
    /// Print the config file location
    Path,
}

pub fn run(action: ConfigAction, explicit: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = load_config(explicit)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => bail!("unknown key: {key}"),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = load_config(explicit)?;
            config.set(&key, &value)?;
            config.save_to(&config_path(explicit)?)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = load_config(explicit)?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save_to(&config_path(explicit)?)?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", config_path(explicit)?.display());
        }
    }
    Ok(())
}
