//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use geostyle_core::config::{CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Configuration file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "geostyle.toml";

/// Load layered configuration: defaults, file, environment, then CLI flags
pub fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = config_path(cli.config.as_deref()) {
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
    }

    let mut config = config.load_from_env();
    config.update_from_cli(overrides(cli));
    Ok(config)
}

/// Explicit config path, or the default file when it exists
fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.is_file().then_some(default)
        }
    }
}

fn overrides(cli: &Cli) -> CliConfigOverrides {
    CliConfigOverrides {
        theme: cli.theme.map(Into::into),
        asset_dir: cli.asset_dir.clone(),
        id_field: cli.id_field.clone(),
    }
}
