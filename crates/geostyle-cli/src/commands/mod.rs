//! Command implementations

mod check;
mod config;
mod resolve;

use crate::assets::FileAssetResolver;
use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::errors;
use crate::output::OutputWriter;
use anyhow::Result;
use geostyle_core::config::LayeredConfig;
use geostyle_core::models::{LayerOptions, StyleMode};
use geostyle_engine::StyleLayer;
use std::path::Path;
use std::sync::Arc;

/// Execute a CLI command
pub async fn execute(cli: Cli, output: &OutputWriter) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Resolve(args) => resolve::execute(args, &config, output).await,
        Commands::Check(args) => check::execute(args, &config, output).await,
        Commands::Config => config::execute(&config, output),
    }
}

/// Load layer options, filling the identifier field from configuration
fn load_layer_options(path: &Path, command: &str, config: &LayeredConfig) -> Result<LayerOptions> {
    if !path.is_file() {
        return Err(errors::file_not_found("Layer options", path, command).into());
    }
    let mut options =
        LayerOptions::load(path).map_err(|e| errors::invalid_layer_options(path, e))?;

    if options.mode == StyleMode::Data && options.id_field.is_none() {
        options.id_field = config.id_field.value.clone();
    }
    Ok(options)
}

/// Create a layer and apply the options to it
async fn configure_layer(options: LayerOptions, config: &LayeredConfig) -> Result<StyleLayer> {
    let asset_dir = &config.asset_dir.value;
    let layer = StyleLayer::new(Arc::new(FileAssetResolver::new(asset_dir)), config.theme.value);

    layer
        .configure(options)
        .await
        .map_err(|e| errors::style_build_failed(e, asset_dir))?;
    Ok(layer)
}
