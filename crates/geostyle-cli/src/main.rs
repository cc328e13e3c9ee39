//! GeoStyle CLI - Command-line interface
//!
//! Resolves styles for GeoJSON features the way a map layer would and
//! prints them instead of drawing.

mod assets;
mod cli;
mod commands;
mod config_loader;
mod errors;
mod output;
mod output_types;

use clap::Parser;
use cli::Cli;
use errors::CliError;
use output::OutputWriter;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();
    let output = OutputWriter::new(cli.json);

    let result = tokio::runtime::Runtime::new()
        .map_err(anyhow::Error::from)
        .and_then(|runtime| runtime.block_on(commands::execute(cli, &output)));

    if let Err(err) = result {
        match err.downcast_ref::<CliError>() {
            Some(cli_err) if !output.is_json() => cli_err.display(),
            _ => output.error(format!("{:#}", err)),
        }
        std::process::exit(1);
    }
}
