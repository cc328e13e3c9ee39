use clap::{Parser, Subcommand};
use geostyle_core::models::Theme;
use std::path::PathBuf;

/// GeoStyle - Rule-based and data-bound styling for GeoJSON layers
#[derive(Parser, Debug)]
#[command(name = "geostyle")]
#[command(about = "Rule-based and data-bound styling for GeoJSON layers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./geostyle.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Theme used to resolve named colors
    #[arg(long, global = true)]
    pub theme: Option<ThemeArg>,

    /// Directory icon symbols are resolved against
    #[arg(long, global = true, value_name = "DIR")]
    pub asset_dir: Option<PathBuf>,

    /// Tabular field matched against feature ids in data mode
    #[arg(long, global = true, value_name = "FIELD")]
    pub id_field: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Theme selection
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the style of every feature in a GeoJSON file
    Resolve(ResolveArgs),

    /// Validate layer options and list their rules
    Check(CheckArgs),

    /// Show effective configuration and where each value comes from
    Config,
}

#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// GeoJSON file with the features to style
    pub features: PathBuf,

    /// Layer options file (TOML or JSON)
    #[arg(long, short = 's', value_name = "FILE")]
    pub style: PathBuf,

    /// Tabular data (JSON data frame) for data-bound styling
    #[arg(long, short = 'd', value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Include the full drawable style for each feature
    #[arg(long)]
    pub full: bool,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Layer options file (TOML or JSON)
    pub style: PathBuf,
}
