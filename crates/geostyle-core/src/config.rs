use crate::error::{GeostyleError, Result};
use crate::models::Theme;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for GeoStyle
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Theme used to resolve named colors
    pub theme: ConfigValue<Theme>,
    /// Directory icon symbols are resolved against
    pub asset_dir: ConfigValue<PathBuf>,
    /// Identifier field used when layer options do not name one
    pub id_field: ConfigValue<Option<String>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            theme: ConfigValue::new(Theme::Dark, ConfigSource::Default),
            asset_dir: ConfigValue::new(PathBuf::from("assets"), ConfigSource::Default),
            id_field: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeostyleError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeostyleError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(theme) = file_config.theme {
            self.theme.update(theme, ConfigSource::File);
        }

        if let Some(asset_dir) = file_config.asset_dir {
            self.asset_dir.update(asset_dir, ConfigSource::File);
        }

        if let Some(id_field) = file_config.id_field {
            self.id_field.update(Some(id_field), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GEOSTYLE_THEME
        if let Ok(theme_str) = env::var("GEOSTYLE_THEME") {
            match parse_theme(&theme_str) {
                Ok(theme) => self.theme.update(theme, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOSTYLE_THEME value '{}': expected dark or light",
                    theme_str
                ),
            }
        }

        // GEOSTYLE_ASSET_DIR
        if let Ok(asset_dir) = env::var("GEOSTYLE_ASSET_DIR") {
            if asset_dir.trim().is_empty() {
                tracing::warn!("Ignoring empty GEOSTYLE_ASSET_DIR");
            } else {
                self.asset_dir.update(PathBuf::from(asset_dir), ConfigSource::Environment);
            }
        }

        // GEOSTYLE_ID_FIELD
        if let Ok(id_field) = env::var("GEOSTYLE_ID_FIELD") {
            self.id_field.update(Some(id_field), ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(theme) = overrides.theme {
            self.theme.update(theme, ConfigSource::Cli);
        }

        if let Some(asset_dir) = overrides.asset_dir {
            self.asset_dir.update(asset_dir, ConfigSource::Cli);
        }

        if let Some(id_field) = overrides.id_field {
            self.id_field.update(Some(id_field), ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "theme".to_string(),
            (format!("{:?}", self.theme.value).to_lowercase(), self.theme.source),
        );

        map.insert(
            "asset_dir".to_string(),
            (self.asset_dir.value.display().to_string(), self.asset_dir.source),
        );

        map.insert(
            "id_field".to_string(),
            (
                self.id_field.value.clone().unwrap_or_else(|| "(none)".to_string()),
                self.id_field.source,
            ),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    theme: Option<Theme>,
    asset_dir: Option<PathBuf>,
    id_field: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub theme: Option<Theme>,
    pub asset_dir: Option<PathBuf>,
    pub id_field: Option<String>,
}

/// Parse theme from string
pub fn parse_theme(s: &str) -> Result<Theme> {
    match s.trim().to_lowercase().as_str() {
        "dark" => Ok(Theme::Dark),
        "light" => Ok(Theme::Light),
        _ => Err(GeostyleError::ConfigInvalid {
            key: "theme".to_string(),
            reason: format!("Invalid theme: {}. Use dark or light", s),
        }),
    }
}
