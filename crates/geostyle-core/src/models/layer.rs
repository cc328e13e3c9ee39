use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GeostyleError, Result};

use super::rule::FeatureStyleConfig;
use super::style::StyleConfig;

/// How features pick their style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    /// Ordered rule list with a default fallback
    #[default]
    Rules,
    /// Per-row values from tabular data, joined by identifier
    Data,
}

/// Options the layer editor produces for one GeoJSON layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LayerOptions {
    /// GeoJSON source location
    pub src: Option<String>,
    /// Default style, used when no rule matches
    pub style: StyleConfig,
    pub mode: StyleMode,
    /// Tabular field whose values match feature identifiers
    pub id_field: Option<String>,
    /// Rules, evaluated in order; the first match wins
    pub rules: Vec<FeatureStyleConfig>,
}

impl LayerOptions {
    /// Load options from a TOML or JSON file, chosen by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            serde_json::from_str(&content).map_err(|e| GeostyleError::ConfigInvalid {
                key: "layer".to_string(),
                reason: format!("Failed to parse JSON: {}", e),
            })
        } else {
            toml::from_str(&content).map_err(|e| GeostyleError::ConfigInvalid {
                key: "layer".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })
        }
    }

    /// Identifier field effective in data mode
    pub fn data_id_field(&self) -> Option<&str> {
        match self.mode {
            StyleMode::Data => self.id_field.as_deref().filter(|f| !f.is_empty()),
            StyleMode::Rules => None,
        }
    }
}
