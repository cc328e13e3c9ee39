use geostyle_core::models::{RenderClass, StyleMode};
use geostyle_engine::{StyleOutput, StyleSource};
use serde::Serialize;
use tabled::Tabled;

/// Output for resolve command
#[derive(Debug, Serialize)]
pub struct ResolveOutput {
    pub feature_count: usize,
    pub styled: usize,
    pub data_bound: usize,
    pub results: Vec<ResolvedFeature>,
}

#[derive(Debug, Serialize)]
pub struct ResolvedFeature {
    pub index: usize,
    pub id: Option<String>,
    pub render_class: RenderClass,
    pub source: StyleSource,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleOutput>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ResolvedRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Class")]
    pub class: String,
    #[tabled(rename = "Source")]
    pub source: String,
    #[tabled(rename = "Fill")]
    pub fill: String,
    #[tabled(rename = "Stroke")]
    pub stroke: String,
    #[tabled(rename = "Text")]
    pub text: String,
}

impl From<&ResolvedFeature> for ResolvedRow {
    fn from(feature: &ResolvedFeature) -> Self {
        let dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        Self {
            index: feature.index,
            id: dash(&feature.id),
            class: format!("{:?}", feature.render_class).to_lowercase(),
            source: describe_source(feature.source),
            fill: dash(&feature.fill),
            stroke: dash(&feature.stroke),
            text: dash(&feature.text),
        }
    }
}

pub fn describe_source(source: StyleSource) -> String {
    match source {
        StyleSource::DataRow(row) => format!("data row {}", row),
        StyleSource::Rule(position) => format!("rule {}", position + 1),
        StyleSource::Default => "default".to_string(),
        StyleSource::Unstyled => "unstyled".to_string(),
    }
}

/// Output for check command
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub mode: StyleMode,
    pub id_field: Option<String>,
    pub default_style: StyleSummary,
    pub rules: Vec<RuleRow>,
}

#[derive(Debug, Serialize)]
pub struct StyleSummary {
    pub color: String,
    pub opacity: f32,
    pub symbol: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct RuleRow {
    #[tabled(rename = "#")]
    pub position: usize,
    #[tabled(rename = "Check")]
    pub check: String,
    #[tabled(rename = "Usable")]
    pub usable: bool,
    #[tabled(rename = "Color")]
    pub color: String,
    #[tabled(rename = "Symbol")]
    pub symbol: String,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub theme: ConfigEntry,
    pub asset_dir: ConfigEntry,
    pub id_field: ConfigEntry,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigEntry {
    pub value: String,
    pub source: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}
