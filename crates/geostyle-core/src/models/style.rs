//! Declarative style configuration, as stored in layer options.

use serde::{Deserialize, Serialize};

use super::color::ColorScheme;

pub const DEFAULT_COLOR: &str = "dark-green";
pub const DEFAULT_OPACITY: f32 = 0.4;
pub const DEFAULT_LINE_WIDTH: f32 = 1.0;
pub const DEFAULT_SYMBOL: &str = "circle";

/// Declarative style description for one rule or the layer default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub color: ColorDimensionConfig,
    /// Fill alpha multiplier
    pub opacity: f32,
    pub line_width: f32,
    pub size: ScaleDimensionConfig,
    /// Built-in marker shape name or an icon asset path
    pub symbol: String,
    /// Marker rotation in degrees
    pub rotation: f32,
    pub text: Option<TextDimensionConfig>,
    pub text_config: TextStyleConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color: ColorDimensionConfig::default(),
            opacity: DEFAULT_OPACITY,
            line_width: DEFAULT_LINE_WIDTH,
            size: ScaleDimensionConfig::default(),
            symbol: DEFAULT_SYMBOL.to_string(),
            rotation: 0.0,
            text: None,
            text_config: TextStyleConfig::default(),
        }
    }
}

impl StyleConfig {
    /// Style with a fixed color and every other value defaulted
    pub fn fixed_color(color: impl Into<String>) -> Self {
        Self { color: ColorDimensionConfig::fixed(color), ..Default::default() }
    }

    /// Bind the text label to a feature property
    pub fn with_text_field(mut self, field: impl Into<String>) -> Self {
        self.text = Some(TextDimensionConfig::field(field));
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }
}

/// Color source: fixed, or driven by a tabular data field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorDimensionConfig {
    /// Fixed color, also the fallback for rows without a usable value
    pub fixed: String,
    /// Data field supplying per-row values
    pub field: Option<String>,
    pub scheme: ColorScheme,
    /// Overrides the lower bound of the numeric range
    pub min: Option<f64>,
    /// Overrides the upper bound of the numeric range
    pub max: Option<f64>,
}

impl Default for ColorDimensionConfig {
    fn default() -> Self {
        Self {
            fixed: DEFAULT_COLOR.to_string(),
            field: None,
            scheme: ColorScheme::default(),
            min: None,
            max: None,
        }
    }
}

impl ColorDimensionConfig {
    pub fn fixed(color: impl Into<String>) -> Self {
        Self { fixed: color.into(), ..Default::default() }
    }

    pub fn field(field: impl Into<String>) -> Self {
        Self { field: Some(field.into()), ..Default::default() }
    }
}

/// Size source: fixed, or scaled from a tabular data field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleDimensionConfig {
    pub fixed: f32,
    pub min: f32,
    pub max: f32,
    pub field: Option<String>,
}

impl Default for ScaleDimensionConfig {
    fn default() -> Self {
        Self { fixed: 5.0, min: 2.0, max: 15.0, field: None }
    }
}

/// How the text label is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextMode {
    #[default]
    Fixed,
    /// Label is the value of a feature property
    Field,
    /// Label is a template with `${property}` placeholders
    Template,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TextDimensionConfig {
    pub mode: TextMode,
    /// Fixed label text, or the template in template mode
    pub fixed: Option<String>,
    pub field: Option<String>,
}

impl TextDimensionConfig {
    pub fn fixed(text: impl Into<String>) -> Self {
        Self { mode: TextMode::Fixed, fixed: Some(text.into()), field: None }
    }

    pub fn field(field: impl Into<String>) -> Self {
        Self { mode: TextMode::Field, fixed: None, field: Some(field.into()) }
    }

    pub fn template(template: impl Into<String>) -> Self {
        Self { mode: TextMode::Template, fixed: Some(template.into()), field: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Label placement and font size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyleConfig {
    pub font_size: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl Default for TextStyleConfig {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            offset_x: 0.0,
            offset_y: 0.0,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
        }
    }
}
