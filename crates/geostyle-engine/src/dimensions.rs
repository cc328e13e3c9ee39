//! Per-row color and size values extracted from tabular data.

use geostyle_core::error::Result;
use geostyle_core::models::{
    Color, ColorDimensionConfig, DataFrame, ScaleDimensionConfig, Theme,
};
use serde_json::Value;

/// Per-row colors for one data delivery
#[derive(Debug, Clone, PartialEq)]
pub struct ColorDimension {
    values: Vec<Color>,
    fixed: Color,
}

impl ColorDimension {
    /// Build the color column for a frame.
    ///
    /// Fails only when the configured fixed color cannot be parsed; bad cells
    /// fall back to the fixed color.
    pub fn from_frame(frame: &DataFrame, config: &ColorDimensionConfig, theme: Theme) -> Result<Self> {
        let fixed = Color::parse(&config.fixed, theme)?;

        let field = match config.field.as_deref() {
            Some(name) => frame.field(name),
            None => None,
        };
        let Some(field) = field else {
            if let Some(name) = &config.field {
                tracing::warn!("Color field '{}' not found in data, using fixed color", name);
            }
            return Ok(Self { values: vec![fixed; frame.len()], fixed });
        };

        let values = match field.numeric_range() {
            Some((lo, hi)) => {
                let lo = config.min.unwrap_or(lo);
                let hi = config.max.unwrap_or(hi);
                (0..field.values.len())
                    .map(|row| match field.number_at(row) {
                        Some(v) => config.scheme.color_at(normalize(v, lo, hi), theme),
                        None => fixed,
                    })
                    .collect()
            }
            None => field
                .values
                .iter()
                .map(|cell| match cell {
                    Value::String(s) => Color::parse(s, theme).unwrap_or(fixed),
                    _ => fixed,
                })
                .collect(),
        };

        Ok(Self { values, fixed })
    }

    /// Color for a row; rows past the end get the fixed color
    pub fn get(&self, row: usize) -> Color {
        self.values.get(row).copied().unwrap_or(self.fixed)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Per-row sizes for one data delivery
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleDimension {
    values: Vec<f32>,
    fixed: f32,
}

impl ScaleDimension {
    /// Scale a numeric field linearly from its range onto `[min, max]`.
    ///
    /// Returns None when no field is configured or the frame lacks it.
    pub fn from_frame(frame: &DataFrame, config: &ScaleDimensionConfig) -> Option<Self> {
        let field = frame.field(config.field.as_deref()?)?;
        let (lo, hi) = field.numeric_range().unwrap_or((0.0, 0.0));

        let values = (0..field.values.len())
            .map(|row| match field.number_at(row) {
                Some(v) => {
                    let t = normalize(v, lo, hi) as f32;
                    config.min + (config.max - config.min) * t
                }
                None => config.fixed,
            })
            .collect();

        Some(Self { values, fixed: config.fixed })
    }

    pub fn get(&self, row: usize) -> f32 {
        self.values.get(row).copied().unwrap_or(self.fixed)
    }
}

/// Runtime dimensions attached to the default style in data mode
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDimensions {
    pub color: Option<ColorDimension>,
    pub size: Option<ScaleDimension>,
}

/// Position of `v` in `[lo, hi]`; a degenerate range maps to the middle
fn normalize(v: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        ((v - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.5
    }
}
