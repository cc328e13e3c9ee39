//! Drawable styles handed to the rendering backend.

use geostyle_core::models::{Color, TextAlign, TextBaseline};
use geostyle_core::ports::SymbolAsset;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fill {
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// Built-in marker shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    Circle,
    Square,
    Triangle,
    Star,
    Cross,
    X,
}

impl MarkerShape {
    /// Look up a built-in shape by symbol name.
    ///
    /// Accepts bare names and icon-style paths such as
    /// `img/icons/marker/circle.svg`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let name = symbol.rsplit('/').next().unwrap_or(symbol);
        let name = name.strip_suffix(".svg").unwrap_or(name);
        match name.to_lowercase().as_str() {
            "" | "circle" => Some(MarkerShape::Circle),
            "square" => Some(MarkerShape::Square),
            "triangle" => Some(MarkerShape::Triangle),
            "star" => Some(MarkerShape::Star),
            "cross" => Some(MarkerShape::Cross),
            "x" => Some(MarkerShape::X),
            _ => None,
        }
    }

    /// Whether the shape is drawn with strokes only
    pub fn is_stroked(&self) -> bool {
        matches!(self, MarkerShape::Cross | MarkerShape::X)
    }
}

/// Point marker
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Marker {
    Shape {
        shape: MarkerShape,
        radius: f32,
        fill: Option<Fill>,
        stroke: Option<Stroke>,
        rotation: f32,
    },
    Icon {
        asset: SymbolAsset,
        size: f32,
        color: Color,
        rotation: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    pub text: String,
    pub font_size: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub fill: Fill,
    /// Halo drawn behind the glyphs
    pub stroke: Option<Stroke>,
}

/// One drawable style layer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Style {
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
    pub image: Option<Marker>,
    pub text: Option<TextStyle>,
}

/// What a feature is drawn with: one style or several stacked layers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StyleOutput {
    Single(Style),
    Layered(Vec<Style>),
}

impl StyleOutput {
    /// Style layers in draw order
    pub fn layers(&self) -> &[Style] {
        match self {
            StyleOutput::Single(style) => std::slice::from_ref(style),
            StyleOutput::Layered(styles) => styles,
        }
    }

    /// First fill color found across layers
    pub fn fill_color(&self) -> Option<Color> {
        self.layers().iter().find_map(|s| {
            s.fill.as_ref().map(|f| f.color).or_else(|| match &s.image {
                Some(Marker::Shape { fill: Some(fill), .. }) => Some(fill.color),
                Some(Marker::Icon { color, .. }) => Some(*color),
                _ => None,
            })
        })
    }

    /// First stroke color found across layers
    pub fn stroke_color(&self) -> Option<Color> {
        self.layers().iter().find_map(|s| {
            s.stroke.as_ref().map(|st| st.color).or_else(|| match &s.image {
                Some(Marker::Shape { stroke: Some(stroke), .. }) => Some(stroke.color),
                _ => None,
            })
        })
    }

    /// Label text, if any layer carries one
    pub fn text(&self) -> Option<&str> {
        self.layers().iter().find_map(|s| s.text.as_ref().map(|t| t.text.as_str()))
    }
}

/// Shared style; pointer identity tells cached results apart from fresh ones
pub type ResolvedStyle = Arc<StyleOutput>;
