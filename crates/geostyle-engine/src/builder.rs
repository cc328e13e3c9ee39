//! Turns declarative style configuration into render-ready style state.

use async_trait::async_trait;
use futures::future::try_join_all;
use geostyle_core::error::{GeostyleError, Result};
use geostyle_core::models::{
    value_to_string, Color, Feature, RenderClass, StyleConfig, TextMode, TextStyleConfig, Theme,
};
use geostyle_core::ports::{AssetResolver, SymbolAsset};
use std::collections::HashMap;
use std::sync::Arc;

use crate::dimensions::StyleDimensions;
use crate::style::{Fill, Marker, MarkerShape, Stroke, Style, StyleOutput, TextStyle};

/// Flattened static values a style is built from
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfigValues {
    pub color: Color,
    /// Outline color; falls back to `color`
    pub stroke: Option<Color>,
    pub opacity: f32,
    pub line_width: f32,
    pub size: f32,
    pub rotation: f32,
    pub text: Option<String>,
    pub text_config: TextStyleConfig,
}

/// Text label bound to feature content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextBinding {
    /// Label is the value of one property
    Field(String),
    /// Label renders `${property}` placeholders
    Template(String),
}

impl TextBinding {
    /// Label for a feature; None when the bound property is missing
    pub fn render(&self, feature: &Feature) -> Option<String> {
        match self {
            TextBinding::Field(name) => feature.get(name).map(value_to_string),
            TextBinding::Template(template) => Some(render_template(template, feature)),
        }
    }
}

/// Attributes that depend on each feature rather than on the rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConfigFields {
    pub text: TextBinding,
}

/// Factory turning values into drawable styles, one function per render class
#[derive(Debug, Clone, PartialEq)]
pub enum StyleMaker {
    Shape(MarkerShape),
    Icon(SymbolAsset),
}

impl StyleMaker {
    pub fn make(&self, class: RenderClass, values: &StyleConfigValues) -> StyleOutput {
        match class {
            RenderClass::Point => self.point_style(values),
            RenderClass::Shape => poly_style(values),
        }
    }

    fn point_style(&self, values: &StyleConfigValues) -> StyleOutput {
        let stroke_color = values.stroke.unwrap_or(values.color);
        match self {
            StyleMaker::Shape(shape) => {
                let (fill, stroke) = if shape.is_stroked() {
                    (None, Some(Stroke { color: stroke_color, width: values.line_width.max(1.0) }))
                } else {
                    (
                        Some(Fill { color: values.color.with_opacity(values.opacity) }),
                        Some(Stroke { color: stroke_color, width: values.line_width }),
                    )
                };
                StyleOutput::Single(Style {
                    image: Some(Marker::Shape {
                        shape: *shape,
                        radius: values.size,
                        fill,
                        stroke,
                        rotation: values.rotation,
                    }),
                    text: text_style(values),
                    ..Default::default()
                })
            }
            StyleMaker::Icon(asset) => StyleOutput::Layered(vec![
                Style {
                    image: Some(Marker::Icon {
                        asset: asset.clone(),
                        size: values.size * 2.0,
                        color: values.color.with_opacity(values.opacity),
                        rotation: values.rotation,
                    }),
                    ..Default::default()
                },
                Style {
                    image: Some(Marker::Icon {
                        asset: asset.clone(),
                        size: values.size * 2.0,
                        color: stroke_color,
                        rotation: values.rotation,
                    }),
                    text: text_style(values),
                    ..Default::default()
                },
            ]),
        }
    }
}

/// Style for lines and polygons
pub fn poly_style(values: &StyleConfigValues) -> StyleOutput {
    StyleOutput::Single(Style {
        fill: Some(Fill { color: values.color.with_opacity(values.opacity) }),
        stroke: Some(Stroke {
            color: values.stroke.unwrap_or(values.color),
            width: values.line_width,
        }),
        image: None,
        text: text_style(values),
    })
}

fn text_style(values: &StyleConfigValues) -> Option<TextStyle> {
    let text = values.text.as_ref().filter(|t| !t.is_empty())?;
    let cfg = &values.text_config;
    Some(TextStyle {
        text: text.clone(),
        font_size: cfg.font_size,
        offset_x: cfg.offset_x,
        offset_y: cfg.offset_y,
        align: cfg.align,
        baseline: cfg.baseline,
        fill: Fill { color: Color::rgb(0, 0, 0) },
        stroke: Some(Stroke { color: Color::rgb(255, 255, 255), width: 2.0 }),
    })
}

/// Replace `${name}` placeholders with property values; missing ones render empty
fn render_template(template: &str, feature: &Feature) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                if let Some(value) = feature.get(after[..end].trim()) {
                    out.push_str(&value_to_string(value));
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render-ready form of one style configuration
#[derive(Debug, Clone)]
pub struct StyleConfigState {
    pub config: StyleConfig,
    pub base: StyleConfigValues,
    pub fields: Option<StyleConfigFields>,
    pub maker: StyleMaker,
    pub(crate) dims: Option<StyleDimensions>,
}

impl StyleConfigState {
    /// Runtime dimensions assigned by the last data delivery
    pub fn dims(&self) -> Option<&StyleDimensions> {
        self.dims.as_ref()
    }

    /// Values for one feature: base merged with the feature's bound fields
    pub fn values_for(&self, feature: &Feature) -> StyleConfigValues {
        let mut values = self.base.clone();
        if let Some(fields) = &self.fields {
            values.text = fields.text.render(feature);
        }
        values
    }

    pub fn make(&self, class: RenderClass, values: &StyleConfigValues) -> StyleOutput {
        self.maker.make(class, values)
    }
}

/// Builds style state, resolving symbol assets on the way
#[derive(Clone)]
pub struct StyleStateBuilder {
    resolver: Arc<dyn AssetResolver>,
    theme: Theme,
}

impl StyleStateBuilder {
    pub fn new(resolver: Arc<dyn AssetResolver>, theme: Theme) -> Self {
        Self { resolver, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Build the state for one style configuration
    pub async fn build(&self, config: &StyleConfig) -> Result<StyleConfigState> {
        let color = Color::parse(&config.color.fixed, self.theme)?;

        let maker = match MarkerShape::from_symbol(&config.symbol) {
            Some(shape) => StyleMaker::Shape(shape),
            None => StyleMaker::Icon(self.resolver.resolve(&config.symbol).await?),
        };

        let (text, fields) = match &config.text {
            None => (None, None),
            Some(text) => match text.mode {
                TextMode::Fixed => (text.fixed.clone(), None),
                TextMode::Field => {
                    let field = text.field.clone().filter(|f| !f.is_empty()).ok_or_else(|| {
                        GeostyleError::InvalidStyle {
                            reason: "text mode 'field' requires a field name".to_string(),
                        }
                    })?;
                    (None, Some(StyleConfigFields { text: TextBinding::Field(field) }))
                }
                TextMode::Template => {
                    let template = text.fixed.clone().unwrap_or_default();
                    (None, Some(StyleConfigFields { text: TextBinding::Template(template) }))
                }
            },
        };

        let base = StyleConfigValues {
            color,
            stroke: None,
            opacity: if config.opacity.is_finite() { config.opacity.clamp(0.0, 1.0) } else { 1.0 },
            line_width: config.line_width.max(0.0),
            size: config.size.fixed,
            rotation: config.rotation,
            text,
            text_config: config.text_config,
        };

        Ok(StyleConfigState { config: config.clone(), base, fields, maker, dims: None })
    }

    /// Build several configurations concurrently, preserving order
    pub async fn build_all<'a, I>(&self, configs: I) -> Result<Vec<StyleConfigState>>
    where
        I: IntoIterator<Item = &'a StyleConfig>,
    {
        try_join_all(configs.into_iter().map(|config| self.build(config))).await
    }
}

/// In-memory asset resolver
#[derive(Debug, Clone, Default)]
pub struct StaticAssets {
    assets: HashMap<String, SymbolAsset>,
}

impl StaticAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, src: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        let asset = SymbolAsset::new(src, data);
        self.assets.insert(asset.src.clone(), asset);
        self
    }
}

#[async_trait]
impl AssetResolver for StaticAssets {
    async fn resolve(&self, symbol: &str) -> Result<SymbolAsset> {
        self.assets.get(symbol).cloned().ok_or_else(|| GeostyleError::AssetUnavailable {
            symbol: symbol.to_string(),
            reason: "not registered".to_string(),
        })
    }
}
