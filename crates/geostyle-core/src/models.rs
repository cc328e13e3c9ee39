pub mod color;
pub mod feature;
pub mod frame;
pub mod geometry;
pub mod layer;
pub mod rule;
pub mod style;

pub use color::{Color, ColorScheme, Theme};
pub use feature::{value_to_string, Feature};
pub use frame::{DataField, DataFrame};
pub use geometry::{Geometry, GeometryType, RenderClass};
pub use layer::{LayerOptions, StyleMode};
pub use rule::{default_style_rule, ComparisonOperation, FeatureRuleConfig, FeatureStyleConfig};
pub use style::{
    ColorDimensionConfig, ScaleDimensionConfig, StyleConfig, TextAlign, TextBaseline,
    TextDimensionConfig, TextMode, TextStyleConfig,
};
