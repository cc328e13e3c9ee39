//! GeoStyle Engine - Per-feature style resolution
//!
//! This crate turns layer options into drawable styles: it builds style state
//! from configuration, matches features against ordered rules, binds tabular
//! data by feature identifier and caches the styles that do not depend on
//! feature content.

pub mod builder;
pub mod cache;
pub mod dimensions;
pub mod index;
pub mod layer;
pub mod matcher;
pub mod resolver;
pub mod style;

pub use builder::{
    StaticAssets, StyleConfigFields, StyleConfigState, StyleConfigValues, StyleMaker,
    StyleStateBuilder, TextBinding,
};
pub use cache::StyleCheckerState;
pub use dimensions::{ColorDimension, ScaleDimension, StyleDimensions};
pub use index::IdentifierIndex;
pub use layer::{Completion, StyleLayer};
pub use resolver::{FeatureStyler, Resolution, StyleSource};
pub use style::{Fill, Marker, MarkerShape, ResolvedStyle, Stroke, Style, StyleOutput, TextStyle};
