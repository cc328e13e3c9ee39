//! Feature source adapters
//!
//! Each adapter implements the [`FeatureSource`](crate::ports::FeatureSource)
//! port for one input format.

pub mod geojson;

pub use self::geojson::{parse_features, GeoJsonSource};
