//! GeoJSON feature source

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{GeostyleError, Result};
use crate::models::{Feature, Geometry};
use crate::ports::FeatureSource;

/// Where the GeoJSON text comes from
#[derive(Debug, Clone)]
enum Origin {
    File(PathBuf),
    Inline(String),
}

/// GeoJSON feature source, read once per `load`
#[derive(Debug, Clone)]
pub struct GeoJsonSource {
    origin: Origin,
}

impl GeoJsonSource {
    /// Source backed by a file on disk
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { origin: Origin::File(path.into()) }
    }

    /// Source backed by an in-memory GeoJSON document
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { origin: Origin::Inline(text.into()) }
    }
}

#[async_trait]
impl FeatureSource for GeoJsonSource {
    async fn load(&self) -> Result<Vec<Feature>> {
        let features = match &self.origin {
            Origin::File(path) => {
                let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                    GeostyleError::FeatureSource {
                        reason: format!("Failed to read {}: {}", path.display(), e),
                    }
                })?;
                parse_features(&content)?
            }
            Origin::Inline(text) => parse_features(text)?,
        };
        tracing::debug!("Loaded {} features from {}", features.len(), self.describe());
        Ok(features)
    }

    fn describe(&self) -> String {
        match &self.origin {
            Origin::File(path) => path.display().to_string(),
            Origin::Inline(_) => "inline GeoJSON".to_string(),
        }
    }
}

/// Parse a GeoJSON document into features
///
/// Feature collections, single features and bare geometries are accepted.
/// Geometry kinds outside the canonical set (e.g. collections) are kept as
/// features without geometry.
pub fn parse_features(content: &str) -> Result<Vec<Feature>> {
    let geojson: geojson::GeoJson = content.parse().map_err(|e| GeostyleError::Format {
        format: "GeoJSON".to_string(),
        reason: format!("Failed to parse GeoJSON: {}", e),
    })?;

    match geojson {
        geojson::GeoJson::FeatureCollection(fc) => {
            Ok(fc.features.iter().map(convert_feature).collect())
        }
        geojson::GeoJson::Feature(feature) => Ok(vec![convert_feature(&feature)]),
        geojson::GeoJson::Geometry(geom) => Ok(vec![Feature {
            id: None,
            geometry: convert_geometry(&geom),
            properties: HashMap::new(),
        }]),
    }
}

fn convert_feature(feature: &geojson::Feature) -> Feature {
    let id = feature.id.as_ref().map(|id| match id {
        geojson::feature::Id::String(s) => s.clone(),
        geojson::feature::Id::Number(n) => n.to_string(),
    });

    let geometry = feature.geometry.as_ref().and_then(convert_geometry);

    let properties = feature
        .properties
        .as_ref()
        .map(|props| props.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default();

    Feature { id, geometry, properties }
}

fn convert_geometry(geometry: &geojson::Geometry) -> Option<Geometry> {
    let parsed = Geometry::from_geojson_value(&geometry.value);
    if parsed.is_none() {
        tracing::debug!("Unsupported geometry kind {}", geometry.value.type_name());
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RenderClass;

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "US",
                "geometry": {"type": "Point", "coordinates": [-98.5, 39.8]},
                "properties": {"country": "US", "population": 331}
            },
            {
                "type": "Feature",
                "id": 7,
                "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]},
                "properties": null
            }
        ]
    }"#;

    #[test]
    fn test_parse_feature_collection() {
        let features = parse_features(COLLECTION).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].id.as_deref(), Some("US"));
        assert_eq!(features[0].render_class(), RenderClass::Point);
        assert_eq!(features[0].get("population"), Some(&serde_json::json!(331)));
        assert_eq!(features[1].id.as_deref(), Some("7"));
        assert_eq!(features[1].render_class(), RenderClass::Shape);
        assert!(features[1].properties.is_empty());
    }

    #[test]
    fn test_parse_bare_geometry() {
        let features = parse_features(r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#).unwrap();
        assert_eq!(features.len(), 1);
        assert!(features[0].id.is_none());
        assert_eq!(features[0].geometry, Some(Geometry::point(1.0, 2.0)));
    }

    #[test]
    fn test_geometry_collection_has_no_geometry() {
        let features = parse_features(
            r#"{"type": "Feature", "geometry": {"type": "GeometryCollection", "geometries": []}, "properties": {}}"#,
        )
        .unwrap();
        assert!(features[0].geometry.is_none());
    }

    #[test]
    fn test_positions_with_altitude_keep_their_class() {
        let features = parse_features(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-98.5, 39.8, 120.0]}, "properties": {}},
                    {"type": "Feature", "geometry": {"type": "MultiPolygon", "coordinates": [[[[0, 0, 1], [1, 0, 1], [1, 1, 1], [0, 0, 1]]]]}, "properties": {}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(features[0].geometry, Some(Geometry::point(-98.5, 39.8)));
        assert_eq!(features[0].render_class(), RenderClass::Point);
        assert!(features[1].geometry.is_some());
        assert_eq!(features[1].render_class(), RenderClass::Shape);
    }

    #[test]
    fn test_invalid_geojson() {
        assert!(matches!(parse_features("not valid json"), Err(GeostyleError::Format { .. })));
    }

    #[tokio::test]
    async fn test_file_source_loads_once() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("countries.geojson");
        std::fs::write(&path, COLLECTION).unwrap();

        let source = GeoJsonSource::from_path(&path);
        let features = source.load().await.unwrap();
        assert_eq!(features.len(), 2);
        assert!(source.describe().ends_with("countries.geojson"));
    }

    #[tokio::test]
    async fn test_missing_file_is_source_error() {
        let source = GeoJsonSource::from_path("/nonexistent/features.geojson");
        assert!(matches!(source.load().await, Err(GeostyleError::FeatureSource { .. })));
    }
}
