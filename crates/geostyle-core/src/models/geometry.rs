//! Canonical geometry types used across all geostyle crates.
//!
//! Geometry is opaque to style resolution: the engine only needs to know
//! which render class a feature belongs to. The coordinate payload is kept
//! so the rendering backend receives features unchanged.

use serde::{Deserialize, Serialize};

/// Geometry type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GeometryType {
    #[default]
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
}

/// Render class of a feature.
///
/// Point-like geometry is drawn with a marker, everything else with a
/// fill/stroke style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderClass {
    Point,
    Shape,
}

/// GeoJSON-compatible geometry representation
///
/// This enum directly maps to GeoJSON geometry types with coordinate arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
}

impl Geometry {
    /// Create a Point geometry
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point { coordinates: [x, y] }
    }

    /// Create a LineString geometry
    pub fn line_string(coords: Vec<[f64; 2]>) -> Self {
        Geometry::LineString { coordinates: coords }
    }

    /// Create a Polygon geometry
    pub fn polygon(rings: Vec<Vec<[f64; 2]>>) -> Self {
        Geometry::Polygon { coordinates: rings }
    }

    /// Get the geometry type
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point { .. } => GeometryType::Point,
            Geometry::LineString { .. } => GeometryType::LineString,
            Geometry::Polygon { .. } => GeometryType::Polygon,
            Geometry::MultiPoint { .. } => GeometryType::MultiPoint,
            Geometry::MultiLineString { .. } => GeometryType::MultiLineString,
            Geometry::MultiPolygon { .. } => GeometryType::MultiPolygon,
        }
    }

    /// Render class used to pick the marker or the shape style
    pub fn render_class(&self) -> RenderClass {
        match self.geometry_type() {
            GeometryType::Point | GeometryType::MultiPoint => RenderClass::Point,
            _ => RenderClass::Shape,
        }
    }

    /// Try to parse from a serde_json::Value (GeoJSON)
    pub fn from_geojson(value: &serde_json::Value) -> Option<Self> {
        let geometry = geojson::Geometry::from_json_value(value.clone()).ok()?;
        Self::from_geojson_value(&geometry.value)
    }

    /// Convert a parsed GeoJSON geometry value.
    ///
    /// Positions keep their first two ordinates; altitude and measures are
    /// dropped. Geometry collections and positions with fewer than two
    /// ordinates yield `None`.
    pub fn from_geojson_value(value: &geojson::Value) -> Option<Self> {
        let geometry = match value {
            geojson::Value::Point(p) => Geometry::Point { coordinates: position(p)? },
            geojson::Value::LineString(line) => {
                Geometry::LineString { coordinates: positions(line)? }
            }
            geojson::Value::Polygon(rings) => Geometry::Polygon { coordinates: rings_of(rings)? },
            geojson::Value::MultiPoint(points) => {
                Geometry::MultiPoint { coordinates: positions(points)? }
            }
            geojson::Value::MultiLineString(lines) => {
                Geometry::MultiLineString { coordinates: rings_of(lines)? }
            }
            geojson::Value::MultiPolygon(polygons) => Geometry::MultiPolygon {
                coordinates: polygons.iter().map(|p| rings_of(p)).collect::<Option<_>>()?,
            },
            geojson::Value::GeometryCollection(_) => return None,
        };
        Some(geometry)
    }
}

fn position(p: &[f64]) -> Option<[f64; 2]> {
    match p {
        [x, y, ..] => Some([*x, *y]),
        _ => None,
    }
}

fn positions(ps: &[Vec<f64>]) -> Option<Vec<[f64; 2]>> {
    ps.iter().map(|p| position(p)).collect()
}

fn rings_of(rings: &[Vec<Vec<f64>>]) -> Option<Vec<Vec<[f64; 2]>>> {
    rings.iter().map(|r| positions(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_serialization() {
        let point = Geometry::point(115.0, -8.5);
        let json = serde_json::to_string(&point).unwrap();
        assert!(json.contains("Point"));

        let parsed: Geometry = serde_json::from_str(&json).unwrap();
        assert_eq!(point, parsed);
    }

    #[test]
    fn test_render_class() {
        assert_eq!(Geometry::point(0.0, 0.0).render_class(), RenderClass::Point);
        let multi = Geometry::MultiPoint { coordinates: vec![[0.0, 0.0], [1.0, 1.0]] };
        assert_eq!(multi.render_class(), RenderClass::Point);
        let line = Geometry::line_string(vec![[0.0, 0.0], [1.0, 1.0]]);
        assert_eq!(line.render_class(), RenderClass::Shape);
        let polygon = Geometry::polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]);
        assert_eq!(polygon.render_class(), RenderClass::Shape);
    }

    #[test]
    fn test_from_geojson_rejects_unknown_type() {
        let value = serde_json::json!({"type": "GeometryCollection", "geometries": []});
        assert!(Geometry::from_geojson(&value).is_none());
    }

    #[test]
    fn test_from_geojson_drops_altitude() {
        let value = serde_json::json!({"type": "Point", "coordinates": [-98.5, 39.8, 120.0]});
        let geometry = Geometry::from_geojson(&value).unwrap();
        assert_eq!(geometry, Geometry::point(-98.5, 39.8));
        assert_eq!(geometry.render_class(), RenderClass::Point);

        let value = serde_json::json!({
            "type": "MultiPolygon",
            "coordinates": [[[[0, 0, 5], [1, 0, 5], [1, 1, 5], [0, 0, 5]]]]
        });
        let geometry = Geometry::from_geojson(&value).unwrap();
        assert_eq!(geometry.geometry_type(), GeometryType::MultiPolygon);
        assert_eq!(geometry.render_class(), RenderClass::Shape);
    }
}
