use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::geometry::{Geometry, RenderClass};

/// Map feature as delivered by a feature source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Stable identifier, used to join tabular data rows
    pub id: Option<String>,

    /// Geometry, None for features without a location
    pub geometry: Option<Geometry>,

    /// Feature properties
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

impl Feature {
    /// Create a new feature with geometry
    pub fn with_geometry(geometry: Geometry, properties: HashMap<String, serde_json::Value>) -> Self {
        Self { id: None, geometry: Some(geometry), properties }
    }

    /// Set the feature identifier
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set a single property
    pub fn property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Look up a property, treating JSON null the same as a missing key
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key).filter(|v| !v.is_null())
    }

    /// Render class of this feature's geometry.
    ///
    /// Features without geometry are styled as shapes.
    pub fn render_class(&self) -> RenderClass {
        self.geometry
            .as_ref()
            .map(Geometry::render_class)
            .unwrap_or(RenderClass::Shape)
    }
}

/// Render a JSON scalar the way rule values and labels see it.
///
/// Strings are taken verbatim, everything else uses its JSON text.
pub fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
