use serde::{Deserialize, Serialize};

use crate::error::{GeostyleError, Result};

/// Named column of a tabular data series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataField {
    pub name: String,
    #[serde(default)]
    pub values: Vec<serde_json::Value>,
}

impl DataField {
    pub fn new(name: impl Into<String>, values: Vec<serde_json::Value>) -> Self {
        Self { name: name.into(), values }
    }

    /// Numeric view of a cell; strings holding numbers count as numbers
    pub fn number_at(&self, row: usize) -> Option<f64> {
        let value = match self.values.get(row)? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        value.filter(|v| v.is_finite())
    }

    /// Range of the numeric cells, None when the column has no numbers
    pub fn numeric_range(&self) -> Option<(f64, f64)> {
        (0..self.values.len())
            .filter_map(|row| self.number_at(row))
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Tabular data series delivered by the data collaborator on each refresh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataFrame {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Vec<DataField>,
}

impl DataFrame {
    pub fn new(fields: Vec<DataField>) -> Self {
        Self { name: None, fields }
    }

    /// Parse a frame from its JSON form: `{"name": .., "fields": [{"name": .., "values": [..]}]}`
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| GeostyleError::Serialization(e.to_string()))
    }

    /// Find a field by name
    pub fn field(&self, name: &str) -> Option<&DataField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of rows (the longest column)
    pub fn len(&self) -> usize {
        self.fields.iter().map(|f| f.values.len()).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
