use geostyle_core::models::{value_to_string, DataFrame};
use std::collections::HashMap;

/// Maps feature identifiers to rows of the latest data delivery
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierIndex {
    rows: HashMap<String, usize>,
}

impl IdentifierIndex {
    /// Build the index from a frame's identifier column.
    ///
    /// Later rows win for duplicate identifiers; null cells are skipped.
    /// Without an id field, or when the frame lacks it, the index is empty.
    pub fn rebuild(frame: &DataFrame, id_field: Option<&str>) -> Self {
        let Some(name) = id_field else {
            tracing::debug!("No identifier field configured, data binding disabled");
            return Self::default();
        };
        let Some(field) = frame.field(name) else {
            tracing::debug!("Identifier field '{}' not present in data", name);
            return Self::default();
        };

        let rows = field
            .values
            .iter()
            .enumerate()
            .filter(|(_, value)| !value.is_null())
            .map(|(row, value)| (value_to_string(value), row))
            .collect();

        Self { rows }
    }

    /// Row index for an identifier
    pub fn get(&self, id: &str) -> Option<usize> {
        self.rows.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geostyle_core::models::DataField;
    use serde_json::json;

    fn frame(codes: Vec<serde_json::Value>) -> DataFrame {
        DataFrame::new(vec![DataField::new("code", codes)])
    }

    #[test]
    fn test_rebuild_maps_rows() {
        let index = IdentifierIndex::rebuild(&frame(vec![json!("US"), json!("FR")]), Some("code"));
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("US"), Some(0));
        assert_eq!(index.get("FR"), Some(1));
        assert_eq!(index.get("DE"), None);
    }

    #[test]
    fn test_last_duplicate_wins() {
        let index = IdentifierIndex::rebuild(
            &frame(vec![json!("US"), json!("FR"), json!("US")]),
            Some("code"),
        );
        assert_eq!(index.get("US"), Some(2));
    }

    #[test]
    fn test_numeric_and_null_ids() {
        let index = IdentifierIndex::rebuild(&frame(vec![json!(7), json!(null)]), Some("code"));
        assert_eq!(index.get("7"), Some(0));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_missing_field_gives_empty_index() {
        let data = frame(vec![json!("US")]);
        assert!(IdentifierIndex::rebuild(&data, None).is_empty());
        assert!(IdentifierIndex::rebuild(&data, Some("iso")).is_empty());
    }
}
