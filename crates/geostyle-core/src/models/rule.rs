//! Style rules as authored in the layer editor.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::style::StyleConfig;

/// Comparison applied between a feature property and a rule literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonOperation {
    #[default]
    #[serde(alias = "==")]
    Eq,
    #[serde(alias = "!=")]
    Neq,
    #[serde(alias = ">")]
    Gt,
    #[serde(alias = ">=")]
    Gte,
    #[serde(alias = "<")]
    Lt,
    #[serde(alias = "<=")]
    Lte,
    Contains,
    /// Anything the editor produced that this version does not know.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ComparisonOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            ComparisonOperation::Eq => "==",
            ComparisonOperation::Neq => "!=",
            ComparisonOperation::Gt => ">",
            ComparisonOperation::Gte => ">=",
            ComparisonOperation::Lt => "<",
            ComparisonOperation::Lte => "<=",
            ComparisonOperation::Contains => "contains",
            ComparisonOperation::Unknown => "?",
        };
        write!(f, "{}", symbol)
    }
}

/// Condition half of a style rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FeatureRuleConfig {
    /// Property name to read from the feature
    #[serde(default)]
    pub property: String,

    #[serde(default)]
    pub operation: ComparisonOperation,

    /// Literal compared against the property value
    #[serde(default)]
    pub value: String,
}

impl FeatureRuleConfig {
    pub fn new(
        property: impl Into<String>,
        operation: ComparisonOperation,
        value: impl Into<String>,
    ) -> Self {
        Self { property: property.into(), operation, value: value.into() }
    }

    /// Empty rule used by the editor before a property is picked
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Whether this rule can ever match a feature
    pub fn is_usable(&self) -> bool {
        !self.property.is_empty() && self.operation != ComparisonOperation::Unknown
    }
}

impl fmt::Display for FeatureRuleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.property, self.operation, self.value)
    }
}

/// One user-authored rule: when `check` holds, render using `style`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FeatureStyleConfig {
    #[serde(default)]
    pub style: StyleConfig,

    #[serde(default)]
    pub check: FeatureRuleConfig,
}

impl FeatureStyleConfig {
    pub fn new(check: FeatureRuleConfig, style: StyleConfig) -> Self {
        Self { style, check }
    }
}

/// Rule the editor inserts when the user adds a new entry
pub fn default_style_rule() -> FeatureStyleConfig {
    FeatureStyleConfig { style: StyleConfig::default(), check: FeatureRuleConfig::placeholder() }
}
