//! Rule matching against feature properties.
//!
//! Matching never fails: malformed rules, missing properties and values
//! that cannot be compared all evaluate to `false`.

use geostyle_core::models::{value_to_string, ComparisonOperation, Feature, FeatureRuleConfig};
use serde_json::Value;

/// Check whether a feature satisfies a rule
pub fn matches(rule: &FeatureRuleConfig, feature: &Feature) -> bool {
    if !rule.is_usable() {
        return false;
    }
    compare(feature.get(&rule.property), rule.operation, &rule.value)
}

/// Compare a property value against a rule literal.
///
/// `None` stands for a missing (or null) property and never matches.
pub fn compare(value: Option<&Value>, operation: ComparisonOperation, literal: &str) -> bool {
    let Some(value) = value else {
        return false;
    };
    let text = value_to_string(value);

    match operation {
        ComparisonOperation::Eq => text == literal,
        ComparisonOperation::Neq => text != literal,
        ComparisonOperation::Gt => ordered(&text, literal, |a, b| a > b),
        ComparisonOperation::Gte => ordered(&text, literal, |a, b| a >= b),
        ComparisonOperation::Lt => ordered(&text, literal, |a, b| a < b),
        ComparisonOperation::Lte => ordered(&text, literal, |a, b| a <= b),
        ComparisonOperation::Contains => text.contains(literal),
        ComparisonOperation::Unknown => false,
    }
}

fn as_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn ordered(text: &str, literal: &str, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (as_number(text), as_number(literal)) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}
