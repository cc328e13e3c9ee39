use geostyle_core::models::{Feature, FeatureRuleConfig, RenderClass};
use std::sync::{Arc, OnceLock};

use crate::builder::StyleConfigState;
use crate::matcher;
use crate::style::ResolvedStyle;

/// One entry of the ordered style list, with its lazily built styles.
///
/// The cached styles live as long as the entry; reconfiguring a layer
/// replaces the whole list instead of invalidating entries.
#[derive(Debug)]
pub struct StyleCheckerState {
    pub state: StyleConfigState,
    /// None for the trailing default entry
    pub rule: Option<FeatureRuleConfig>,
    point: OnceLock<ResolvedStyle>,
    poly: OnceLock<ResolvedStyle>,
}

impl StyleCheckerState {
    pub fn new(state: StyleConfigState, rule: Option<FeatureRuleConfig>) -> Self {
        Self { state, rule, point: OnceLock::new(), poly: OnceLock::new() }
    }

    /// Default entry, which matches every feature
    pub fn fallback(state: StyleConfigState) -> Self {
        Self::new(state, None)
    }

    pub fn is_default(&self) -> bool {
        self.rule.is_none()
    }

    /// Whether this entry applies to the feature
    pub fn accepts(&self, feature: &Feature) -> bool {
        match &self.rule {
            Some(rule) => matcher::matches(rule, feature),
            None => true,
        }
    }

    /// Style for a feature this entry accepted.
    ///
    /// Entries with feature-bound fields build a fresh style every call;
    /// all others reuse one style per render class.
    pub fn style_for(&self, feature: &Feature, class: RenderClass) -> ResolvedStyle {
        if self.state.fields.is_some() {
            let values = self.state.values_for(feature);
            return Arc::new(self.state.make(class, &values));
        }
        self.cached(class)
    }

    /// Cached style for a render class, built on first request
    pub fn cached(&self, class: RenderClass) -> ResolvedStyle {
        let cell = match class {
            RenderClass::Point => &self.point,
            RenderClass::Shape => &self.poly,
        };
        cell.get_or_init(|| {
            tracing::debug!(
                "Building cached {:?} style for {}",
                class,
                self.rule.as_ref().map(|r| r.to_string()).unwrap_or_else(|| "default".to_string())
            );
            Arc::new(self.state.make(class, &self.state.base))
        })
        .clone()
    }

    /// Whether a style has been cached for the class
    pub fn is_cached(&self, class: RenderClass) -> bool {
        match class {
            RenderClass::Point => self.point.get().is_some(),
            RenderClass::Shape => self.poly.get().is_some(),
        }
    }
}
