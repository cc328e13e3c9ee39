//! Per-feature style resolution.
//!
//! Resolution order:
//! 1. data binding: the feature id is found in the identifier index and the
//!    default style carries a color dimension
//! 2. the first rule whose check holds, in configured order
//! 3. the default style
//!
//! Resolution is total for a correctly built styler and never panics; an
//! empty style list yields an unstyled result.

use geostyle_core::error::Result;
use geostyle_core::models::{DataFrame, Feature, LayerOptions, RenderClass, Theme};
use serde::Serialize;
use std::sync::Arc;

use crate::builder::{StyleConfigState, StyleStateBuilder};
use crate::cache::StyleCheckerState;
use crate::dimensions::{ColorDimension, ScaleDimension, StyleDimensions};
use crate::index::IdentifierIndex;
use crate::style::ResolvedStyle;

/// Where a resolved style came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum StyleSource {
    /// Row of the tabular data joined by identifier
    DataRow(usize),
    /// Position of the matching rule
    Rule(usize),
    Default,
    Unstyled,
}

/// Resolved style together with its source
#[derive(Debug, Clone)]
pub struct Resolution {
    pub style: Option<ResolvedStyle>,
    pub source: StyleSource,
}

impl Resolution {
    fn unstyled() -> Self {
        Self { style: None, source: StyleSource::Unstyled }
    }
}

/// Style resolution engine for one layer configuration
#[derive(Debug)]
pub struct FeatureStyler {
    checkers: Vec<StyleCheckerState>,
    index: IdentifierIndex,
    id_field: Option<String>,
    theme: Theme,
}

impl FeatureStyler {
    /// Assemble a styler from rule entries and the default style
    pub fn new(
        rules: Vec<StyleCheckerState>,
        default: StyleConfigState,
        id_field: Option<String>,
        theme: Theme,
    ) -> Self {
        let mut checkers: Vec<StyleCheckerState> =
            rules.into_iter().filter(|c| !c.is_default()).collect();
        checkers.push(StyleCheckerState::fallback(default));
        Self::from_checkers(checkers, id_field, theme)
    }

    /// Assemble a styler from an arbitrary entry list, default entry not enforced
    pub fn from_checkers(
        checkers: Vec<StyleCheckerState>,
        id_field: Option<String>,
        theme: Theme,
    ) -> Self {
        Self { checkers, index: IdentifierIndex::default(), id_field, theme }
    }

    /// Build every style of a layer configuration
    pub async fn build(builder: &StyleStateBuilder, options: &LayerOptions) -> Result<Self> {
        let configs = options.rules.iter().map(|r| &r.style).chain(std::iter::once(&options.style));
        let mut states = builder.build_all(configs).await?;

        // build_all preserves order, so the default is last
        let default = match states.pop() {
            Some(state) => state,
            None => builder.build(&options.style).await?,
        };
        let rules = options
            .rules
            .iter()
            .zip(states)
            .map(|(rule, state)| StyleCheckerState::new(state, Some(rule.check.clone())))
            .collect();

        Ok(Self::new(
            rules,
            default,
            options.data_id_field().map(str::to_string),
            builder.theme(),
        ))
    }

    /// Resolve the style for a feature
    pub fn resolve(&self, feature: &Feature) -> Option<ResolvedStyle> {
        self.resolve_explained(feature).style
    }

    /// Resolve the style for a feature and report which path produced it
    pub fn resolve_explained(&self, feature: &Feature) -> Resolution {
        let class = feature.render_class();

        if let Some(resolution) = self.resolve_data_bound(feature, class) {
            return resolution;
        }

        for (position, checker) in self.checkers.iter().enumerate() {
            if !checker.accepts(feature) {
                continue;
            }
            let source =
                if checker.is_default() { StyleSource::Default } else { StyleSource::Rule(position) };
            return Resolution { style: Some(checker.style_for(feature, class)), source };
        }

        Resolution::unstyled()
    }

    fn resolve_data_bound(&self, feature: &Feature, class: RenderClass) -> Option<Resolution> {
        if self.index.is_empty() {
            return None;
        }
        let row = self.index.get(feature.id.as_deref()?)?;
        let default = self.default_checker()?;
        let dims = default.state.dims()?;
        let color = dims.color.as_ref()?;

        let mut values = default.state.values_for(feature);
        values.stroke = Some(values.color);
        values.color = color.get(row);
        if let Some(size) = &dims.size {
            values.size = size.get(row);
        }

        let style = default.state.make(class, &values);
        Some(Resolution { style: Some(Arc::new(style)), source: StyleSource::DataRow(row) })
    }

    /// Apply a new tabular data delivery.
    ///
    /// Replaces the identifier index and the default style's dimensions.
    /// Does nothing to styling when no identifier field is configured.
    pub fn update_data(&mut self, frame: &DataFrame) -> Result<()> {
        let index = IdentifierIndex::rebuild(frame, self.id_field.as_deref());
        if index.is_empty() {
            self.index = index;
            if let Some(default) = self.default_checker_mut() {
                default.state.dims = None;
            }
            return Ok(());
        }

        let theme = self.theme;
        let Some(default) = self.default_checker_mut() else {
            return Ok(());
        };
        let config = &default.state.config;
        let dims = StyleDimensions {
            color: Some(ColorDimension::from_frame(frame, &config.color, theme)?),
            size: ScaleDimension::from_frame(frame, &config.size),
        };
        default.state.dims = Some(dims);
        tracing::debug!("Identifier index rebuilt with {} entries", index.len());
        self.index = index;
        Ok(())
    }

    fn default_checker(&self) -> Option<&StyleCheckerState> {
        self.checkers.last().filter(|c| c.is_default())
    }

    fn default_checker_mut(&mut self) -> Option<&mut StyleCheckerState> {
        self.checkers.last_mut().filter(|c| c.is_default())
    }

    pub fn checkers(&self) -> &[StyleCheckerState] {
        &self.checkers
    }

    pub fn index(&self) -> &IdentifierIndex {
        &self.index
    }

    /// Number of user rules, the default entry excluded
    pub fn rule_count(&self) -> usize {
        self.checkers.iter().filter(|c| !c.is_default()).count()
    }
}
