//! Integration tests for layer orchestration
//!
//! This test suite verifies that:
//! - Reconfiguring discards cached styles and applies the new rules
//! - Configurations and feature loads that finish after a newer
//!   configuration are ignored
//! - A failed configuration leaves in-flight work untouched
//! - Asset failures surface from `configure` and leave the layer inactive
//! - Data delivered before configuration is applied once the layer is configured

use async_trait::async_trait;
use geostyle_core::error::{GeostyleError, Result};
use geostyle_core::models::{
    ColorDimensionConfig, ComparisonOperation, DataField, DataFrame, Feature, FeatureRuleConfig,
    FeatureStyleConfig, Geometry, LayerOptions, StyleConfig, StyleMode, Theme,
};
use geostyle_core::ports::{AssetResolver, FeatureSource, SymbolAsset};
use geostyle_engine::{Completion, StaticAssets, StyleLayer, StyleSource};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Notify;

/// Asset resolver that holds every request until released
struct GatedAssets {
    gate: Arc<Notify>,
}

#[async_trait]
impl AssetResolver for GatedAssets {
    async fn resolve(&self, symbol: &str) -> Result<SymbolAsset> {
        self.gate.notified().await;
        Ok(SymbolAsset::new(symbol, b"<svg/>".to_vec()))
    }
}

/// Feature source that signals when loading starts and waits to be released
struct GatedSource {
    started: Arc<Notify>,
    gate: Arc<Notify>,
    features: Vec<Feature>,
}

#[async_trait]
impl FeatureSource for GatedSource {
    async fn load(&self) -> Result<Vec<Feature>> {
        self.started.notify_one();
        self.gate.notified().await;
        Ok(self.features.clone())
    }
}

fn us_rule(color: &str) -> LayerOptions {
    LayerOptions {
        rules: vec![FeatureStyleConfig::new(
            FeatureRuleConfig::new("country", ComparisonOperation::Eq, "US"),
            StyleConfig::fixed_color(color),
        )],
        ..Default::default()
    }
}

fn us_feature() -> Feature {
    Feature::with_geometry(Geometry::point(-98.0, 39.0), Default::default())
        .id("US")
        .property("country", json!("US"))
}

#[tokio::test]
async fn test_reconfigure_discards_cached_styles() {
    let layer = StyleLayer::new(Arc::new(StaticAssets::new()), Theme::Dark);
    layer.configure(us_rule("red")).await.unwrap();

    let before = layer.resolve(&us_feature()).unwrap();
    let again = layer.resolve(&us_feature()).unwrap();
    assert!(Arc::ptr_eq(&before, &again));

    layer.configure(us_rule("blue")).await.unwrap();
    let after = layer.resolve(&us_feature()).unwrap();

    assert!(!Arc::ptr_eq(&before, &after));
    assert_ne!(before.stroke_color(), after.stroke_color());
    assert_eq!(layer.generation(), 2);
}

#[tokio::test]
async fn test_stale_configuration_is_ignored() {
    let gate = Arc::new(Notify::new());
    let layer = Arc::new(StyleLayer::new(
        Arc::new(GatedAssets { gate: gate.clone() }),
        Theme::Dark,
    ));

    let slow_options = LayerOptions {
        style: StyleConfig::default().with_symbol("icons/plane.svg"),
        ..Default::default()
    };
    let slow = {
        let layer = layer.clone();
        tokio::spawn(async move { layer.configure(slow_options).await })
    };
    while layer.generation() < 1 {
        tokio::task::yield_now().await;
    }

    let fast = layer.configure(us_rule("red")).await.unwrap();
    assert_eq!(fast, Completion::Applied);

    gate.notify_one();
    let outcome = slow.await.unwrap().unwrap();
    assert_eq!(outcome, Completion::Superseded);
    assert_eq!(layer.options(), Some(us_rule("red")));
}

#[tokio::test]
async fn test_failed_configuration_keeps_pending_one() {
    let gate = Arc::new(Notify::new());
    let layer = Arc::new(StyleLayer::new(
        Arc::new(GatedAssets { gate: gate.clone() }),
        Theme::Dark,
    ));

    let slow_options = LayerOptions {
        style: StyleConfig::default().with_symbol("icons/plane.svg"),
        ..Default::default()
    };
    let slow = {
        let layer = layer.clone();
        let options = slow_options.clone();
        tokio::spawn(async move { layer.configure(options).await })
    };
    while layer.generation() < 1 {
        tokio::task::yield_now().await;
    }

    let broken = LayerOptions { style: StyleConfig::fixed_color("not-a-color"), ..Default::default() };
    assert!(layer.configure(broken).await.is_err());

    gate.notify_one();
    assert_eq!(slow.await.unwrap().unwrap(), Completion::Applied);
    assert!(layer.is_ready());
    assert_eq!(layer.options(), Some(slow_options));
    assert_eq!(layer.applied_generation(), 1);
}

#[tokio::test]
async fn test_failed_configuration_keeps_feature_load() {
    let layer = Arc::new(StyleLayer::new(Arc::new(StaticAssets::new()), Theme::Dark));
    layer.configure(us_rule("red")).await.unwrap();

    let started = Arc::new(Notify::new());
    let gate = Arc::new(Notify::new());
    let source = GatedSource {
        started: started.clone(),
        gate: gate.clone(),
        features: vec![us_feature()],
    };
    let load = {
        let layer = layer.clone();
        tokio::spawn(async move { layer.load_features(&source).await })
    };
    started.notified().await;

    assert!(layer.configure(us_rule("not-a-color")).await.is_err());
    gate.notify_one();

    assert_eq!(load.await.unwrap().unwrap(), Completion::Applied);
    assert_eq!(layer.feature_count(), 1);
    assert_eq!(layer.render().len(), 1);
}

#[tokio::test]
async fn test_stale_feature_load_is_ignored() {
    let layer = Arc::new(StyleLayer::new(Arc::new(StaticAssets::new()), Theme::Dark));
    layer.configure(us_rule("red")).await.unwrap();

    let started = Arc::new(Notify::new());
    let gate = Arc::new(Notify::new());
    let source = GatedSource {
        started: started.clone(),
        gate: gate.clone(),
        features: vec![us_feature()],
    };
    let load = {
        let layer = layer.clone();
        tokio::spawn(async move { layer.load_features(&source).await })
    };
    started.notified().await;

    layer.configure(us_rule("blue")).await.unwrap();
    gate.notify_one();

    assert_eq!(load.await.unwrap().unwrap(), Completion::Superseded);
    assert_eq!(layer.feature_count(), 0);
    assert!(layer.render().is_empty());
}

#[tokio::test]
async fn test_asset_failure_surfaces_from_configure() {
    let layer = StyleLayer::new(Arc::new(StaticAssets::new()), Theme::Dark);
    let options = LayerOptions {
        style: StyleConfig::default().with_symbol("icons/missing.svg"),
        ..Default::default()
    };

    let err = layer.configure(options).await.unwrap_err();
    assert!(matches!(err, GeostyleError::AssetUnavailable { .. }));
    assert!(!layer.is_ready());
    assert!(layer.resolve(&us_feature()).is_none());
}

#[tokio::test]
async fn test_data_before_configuration_is_reapplied() {
    let layer = StyleLayer::new(Arc::new(StaticAssets::new()), Theme::Dark);
    layer
        .update_data(DataFrame::new(vec![
            DataField::new("code", vec![json!("US")]),
            DataField::new("value", vec![json!(10)]),
        ]))
        .unwrap();

    let options = LayerOptions {
        mode: StyleMode::Data,
        id_field: Some("code".to_string()),
        style: StyleConfig { color: ColorDimensionConfig::field("value"), ..Default::default() },
        ..Default::default()
    };
    layer.configure(options).await.unwrap();

    let resolution = layer.resolve_explained(&us_feature()).unwrap();
    assert_eq!(resolution.source, StyleSource::DataRow(0));
}

#[tokio::test]
async fn test_render_resolves_features_in_order() {
    let layer = StyleLayer::new(Arc::new(StaticAssets::new()), Theme::Dark);
    layer.configure(us_rule("red")).await.unwrap();

    let features = vec![us_feature(), Feature::default().property("country", json!("FR"))];
    assert_eq!(layer.load_features(&features).await.unwrap(), Completion::Applied);

    let mut sources = Vec::new();
    layer.render_with(|_, resolution| sources.push(resolution.source));
    assert_eq!(sources, vec![StyleSource::Rule(0), StyleSource::Default]);
}
