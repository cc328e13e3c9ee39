//! Integration tests for per-feature style resolution
//!
//! These tests verify that:
//! - The first matching rule wins and the default catches everything else
//! - Rule-bound styles are cached per render class unless they bind feature fields
//! - Data-bound resolution joins tabular rows by feature identifier
//! - A new data delivery fully replaces the previous identifier index

use futures::executor::block_on;
use geostyle_core::models::{
    Color, ColorDimensionConfig, ComparisonOperation, DataField, DataFrame, Feature,
    FeatureRuleConfig, FeatureStyleConfig, Geometry, LayerOptions, RenderClass, StyleConfig,
    StyleMode, Theme,
};
use geostyle_engine::{
    ColorDimension, FeatureStyler, StaticAssets, StyleSource, StyleStateBuilder,
};
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn builder() -> StyleStateBuilder {
    StyleStateBuilder::new(Arc::new(StaticAssets::new()), Theme::Dark)
}

fn color(name: &str) -> Color {
    Color::parse(name, Theme::Dark).unwrap()
}

fn country_rule(value: &str, style_color: &str) -> FeatureStyleConfig {
    FeatureStyleConfig::new(
        FeatureRuleConfig::new("country", ComparisonOperation::Eq, value),
        StyleConfig::fixed_color(style_color),
    )
}

fn polygon() -> Feature {
    Feature::with_geometry(
        Geometry::polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]),
        Default::default(),
    )
}

fn styler(options: &LayerOptions) -> FeatureStyler {
    block_on(FeatureStyler::build(&builder(), options)).unwrap()
}

#[test]
fn test_country_rule_scenario() {
    let options = LayerOptions {
        style: StyleConfig::fixed_color("blue"),
        rules: vec![country_rule("US", "red")],
        ..Default::default()
    };
    let styler = styler(&options);

    let us = polygon().property("country", json!("US"));
    let fr = polygon().property("country", json!("FR"));
    let empty = polygon();

    let us_style = styler.resolve(&us).unwrap();
    assert_eq!(us_style.stroke_color(), Some(color("red")));
    assert_eq!(styler.resolve_explained(&us).source, StyleSource::Rule(0));

    let fr_style = styler.resolve(&fr).unwrap();
    assert_eq!(fr_style.stroke_color(), Some(color("blue")));
    assert_eq!(styler.resolve_explained(&fr).source, StyleSource::Default);

    let empty_style = styler.resolve(&empty).unwrap();
    assert!(Arc::ptr_eq(&fr_style, &empty_style), "Default style should be shared");
}

#[test]
fn test_no_rules_equals_default_state() {
    let config = StyleConfig::fixed_color("purple");
    let styler = styler(&LayerOptions { style: config.clone(), ..Default::default() });
    let state = block_on(builder().build(&config)).unwrap();

    for feature in [polygon(), Feature::with_geometry(Geometry::point(3.0, 4.0), Default::default())] {
        let expected = state.make(feature.render_class(), &state.values_for(&feature));
        let resolved = styler.resolve(&feature).unwrap();
        assert_eq!(*resolved, expected);
    }
}

#[test]
fn test_cache_identity_without_fields() {
    let options = LayerOptions { rules: vec![country_rule("US", "red")], ..Default::default() };
    let styler = styler(&options);

    let a = polygon().property("country", json!("US")).property("name", json!("Ohio"));
    let b = polygon().property("country", json!("US")).property("name", json!("Utah"));
    let first = styler.resolve(&a).unwrap();
    let second = styler.resolve(&b).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(styler.checkers()[0].is_cached(RenderClass::Shape));
    assert!(!styler.checkers()[0].is_cached(RenderClass::Point));
}

#[test]
fn test_bound_text_builds_distinct_styles() {
    let rule = FeatureStyleConfig::new(
        FeatureRuleConfig::new("country", ComparisonOperation::Eq, "US"),
        StyleConfig::fixed_color("red").with_text_field("name"),
    );
    let styler = styler(&LayerOptions { rules: vec![rule], ..Default::default() });

    let a = polygon().property("country", json!("US")).property("name", json!("Ohio"));
    let b = polygon().property("country", json!("US")).property("name", json!("Utah"));
    let first = styler.resolve(&a).unwrap();
    let second = styler.resolve(&b).unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.text(), Some("Ohio"));
    assert_eq!(second.text(), Some("Utah"));
}

#[test]
fn test_malformed_rules_fall_through_to_default() {
    let options = LayerOptions {
        rules: vec![
            FeatureStyleConfig::new(
                FeatureRuleConfig::new("", ComparisonOperation::Eq, "US"),
                StyleConfig::fixed_color("red"),
            ),
            FeatureStyleConfig::new(
                FeatureRuleConfig::new("country", ComparisonOperation::Unknown, "US"),
                StyleConfig::fixed_color("red"),
            ),
        ],
        ..Default::default()
    };
    let styler = styler(&options);
    let feature = polygon().property("country", json!("US"));
    assert_eq!(styler.resolve_explained(&feature).source, StyleSource::Default);
}

fn data_options() -> LayerOptions {
    LayerOptions {
        mode: StyleMode::Data,
        id_field: Some("code".to_string()),
        style: StyleConfig {
            color: ColorDimensionConfig::field("value"),
            ..Default::default()
        },
        rules: vec![country_rule("DE", "red")],
        ..Default::default()
    }
}

#[test]
fn test_data_bound_scenario() {
    let options = data_options();
    let mut styler = styler(&options);
    let frame = DataFrame::new(vec![
        DataField::new("code", vec![json!("US")]),
        DataField::new("value", vec![json!(10)]),
    ]);
    styler.update_data(&frame).unwrap();

    let us = polygon().id("US");
    let resolution = styler.resolve_explained(&us);
    assert_eq!(resolution.source, StyleSource::DataRow(0));

    let expected = ColorDimension::from_frame(&frame, &options.style.color, Theme::Dark)
        .unwrap()
        .get(0);
    let style = resolution.style.unwrap();
    assert_eq!(style.fill_color(), Some(expected.with_opacity(0.4)));
    assert_eq!(style.stroke_color(), Some(color("dark-green")));

    let de = polygon().id("DE").property("country", json!("DE"));
    assert_eq!(styler.resolve_explained(&de).source, StyleSource::Rule(0));

    let unknown = polygon().id("JP");
    assert_eq!(styler.resolve_explained(&unknown).source, StyleSource::Default);
}

#[test]
fn test_data_bound_bypasses_rules() {
    let mut styler = styler(&data_options());
    let frame = DataFrame::new(vec![
        DataField::new("code", vec![json!("DE")]),
        DataField::new("value", vec![json!(3)]),
    ]);
    styler.update_data(&frame).unwrap();

    let de = polygon().id("DE").property("country", json!("DE"));
    assert_eq!(styler.resolve_explained(&de).source, StyleSource::DataRow(0));
}

#[test]
fn test_second_delivery_replaces_index() {
    let mut styler = styler(&data_options());
    styler
        .update_data(&DataFrame::new(vec![
            DataField::new("code", vec![json!("US"), json!("FR")]),
            DataField::new("value", vec![json!(1), json!(2)]),
        ]))
        .unwrap();
    styler
        .update_data(&DataFrame::new(vec![
            DataField::new("code", vec![json!("BR")]),
            DataField::new("value", vec![json!(5)]),
        ]))
        .unwrap();

    assert_eq!(styler.index().len(), 1);
    assert_eq!(styler.resolve_explained(&polygon().id("US")).source, StyleSource::Default);
    assert_eq!(styler.resolve_explained(&polygon().id("FR")).source, StyleSource::Default);
    assert_eq!(styler.resolve_explained(&polygon().id("BR")).source, StyleSource::DataRow(0));
}

#[test]
fn test_size_dimension_scales_point_markers() {
    let mut options = data_options();
    options.style.size.field = Some("value".to_string());
    let mut styler = styler(&options);
    styler
        .update_data(&DataFrame::new(vec![
            DataField::new("code", vec![json!("A"), json!("B")]),
            DataField::new("value", vec![json!(0), json!(100)]),
        ]))
        .unwrap();

    let radius = |id: &str| {
        let feature = Feature::with_geometry(Geometry::point(0.0, 0.0), Default::default()).id(id);
        let style = styler.resolve(&feature).unwrap();
        match &style.layers()[0].image {
            Some(geostyle_engine::Marker::Shape { radius, .. }) => *radius,
            other => panic!("expected shape marker, got {:?}", other),
        }
    };
    assert_eq!(radius("A"), options.style.size.min);
    assert_eq!(radius("B"), options.style.size.max);
}

proptest! {
    #[test]
    fn prop_first_matching_rule_wins(total in 1usize..8, first in 0usize..8) {
        let first = first % total;
        // rules before `first` test a property the feature lacks; the rest all match
        let rules = (0..total)
            .map(|i| {
                let property = if i < first { "missing" } else { "country" };
                FeatureStyleConfig::new(
                    FeatureRuleConfig::new(property, ComparisonOperation::Eq, "US"),
                    StyleConfig::fixed_color("red"),
                )
            })
            .collect();
        let styler = styler(&LayerOptions { rules, ..Default::default() });

        let feature = polygon().property("country", json!("US"));
        prop_assert_eq!(styler.resolve_explained(&feature).source, StyleSource::Rule(first));
        prop_assert!(styler.checkers().last().unwrap().is_default());
    }

    #[test]
    fn prop_resolution_always_yields_a_style(
        country in "[A-Z]{0,3}",
        value in proptest::option::of(-1000i64..1000),
        op in prop_oneof![
            Just(ComparisonOperation::Eq),
            Just(ComparisonOperation::Neq),
            Just(ComparisonOperation::Gt),
            Just(ComparisonOperation::Lte),
            Just(ComparisonOperation::Contains),
        ],
    ) {
        let rules = vec![
            FeatureStyleConfig::new(
                FeatureRuleConfig::new("value", op, "10"),
                StyleConfig::fixed_color("red"),
            ),
            country_rule(&country, "blue"),
        ];
        let styler = styler(&LayerOptions { rules, ..Default::default() });

        let mut feature = polygon().property("country", json!(country));
        if let Some(v) = value {
            feature = feature.property("value", json!(v));
        }
        prop_assert!(styler.resolve(&feature).is_some());
    }
}
