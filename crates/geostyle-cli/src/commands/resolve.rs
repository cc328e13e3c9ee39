//! Resolve command implementation

use crate::cli::ResolveArgs;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::{ResolveOutput, ResolvedFeature, ResolvedRow};
use anyhow::{Context, Result};
use geostyle_core::config::LayeredConfig;
use geostyle_core::formats::GeoJsonSource;
use geostyle_core::models::{DataFrame, StyleMode};
use geostyle_engine::StyleSource;
use std::path::Path;

pub async fn execute(args: ResolveArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    if !args.features.is_file() {
        return Err(errors::file_not_found("Features", &args.features, "resolve").into());
    }

    let options = super::load_layer_options(&args.style, "resolve", config)?;
    let data_mode = options.mode == StyleMode::Data;
    if data_mode && options.data_id_field().is_none() {
        output.warning("Data mode without an identifier field; data binding is disabled");
    }
    if args.data.is_some() && !data_mode {
        output.warning("Tabular data ignored: layer options are not in data mode");
    }

    let layer = super::configure_layer(options, config).await?;

    if let Some(path) = &args.data {
        let frame = load_frame(path).await?;
        layer.update_data(frame).context("Failed to apply tabular data")?;
    }

    let source = GeoJsonSource::from_path(&args.features);
    layer
        .load_features(&source)
        .await
        .with_context(|| format!("Failed to load features from {}", args.features.display()))?;

    let mut results = Vec::new();
    layer.render_with(|feature, resolution| {
        let index = results.len();
        let style = resolution.style.as_deref();
        results.push(ResolvedFeature {
            index,
            id: feature.id.clone(),
            render_class: feature.render_class(),
            source: resolution.source,
            fill: style.and_then(|s| s.fill_color()).map(|c| c.to_string()),
            stroke: style.and_then(|s| s.stroke_color()).map(|c| c.to_string()),
            text: style.and_then(|s| s.text()).map(str::to_string),
            style: style.filter(|_| args.full).cloned(),
        });
    });

    let styled = results.iter().filter(|r| r.source != StyleSource::Unstyled).count();
    let data_bound = results
        .iter()
        .filter(|r| matches!(r.source, StyleSource::DataRow(_)))
        .count();

    if output.is_json() {
        output.result(ResolveOutput {
            feature_count: results.len(),
            styled,
            data_bound,
            results,
        })?;
    } else {
        output.section("Resolved Styles");
        let rows: Vec<ResolvedRow> = results.iter().map(ResolvedRow::from).collect();
        output.table(rows)?;

        if args.full {
            output.section("Drawable Styles");
            for result in &results {
                if let Some(style) = &result.style {
                    output.kv(format!("#{}", result.index), serde_json::to_string(style)?);
                }
            }
        }

        output.success(format!(
            "Resolved {} features ({} styled, {} data-bound)",
            results.len(),
            styled,
            data_bound
        ));
    }

    Ok(())
}

/// Load a tabular data frame from JSON
async fn load_frame(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(errors::file_not_found("Data", path, "resolve").into());
    }
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let frame = DataFrame::from_json(&content)
        .with_context(|| format!("Failed to parse data frame {}", path.display()))?;
    tracing::debug!("Loaded data frame with {} rows", frame.len());
    Ok(frame)
}
