//! Check command implementation

use crate::cli::CheckArgs;
use crate::output::OutputWriter;
use crate::output_types::{CheckOutput, RuleRow, StyleSummary};
use anyhow::Result;
use geostyle_core::config::LayeredConfig;
use geostyle_core::models::{StyleConfig, StyleMode};

pub async fn execute(args: CheckArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let options = super::load_layer_options(&args.style, "check", config)?;

    let rules: Vec<RuleRow> = options
        .rules
        .iter()
        .enumerate()
        .map(|(i, rule)| RuleRow {
            position: i + 1,
            check: rule.check.to_string(),
            usable: rule.check.is_usable(),
            color: rule.style.color.fixed.clone(),
            symbol: rule.style.symbol.clone(),
        })
        .collect();
    let unusable = rules.iter().filter(|r| !r.usable).count();
    let mode = options.mode;
    let id_field = options.data_id_field().map(str::to_string);
    let default_style = summarize(&options.style);

    // Building the layer resolves every color and icon symbol
    let layer = super::configure_layer(options, config).await?;
    tracing::debug!("Layer options valid (generation {})", layer.generation());

    if output.is_json() {
        output.result(CheckOutput { mode, id_field, default_style, rules })?;
        return Ok(());
    }

    output.section("Layer");
    output.kv("Mode", format!("{:?}", mode).to_lowercase());
    if mode == StyleMode::Data {
        output.kv("Identifier field", id_field.as_deref().unwrap_or("(none)"));
    }
    output.kv(
        "Default style",
        format!(
            "{} at {:.0}% opacity, symbol {}",
            default_style.color,
            default_style.opacity * 100.0,
            default_style.symbol
        ),
    );

    output.section("Rules");
    let count = rules.len();
    output.table(rules)?;

    if unusable > 0 {
        output.warning(format!(
            "{} rule(s) are incomplete and will never match; features fall through to later rules",
            unusable
        ));
    }
    output.success(format!("Layer options valid: {} rules", count));

    Ok(())
}

fn summarize(style: &StyleConfig) -> StyleSummary {
    StyleSummary {
        color: style.color.fixed.clone(),
        opacity: style.opacity,
        symbol: style.symbol.clone(),
    }
}
