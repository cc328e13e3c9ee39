//! Config command implementation

use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, ConfigOutput, ConfigRow};
use anyhow::Result;
use geostyle_core::config::LayeredConfig;

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let inspection_map = config.to_inspection_map();
    let entry = |key: &str| {
        inspection_map
            .get(key)
            .map(|(value, source)| ConfigEntry {
                value: value.clone(),
                source: format!("{:?}", source),
            })
            .unwrap_or_else(|| ConfigEntry {
                value: "(unset)".to_string(),
                source: "Default".to_string(),
            })
    };

    let config_output = ConfigOutput {
        theme: entry("theme"),
        asset_dir: entry("asset_dir"),
        id_field: entry("id_field"),
    };

    if output.is_json() {
        output.result(config_output)?;
        return Ok(());
    }

    output.section("Configuration");
    let rows = [
        ("theme", &config_output.theme),
        ("asset_dir", &config_output.asset_dir),
        ("id_field", &config_output.id_field),
    ]
    .into_iter()
    .map(|(key, entry)| ConfigRow {
        key: key.to_string(),
        value: entry.value.clone(),
        source: entry.source.clone(),
    })
    .collect();
    output.table::<ConfigRow>(rows)?;
    output.info("Precedence: CLI > environment > geostyle.toml > defaults");

    Ok(())
}
