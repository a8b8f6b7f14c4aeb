use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use market_analyzer::Report;
use serde::Serialize;
use tracing::info;

/// Writes the four JSON artifacts the dashboard fetches.
pub fn write_artifacts(dir: &Path, report: &Report) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    write_json(&dir.join("summary.json"), &report.summary)?;
    write_json(&dir.join("bar_data.json"), &report.category_totals)?;
    write_json(&dir.join("line_data.json"), &report.daily_activity)?;
    write_json(&dir.join("pie_data.json"), &report.type_distribution)?;

    info!("Wrote report artifacts to {}", dir.display());

    Ok(())
}

/// Serializes the whole document in memory first, so the file is written
/// in a single call and never left partially populated.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
