//! Scaffolding for new chart files

use anyhow::{Context, Result};
use canopy_charts::ChartKind;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ChartFile;

pub const CHART_FILE: &str = "chart.toml";

/// Write a sample `chart.toml` of `kind` into `dir`. Refuses to overwrite
/// an existing file.
pub fn init_chart(dir: &Path, kind: ChartKind) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(CHART_FILE);
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    let body = ChartFile::sample(kind).to_toml()?;
    let header = format!(
        "# Canopy chart. Render with `canopy render {CHART_FILE}`.\n# Kinds: {}\n\n",
        ChartKind::all()
            .iter()
            .map(|k| k.id())
            .collect::<Vec<_>>()
            .join(", ")
    );
    fs::write(&path, header + &body).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
