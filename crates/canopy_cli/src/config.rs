//! Chart file handling (chart.toml or chart.json)

use anyhow::{Context, Result};
use canopy_charts::{ChartData, ChartKind, ChartProps, ConfigOverrides, Dataset, TreeNode};
use canopy_theme::ThemeState;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A chart described on disk: kind, look, size and data.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartFile {
    pub kind: ChartKind,
    /// Vibe id; unknown ids fall back to the kind's default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibe: Option<String>,
    /// `#rrggbb` or a preset id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default)]
    pub config: ConfigOverrides,
    /// Tabular records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Hierarchy for treemaps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree: Option<serde_json::Value>,
}

fn default_width() -> f32 {
    640.0
}

fn default_height() -> f32 {
    400.0
}

impl ChartFile {
    /// Load a chart file; `.json` files are read as JSON, everything else
    /// as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
        } else {
            Self::from_toml_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// A small sample chart of `kind`
    pub fn sample(kind: ChartKind) -> Self {
        let (data, tree) = match kind {
            ChartKind::Treemap => (
                None,
                Some(serde_json::json!({
                    "name": "forest",
                    "children": [
                        {"name": "conifers", "children": [
                            {"name": "pine", "value": 40},
                            {"name": "spruce", "value": 25}
                        ]},
                        {"name": "broadleaf", "children": [
                            {"name": "oak", "value": 30},
                            {"name": "birch", "value": 12}
                        ]}
                    ]
                })),
            ),
            k if k.is_multi_series() => (
                Some(serde_json::json!([
                    {"date": "2024-01-01", "oak": 12, "pine": 8},
                    {"date": "2024-02-01", "oak": 18, "pine": 11},
                    {"date": "2024-03-01", "oak": 15, "pine": 16}
                ])),
                None,
            ),
            _ => (
                Some(serde_json::json!([
                    {"label": "Jan", "value": 30},
                    {"label": "Feb", "value": 50},
                    {"label": "Mar", "value": 42}
                ])),
                None,
            ),
        };
        Self {
            kind,
            vibe: None,
            theme: Some("forest".to_string()),
            width: default_width(),
            height: default_height(),
            config: ConfigOverrides::default(),
            data,
            tree,
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize chart")
    }

    /// Props for a chart built from this file.
    pub fn props(&self) -> Result<ChartProps> {
        let theme = match &self.theme {
            Some(value) => ThemeState::parse(value).with_context(|| format!("Invalid theme `{value}`"))?,
            None => ThemeState::default(),
        };
        let data = match (&self.tree, &self.data) {
            (Some(tree), _) => ChartData::from(TreeNode::from_json(tree).context("Invalid tree")?),
            (None, Some(data)) => ChartData::from(Dataset::from_json(data).context("Invalid data")?),
            (None, None) => ChartData::default(),
        };
        Ok(ChartProps {
            data,
            theme,
            vibe: self.vibe.clone(),
            config: self.config.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toml_with_camel_case_config() {
        let file = ChartFile::from_toml_str(
            r##"
kind = "stacked-bar"
vibe = "tundra"
theme = "#3B82F6"
height = 320

[config]
showLegend = false
barPadding = 0.4

[[data]]
label = "Q1"
north = 10
south = 4
"##,
        )
        .unwrap();
        assert_eq!(file.kind, ChartKind::StackedBar);
        assert_eq!(file.width, 640.0);
        assert_eq!(file.height, 320.0);
        assert_eq!(file.config.show_legend, Some(false));
        assert_eq!(file.config.bar_padding, Some(0.4));

        let props = file.props().unwrap();
        let table = props.data.table().unwrap();
        assert_eq!(table.series_keys(), ["north", "south"]);
        assert_eq!(props.theme.color().to_hex_string().to_uppercase(), "#3B82F6");
    }

    #[test]
    fn parses_json_tree() {
        let file = ChartFile::from_json_str(
            r#"{"kind": "treemap", "tree": {"name": "root", "children": [{"name": "a", "value": 2}]}}"#,
        )
        .unwrap();
        let props = file.props().unwrap();
        assert!(matches!(props.data, ChartData::Tree(_)));
        assert!(props.theme.preset().is_some());
    }

    #[test]
    fn bad_theme_is_reported() {
        let file = ChartFile::from_json_str(r#"{"kind": "bar", "theme": "not-a-color"}"#).unwrap();
        let err = file.props().unwrap_err();
        assert!(err.to_string().contains("not-a-color"));
    }

    #[test]
    fn samples_round_trip_through_toml() {
        for kind in ChartKind::all() {
            let toml = ChartFile::sample(*kind).to_toml().unwrap();
            let back = ChartFile::from_toml_str(&toml).unwrap();
            assert_eq!(back.kind, *kind);
            back.props().unwrap();
        }
    }
}
