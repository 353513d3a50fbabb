//! Canopy CLI
//!
//! Renders chart files to SVG and lists the available vibes and theme
//! presets.

mod config;
mod project;

use anyhow::{Context, Result};
use canopy_charts::vibe::{default_vibe, vibes_for};
use canopy_charts::{Chart, ChartKind};
use canopy_theme::ThemePreset;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use crate::config::ChartFile;

/// Render animated, themeable charts to SVG
#[derive(Parser, Debug)]
#[command(name = "canopy")]
#[command(about = "Render Canopy chart files to SVG")]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a chart file (TOML or JSON) to SVG
    Render {
        file: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the file's width
        #[arg(long)]
        width: Option<f32>,

        /// Override the file's height
        #[arg(long)]
        height: Option<f32>,

        /// Capture the entrance animation at this time instead of its end
        #[arg(long)]
        at_ms: Option<f32>,
    },

    /// List the vibes a chart kind offers
    Vibes {
        /// Chart kind; all kinds when omitted
        #[arg(long)]
        kind: Option<String>,
    },

    /// List the theme presets
    Presets,

    /// Write a sample chart.toml
    Init {
        #[arg(default_value = ".")]
        dir: PathBuf,

        #[arg(long, default_value = "bar")]
        kind: String,
    },
}

fn parse_kind(id: &str) -> Result<ChartKind> {
    ChartKind::from_id(id).with_context(|| {
        let known: Vec<&str> = ChartKind::all().iter().map(|k| k.id()).collect();
        format!("Unknown chart kind `{id}` (expected one of: {})", known.join(", "))
    })
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn render(
    file: PathBuf,
    output: Option<PathBuf>,
    width: Option<f32>,
    height: Option<f32>,
    at_ms: Option<f32>,
) -> Result<()> {
    let chart_file = ChartFile::load(&file)?;
    let props = chart_file.props()?;
    let (w, h) = (width.unwrap_or(chart_file.width), height.unwrap_or(chart_file.height));

    let mut chart = Chart::new(chart_file.kind, props);
    chart.mount(w, h);
    match at_ms {
        Some(t) => chart.tick(t),
        None => chart.settle(),
    }
    tracing::info!(
        kind = %chart_file.kind,
        vibe = chart.style().name,
        shapes = chart.surface().shape_count(),
        "rendered"
    );

    let svg = chart.to_svg();
    match output {
        Some(path) => {
            fs::write(&path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{svg}"),
    }
    Ok(())
}

fn list_vibes(kind: Option<String>) -> Result<()> {
    let kinds = match kind {
        Some(id) => vec![parse_kind(&id)?],
        None => ChartKind::all().to_vec(),
    };
    for kind in kinds {
        let default = default_vibe(kind);
        let names: Vec<String> = vibes_for(kind)
            .iter()
            .map(|v| {
                if *v == default {
                    format!("{} (default)", v.id())
                } else {
                    v.id().to_string()
                }
            })
            .collect();
        println!("{:<12} {}", kind.id(), names.join(", "));
    }
    Ok(())
}

fn list_presets() {
    for preset in ThemePreset::all() {
        println!(
            "{:<10} {:<10} {}",
            preset.id(),
            preset.display_name(),
            preset.base().to_hex_string()
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Render {
            file,
            output,
            width,
            height,
            at_ms,
        } => render(file, output, width, height, at_ms),
        Command::Vibes { kind } => list_vibes(kind),
        Command::Presets => {
            list_presets();
            Ok(())
        }
        Command::Init { dir, kind } => {
            let path = project::init_chart(&dir, parse_kind(&kind)?)?;
            println!("Created {}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_render_flags() {
        let cli = Cli::try_parse_from(["canopy", "-v", "render", "chart.toml", "--width", "800", "--at-ms", "120"])
            .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Render {
                file, width, at_ms, ..
            } => {
                assert_eq!(file, PathBuf::from("chart.toml"));
                assert_eq!(width, Some(800.0));
                assert_eq!(at_ms, Some(120.0));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn kind_ids_are_forgiving() {
        assert_eq!(parse_kind("Stacked_Bar").unwrap(), ChartKind::StackedBar);
        assert!(parse_kind("pie").is_err());
    }
}
