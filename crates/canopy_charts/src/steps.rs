//! Render steps. Each draws one layer and fails on its own; the chart logs
//! a failed step and runs the rest.

use canopy_core::{Point, Rect};
use canopy_paint::{Geometry, Paint, Surface, TextAnchor, EFFECTS_LAYER};

use crate::config::{GridStyle, LegendPosition};
use crate::error::Result;
use crate::format::{format_compact, format_date_tick};
use crate::render::{check_finite, fade_in, fade_out, reconcile, ReconcileReport, RenderContext, ShapeSpec, ShapeStrategy};
use crate::scale_set::{ScaleSet, XScale};

pub const GRID_LAYER: &str = "grid";
pub const AXES_LAYER: &str = "axes";
pub const SERIES_LAYER: &str = "series";
pub const LABELS_LAYER: &str = "labels";
pub const TITLE_LAYER: &str = "title";
pub const LEGEND_LAYER: &str = "legend";

/// Paint order, bottom to top.
pub const LAYERS: [&str; 7] = [
    GRID_LAYER,
    AXES_LAYER,
    SERIES_LAYER,
    LABELS_LAYER,
    TITLE_LAYER,
    LEGEND_LAYER,
    EFFECTS_LAYER,
];

const Y_TICKS: usize = 5;
const X_TICKS: usize = 6;
const TICK_GAP: f32 = 6.0;
const SWATCH: f32 = 10.0;
const LEGEND_ROW: f32 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Grid,
    Axes,
    Series,
    Labels,
    Title,
    Legend,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Grid,
        Step::Axes,
        Step::Series,
        Step::Labels,
        Step::Title,
        Step::Legend,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Step::Grid => GRID_LAYER,
            Step::Axes => AXES_LAYER,
            Step::Series => SERIES_LAYER,
            Step::Labels => LABELS_LAYER,
            Step::Title => TITLE_LAYER,
            Step::Legend => LEGEND_LAYER,
        }
    }

    /// Draw this step's layer. `held` names a series shape whose opacity
    /// the caller owns, e.g. the hovered one.
    pub fn run(
        self,
        surface: &mut Surface,
        ctx: &RenderContext,
        strategy: &dyn ShapeStrategy,
        held: Option<&str>,
    ) -> Result<ReconcileReport> {
        match self {
            Step::Grid => grid(surface, ctx),
            Step::Axes => axes(surface, ctx),
            Step::Series => series(surface, ctx, strategy, held),
            Step::Labels => labels(surface, ctx, strategy),
            Step::Title => title(surface, ctx),
            Step::Legend => legend(surface, ctx, strategy),
        }
    }
}

fn sync_static(surface: &mut Surface, ctx: &RenderContext, layer: &str, specs: Vec<ShapeSpec>) -> ReconcileReport {
    reconcile(surface, layer, specs, &ctx.motion(), None, fade_in, fade_out)
}

/// Tick positions along x, in surface coordinates, with their labels.
fn x_ticks(ctx: &RenderContext, scales: &ScaleSet) -> Vec<(String, f32, String)> {
    let origin = ctx.dims.origin();
    match &scales.x {
        XScale::Band(band) => band
            .keys()
            .iter()
            .enumerate()
            .filter_map(|(i, key)| {
                let x = origin.x + band.center(i)?;
                let label = ctx
                    .data
                    .table()
                    .and_then(|d| d.points().get(i))
                    .map_or_else(|| key.clone(), |p| p.key().to_string());
                Some((key.clone(), x, label))
            })
            .collect(),
        XScale::Time(time) => time
            .ticks(X_TICKS)
            .into_iter()
            .map(|d| (d.to_string(), origin.x + time.map(d), format_date_tick(d)))
            .collect(),
    }
}

fn y_ticks(ctx: &RenderContext, scales: &ScaleSet) -> Vec<(String, f32, String)> {
    let origin = ctx.dims.origin();
    scales
        .y
        .ticks(Y_TICKS)
        .into_iter()
        .map(|v| {
            let label = format_compact(v);
            (label.clone(), origin.y + scales.y.map(v), label)
        })
        .collect()
}

fn grid(surface: &mut Surface, ctx: &RenderContext) -> Result<ReconcileReport> {
    let config = ctx.config;
    if !config.shows_grid() {
        return Ok(sync_static(surface, ctx, GRID_LAYER, Vec::new()));
    }
    let scales = ctx.scales()?;
    let bounds = ctx.dims.bounds();
    let mut paint = Paint::stroke(ctx.theme.ink().grid, 1.0);
    if config.grid_style == GridStyle::Dashed {
        paint = paint.with_dash(4.0, 4.0);
    }

    let mut specs = Vec::new();
    if config.show_y_grid {
        for (key, y, _) in y_ticks(ctx, scales) {
            specs.push(
                ShapeSpec::new(
                    format!("y-{key}"),
                    Geometry::Line {
                        from: Point::new(bounds.x(), y),
                        to: Point::new(bounds.right(), y),
                    },
                    paint.clone(),
                )
                .opacity(config.grid_opacity),
            );
        }
    }
    if config.show_x_grid {
        for (key, x, _) in x_ticks(ctx, scales) {
            specs.push(
                ShapeSpec::new(
                    format!("x-{key}"),
                    Geometry::Line {
                        from: Point::new(x, bounds.y()),
                        to: Point::new(x, bounds.bottom()),
                    },
                    paint.clone(),
                )
                .opacity(config.grid_opacity),
            );
        }
    }
    Ok(sync_static(surface, ctx, GRID_LAYER, specs))
}

fn axes(surface: &mut Surface, ctx: &RenderContext) -> Result<ReconcileReport> {
    let config = ctx.config;
    if !config.shows_axes() {
        return Ok(sync_static(surface, ctx, AXES_LAYER, Vec::new()));
    }
    let scales = ctx.scales()?;
    let bounds = ctx.dims.bounds();
    let ink = ctx.theme.ink();
    let line = Paint::stroke(ink.axis, 1.0);
    let text = Paint::fill(ink.muted);
    let size = config.label_size;

    let mut specs = Vec::new();
    if config.show_x_axis {
        specs.push(
            ShapeSpec::new(
                "x-axis",
                Geometry::Line {
                    from: Point::new(bounds.x(), bounds.bottom()),
                    to: Point::new(bounds.right(), bounds.bottom()),
                },
                line.clone(),
            )
            .opacity(config.axis_opacity),
        );
        if config.show_axis_labels {
            for (key, x, label) in x_ticks(ctx, scales) {
                specs.push(
                    ShapeSpec::new(
                        format!("x-tick-{key}"),
                        Geometry::text(
                            Point::new(x, bounds.bottom() + TICK_GAP + size),
                            label,
                            TextAnchor::Middle,
                            size,
                        ),
                        text.clone(),
                    )
                    .opacity(config.axis_opacity),
                );
            }
        }
    }
    if config.show_y_axis {
        specs.push(
            ShapeSpec::new(
                "y-axis",
                Geometry::Line {
                    from: Point::new(bounds.x(), bounds.y()),
                    to: Point::new(bounds.x(), bounds.bottom()),
                },
                line,
            )
            .opacity(config.axis_opacity),
        );
        if config.show_axis_labels {
            for (key, y, label) in y_ticks(ctx, scales) {
                specs.push(
                    ShapeSpec::new(
                        format!("y-tick-{key}"),
                        Geometry::text(
                            Point::new(bounds.x() - TICK_GAP, y + size * 0.35),
                            label,
                            TextAnchor::End,
                            size,
                        ),
                        text.clone(),
                    )
                    .opacity(config.axis_opacity),
                );
            }
        }
    }
    Ok(sync_static(surface, ctx, AXES_LAYER, specs))
}

fn series(
    surface: &mut Surface,
    ctx: &RenderContext,
    strategy: &dyn ShapeStrategy,
    held: Option<&str>,
) -> Result<ReconcileReport> {
    let specs = strategy.layout(ctx)?;
    check_finite(&specs)?;
    Ok(reconcile(
        surface,
        SERIES_LAYER,
        specs,
        &ctx.motion(),
        held,
        |spec| strategy.enter_state(spec, ctx),
        |current| strategy.exit_state(current, ctx),
    ))
}

fn labels(surface: &mut Surface, ctx: &RenderContext, strategy: &dyn ShapeStrategy) -> Result<ReconcileReport> {
    let specs = strategy.labels(ctx)?;
    check_finite(&specs)?;
    Ok(sync_static(surface, ctx, LABELS_LAYER, specs))
}

fn title(surface: &mut Surface, ctx: &RenderContext) -> Result<ReconcileReport> {
    let specs = match &ctx.config.chart_title {
        Some(text) => {
            let size = ctx.config.label_size * 1.4;
            let y = (ctx.dims.margin.top * 0.5 + size * 0.35).max(size);
            vec![ShapeSpec::new(
                "title",
                Geometry::text(Point::new(ctx.dims.width * 0.5, y), text.clone(), TextAnchor::Middle, size),
                Paint::fill(ctx.theme.ink().text),
            )]
        }
        None => Vec::new(),
    };
    Ok(sync_static(surface, ctx, TITLE_LAYER, specs))
}

fn legend(surface: &mut Surface, ctx: &RenderContext, strategy: &dyn ShapeStrategy) -> Result<ReconcileReport> {
    if !ctx.config.show_legend {
        return Ok(sync_static(surface, ctx, LEGEND_LAYER, Vec::new()));
    }
    let entries = strategy.legend_entries(ctx);
    let size = ctx.config.label_size;
    let widest = entries
        .iter()
        .map(|e| ctx.measurer.measure(&e.label, size).width)
        .fold(0.0, f32::max);
    let bounds = ctx.dims.bounds();
    let x = match ctx.config.legend_position {
        LegendPosition::Left => bounds.x() + 4.0,
        LegendPosition::Right => bounds.right() - widest - SWATCH - 10.0,
    };
    let ink = ctx.theme.ink();

    let mut specs = Vec::with_capacity(entries.len() * 2);
    for (i, entry) in entries.into_iter().enumerate() {
        let y = bounds.y() + 4.0 + i as f32 * LEGEND_ROW;
        specs.push(
            ShapeSpec::new(
                format!("swatch-{}", entry.label),
                Geometry::rect(Rect::new(x, y, SWATCH, SWATCH), 2.0),
                Paint::fill(entry.color),
            )
            .order(i),
        );
        specs.push(
            ShapeSpec::new(
                format!("entry-{}", entry.label),
                Geometry::text(
                    Point::new(x + SWATCH + 6.0, y + SWATCH * 0.5 + size * 0.35),
                    entry.label,
                    TextAnchor::Start,
                    size,
                ),
                Paint::fill(ink.text),
            )
            .order(i),
        );
    }
    Ok(sync_static(surface, ctx, LEGEND_LAYER, specs))
}
