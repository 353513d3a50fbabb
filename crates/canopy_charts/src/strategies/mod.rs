//! One [`ShapeStrategy`] per chart kind.

mod bar;
mod donut;
mod line;
mod stacked_bar;
mod stream;
mod treemap;

pub use bar::BarStrategy;
pub use donut::DonutStrategy;
pub use line::LineStrategy;
pub use stacked_bar::StackedBarStrategy;
pub use stream::StreamStrategy;
pub use treemap::TreemapStrategy;

use canopy_core::{Point, Rect};
use canopy_paint::{Geometry, ShapeMeta};

use crate::kind::ChartKind;
use crate::render::{LegendEntry, RenderContext, ShapeStrategy};

pub fn strategy_for(kind: ChartKind) -> &'static dyn ShapeStrategy {
    match kind {
        ChartKind::Bar => &BarStrategy,
        ChartKind::Line => &LineStrategy,
        ChartKind::Donut => &DonutStrategy,
        ChartKind::Stream => &StreamStrategy,
        ChartKind::Treemap => &TreemapStrategy,
        ChartKind::StackedBar => &StackedBarStrategy,
    }
}

pub(crate) fn meta(label: impl Into<String>, series: Option<&str>, value: f32) -> ShapeMeta {
    ShapeMeta {
        label: label.into(),
        series: series.map(str::to_string),
        value,
    }
}

/// Same x extent, zero height at `y`.
pub(crate) fn flatten_rect(rect: Rect, y: f32) -> Rect {
    Rect::new(rect.x(), y, rect.width(), 0.0)
}

/// Zero-size rect at the center of `rect`.
pub(crate) fn point_rect(rect: Rect) -> Rect {
    let c: Point = rect.center();
    Rect::new(c.x, c.y, 0.0, 0.0)
}

/// A rect geometry collapsed onto its own bottom edge.
pub(crate) fn collapse_to_bottom(current: &Geometry) -> Geometry {
    match current {
        Geometry::Rect { rect, radius } => Geometry::Rect {
            rect: flatten_rect(*rect, rect.bottom()),
            radius: *radius,
        },
        other => other.clone(),
    }
}

/// One legend row per series, colored from the theme.
pub(crate) fn series_legend(ctx: &RenderContext) -> Vec<LegendEntry> {
    let colors = ctx.palette(ctx.series.len());
    ctx.series
        .iter()
        .zip(colors)
        .map(|(s, color)| LegendEntry {
            label: s.clone(),
            color,
        })
        .collect()
}
