use std::f32::consts::PI;

use canopy_core::Point;
use canopy_paint::{polar_point, Geometry, Paint, TextAnchor};

use super::meta;
use crate::config::ChartConfig;
use crate::data::Dataset;
use crate::error::Result;
use crate::format::format_percent;
use crate::kind::ChartKind;
use crate::layout::{pie, PieSlice};
use crate::render::{LegendEntry, Pose, RenderContext, ShapeSpec, ShapeStrategy};
use crate::scale_set::ScaleSpec;

const LEADER_GAP: f32 = 4.0;
const LEADER_LENGTH: f32 = 12.0;

/// Wedges in data order around the center, with leader-line labels.
pub struct DonutStrategy;

struct Ring {
    center: Point,
    inner: f32,
    outer: f32,
}

fn ring(ctx: &RenderContext) -> Ring {
    let bounds = ctx.dims.bounds();
    let half = bounds.width().min(bounds.height()) * 0.5;
    let label_room = if ctx.config.show_labels {
        LEADER_GAP + LEADER_LENGTH + ctx.config.label_size * 1.5
    } else {
        0.0
    };
    let outer = (half - label_room).max(half * 0.5);
    Ring {
        center: bounds.center(),
        inner: outer * ctx.config.inner_radius,
        outer,
    }
}

fn slices(data: &Dataset, series: Option<&str>) -> Vec<PieSlice> {
    let values: Vec<f32> = data
        .points()
        .iter()
        .map(|p| series.map_or(0.0, |s| p.value_or_zero(s)))
        .collect();
    pie(&values)
}

impl ShapeStrategy for DonutStrategy {
    fn kind(&self) -> ChartKind {
        ChartKind::Donut
    }

    fn scale_spec(&self, _config: &ChartConfig) -> Option<ScaleSpec> {
        None
    }

    fn series(&self, data: &Dataset) -> Vec<String> {
        data.series_keys().iter().take(1).cloned().collect()
    }

    fn layout(&self, ctx: &RenderContext) -> Result<Vec<ShapeSpec>> {
        let data = ctx.table()?;
        let series = ctx.series.first().map(String::as_str);
        let ring = ring(ctx);
        let colors = ctx.palette(data.len());
        let half_pad = ctx.config.pad_angle * 0.5;

        Ok(slices(data, series)
            .into_iter()
            .zip(colors)
            .map(|(slice, color)| {
                let p = &data.points()[slice.index];
                let pad = half_pad.min(slice.span() * 0.5);
                ShapeSpec::new(
                    p.id(),
                    Geometry::Arc {
                        center: ring.center,
                        inner: ring.inner,
                        outer: ring.outer,
                        start: slice.start + pad,
                        end: slice.end - pad,
                    },
                    Paint::fill(color),
                )
                .opacity(ctx.style.base_opacity)
                .meta(meta(p.key().to_string(), series, slice.value))
                .order(slice.index)
            })
            .collect())
    }

    fn enter_state(&self, spec: &ShapeSpec, _ctx: &RenderContext) -> Pose {
        let geometry = match &spec.geometry {
            Geometry::Arc {
                center,
                inner,
                outer,
                start,
                ..
            } => Geometry::Arc {
                center: *center,
                inner: *inner,
                outer: *outer,
                start: *start,
                end: *start,
            },
            other => other.clone(),
        };
        Pose {
            geometry,
            opacity: spec.opacity,
        }
    }

    fn exit_state(&self, current: &Geometry, _ctx: &RenderContext) -> Pose {
        let geometry = match current {
            Geometry::Arc {
                center,
                inner,
                outer,
                start,
                ..
            } => Geometry::Arc {
                center: *center,
                inner: *inner,
                outer: *outer,
                start: *start,
                end: *start,
            },
            other => other.clone(),
        };
        Pose {
            geometry,
            opacity: 0.0,
        }
    }

    fn labels(&self, ctx: &RenderContext) -> Result<Vec<ShapeSpec>> {
        if !ctx.config.show_labels {
            return Ok(Vec::new());
        }
        let data = ctx.table()?;
        let series = ctx.series.first().map(String::as_str);
        let ring = ring(ctx);
        let ink = ctx.theme.ink();
        let size = ctx.config.label_size;
        let all = slices(data, series);
        let total: f32 = all.iter().map(|s| s.value).sum();

        let mut out = Vec::with_capacity(all.len() * 2);
        for slice in all.iter().filter(|s| s.span() > 0.0) {
            let p = &data.points()[slice.index];
            let mid = slice.mid();
            let from = polar_point(ring.center, ring.outer + LEADER_GAP, mid);
            let to = polar_point(ring.center, ring.outer + LEADER_GAP + LEADER_LENGTH, mid);
            let (anchor, dx) = if mid < PI {
                (TextAnchor::Start, 4.0)
            } else {
                (TextAnchor::End, -4.0)
            };
            out.push(
                ShapeSpec::new(
                    format!("leader-{}", p.id()),
                    Geometry::Line { from, to },
                    Paint::stroke(ink.muted, 1.0),
                )
                .order(slice.index),
            );
            out.push(
                ShapeSpec::new(
                    format!("label-{}", p.id()),
                    Geometry::text(
                        Point::new(to.x + dx, to.y + size * 0.35),
                        format!("{} ({})", p.key(), format_percent(slice.value, total)),
                        anchor,
                        size,
                    ),
                    Paint::fill(ink.text),
                )
                .order(slice.index),
            );
        }
        Ok(out)
    }

    fn legend_entries(&self, ctx: &RenderContext) -> Vec<LegendEntry> {
        let Some(data) = ctx.data.table() else {
            return Vec::new();
        };
        data.points()
            .iter()
            .zip(ctx.palette(data.len()))
            .map(|(p, color)| LegendEntry {
                label: p.key().to_string(),
                color,
            })
            .collect()
    }
}
