use canopy_core::Point;
use canopy_paint::{CurveKind, Geometry, Paint};

use super::{meta, series_legend};
use crate::config::ChartConfig;
use crate::error::Result;
use crate::kind::ChartKind;
use crate::layout::{stack, StackOffset};
use crate::render::{LegendEntry, Pose, RenderContext, ShapeSpec, ShapeStrategy};
use crate::scale_set::{ScaleSpec, XSpec, YSpec};

/// Smoothed areas stacked around a wiggle baseline.
pub struct StreamStrategy;

/// Both edges moved onto the area's centerline.
fn collapse(geometry: &Geometry) -> Geometry {
    match geometry {
        Geometry::Area {
            upper,
            lower,
            curve,
        } if upper.len() == lower.len() => {
            let mid: Vec<Point> = upper
                .iter()
                .zip(lower)
                .map(|(u, l)| Point::new(u.x, (u.y + l.y) * 0.5))
                .collect();
            Geometry::Area {
                upper: mid.clone(),
                lower: mid,
                curve: *curve,
            }
        }
        other => other.clone(),
    }
}

impl ShapeStrategy for StreamStrategy {
    fn kind(&self) -> ChartKind {
        ChartKind::Stream
    }

    fn scale_spec(&self, _config: &ChartConfig) -> Option<ScaleSpec> {
        Some(ScaleSpec {
            x: XSpec::Time,
            y: YSpec::Stream,
        })
    }

    fn layout(&self, ctx: &RenderContext) -> Result<Vec<ShapeSpec>> {
        let data = ctx.table()?;
        let scales = ctx.scales()?;
        let origin = ctx.dims.origin();
        let xs: Vec<Option<f32>> = (0..data.len())
            .map(|i| scales.x.position(i, data).map(|x| origin.x + x))
            .collect();
        let colors = ctx.palette(ctx.series.len());

        Ok(stack(data, ctx.series, StackOffset::Wiggle)
            .into_iter()
            .zip(colors)
            .enumerate()
            .map(|(order, (layer, color))| {
                let (upper, lower): (Vec<Point>, Vec<Point>) = layer
                    .bands
                    .iter()
                    .zip(&xs)
                    .filter_map(|(b, x)| {
                        let x = (*x)?;
                        Some((
                            Point::new(x, origin.y + scales.y.map(b.upper)),
                            Point::new(x, origin.y + scales.y.map(b.lower)),
                        ))
                    })
                    .unzip();
                let total = layer.total();
                ShapeSpec::new(
                    layer.series.clone(),
                    Geometry::Area {
                        upper,
                        lower,
                        curve: CurveKind::Basis,
                    },
                    Paint::fill(color),
                )
                .opacity(ctx.style.base_opacity)
                .meta(meta(layer.series.clone(), Some(&layer.series), total))
                .order(order)
            })
            .collect())
    }

    fn enter_state(&self, spec: &ShapeSpec, _ctx: &RenderContext) -> Pose {
        Pose {
            geometry: collapse(&spec.geometry),
            opacity: spec.opacity,
        }
    }

    fn exit_state(&self, current: &Geometry, _ctx: &RenderContext) -> Pose {
        Pose {
            geometry: collapse(current),
            opacity: 0.0,
        }
    }

    fn legend_entries(&self, ctx: &RenderContext) -> Vec<LegendEntry> {
        series_legend(ctx)
    }
}
