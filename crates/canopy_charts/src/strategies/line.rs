use canopy_core::Point;
use canopy_paint::{Geometry, Paint};

use super::{meta, series_legend};
use crate::config::ChartConfig;
use crate::error::Result;
use crate::kind::ChartKind;
use crate::render::{LegendEntry, Pose, RenderContext, ShapeSpec, ShapeStrategy};
use crate::scale_set::{ScaleSpec, XSpec, YSpec};

/// A stroked curve per series, with optional sample points. Samples a
/// series lacks are skipped rather than drawn at zero.
pub struct LineStrategy;

impl ShapeStrategy for LineStrategy {
    fn kind(&self) -> ChartKind {
        ChartKind::Line
    }

    fn scale_spec(&self, _config: &ChartConfig) -> Option<ScaleSpec> {
        Some(ScaleSpec {
            x: XSpec::Band {
                inner: 0.0,
                outer: 0.0,
            },
            y: YSpec::Max,
        })
    }

    fn layout(&self, ctx: &RenderContext) -> Result<Vec<ShapeSpec>> {
        let data = ctx.table()?;
        let scales = ctx.scales()?;
        let origin = ctx.dims.origin();
        let config = ctx.config;
        let colors = ctx.palette(ctx.series.len());

        let mut curves = Vec::with_capacity(ctx.series.len());
        let mut points = Vec::new();
        for (series, color) in ctx.series.iter().zip(colors) {
            let samples: Vec<(usize, Point, f32)> = data
                .points()
                .iter()
                .enumerate()
                .filter_map(|(i, p)| {
                    let v = p.value(series)?;
                    let x = scales.x.position(i, data)?;
                    Some((i, Point::new(origin.x + x, origin.y + scales.y.map(v)), v))
                })
                .collect();
            let Some(&(_, _, last)) = samples.last() else {
                continue;
            };

            curves.push(
                ShapeSpec::new(
                    format!("line-{series}"),
                    Geometry::Curve {
                        points: samples.iter().map(|(_, p, _)| *p).collect(),
                        curve: config.curve(),
                        reveal: 1.0,
                    },
                    Paint::stroke(color, config.line_width),
                )
                .opacity(config.line_opacity)
                .meta(meta(series.clone(), Some(series), last)),
            );

            if config.show_points && config.point_size > 0.0 {
                for (i, center, v) in samples {
                    let p = &data.points()[i];
                    points.push(
                        ShapeSpec::new(
                            format!("point-{series}-{}", p.id()),
                            Geometry::Circle {
                                center,
                                radius: config.point_size,
                            },
                            Paint::fill(color),
                        )
                        .opacity(config.point_opacity)
                        .meta(meta(p.key().to_string(), Some(series), v))
                        .order(i),
                    );
                }
            }
        }
        // Points paint above every curve.
        curves.extend(points);
        Ok(curves)
    }

    fn enter_state(&self, spec: &ShapeSpec, _ctx: &RenderContext) -> Pose {
        let geometry = match &spec.geometry {
            Geometry::Curve { points, curve, .. } => Geometry::Curve {
                points: points.clone(),
                curve: *curve,
                reveal: 0.0,
            },
            Geometry::Circle { center, .. } => Geometry::Circle {
                center: *center,
                radius: 0.0,
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
            Geometry::Curve { points, curve, .. } => Geometry::Curve {
                points: points.clone(),
                curve: *curve,
                reveal: 0.0,
            },
            Geometry::Circle { center, .. } => Geometry::Circle {
                center: *center,
                radius: 0.0,
            },
            other => other.clone(),
        };
        Pose {
            geometry,
            opacity: 0.0,
        }
    }

    fn legend_entries(&self, ctx: &RenderContext) -> Vec<LegendEntry> {
        series_legend(ctx)
    }
}
