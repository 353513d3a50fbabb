use canopy_core::{Point, Rect};
use canopy_paint::{Geometry, Paint, TextAnchor};

use super::{flatten_rect, meta};
use crate::config::ChartConfig;
use crate::data::Dataset;
use crate::error::{RenderError, Result};
use crate::format::format_compact;
use crate::kind::ChartKind;
use crate::render::{HoverEffects, Pose, RenderContext, ShapeSpec, ShapeStrategy};
use crate::scale_set::{ScaleSpec, XSpec, YSpec};

/// One rect per category, growing up from the zero line. Only the first
/// series is drawn.
pub struct BarStrategy;

fn baseline(ctx: &RenderContext) -> f32 {
    ctx.dims.origin().y + ctx.dims.bounded_height
}

impl ShapeStrategy for BarStrategy {
    fn kind(&self) -> ChartKind {
        ChartKind::Bar
    }

    fn scale_spec(&self, config: &ChartConfig) -> Option<ScaleSpec> {
        Some(ScaleSpec {
            x: XSpec::Band {
                inner: config.bar_padding,
                outer: config.bar_padding * 0.5,
            },
            y: YSpec::Max,
        })
    }

    fn series(&self, data: &Dataset) -> Vec<String> {
        data.series_keys().iter().take(1).cloned().collect()
    }

    fn layout(&self, ctx: &RenderContext) -> Result<Vec<ShapeSpec>> {
        let data = ctx.table()?;
        let scales = ctx.scales()?;
        let band = scales
            .x
            .as_band()
            .ok_or(RenderError::NoCartesianScale { kind: self.kind() })?;
        let origin = ctx.dims.origin();
        let series = ctx.series.first().map(String::as_str);
        let fill = ctx.theme.color();
        let radius = ctx.style.corner_radius.min(band.band_width() * 0.5);
        let zero = origin.y + scales.y.map(0.0);

        Ok(data
            .points()
            .iter()
            .enumerate()
            .filter_map(|(i, p)| {
                let x = origin.x + band.band_start(i)?;
                let value = series.map_or(0.0, |s| p.value_or_zero(s)).max(0.0);
                let top = origin.y + scales.y.map(value);
                let rect = Rect::new(x, top, band.band_width(), (zero - top).max(0.0));
                Some(
                    ShapeSpec::new(p.id(), Geometry::rect(rect, radius), Paint::fill(fill))
                        .opacity(ctx.style.base_opacity)
                        .meta(meta(p.key().to_string(), series, value))
                        .order(i),
                )
            })
            .collect())
    }

    fn enter_state(&self, spec: &ShapeSpec, ctx: &RenderContext) -> Pose {
        let geometry = match &spec.geometry {
            Geometry::Rect { rect, radius } => Geometry::rect(flatten_rect(*rect, baseline(ctx)), *radius),
            other => other.clone(),
        };
        Pose {
            geometry,
            opacity: spec.opacity,
        }
    }

    fn exit_state(&self, current: &Geometry, ctx: &RenderContext) -> Pose {
        let geometry = match current {
            Geometry::Rect { rect, radius } => Geometry::rect(flatten_rect(*rect, baseline(ctx)), *radius),
            other => other.clone(),
        };
        Pose {
            geometry,
            opacity: 0.0,
        }
    }

    fn labels(&self, ctx: &RenderContext) -> Result<Vec<ShapeSpec>> {
        if !ctx.config.show_values {
            return Ok(Vec::new());
        }
        let ink = ctx.theme.ink();
        let size = ctx.config.label_size;
        Ok(self
            .layout(ctx)?
            .into_iter()
            .filter_map(|bar| {
                let value = bar.meta.as_ref()?.value;
                let rect = bar.geometry.bounds();
                let at = Point::new(rect.center().x, rect.y() - 4.0);
                Some(
                    ShapeSpec::new(
                        format!("value-{}", bar.key),
                        Geometry::text(at, format_compact(value), TextAnchor::Middle, size),
                        Paint::fill(ink.text),
                    )
                    .order(bar.order),
                )
            })
            .collect())
    }

    fn hover_effects(&self) -> HoverEffects {
        HoverEffects {
            glow: false,
            decoration: true,
        }
    }
}
