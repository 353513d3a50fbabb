use canopy_core::Rect;
use canopy_paint::{Geometry, Paint};

use super::{collapse_to_bottom, flatten_rect, meta, series_legend};
use crate::config::ChartConfig;
use crate::error::{RenderError, Result};
use crate::kind::ChartKind;
use crate::layout::{stack, StackOffset};
use crate::render::{LegendEntry, Pose, RenderContext, ShapeSpec, ShapeStrategy};
use crate::scale_set::{ScaleSpec, XSpec, YSpec};

/// One segment per category and series, stacked in series order from zero.
pub struct StackedBarStrategy;

impl ShapeStrategy for StackedBarStrategy {
    fn kind(&self) -> ChartKind {
        ChartKind::StackedBar
    }

    fn scale_spec(&self, config: &ChartConfig) -> Option<ScaleSpec> {
        Some(ScaleSpec {
            x: XSpec::Band {
                inner: config.bar_padding,
                outer: config.bar_padding * 0.5,
            },
            y: YSpec::StackedTotal,
        })
    }

    fn layout(&self, ctx: &RenderContext) -> Result<Vec<ShapeSpec>> {
        let data = ctx.table()?;
        let scales = ctx.scales()?;
        let band = scales
            .x
            .as_band()
            .ok_or(RenderError::NoCartesianScale { kind: self.kind() })?;
        let origin = ctx.dims.origin();
        let colors = ctx.palette(ctx.series.len());
        let top_layer = ctx.series.len().saturating_sub(1);

        let mut specs = Vec::with_capacity(data.len() * ctx.series.len());
        for (layer_index, (layer, color)) in stack(data, ctx.series, StackOffset::Zero)
            .into_iter()
            .zip(colors)
            .enumerate()
        {
            // Only the outermost segment gets rounded corners.
            let radius = if layer_index == top_layer {
                ctx.style.corner_radius.min(band.band_width() * 0.5)
            } else {
                0.0
            };
            for (i, (p, b)) in data.points().iter().zip(&layer.bands).enumerate() {
                let Some(x) = band.band_start(i) else {
                    continue;
                };
                let y0 = origin.y + scales.y.map(b.upper);
                let y1 = origin.y + scales.y.map(b.lower);
                specs.push(
                    ShapeSpec::new(
                        format!("{}/{}", p.id(), layer.series),
                        Geometry::rect(Rect::from_corners(origin.x + x, y0, origin.x + x + band.band_width(), y1), radius),
                        Paint::fill(color),
                    )
                    .opacity(ctx.style.base_opacity)
                    .meta(meta(p.key().to_string(), Some(&layer.series), b.value))
                    .order(i),
                );
            }
        }
        Ok(specs)
    }

    fn enter_state(&self, spec: &ShapeSpec, _ctx: &RenderContext) -> Pose {
        let geometry = match &spec.geometry {
            Geometry::Rect { rect, radius } => Geometry::rect(flatten_rect(*rect, rect.bottom()), *radius),
            other => other.clone(),
        };
        Pose {
            geometry,
            opacity: spec.opacity,
        }
    }

    fn exit_state(&self, current: &Geometry, _ctx: &RenderContext) -> Pose {
        Pose {
            geometry: collapse_to_bottom(current),
            opacity: 0.0,
        }
    }

    fn legend_entries(&self, ctx: &RenderContext) -> Vec<LegendEntry> {
        series_legend(ctx)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use canopy_paint::ApproxTextMeasurer;
    use canopy_theme::ThemeState;

    use super::*;
    use crate::data::{ChartData, DataPoint, Dataset};
    use crate::dimensions::{Dimensions, Margins};
    use crate::scale_set::ScaleSet;
    use crate::vibe;

    #[test]
    fn segments_stack_to_the_category_total() {
        let data = Dataset::new(vec![DataPoint::labeled("A")
            .with("v1", 30.0)
            .with("v2", 20.0)
            .with("v3", 10.0)])
        .unwrap();
        let config = ChartConfig::for_kind(ChartKind::StackedBar);
        let dims = Dimensions::new(100.0, 120.0, Margins::ZERO);
        let series = StackedBarStrategy.series(&data);
        let scales = ScaleSet::build(&data, &dims, StackedBarStrategy.scale_spec(&config).unwrap(), &series);
        assert_eq!(scales.y.domain(), (0.0, 60.0));
        let chart_data = ChartData::Table(Arc::new(data));
        let measurer = ApproxTextMeasurer::default();
        let ctx = RenderContext {
            kind: ChartKind::StackedBar,
            dims,
            data: &chart_data,
            series: &series,
            scales: Some(&scales),
            style: vibe::resolve(None, ChartKind::StackedBar),
            config: &config,
            theme: ThemeState::default(),
            measurer: &measurer,
        };

        let specs = StackedBarStrategy.layout(&ctx).unwrap();
        let keys: Vec<&str> = specs.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["A/v1", "A/v2", "A/v3"]);
        let total: f32 = specs.iter().map(|s| s.geometry.bounds().height()).sum();
        assert!((total - 120.0).abs() < 1e-3);
        // Contiguous: each segment starts where the previous one ends.
        for pair in specs.windows(2) {
            let below = pair[0].geometry.bounds();
            let above = pair[1].geometry.bounds();
            assert!((above.bottom() - below.y()).abs() < 1e-3);
        }
    }
}
