use std::borrow::Cow;

use canopy_core::{Color, Point};
use canopy_paint::{Geometry, Paint, TextAnchor};
use indexmap::IndexSet;

use super::{meta, point_rect};
use crate::config::ChartConfig;
use crate::data::{ChartData, TreeNode};
use crate::error::Result;
use crate::format::format_compact;
use crate::kind::ChartKind;
use crate::layout::{treemap, TreemapCell, TreemapPadding};
use crate::render::{HoverEffects, LegendEntry, Pose, RenderContext, ShapeSpec, ShapeStrategy};
use crate::scale_set::ScaleSpec;

/// Horizontal and vertical room a label needs inside its cell.
const LABEL_INSET: f32 = 4.0;

/// Leaves of a hierarchy as nested rects. Tabular data becomes a one-level
/// tree of its first series.
pub struct TreemapStrategy;

fn root<'a>(ctx: &'a RenderContext) -> Cow<'a, TreeNode> {
    match ctx.data {
        ChartData::Tree(t) => Cow::Borrowed(t.as_ref()),
        ChartData::Table(d) => {
            let series = ctx.series.first().map(String::as_str).unwrap_or("value");
            Cow::Owned(TreeNode::from_dataset("root", d, series))
        }
    }
}

fn cells(ctx: &RenderContext) -> Vec<TreemapCell> {
    treemap(
        &root(ctx),
        ctx.dims.bounds(),
        ctx.config.tiling,
        TreemapPadding {
            inner: ctx.config.cell_padding,
            outer: ctx.config.outer_padding,
        },
    )
}

/// One color per top-level group, in first-seen order.
fn group_colors(ctx: &RenderContext, cells: &[TreemapCell]) -> (IndexSet<String>, Vec<Color>) {
    let groups: IndexSet<String> = cells.iter().map(|c| c.group.clone()).collect();
    let colors = ctx.palette(groups.len());
    (groups, colors)
}

impl ShapeStrategy for TreemapStrategy {
    fn kind(&self) -> ChartKind {
        ChartKind::Treemap
    }

    fn scale_spec(&self, _config: &ChartConfig) -> Option<ScaleSpec> {
        None
    }

    fn layout(&self, ctx: &RenderContext) -> Result<Vec<ShapeSpec>> {
        let cells = cells(ctx);
        let (groups, colors) = group_colors(ctx, &cells);
        let radius = ctx.style.corner_radius;

        Ok(cells
            .into_iter()
            .enumerate()
            .map(|(i, cell)| {
                let color = groups
                    .get_index_of(&cell.group)
                    .and_then(|g| colors.get(g).copied())
                    .unwrap_or_else(|| ctx.theme.color());
                let r = radius.min(cell.rect.width() * 0.5).min(cell.rect.height() * 0.5);
                let series = (cell.group != cell.name).then_some(cell.group.as_str());
                ShapeSpec::new(cell.path.clone(), Geometry::rect(cell.rect, r), Paint::fill(color))
                    .opacity(ctx.style.base_opacity)
                    .meta(meta(cell.name.clone(), series, cell.value))
                    .order(i)
            })
            .collect())
    }

    fn enter_state(&self, spec: &ShapeSpec, _ctx: &RenderContext) -> Pose {
        let geometry = match &spec.geometry {
            Geometry::Rect { rect, .. } => Geometry::rect(point_rect(*rect), 0.0),
            other => other.clone(),
        };
        Pose {
            geometry,
            opacity: 0.0,
        }
    }

    fn exit_state(&self, current: &Geometry, _ctx: &RenderContext) -> Pose {
        let geometry = match current {
            Geometry::Rect { rect, .. } => Geometry::rect(point_rect(*rect), 0.0),
            other => other.clone(),
        };
        Pose {
            geometry,
            opacity: 0.0,
        }
    }

    /// Names, plus values when enabled. A label that does not fit its cell
    /// is left out.
    fn labels(&self, ctx: &RenderContext) -> Result<Vec<ShapeSpec>> {
        if !ctx.config.show_labels {
            return Ok(Vec::new());
        }
        let size = ctx.config.label_size;
        let paint = Paint::fill(Color::WHITE);
        let mut out = Vec::new();
        for (i, cell) in cells(ctx).into_iter().enumerate() {
            let room_w = cell.rect.width() - LABEL_INSET * 2.0;
            let line = ctx.measurer.measure(&cell.name, size);
            if line.width > room_w || line.height + LABEL_INSET * 2.0 > cell.rect.height() {
                tracing::debug!(cell = %cell.path, width = line.width, room = room_w, "label dropped");
                continue;
            }
            let at = Point::new(cell.rect.x() + LABEL_INSET, cell.rect.y() + LABEL_INSET + size);
            out.push(
                ShapeSpec::new(
                    format!("name-{}", cell.path),
                    Geometry::text(at, cell.name.clone(), TextAnchor::Start, size),
                    paint.clone(),
                )
                .order(i),
            );

            if ctx.config.show_values {
                let text = format_compact(cell.value);
                let value_line = ctx.measurer.measure(&text, size);
                let needed = line.height + value_line.height + LABEL_INSET * 2.0;
                if value_line.width <= room_w && needed <= cell.rect.height() {
                    out.push(
                        ShapeSpec::new(
                            format!("value-{}", cell.path),
                            Geometry::text(
                                Point::new(at.x, at.y + line.height),
                                text,
                                TextAnchor::Start,
                                size,
                            ),
                            paint.clone(),
                        )
                        .opacity(0.85)
                        .order(i),
                    );
                }
            }
        }
        Ok(out)
    }

    fn legend_entries(&self, ctx: &RenderContext) -> Vec<LegendEntry> {
        let cells = cells(ctx);
        let (groups, colors) = group_colors(ctx, &cells);
        groups
            .into_iter()
            .zip(colors)
            .map(|(label, color)| LegendEntry { label, color })
            .collect()
    }

    fn hover_effects(&self) -> HoverEffects {
        HoverEffects {
            glow: true,
            decoration: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use canopy_paint::ApproxTextMeasurer;
    use canopy_theme::ThemeState;

    use super::*;
    use crate::dimensions::{Dimensions, Margins};
    use crate::vibe;

    #[test]
    fn labels_that_overflow_are_dropped() {
        let tree = TreeNode::node(
            "root",
            vec![
                TreeNode::leaf("big", 90.0),
                TreeNode::leaf("a-rather-long-name", 2.0),
            ],
        );
        let data = ChartData::Tree(Arc::new(tree));
        let config = ChartConfig::for_kind(ChartKind::Treemap);
        let measurer = ApproxTextMeasurer::default();
        let series = Vec::new();
        let ctx = RenderContext {
            kind: ChartKind::Treemap,
            dims: Dimensions::new(300.0, 200.0, Margins::ZERO),
            data: &data,
            series: &series,
            scales: None,
            style: vibe::resolve(None, ChartKind::Treemap),
            config: &config,
            theme: ThemeState::default(),
            measurer: &measurer,
        };

        let specs = TreemapStrategy.layout(&ctx).unwrap();
        assert_eq!(specs.len(), 2);
        let labels = TreemapStrategy.labels(&ctx).unwrap();
        let keys: Vec<&str> = labels.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["name-big"]);
    }
}
