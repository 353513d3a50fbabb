//! The chart component: owns a surface and drives the render steps from
//! mount, resize, prop and pointer events.

use std::sync::Arc;

use canopy_animation::{Easing, Timing};
use canopy_core::events::event_types;
use canopy_core::{Color, Debouncer, Event, EventData, Point, Size};
use canopy_paint::{ApproxTextMeasurer, Glow, ShapeId, Surface};
use canopy_theme::ThemeState;

use crate::config::{ChartConfig, ConfigOverrides};
use crate::data::ChartData;
use crate::dimensions::{DimensionResolver, Dimensions};
use crate::hover::{info_from, HoverCallbacks};
use crate::kind::ChartKind;
use crate::render::{Motion, RenderContext, ShapeStrategy};
use crate::scale_set::{ScaleCache, ScaleSet};
use crate::steps::{Step, LAYERS, SERIES_LAYER};
use crate::strategies::strategy_for;
use crate::vibe::{self, VibeStyle};

/// Pointer moves closer together than this are coalesced.
pub const POINTER_DEBOUNCE_MS: f64 = 50.0;

/// Upper bound on hover transition length.
const HOVER_MAX_MS: f32 = 200.0;

#[derive(Clone, Debug, Default)]
pub struct ChartProps {
    pub data: ChartData,
    pub theme: ThemeState,
    pub vibe: Option<String>,
    pub config: ConfigOverrides,
}

#[derive(Clone, Debug)]
struct Hovered {
    id: ShapeId,
    key: String,
    /// Opacity to return to on leave.
    base_opacity: f32,
}

pub struct Chart {
    kind: ChartKind,
    strategy: &'static dyn ShapeStrategy,
    props: ChartProps,
    config: ChartConfig,
    style: &'static VibeStyle,
    surface: Surface,
    resolver: DimensionResolver,
    scale_cache: ScaleCache,
    scales: Option<Arc<ScaleSet>>,
    measurer: ApproxTextMeasurer,
    pointer: Debouncer<Point>,
    hovered: Option<Hovered>,
    // Hovered shape vanished during a render; report the end on the next
    // pointer event.
    hover_lost: bool,
}

impl Chart {
    pub fn new(kind: ChartKind, props: ChartProps) -> Self {
        let config = ChartConfig::resolve(kind, &props.config);
        let style = vibe::resolve(props.vibe.as_deref(), kind);
        Self {
            kind,
            strategy: strategy_for(kind),
            resolver: DimensionResolver::new(config.margins, config.min_height),
            props,
            config,
            style,
            surface: Surface::new(),
            scale_cache: ScaleCache::new(),
            scales: None,
            measurer: ApproxTextMeasurer::default(),
            pointer: Debouncer::new(POINTER_DEBOUNCE_MS),
            hovered: None,
            hover_lost: false,
        }
    }

    /// Route a host event.
    pub fn handle(&mut self, event: &Event, callbacks: &mut dyn HoverCallbacks) {
        match (event.event_type, &event.data) {
            (event_types::MOUNT, EventData::Resize { width, height }) => self.mount(*width, *height),
            (event_types::RESIZE, EventData::Resize { width, height }) => self.resize(*width, *height),
            (event_types::POINTER_MOVE, EventData::Pointer { x, y }) => {
                self.pointer_move(Point::new(*x, *y), event.timestamp_ms, callbacks);
            }
            (event_types::POINTER_LEAVE, _) => self.pointer_leave(callbacks),
            (event_types::UNMOUNT, _) => self.unmount(),
            _ => {}
        }
    }

    pub fn mount(&mut self, width: f32, height: f32) {
        for layer in LAYERS {
            self.surface.add_layer(layer);
        }
        let dims = self
            .resolver
            .observe(width, height)
            .or_else(|| self.resolver.current());
        let size = dims.map_or(Size::new(width, height), |d| Size::new(d.width, d.height));
        self.surface.mount(size);
        tracing::debug!(kind = %self.kind, vibe = self.style.name, "chart mounted");
        self.render();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if !self.surface.is_mounted() {
            return;
        }
        if let Some(d) = self.resolver.observe(width, height) {
            self.surface.resize(Size::new(d.width, d.height));
            self.render();
        }
    }

    /// Cancel every transition and timer and drop all shapes.
    pub fn unmount(&mut self) {
        self.surface.unmount();
        self.resolver.reset();
        self.scale_cache.clear();
        self.scales = None;
        self.pointer.reset();
        self.hovered = None;
        self.hover_lost = false;
    }

    pub fn set_data(&mut self, data: impl Into<ChartData>) {
        self.props.data = data.into();
        self.render();
    }

    pub fn set_vibe(&mut self, vibe: Option<&str>) {
        self.props.vibe = vibe.map(str::to_string);
        self.style = vibe::resolve(vibe, self.kind);
        self.render();
    }

    pub fn set_theme(&mut self, theme: ThemeState) {
        self.props.theme = theme;
        self.render();
    }

    pub fn set_theme_color(&mut self, color: Color) {
        self.props.theme.set_color(color);
        self.render();
    }

    pub fn set_config(&mut self, overrides: ConfigOverrides) {
        self.config = ChartConfig::resolve(self.kind, &overrides);
        self.props.config = overrides;
        if let Some(d) = self.resolver.configure(self.config.margins, self.config.min_height) {
            self.surface.resize(Size::new(d.width, d.height));
        }
        self.render();
    }

    /// Sync the surface with the current props. A no-op until mounted and
    /// while the bounded area is empty.
    pub fn render(&mut self) {
        if !self.surface.is_mounted() {
            tracing::trace!("render skipped: not mounted");
            return;
        }
        let Some(dims) = self.resolver.current().filter(Dimensions::is_drawable) else {
            tracing::debug!("render skipped: nothing to draw");
            return;
        };

        let table = self.props.data.table();
        let series = table.map(|t| self.strategy.series(t)).unwrap_or_default();
        self.scales = match (self.strategy.scale_spec(&self.config), table) {
            (Some(spec), Some(table)) => Some(self.scale_cache.get(&self.props.data, table, &dims, spec, &series)),
            _ => None,
        };

        let ctx = RenderContext {
            kind: self.kind,
            dims,
            data: &self.props.data,
            series: &series,
            scales: self.scales.as_deref(),
            style: self.style,
            config: &self.config,
            theme: self.props.theme,
            measurer: &self.measurer,
        };
        let held = self.hovered.as_ref().map(|h| h.key.as_str());
        let mut resting = None;
        for step in Step::ALL {
            match step.run(&mut self.surface, &ctx, self.strategy, held) {
                Ok(report) => resting = resting.or(report.held_opacity),
                Err(error) => tracing::warn!(step = step.name(), %error, "render step failed"),
            }
        }
        self.restore_hover(resting);
    }

    /// Advance animations by `dt_ms`.
    pub fn tick(&mut self, dt_ms: f32) {
        self.surface.tick(dt_ms);
    }

    /// Jump all animations to their end state.
    pub fn settle(&mut self) {
        self.surface.settle();
    }

    /// Debounced pointer move. Returns true when the move was processed now
    /// rather than held for [`Chart::flush_pointer`].
    pub fn pointer_move(&mut self, p: Point, now_ms: f64, callbacks: &mut dyn HoverCallbacks) -> bool {
        match self.pointer.push(now_ms, p) {
            Some(p) => {
                self.update_hover(p, callbacks);
                true
            }
            None => false,
        }
    }

    /// Deliver a held pointer move once its window has passed.
    pub fn flush_pointer(&mut self, now_ms: f64, callbacks: &mut dyn HoverCallbacks) -> bool {
        match self.pointer.flush(now_ms) {
            Some(p) => {
                self.update_hover(p, callbacks);
                true
            }
            None => false,
        }
    }

    pub fn pointer_leave(&mut self, callbacks: &mut dyn HoverCallbacks) {
        self.pointer.reset();
        let had_hover = self.hovered.is_some() || self.hover_lost;
        if let Some(h) = self.hovered.take() {
            self.unhover(&h);
        }
        self.hover_lost = false;
        if had_hover && self.config.show_tooltip {
            callbacks.on_hover_end();
        }
    }

    pub fn to_svg(&self) -> String {
        canopy_paint::to_svg(&self.surface)
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn style(&self) -> &'static VibeStyle {
        self.style
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn props(&self) -> &ChartProps {
        &self.props
    }

    /// Scales used by the last render, if the kind has any.
    pub fn scales(&self) -> Option<&ScaleSet> {
        self.scales.as_deref()
    }

    pub fn scale_builds(&self) -> u64 {
        self.scale_cache.builds()
    }

    pub fn dimensions(&self) -> Option<Dimensions> {
        self.resolver.current()
    }

    pub fn hovered_key(&self) -> Option<&str> {
        self.hovered.as_ref().map(|h| h.key.as_str())
    }

    fn hover_timing(&self) -> Timing {
        let duration = Motion::new(self.style, &self.config).duration_ms;
        Timing::new(duration.min(HOVER_MAX_MS), Easing::EaseOut)
    }

    fn update_hover(&mut self, p: Point, callbacks: &mut dyn HoverCallbacks) {
        let notify = self.config.show_tooltip;
        let hit = self
            .surface
            .hit_test(p)
            .filter(|id| self.surface.shape(*id).is_some_and(|s| s.layer() == SERIES_LAYER));

        if let (Some(id), Some(h)) = (hit, self.hovered.as_ref()) {
            if h.id == id {
                if notify {
                    if let Some(meta) = self.surface.shape(id).and_then(|s| s.meta()) {
                        callbacks.on_hover(&info_from(&h.key, meta, p));
                    }
                }
                return;
            }
        }

        let mut ended = std::mem::take(&mut self.hover_lost);
        if let Some(h) = self.hovered.take() {
            self.unhover(&h);
            ended = true;
        }
        match hit.and_then(|id| self.hover(id)) {
            Some(h) => {
                if notify {
                    if let Some(meta) = self.surface.shape(h.id).and_then(|s| s.meta()) {
                        callbacks.on_hover(&info_from(&h.key, meta, p));
                    }
                }
                self.hovered = Some(h);
            }
            None if ended && notify => callbacks.on_hover_end(),
            None => {}
        }
    }

    fn hover(&mut self, id: ShapeId) -> Option<Hovered> {
        let shape = self.surface.shape(id)?;
        let hovered = Hovered {
            id,
            key: shape.key().to_string(),
            base_opacity: shape.target_opacity(),
        };
        let timing = self.hover_timing();
        self.surface.transition_opacity(id, self.style.hover_opacity, timing);
        self.surface.transition_scale(id, self.style.hover_scale, timing);
        self.apply_effects(id);
        Some(hovered)
    }

    /// Glow and decoration for a hovered shape. Both are no-ops when
    /// already in place.
    fn apply_effects(&mut self, id: ShapeId) {
        let fill = self.surface.shape(id).and_then(|s| s.paint().fill);
        let effects = self.strategy.hover_effects();
        if effects.glow {
            if let (Some(glow), Some(fill)) = (self.style.glow, fill) {
                self.surface.set_glow(
                    id,
                    Some(Glow {
                        color: fill.lighten(glow.lighten),
                        radius: glow.radius,
                    }),
                );
            }
        }
        if effects.decoration {
            if let Some(effect) = self.style.decoration {
                self.surface.start_decoration(id, effect);
            }
        }
    }

    fn unhover(&mut self, h: &Hovered) {
        let timing = self.hover_timing();
        self.surface.transition_opacity(h.id, h.base_opacity, timing);
        self.surface.transition_scale(h.id, 1.0, timing);
        self.surface.set_glow(h.id, None);
        self.surface.stop_decorations(h.id);
    }

    /// Keep hover across a render. The series step left the hovered
    /// shape's opacity alone and reported its new resting opacity.
    fn restore_hover(&mut self, resting: Option<f32>) {
        let Some(mut h) = self.hovered.take() else {
            return;
        };
        let alive = self.surface.find(SERIES_LAYER, &h.key) == Some(h.id)
            && self.surface.shape(h.id).is_some_and(|s| !s.is_exiting());
        if alive {
            if let Some(base) = resting {
                h.base_opacity = base;
            }
            self.apply_effects(h.id);
            self.hovered = Some(h);
        } else {
            self.surface.stop_decorations(h.id);
            self.hover_lost = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataPoint, Dataset};
    use crate::hover::TooltipState;

    fn bars(values: &[(&str, f32)]) -> Dataset {
        Dataset::new(
            values
                .iter()
                .map(|(l, v)| DataPoint::labeled(*l).with("value", *v))
                .collect(),
        )
        .unwrap()
    }

    fn center_of(chart: &Chart, key: &str) -> Point {
        let id = chart.surface().find(SERIES_LAYER, key).unwrap();
        chart.surface().shape(id).unwrap().geometry().bounds().center()
    }

    #[test]
    fn render_before_mount_is_a_noop() {
        let mut chart = Chart::new(
            ChartKind::Bar,
            ChartProps {
                data: bars(&[("a", 1.0)]).into(),
                ..Default::default()
            },
        );
        chart.render();
        assert_eq!(chart.surface().shape_count(), 0);
    }

    #[test]
    fn moving_between_shapes_switches_hover() {
        let mut chart = Chart::new(
            ChartKind::Bar,
            ChartProps {
                data: bars(&[("a", 10.0), ("b", 10.0)]).into(),
                ..Default::default()
            },
        );
        chart.mount(300.0, 200.0);
        chart.settle();
        let mut tooltip = TooltipState::default();

        assert!(chart.pointer_move(center_of(&chart, "a"), 0.0, &mut tooltip));
        assert_eq!(chart.hovered_key(), Some("a"));
        assert!(chart.pointer_move(center_of(&chart, "b"), 100.0, &mut tooltip));
        assert_eq!(chart.hovered_key(), Some("b"));
        assert_eq!(tooltip.info.as_ref().map(|i| i.label.as_str()), Some("b"));
        // Off every shape.
        assert!(chart.pointer_move(Point::new(1.0, 1.0), 200.0, &mut tooltip));
        assert_eq!(chart.hovered_key(), None);
        assert!(!tooltip.visible);
    }

    #[test]
    fn rerender_under_hover_keeps_the_hover_pose() {
        let mut chart = Chart::new(
            ChartKind::Bar,
            ChartProps {
                data: bars(&[("a", 10.0), ("b", 5.0)]).into(),
                ..Default::default()
            },
        );
        chart.mount(300.0, 200.0);
        chart.settle();
        let id = chart.surface().find(SERIES_LAYER, "a").unwrap();
        let resting = chart.surface().shape(id).unwrap().target_opacity();
        let mut tooltip = TooltipState::default();
        chart.pointer_move(center_of(&chart, "a"), 0.0, &mut tooltip);
        chart.settle();

        let before = chart.surface().mutation_count();
        chart.render();
        chart.render();
        assert_eq!(chart.surface().mutation_count(), before);
        assert_eq!(chart.hovered_key(), Some("a"));
        let shape = chart.surface().shape(id).unwrap();
        assert_eq!(shape.target_opacity(), chart.style().hover_opacity);

        chart.pointer_leave(&mut tooltip);
        chart.settle();
        assert_eq!(chart.surface().shape(id).unwrap().target_opacity(), resting);
    }

    #[test]
    fn hidden_tooltip_suppresses_callbacks() {
        let mut chart = Chart::new(
            ChartKind::Bar,
            ChartProps {
                data: bars(&[("a", 10.0)]).into(),
                config: ConfigOverrides {
                    show_tooltip: Some(false),
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        chart.mount(300.0, 200.0);
        chart.settle();
        let mut tooltip = TooltipState::default();
        chart.pointer_move(center_of(&chart, "a"), 0.0, &mut tooltip);
        assert_eq!(chart.hovered_key(), Some("a"));
        assert!(!tooltip.visible);
    }

    #[test]
    fn data_change_under_hover_reports_end() {
        let mut chart = Chart::new(
            ChartKind::Bar,
            ChartProps {
                data: bars(&[("a", 10.0), ("b", 5.0)]).into(),
                ..Default::default()
            },
        );
        chart.mount(300.0, 200.0);
        chart.settle();
        let mut tooltip = TooltipState::default();
        let over_a = center_of(&chart, "a");
        chart.pointer_move(over_a, 0.0, &mut tooltip);
        assert!(tooltip.visible);

        chart.set_data(bars(&[("b", 5.0)]));
        assert_eq!(chart.hovered_key(), None);
        chart.settle();
        chart.pointer_move(Point::new(1.0, 1.0), 100.0, &mut tooltip);
        assert!(!tooltip.visible);
    }
}
