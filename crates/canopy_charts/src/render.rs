//! The generic keyed renderer.
//!
//! A [`ShapeStrategy`] turns data into [`ShapeSpec`]s and names the poses a
//! shape enters from and exits to. [`reconcile`] diffs those specs against a
//! surface layer by key: new keys enter, existing keys transition in place,
//! missing keys exit and are removed once their exit animation ends.

use canopy_animation::{Easing, Timing};
use canopy_core::Color;
use canopy_paint::{Geometry, Paint, ShapeInit, ShapeMeta, Surface, TextMeasurer};
use canopy_theme::ThemeState;
use rustc_hash::FxHashSet;

use crate::config::ChartConfig;
use crate::data::{ChartData, Dataset};
use crate::dimensions::Dimensions;
use crate::error::{RenderError, Result};
use crate::kind::ChartKind;
use crate::scale_set::{ScaleSet, ScaleSpec};
use crate::vibe::{Stagger, VibeStyle};

/// Everything a strategy may read during one render.
pub struct RenderContext<'a> {
    pub kind: ChartKind,
    pub dims: Dimensions,
    pub data: &'a ChartData,
    pub series: &'a [String],
    pub scales: Option<&'a ScaleSet>,
    pub style: &'static VibeStyle,
    pub config: &'a ChartConfig,
    pub theme: ThemeState,
    pub measurer: &'a dyn TextMeasurer,
}

impl RenderContext<'_> {
    pub fn table(&self) -> Result<&Dataset> {
        self.data
            .table()
            .ok_or(RenderError::NeedsTable { kind: self.kind })
    }

    pub fn scales(&self) -> Result<&ScaleSet> {
        self.scales
            .ok_or(RenderError::NoCartesianScale { kind: self.kind })
    }

    /// `count` colors derived from the theme color.
    pub fn palette(&self, count: usize) -> Vec<Color> {
        self.theme.series_colors(count, self.config.palette)
    }

    pub fn motion(&self) -> Motion {
        Motion::new(self.style, self.config)
    }
}

/// Timing shared by every shape of one render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub duration_ms: f32,
    pub easing: Easing,
    pub stagger: Stagger,
}

impl Motion {
    pub fn new(style: &VibeStyle, config: &ChartConfig) -> Self {
        Self {
            duration_ms: config.animation_duration.unwrap_or(style.duration_ms),
            easing: style.easing,
            stagger: style.stagger,
        }
    }

    pub fn timing(&self, order: usize, total: usize) -> Timing {
        Timing::new(self.duration_ms, self.easing).with_delay(self.stagger.delay(order, total))
    }

    /// Unstaggered timing.
    pub fn plain(&self) -> Timing {
        Timing::new(self.duration_ms, self.easing)
    }
}

/// Geometry and opacity a shape enters from or exits to.
#[derive(Clone, Debug, PartialEq)]
pub struct Pose {
    pub geometry: Geometry,
    pub opacity: f32,
}

/// The desired final state of one keyed shape.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeSpec {
    pub key: String,
    pub geometry: Geometry,
    pub paint: Paint,
    pub opacity: f32,
    /// Present on shapes that respond to the pointer.
    pub meta: Option<ShapeMeta>,
    /// Stagger position.
    pub order: usize,
}

impl ShapeSpec {
    pub fn new(key: impl Into<String>, geometry: Geometry, paint: Paint) -> Self {
        Self {
            key: key.into(),
            geometry,
            paint,
            opacity: 1.0,
            meta: None,
            order: 0,
        }
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn meta(mut self, meta: ShapeMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

/// Hover decorations a kind uses from its vibe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverEffects {
    pub glow: bool,
    pub decoration: bool,
}

impl HoverEffects {
    pub const NONE: HoverEffects = HoverEffects {
        glow: false,
        decoration: false,
    };
}

/// Per-kind geometry. One implementation per chart kind; everything else is
/// shared.
pub trait ShapeStrategy: Sync {
    fn kind(&self) -> ChartKind;

    /// Cartesian scales this kind needs, if any.
    fn scale_spec(&self, config: &ChartConfig) -> Option<ScaleSpec>;

    /// Series this kind draws.
    fn series(&self, data: &Dataset) -> Vec<String> {
        data.series_keys().to_vec()
    }

    fn layout(&self, ctx: &RenderContext) -> Result<Vec<ShapeSpec>>;

    fn enter_state(&self, spec: &ShapeSpec, ctx: &RenderContext) -> Pose;

    fn exit_state(&self, current: &Geometry, ctx: &RenderContext) -> Pose;

    /// Annotations drawn above the series.
    fn labels(&self, _ctx: &RenderContext) -> Result<Vec<ShapeSpec>> {
        Ok(Vec::new())
    }

    fn legend_entries(&self, _ctx: &RenderContext) -> Vec<LegendEntry> {
        Vec::new()
    }

    fn hover_effects(&self) -> HoverEffects {
        HoverEffects::NONE
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReconcileReport {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
    pub revived: usize,
    /// Resting opacity the held shape's spec asked for.
    pub held_opacity: Option<f32>,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool {
        self.entered == 0 && self.updated == 0 && self.exited == 0 && self.revived == 0
    }
}

/// Sync `layer` with `specs` by key.
///
/// The live shape keyed `held` keeps its opacity; the opacity its spec asked
/// for is returned in [`ReconcileReport::held_opacity`] instead.
pub fn reconcile(
    surface: &mut Surface,
    layer: &str,
    specs: Vec<ShapeSpec>,
    motion: &Motion,
    held: Option<&str>,
    enter: impl Fn(&ShapeSpec) -> Pose,
    exit: impl Fn(&Geometry) -> Pose,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    surface.add_layer(layer);

    let wanted: FxHashSet<&str> = specs.iter().map(|s| s.key.as_str()).collect();
    let leaving: Vec<_> = surface
        .shapes_in(layer)
        .filter(|(_, s)| !s.is_exiting() && !wanted.contains(s.key()))
        .map(|(id, s)| (id, exit(s.target_geometry())))
        .collect();
    for (id, pose) in leaving {
        surface.begin_exit(id, pose.geometry, pose.opacity, motion.plain());
        report.exited += 1;
    }

    let total = specs.len();
    let mut order = Vec::with_capacity(total);
    for spec in specs {
        let timing = motion.timing(spec.order, total);
        match surface.find(layer, &spec.key) {
            Some(id) => {
                let revived = surface.revive(id);
                let mut changed = surface.transition_geometry(id, spec.geometry.clone(), timing);
                if !revived && held == Some(spec.key.as_str()) {
                    report.held_opacity = Some(spec.opacity);
                } else {
                    changed |= surface.transition_opacity(id, spec.opacity, timing);
                }
                changed |= surface.set_paint(id, spec.paint.clone());
                changed |= surface.set_meta(id, spec.meta.clone());
                if revived {
                    report.revived += 1;
                } else if changed {
                    report.updated += 1;
                }
            }
            None => {
                let pose = enter(&spec);
                let mut init = ShapeInit::new(spec.key.clone(), pose.geometry)
                    .paint(spec.paint.clone())
                    .opacity(pose.opacity);
                if let Some(meta) = spec.meta.clone() {
                    init = init.interactive(meta);
                }
                let id = surface.insert(layer, init);
                surface.transition_geometry(id, spec.geometry, timing);
                surface.transition_opacity(id, spec.opacity, timing);
                report.entered += 1;
            }
        }
        order.push(spec.key);
    }
    surface.reorder_layer(layer, &order);

    if !report.is_noop() {
        tracing::debug!(
            layer,
            entered = report.entered,
            updated = report.updated,
            exited = report.exited,
            revived = report.revived,
            "reconciled"
        );
    }
    report
}

/// Enter and exit by fading in place.
pub fn fade_in(spec: &ShapeSpec) -> Pose {
    Pose {
        geometry: spec.geometry.clone(),
        opacity: 0.0,
    }
}

pub fn fade_out(current: &Geometry) -> Pose {
    Pose {
        geometry: current.clone(),
        opacity: 0.0,
    }
}

/// Reject specs whose geometry has non-finite coordinates.
pub fn check_finite(specs: &[ShapeSpec]) -> Result<()> {
    for spec in specs {
        let b = spec.geometry.bounds();
        if ![b.x(), b.y(), b.width(), b.height()].iter().all(|v| v.is_finite()) {
            return Err(RenderError::NonFinite {
                key: spec.key.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::{Rect, Size};

    fn bar(key: &str, h: f32) -> ShapeSpec {
        ShapeSpec::new(
            key,
            Geometry::rect(Rect::new(0.0, 100.0 - h, 10.0, h), 0.0),
            Paint::fill(Color::BLACK),
        )
    }

    fn motion() -> Motion {
        Motion {
            duration_ms: 100.0,
            easing: Easing::Linear,
            stagger: Stagger::None,
        }
    }

    fn run(surface: &mut Surface, specs: Vec<ShapeSpec>) -> ReconcileReport {
        reconcile(surface, "series", specs, &motion(), None, fade_in, fade_out)
    }

    #[test]
    fn enter_update_exit_by_key() {
        let mut s = Surface::new();
        s.mount(Size::new(100.0, 100.0));
        let r = run(&mut s, vec![bar("A", 10.0), bar("B", 20.0), bar("C", 30.0)]);
        assert_eq!(r.entered, 3);
        s.settle();
        let b = s.find("series", "B").unwrap();

        let r = run(&mut s, vec![bar("B", 25.0), bar("C", 30.0), bar("D", 40.0)]);
        assert_eq!((r.entered, r.updated, r.exited), (1, 1, 1));
        assert_eq!(s.find("series", "B"), Some(b));
        s.settle();
        assert_eq!(s.live_keys("series"), vec!["B", "C", "D"]);
        assert!(s.find("series", "A").is_none());
    }

    #[test]
    fn identical_specs_do_not_mutate() {
        let mut s = Surface::new();
        s.mount(Size::new(100.0, 100.0));
        run(&mut s, vec![bar("A", 10.0), bar("B", 20.0)]);
        let before = s.mutation_count();
        let r = run(&mut s, vec![bar("A", 10.0), bar("B", 20.0)]);
        assert!(r.is_noop());
        assert_eq!(s.mutation_count(), before);
    }

    #[test]
    fn reappearing_key_is_revived_not_duplicated() {
        let mut s = Surface::new();
        s.mount(Size::new(100.0, 100.0));
        run(&mut s, vec![bar("A", 10.0)]);
        s.settle();
        run(&mut s, vec![]);
        s.tick(50.0);
        let r = run(&mut s, vec![bar("A", 10.0)]);
        assert_eq!(r.revived, 1);
        s.settle();
        assert_eq!(s.shape_count(), 1);
        let id = s.find("series", "A").unwrap();
        assert_eq!(s.shape(id).unwrap().opacity(), 1.0);
    }

    #[test]
    fn held_key_keeps_its_opacity() {
        let mut s = Surface::new();
        s.mount(Size::new(100.0, 100.0));
        run(&mut s, vec![bar("A", 10.0), bar("B", 20.0)]);
        s.settle();
        let a = s.find("series", "A").unwrap();
        s.transition_opacity(a, 0.5, motion().plain());
        s.settle();
        let before = s.mutation_count();

        let specs = vec![bar("A", 10.0).opacity(0.8), bar("B", 20.0)];
        let r = reconcile(&mut s, "series", specs, &motion(), Some("A"), fade_in, fade_out);
        assert!(r.is_noop());
        assert_eq!(r.held_opacity, Some(0.8));
        assert_eq!(s.mutation_count(), before);
        assert_eq!(s.shape(a).unwrap().target_opacity(), 0.5);
    }

    #[test]
    fn non_finite_geometry_is_rejected() {
        let spec = bar("bad", f32::NAN);
        assert_eq!(
            check_finite(&[spec]),
            Err(RenderError::NonFinite { key: "bad".into() })
        );
    }
}
