//! Retained drawing surface.
//!
//! The surface owns every drawn shape, grouped into named layers and keyed by
//! a caller-chosen string so repeated renders can find and update them in
//! place. Geometry, opacity and scale animate on independent channels; a new
//! transition on a channel supersedes the running one and starts from its
//! current value.
//!
//! Time only advances through [`Surface::tick`]. Repeating decoration timers
//! are owned by a shape and die with it.

use canopy_animation::{AnimationScheduler, Easing, Interpolate, IntervalId, Timing, Tween};
use canopy_core::{Color, Point, Size};
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, Key, SlotMap};

use crate::geometry::Geometry;

new_key_type! {
    pub struct ShapeId;
}

/// Layer that receives spawned decoration particles.
pub const EFFECTS_LAYER: &str = "effects";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Paint {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f32,
    /// Dash and gap lengths for dashed strokes.
    pub dash: Option<(f32, f32)>,
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            ..Default::default()
        }
    }

    pub fn stroke(color: Color, width: f32) -> Self {
        Self {
            stroke: Some(color),
            stroke_width: width,
            ..Default::default()
        }
    }

    pub fn with_dash(mut self, dash: f32, gap: f32) -> Self {
        self.dash = Some((dash, gap));
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub radius: f32,
}

/// Data attached to an interactive shape, reported back on hover.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeMeta {
    pub label: String,
    pub series: Option<String>,
    pub value: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Leaves,
    Bubbles,
    Sparkles,
    Embers,
    Sand,
    Snow,
}

impl ParticleKind {
    pub fn name(&self) -> &'static str {
        match self {
            ParticleKind::Leaves => "leaves",
            ParticleKind::Bubbles => "bubbles",
            ParticleKind::Sparkles => "sparkles",
            ParticleKind::Embers => "embers",
            ParticleKind::Sand => "sand",
            ParticleKind::Snow => "snow",
        }
    }

    /// Particles that drift downwards rather than rise.
    fn falls(&self) -> bool {
        matches!(
            self,
            ParticleKind::Leaves | ParticleKind::Sand | ParticleKind::Snow
        )
    }
}

/// A periodic particle spawner attached to a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleEffect {
    pub kind: ParticleKind,
    /// Falls back to the owner's fill.
    pub color: Option<Color>,
    pub period_ms: f32,
    pub life_ms: f32,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Live,
    Exiting,
}

#[derive(Clone, Debug)]
struct Channel<T: Interpolate + PartialEq> {
    current: T,
    tween: Option<Tween<T>>,
}

impl<T: Interpolate + PartialEq> Channel<T> {
    fn new(value: T) -> Self {
        Self {
            current: value,
            tween: None,
        }
    }

    fn target(&self) -> &T {
        self.tween.as_ref().map_or(&self.current, |t| t.target())
    }

    /// Returns false when `to` is already the target.
    fn transition(&mut self, to: T, timing: Timing) -> bool {
        if *self.target() == to {
            return false;
        }
        if timing.is_instant() {
            self.current = to;
            self.tween = None;
        } else {
            self.tween = Some(Tween::new(self.current.clone(), to, timing));
        }
        true
    }

    fn step(&mut self, dt_ms: f32) {
        if let Some(tween) = self.tween.as_mut() {
            self.current = tween.step(dt_ms).clone();
            if tween.is_finished() {
                self.tween = None;
            }
        }
    }

    fn finish(&mut self) {
        if let Some(mut tween) = self.tween.take() {
            self.current = tween.finish().clone();
        }
    }

    fn is_animating(&self) -> bool {
        self.tween.is_some()
    }
}

/// Initial state of a new shape.
#[derive(Clone, Debug)]
pub struct ShapeInit {
    pub key: String,
    pub geometry: Geometry,
    pub paint: Paint,
    pub opacity: f32,
    pub scale: f32,
    pub interactive: bool,
    pub meta: Option<ShapeMeta>,
}

impl ShapeInit {
    pub fn new(key: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            key: key.into(),
            geometry,
            paint: Paint::default(),
            opacity: 1.0,
            scale: 1.0,
            interactive: false,
            meta: None,
        }
    }

    pub fn paint(mut self, paint: Paint) -> Self {
        self.paint = paint;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn interactive(mut self, meta: ShapeMeta) -> Self {
        self.interactive = true;
        self.meta = Some(meta);
        self
    }
}

#[derive(Clone, Debug)]
pub struct Shape {
    key: String,
    layer: String,
    geometry: Channel<Geometry>,
    opacity: Channel<f32>,
    scale: Channel<f32>,
    paint: Paint,
    glow: Option<Glow>,
    interactive: bool,
    meta: Option<ShapeMeta>,
    lifecycle: Lifecycle,
    remove_on_finish: bool,
}

impl Shape {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn layer(&self) -> &str {
        &self.layer
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry.current
    }

    pub fn target_geometry(&self) -> &Geometry {
        self.geometry.target()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.current
    }

    pub fn target_opacity(&self) -> f32 {
        *self.opacity.target()
    }

    pub fn scale(&self) -> f32 {
        self.scale.current
    }

    pub fn target_scale(&self) -> f32 {
        *self.scale.target()
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    pub fn glow(&self) -> Option<&Glow> {
        self.glow.as_ref()
    }

    pub fn meta(&self) -> Option<&ShapeMeta> {
        self.meta.as_ref()
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn is_exiting(&self) -> bool {
        self.lifecycle == Lifecycle::Exiting
    }

    pub fn is_animating(&self) -> bool {
        self.geometry.is_animating() || self.opacity.is_animating() || self.scale.is_animating()
    }

    fn step(&mut self, dt_ms: f32) {
        self.geometry.step(dt_ms);
        self.opacity.step(dt_ms);
        self.scale.step(dt_ms);
    }

    fn finish(&mut self) {
        self.geometry.finish();
        self.opacity.finish();
        self.scale.finish();
    }

    fn is_done(&self) -> bool {
        (self.is_exiting() || self.remove_on_finish) && !self.is_animating()
    }

    /// Pointer position mapped back through the shape's scale transform.
    fn local_point(&self, p: Point) -> Point {
        let s = self.scale.current;
        if (s - 1.0).abs() < 1e-4 || s.abs() < 1e-3 {
            return p;
        }
        let c = self.geometry.current.bounds().center();
        Point::new(c.x + (p.x - c.x) / s, c.y + (p.y - c.y) / s)
    }
}

pub struct Surface {
    size: Option<Size>,
    shapes: SlotMap<ShapeId, Shape>,
    layers: IndexMap<String, IndexMap<String, ShapeId>>,
    scheduler: AnimationScheduler<ShapeId>,
    effects: FxHashMap<IntervalId, ParticleEffect>,
    mutations: u64,
    particles_spawned: u64,
}

impl Surface {
    pub fn new() -> Self {
        Self {
            size: None,
            shapes: SlotMap::with_key(),
            layers: IndexMap::new(),
            scheduler: AnimationScheduler::new(),
            effects: FxHashMap::default(),
            mutations: 0,
            particles_spawned: 0,
        }
    }

    pub fn mount(&mut self, size: Size) {
        tracing::debug!(width = size.width, height = size.height, "surface mounted");
        self.size = Some(size);
    }

    pub fn resize(&mut self, size: Size) {
        if self.size.is_some() {
            self.size = Some(size);
        }
    }

    /// Detach from the host: cancels every timer and drops all shapes.
    pub fn unmount(&mut self) {
        let cancelled = self.scheduler.cancel_all();
        self.effects.clear();
        let dropped = self.shapes.len();
        self.shapes.clear();
        self.layers.clear();
        self.size = None;
        tracing::debug!(cancelled, dropped, "surface unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.size.is_some()
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    /// Register a layer. Layers paint in registration order.
    pub fn add_layer(&mut self, layer: &str) {
        if !self.layers.contains_key(layer) {
            self.layers.insert(layer.to_string(), IndexMap::new());
        }
    }

    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }

    pub fn insert(&mut self, layer: &str, init: ShapeInit) -> ShapeId {
        if let Some(old) = self.find(layer, &init.key) {
            self.remove(old);
        }
        self.add_layer(layer);
        let key = init.key.clone();
        let id = self.shapes.insert(Shape {
            key: init.key,
            layer: layer.to_string(),
            geometry: Channel::new(init.geometry),
            opacity: Channel::new(init.opacity),
            scale: Channel::new(init.scale),
            paint: init.paint,
            glow: None,
            interactive: init.interactive,
            meta: init.meta,
            lifecycle: Lifecycle::Live,
            remove_on_finish: false,
        });
        if let Some(keys) = self.layers.get_mut(layer) {
            keys.insert(key, id);
        }
        self.mutations += 1;
        id
    }

    pub fn find(&self, layer: &str, key: &str) -> Option<ShapeId> {
        self.layers.get(layer)?.get(key).copied()
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    /// Shapes of `layer` in paint order.
    pub fn shapes_in<'a>(&'a self, layer: &str) -> impl Iterator<Item = (ShapeId, &'a Shape)> + 'a {
        self.layers
            .get(layer)
            .into_iter()
            .flat_map(|keys| keys.values())
            .filter_map(|id| self.shapes.get(*id).map(|s| (*id, s)))
    }

    /// Keys of the live (non-exiting) shapes in `layer`, in paint order.
    pub fn live_keys(&self, layer: &str) -> Vec<String> {
        self.shapes_in(layer)
            .filter(|(_, s)| !s.is_exiting())
            .map(|(_, s)| s.key.clone())
            .collect()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn transition_geometry(&mut self, id: ShapeId, to: Geometry, timing: Timing) -> bool {
        let changed = self
            .shapes
            .get_mut(id)
            .is_some_and(|s| s.geometry.transition(to, timing));
        self.count(changed)
    }

    pub fn transition_opacity(&mut self, id: ShapeId, to: f32, timing: Timing) -> bool {
        let changed = self
            .shapes
            .get_mut(id)
            .is_some_and(|s| s.opacity.transition(to, timing));
        self.count(changed)
    }

    pub fn transition_scale(&mut self, id: ShapeId, to: f32, timing: Timing) -> bool {
        let changed = self
            .shapes
            .get_mut(id)
            .is_some_and(|s| s.scale.transition(to, timing));
        self.count(changed)
    }

    pub fn set_paint(&mut self, id: ShapeId, paint: Paint) -> bool {
        let changed = match self.shapes.get_mut(id) {
            Some(s) if s.paint != paint => {
                s.paint = paint;
                true
            }
            _ => false,
        };
        self.count(changed)
    }

    pub fn set_glow(&mut self, id: ShapeId, glow: Option<Glow>) -> bool {
        let changed = match self.shapes.get_mut(id) {
            Some(s) if s.glow != glow => {
                s.glow = glow;
                true
            }
            _ => false,
        };
        self.count(changed)
    }

    pub fn set_meta(&mut self, id: ShapeId, meta: Option<ShapeMeta>) -> bool {
        let changed = match self.shapes.get_mut(id) {
            Some(s) if s.meta != meta => {
                s.interactive = meta.is_some();
                s.meta = meta;
                true
            }
            _ => false,
        };
        self.count(changed)
    }

    /// Start removing a shape: it animates to `geometry`/`opacity` and is
    /// dropped once both transitions finish. Its timers stop immediately.
    pub fn begin_exit(&mut self, id: ShapeId, geometry: Geometry, opacity: f32, timing: Timing) {
        let Some(shape) = self.shapes.get_mut(id) else {
            return;
        };
        if shape.lifecycle == Lifecycle::Exiting {
            return;
        }
        shape.lifecycle = Lifecycle::Exiting;
        shape.geometry.transition(geometry, timing);
        shape.opacity.transition(opacity, timing);
        shape.scale.transition(1.0, timing);
        self.stop_decorations(id);
        self.mutations += 1;
    }

    /// Bring an exiting shape back; it keeps its current interpolated state.
    pub fn revive(&mut self, id: ShapeId) -> bool {
        let revived = match self.shapes.get_mut(id) {
            Some(s) if s.lifecycle == Lifecycle::Exiting => {
                s.lifecycle = Lifecycle::Live;
                true
            }
            _ => false,
        };
        self.count(revived)
    }

    pub fn remove(&mut self, id: ShapeId) -> bool {
        let Some(shape) = self.shapes.remove(id) else {
            return false;
        };
        if let Some(keys) = self.layers.get_mut(&shape.layer) {
            keys.shift_remove(&shape.key);
        }
        self.stop_decorations(id);
        self.mutations += 1;
        true
    }

    /// Reorder a layer so `keys` come first in the given order. Shapes not
    /// named keep their relative order after them.
    pub fn reorder_layer(&mut self, layer: &str, keys: &[String]) -> bool {
        let Some(current) = self.layers.get_mut(layer) else {
            return false;
        };
        let mut next: IndexMap<String, ShapeId> = IndexMap::with_capacity(current.len());
        for key in keys {
            if let Some(id) = current.get(key) {
                next.insert(key.clone(), *id);
            }
        }
        for (key, id) in current.iter() {
            if !next.contains_key(key) {
                next.insert(key.clone(), *id);
            }
        }
        let changed = !next.keys().eq(current.keys());
        if changed {
            *current = next;
        }
        self.count(changed)
    }

    /// Advance every transition and timer by `dt_ms`.
    pub fn tick(&mut self, dt_ms: f32) {
        for shape in self.shapes.values_mut() {
            shape.step(dt_ms);
        }
        self.sweep();
        let firings = self.scheduler.tick(dt_ms);
        for firing in firings {
            self.spawn_particle(firing.id, firing.owner, firing.sequence);
        }
    }

    /// Jump every transition to its end state. Timers are not advanced.
    pub fn settle(&mut self) {
        for shape in self.shapes.values_mut() {
            shape.finish();
        }
        self.sweep();
    }

    pub fn is_animating(&self) -> bool {
        self.shapes.values().any(Shape::is_animating)
    }

    /// Topmost live interactive shape under `p`.
    pub fn hit_test(&self, p: Point) -> Option<ShapeId> {
        for keys in self.layers.values().rev() {
            for id in keys.values().rev() {
                let Some(shape) = self.shapes.get(*id) else {
                    continue;
                };
                if !shape.interactive || shape.is_exiting() {
                    continue;
                }
                let local = shape.local_point(p);
                if shape
                    .geometry
                    .current
                    .contains(local, shape.paint.stroke_width)
                {
                    return Some(*id);
                }
            }
        }
        None
    }

    /// Total structural and target changes since creation.
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }

    /// Attach a repeating particle spawner to `owner`. A shape carries at most
    /// one spawner; exiting or missing owners get none.
    pub fn start_decoration(&mut self, owner: ShapeId, effect: ParticleEffect) -> Option<IntervalId> {
        match self.shapes.get(owner) {
            Some(s) if !s.is_exiting() => {}
            _ => return None,
        }
        if self.scheduler.has_owner(owner) {
            return None;
        }
        let id = self.scheduler.start_interval(owner, effect.period_ms);
        self.effects.insert(id, effect);
        Some(id)
    }

    pub fn stop_decorations(&mut self, owner: ShapeId) -> usize {
        let cancelled = self.scheduler.cancel_owned_by(owner);
        if cancelled > 0 {
            let scheduler = &self.scheduler;
            self.effects.retain(|id, _| scheduler.is_active(*id));
        }
        cancelled
    }

    pub fn active_decorations(&self) -> usize {
        self.scheduler.active_count()
    }

    pub fn has_decoration(&self, owner: ShapeId) -> bool {
        self.scheduler.has_owner(owner)
    }

    fn count(&mut self, changed: bool) -> bool {
        if changed {
            self.mutations += 1;
        }
        changed
    }

    fn sweep(&mut self) {
        let done: Vec<ShapeId> = self
            .shapes
            .iter()
            .filter(|(_, s)| s.is_done())
            .map(|(id, _)| id)
            .collect();
        for id in done {
            self.remove(id);
        }
    }

    fn spawn_particle(&mut self, interval: IntervalId, owner: ShapeId, sequence: u32) {
        let Some(effect) = self.effects.get(&interval).copied() else {
            return;
        };
        let (bounds, fill) = match self.shapes.get(owner) {
            Some(s) if !s.is_exiting() => (
                s.geometry.current.bounds().scale_about_center(s.scale.current),
                s.paint.fill,
            ),
            _ => {
                self.stop_decorations(owner);
                return;
            }
        };

        let seed = owner.data().as_ffi() ^ (u64::from(sequence) << 32);
        let mut rng = StdRng::seed_from_u64(seed);
        let x = bounds.x() + rng.random_range(0.0..=1.0f32) * bounds.width();
        let drift_x = rng.random_range(-1.0..=1.0f32) * effect.radius * 4.0;
        let travel = effect.radius * 6.0 + bounds.height() * 0.25;
        let (start_y, end_y) = if effect.kind.falls() {
            (bounds.y(), bounds.y() + travel)
        } else {
            (bounds.bottom(), bounds.bottom() - travel)
        };

        let color = effect.color.or(fill).unwrap_or(Color::WHITE);
        self.particles_spawned += 1;
        let key = format!("particle-{}", self.particles_spawned);
        let radius = effect.radius * rng.random_range(0.6..=1.0f32);
        let id = self.insert(
            EFFECTS_LAYER,
            ShapeInit::new(
                key,
                Geometry::Circle {
                    center: Point::new(x, start_y),
                    radius,
                },
            )
            .paint(Paint::fill(color))
            .opacity(0.9),
        );
        let timing = Timing::new(effect.life_ms, Easing::EaseOutQuad);
        if let Some(shape) = self.shapes.get_mut(id) {
            shape.remove_on_finish = true;
            shape.geometry.transition(
                Geometry::Circle {
                    center: Point::new(x + drift_x, end_y),
                    radius: radius * 0.5,
                },
                timing,
            );
            shape.opacity.transition(0.0, timing);
        }
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::Rect;

    fn mounted() -> Surface {
        let mut s = Surface::new();
        s.mount(Size::new(200.0, 100.0));
        s
    }

    fn bar(x: f32, h: f32) -> Geometry {
        Geometry::rect(Rect::new(x, 100.0 - h, 10.0, h), 0.0)
    }

    #[test]
    fn repeated_target_is_not_a_mutation() {
        let mut s = mounted();
        let id = s.insert("series", ShapeInit::new("a", bar(0.0, 0.0)));
        let timing = Timing::new(300.0, Easing::EaseOut);
        assert!(s.transition_geometry(id, bar(0.0, 50.0), timing));
        let before = s.mutation_count();
        assert!(!s.transition_geometry(id, bar(0.0, 50.0), timing));
        assert_eq!(s.mutation_count(), before);
    }

    #[test]
    fn superseding_transition_starts_from_current_value() {
        let mut s = mounted();
        let id = s.insert("series", ShapeInit::new("a", bar(0.0, 0.0)).opacity(0.0));
        s.transition_opacity(id, 1.0, Timing::new(100.0, Easing::Linear));
        s.tick(50.0);
        let mid = s.shape(id).map(Shape::opacity).unwrap_or_default();
        assert!((mid - 0.5).abs() < 1e-3);
        s.transition_opacity(id, 0.0, Timing::new(100.0, Easing::Linear));
        s.tick(1.0);
        let after = s.shape(id).map(Shape::opacity).unwrap_or_default();
        assert!(after < mid && after > 0.4);
    }

    #[test]
    fn exiting_shape_is_removed_after_transition() {
        let mut s = mounted();
        let id = s.insert("series", ShapeInit::new("a", bar(0.0, 40.0)));
        s.begin_exit(id, bar(0.0, 0.0), 0.0, Timing::new(200.0, Easing::Linear));
        s.tick(100.0);
        assert!(s.contains(id));
        s.tick(100.0);
        assert!(!s.contains(id));
        assert!(s.find("series", "a").is_none());
    }

    #[test]
    fn revive_keeps_identity() {
        let mut s = mounted();
        let id = s.insert("series", ShapeInit::new("a", bar(0.0, 40.0)));
        s.begin_exit(id, bar(0.0, 0.0), 0.0, Timing::new(200.0, Easing::Linear));
        s.tick(50.0);
        assert!(s.revive(id));
        s.transition_opacity(id, 1.0, Timing::new(200.0, Easing::Linear));
        s.settle();
        assert!(s.contains(id));
        assert!(!s.shape(id).is_some_and(Shape::is_exiting));
    }

    #[test]
    fn hit_test_prefers_topmost_and_skips_inert() {
        let mut s = mounted();
        s.insert("grid", ShapeInit::new("g", bar(0.0, 100.0)));
        let lower = s.insert(
            "series",
            ShapeInit::new("a", bar(0.0, 50.0)).interactive(ShapeMeta::default()),
        );
        assert_eq!(s.hit_test(Point::new(5.0, 80.0)), Some(lower));
        assert_eq!(s.hit_test(Point::new(5.0, 10.0)), None);
    }

    #[test]
    fn decoration_spawns_particles_until_stopped() {
        let mut s = mounted();
        let id = s.insert("series", ShapeInit::new("a", bar(0.0, 50.0)));
        let effect = ParticleEffect {
            kind: ParticleKind::Leaves,
            color: None,
            period_ms: 100.0,
            life_ms: 400.0,
            radius: 3.0,
        };
        assert!(s.start_decoration(id, effect).is_some());
        assert!(s.start_decoration(id, effect).is_none());
        s.tick(250.0);
        assert_eq!(s.shapes_in(EFFECTS_LAYER).count(), 2);
        assert_eq!(s.stop_decorations(id), 1);
        s.tick(1000.0);
        assert_eq!(s.shapes_in(EFFECTS_LAYER).count(), 0);
    }

    #[test]
    fn removing_owner_cancels_its_timer() {
        let mut s = mounted();
        let id = s.insert("series", ShapeInit::new("a", bar(0.0, 50.0)));
        let effect = ParticleEffect {
            kind: ParticleKind::Bubbles,
            color: Some(Color::WHITE),
            period_ms: 50.0,
            life_ms: 100.0,
            radius: 2.0,
        };
        s.start_decoration(id, effect);
        s.remove(id);
        assert_eq!(s.active_decorations(), 0);
        s.tick(500.0);
        assert_eq!(s.shape_count(), 0);
    }

    #[test]
    fn unmount_clears_everything() {
        let mut s = mounted();
        let id = s.insert("series", ShapeInit::new("a", bar(0.0, 50.0)));
        s.transition_geometry(id, bar(0.0, 80.0), Timing::new(500.0, Easing::Linear));
        s.start_decoration(
            id,
            ParticleEffect {
                kind: ParticleKind::Snow,
                color: None,
                period_ms: 10.0,
                life_ms: 100.0,
                radius: 1.0,
            },
        );
        s.unmount();
        assert!(!s.is_mounted());
        assert_eq!(s.active_decorations(), 0);
        assert_eq!(s.shape_count(), 0);
        assert!(!s.is_animating());
    }

    #[test]
    fn reorder_moves_named_keys_first() {
        let mut s = mounted();
        for k in ["a", "b", "c"] {
            s.insert("series", ShapeInit::new(k, bar(0.0, 1.0)));
        }
        assert!(s.reorder_layer("series", &["c".into(), "a".into()]));
        assert_eq!(s.live_keys("series"), vec!["c", "a", "b"]);
        assert!(!s.reorder_layer("series", &["c".into(), "a".into()]));
    }
}
