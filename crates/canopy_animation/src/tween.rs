//! Delayed, eased transitions between two values.
//!
//! A [`Tween`] never runs on its own: the owner advances it with
//! [`Tween::step`] from its frame callback. Replacing a running tween with a
//! new one that starts from [`Tween::value`] is how interruptions stay smooth.

use canopy_core::{Color, Point};

use crate::easing::Easing;

/// Values that can be blended between two endpoints.
///
/// `t` is eased progress and may fall outside `[0, 1]` for overshooting
/// curves; implementations extrapolate rather than clamp.
pub trait Interpolate: Clone {
    fn interpolate(&self, to: &Self, t: f32) -> Self;
}

pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl Interpolate for f32 {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        lerp_f32(*self, *to, t)
    }
}

impl Interpolate for Point {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        Point::new(lerp_f32(self.x, to.x, t), lerp_f32(self.y, to.y, t))
    }
}

impl Interpolate for Color {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

/// Timing parameters shared by a batch of transitions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    pub duration_ms: f32,
    pub delay_ms: f32,
    pub easing: Easing,
}

impl Timing {
    pub const fn new(duration_ms: f32, easing: Easing) -> Self {
        Self {
            duration_ms,
            delay_ms: 0.0,
            easing,
        }
    }

    /// Zero-length timing; the tween lands on its target at the first step.
    pub const fn instant() -> Self {
        Self::new(0.0, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    pub fn is_instant(&self) -> bool {
        self.duration_ms <= 0.0 && self.delay_ms <= 0.0
    }
}

#[derive(Clone, Debug)]
pub struct Tween<T: Interpolate> {
    from: T,
    to: T,
    timing: Timing,
    elapsed_ms: f32,
    value: T,
}

impl<T: Interpolate> Tween<T> {
    pub fn new(from: T, to: T, timing: Timing) -> Self {
        Self {
            value: from.clone(),
            from,
            to,
            timing,
            elapsed_ms: 0.0,
        }
    }

    /// Advance by `dt_ms` and return the new value.
    pub fn step(&mut self, dt_ms: f32) -> &T {
        self.elapsed_ms += dt_ms.max(0.0);
        if self.is_finished() {
            self.value = self.to.clone();
            return &self.value;
        }
        let active = self.elapsed_ms - self.timing.delay_ms;
        if active <= 0.0 {
            return &self.value;
        }
        let t = active / self.timing.duration_ms.max(1e-6);
        let eased = self.timing.easing.apply(t);
        self.value = self.from.interpolate(&self.to, eased);
        &self.value
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn target(&self) -> &T {
        &self.to
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// True while the delay has not yet elapsed.
    pub fn is_pending(&self) -> bool {
        self.elapsed_ms < self.timing.delay_ms
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.timing.delay_ms + self.timing.duration_ms.max(0.0)
    }

    /// Jump to the end state.
    pub fn finish(&mut self) -> &T {
        self.elapsed_ms = self.timing.delay_ms + self.timing.duration_ms.max(0.0);
        self.value = self.to.clone();
        &self.value
    }
}
