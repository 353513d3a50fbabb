//! Canopy Animation System
//!
//! Easing curves, delayed tweens and owner-scoped interval timers.
//!
//! # Features
//!
//! - **Easing**: monotonic and overshooting curves (back, elastic, spring)
//! - **Tweens**: delayed, eased transitions advanced by an explicit clock
//! - **Interruptible**: a new tween starts from the current value of the one it replaces
//! - **Timers**: repeating intervals that are always cancelled by their owner

pub mod easing;
pub mod scheduler;
pub mod tween;

pub use easing::Easing;
pub use scheduler::{AnimationScheduler, Firing, IntervalId};
pub use tween::{lerp_f32, Interpolate, Timing, Tween};
