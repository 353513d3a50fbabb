//! Vibes: named motion and shape personalities.
//!
//! Every chart kind draws through the same renderer; a [`VibeStyle`] only
//! decides how shapes move and look. The table is static and shared. Each
//! kind lists the vibes it offers and its default, and the kind's strategy
//! decides which hover effects (glow, decorations) it actually uses.

use std::fmt::{Display, Formatter};

use canopy_animation::Easing;
use canopy_core::Color;
use canopy_paint::{ParticleEffect, ParticleKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::kind::ChartKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vibe {
    Rainforest,
    Savanna,
    Tundra,
    Coral,
    Volcanic,
    Dunes,
    Evergreen,
    Playful,
    Minimal,
    Bold,
}

impl Vibe {
    pub fn id(self) -> &'static str {
        self.style().name
    }

    pub fn all() -> &'static [Vibe] {
        &ALL_VIBES
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::all()
            .iter()
            .copied()
            .find(|v| v.id().eq_ignore_ascii_case(id))
    }

    pub fn style(self) -> &'static VibeStyle {
        &VIBES[self as usize]
    }

    /// The six nature vibes every kind offers.
    pub fn is_nature(self) -> bool {
        NATURE.contains(&self)
    }
}

impl Display for Vibe {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Per-element start offset as a function of index and element count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stagger {
    None,
    Sequential { step_ms: f32 },
    Reversed { step_ms: f32 },
    /// Deterministic jitter in `[0, max_ms]`, seeded by index and count.
    Random { max_ms: f32 },
    /// The last element starts `total_ms` after the first.
    Proportional { total_ms: f32 },
    CenterOut { step_ms: f32 },
}

impl Stagger {
    pub fn delay(&self, index: usize, total: usize) -> f32 {
        if total == 0 {
            return 0.0;
        }
        let index = index.min(total - 1);
        match *self {
            Stagger::None => 0.0,
            Stagger::Sequential { step_ms } => index as f32 * step_ms,
            Stagger::Reversed { step_ms } => (total - 1 - index) as f32 * step_ms,
            Stagger::Random { max_ms } => {
                let seed = ((total as u64) << 32) | index as u64;
                StdRng::seed_from_u64(seed).random_range(0.0..=max_ms.max(0.0))
            }
            Stagger::Proportional { total_ms } => {
                if total < 2 {
                    0.0
                } else {
                    index as f32 / (total - 1) as f32 * total_ms
                }
            }
            Stagger::CenterOut { step_ms } => {
                let mid = (total - 1) as f32 / 2.0;
                (index as f32 - mid).abs() * step_ms
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VibeGlow {
    pub radius: f32,
    /// Glow color is the shape's fill lightened by this amount.
    pub lighten: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VibeStyle {
    pub vibe: Vibe,
    pub name: &'static str,
    pub duration_ms: f32,
    pub easing: Easing,
    pub stagger: Stagger,
    pub corner_radius: f32,
    pub base_opacity: f32,
    pub hover_opacity: f32,
    pub hover_scale: f32,
    pub glow: Option<VibeGlow>,
    pub decoration: Option<ParticleEffect>,
}

const fn particles(kind: ParticleKind, color: Option<Color>) -> Option<ParticleEffect> {
    Some(ParticleEffect {
        kind,
        color,
        period_ms: 140.0,
        life_ms: 900.0,
        radius: 2.5,
    })
}

const fn glow(radius: f32) -> Option<VibeGlow> {
    Some(VibeGlow {
        radius,
        lighten: 0.15,
    })
}

const ALL_VIBES: [Vibe; 10] = [
    Vibe::Rainforest,
    Vibe::Savanna,
    Vibe::Tundra,
    Vibe::Coral,
    Vibe::Volcanic,
    Vibe::Dunes,
    Vibe::Evergreen,
    Vibe::Playful,
    Vibe::Minimal,
    Vibe::Bold,
];

const NATURE: [Vibe; 6] = [
    Vibe::Rainforest,
    Vibe::Savanna,
    Vibe::Tundra,
    Vibe::Coral,
    Vibe::Volcanic,
    Vibe::Dunes,
];

// Indexed by `Vibe as usize`.
static VIBES: [VibeStyle; 10] = [
    VibeStyle {
        vibe: Vibe::Rainforest,
        name: "rainforest",
        duration_ms: 900.0,
        easing: Easing::EaseOutCubic,
        stagger: Stagger::Sequential { step_ms: 60.0 },
        corner_radius: 6.0,
        base_opacity: 0.9,
        hover_opacity: 1.0,
        hover_scale: 1.04,
        glow: glow(8.0),
        decoration: particles(ParticleKind::Leaves, None),
    },
    VibeStyle {
        vibe: Vibe::Savanna,
        name: "savanna",
        duration_ms: 1100.0,
        easing: Easing::EaseInOutSine,
        stagger: Stagger::Proportional { total_ms: 400.0 },
        corner_radius: 2.0,
        base_opacity: 0.85,
        hover_opacity: 1.0,
        hover_scale: 1.02,
        glow: None,
        decoration: particles(ParticleKind::Sand, Some(Color::rgb(0.89, 0.78, 0.55))),
    },
    VibeStyle {
        vibe: Vibe::Tundra,
        name: "tundra",
        duration_ms: 1400.0,
        easing: Easing::EaseOutQuart,
        stagger: Stagger::Reversed { step_ms: 50.0 },
        corner_radius: 0.0,
        base_opacity: 0.8,
        hover_opacity: 0.95,
        hover_scale: 1.02,
        glow: glow(6.0),
        decoration: particles(ParticleKind::Snow, Some(Color::WHITE)),
    },
    VibeStyle {
        vibe: Vibe::Coral,
        name: "coral",
        duration_ms: 800.0,
        easing: Easing::EaseOutBack,
        stagger: Stagger::CenterOut { step_ms: 45.0 },
        corner_radius: 10.0,
        base_opacity: 0.9,
        hover_opacity: 1.0,
        hover_scale: 1.06,
        glow: glow(10.0),
        decoration: particles(ParticleKind::Bubbles, Some(Color::rgba(0.8, 0.95, 1.0, 0.8))),
    },
    VibeStyle {
        vibe: Vibe::Volcanic,
        name: "volcanic",
        duration_ms: 600.0,
        easing: Easing::EaseOutElastic,
        stagger: Stagger::Random { max_ms: 300.0 },
        corner_radius: 3.0,
        base_opacity: 0.92,
        hover_opacity: 1.0,
        hover_scale: 1.05,
        glow: glow(14.0),
        decoration: particles(ParticleKind::Embers, Some(Color::rgb(0.98, 0.45, 0.09))),
    },
    VibeStyle {
        vibe: Vibe::Dunes,
        name: "dunes",
        duration_ms: 1200.0,
        easing: Easing::EaseInOutCubic,
        stagger: Stagger::Sequential { step_ms: 90.0 },
        corner_radius: 4.0,
        base_opacity: 0.85,
        hover_opacity: 1.0,
        hover_scale: 1.03,
        glow: None,
        decoration: particles(ParticleKind::Sand, None),
    },
    VibeStyle {
        vibe: Vibe::Evergreen,
        name: "evergreen",
        duration_ms: 750.0,
        easing: Easing::EaseOutCubic,
        stagger: Stagger::Sequential { step_ms: 50.0 },
        corner_radius: 4.0,
        base_opacity: 0.9,
        hover_opacity: 1.0,
        hover_scale: 1.03,
        glow: None,
        decoration: None,
    },
    VibeStyle {
        vibe: Vibe::Playful,
        name: "playful",
        duration_ms: 900.0,
        easing: Easing::EaseOutBounce,
        stagger: Stagger::Random { max_ms: 250.0 },
        corner_radius: 12.0,
        base_opacity: 0.9,
        hover_opacity: 1.0,
        hover_scale: 1.08,
        glow: None,
        decoration: particles(ParticleKind::Sparkles, None),
    },
    VibeStyle {
        vibe: Vibe::Minimal,
        name: "minimal",
        duration_ms: 400.0,
        easing: Easing::EaseOut,
        stagger: Stagger::None,
        corner_radius: 0.0,
        base_opacity: 1.0,
        hover_opacity: 0.8,
        hover_scale: 1.0,
        glow: None,
        decoration: None,
    },
    VibeStyle {
        vibe: Vibe::Bold,
        name: "bold",
        duration_ms: 650.0,
        easing: Easing::Spring,
        stagger: Stagger::Sequential { step_ms: 30.0 },
        corner_radius: 2.0,
        base_opacity: 1.0,
        hover_opacity: 1.0,
        hover_scale: 1.05,
        glow: glow(12.0),
        decoration: None,
    },
];

/// Vibes a chart kind offers, in menu order.
pub fn vibes_for(kind: ChartKind) -> &'static [Vibe] {
    match kind {
        ChartKind::Bar | ChartKind::Line | ChartKind::Donut => &ALL_VIBES,
        ChartKind::Stream | ChartKind::Treemap | ChartKind::StackedBar => &NATURE,
    }
}

pub fn default_vibe(kind: ChartKind) -> Vibe {
    match kind {
        ChartKind::Bar | ChartKind::Line | ChartKind::Donut => Vibe::Evergreen,
        ChartKind::Stream | ChartKind::Treemap | ChartKind::StackedBar => Vibe::Rainforest,
    }
}

/// Style for `name` on `kind`. Unknown, missing or unsupported names give
/// the kind's default style.
pub fn resolve(name: Option<&str>, kind: ChartKind) -> &'static VibeStyle {
    let requested = name.and_then(Vibe::from_id);
    match requested {
        Some(v) if vibes_for(kind).contains(&v) => v.style(),
        _ => {
            let fallback = default_vibe(kind);
            if let Some(name) = name {
                tracing::debug!(requested = name, %kind, fallback = fallback.id(), "vibe fallback");
            }
            fallback.style()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_discriminant() {
        for v in Vibe::all() {
            assert_eq!(v.style().vibe, *v);
            assert_eq!(Vibe::from_id(v.id()), Some(*v));
        }
    }

    #[test]
    fn unknown_vibe_is_the_default_style() {
        for kind in ChartKind::all() {
            let fallback = resolve(Some("nonexistent"), *kind);
            assert!(std::ptr::eq(fallback, resolve(None, *kind)));
            assert!(std::ptr::eq(fallback, default_vibe(*kind).style()));
        }
    }

    #[test]
    fn extras_are_not_offered_to_nature_only_kinds() {
        let s = resolve(Some("playful"), ChartKind::Treemap);
        assert_eq!(s.vibe, Vibe::Rainforest);
        let s = resolve(Some("PLAYFUL"), ChartKind::Bar);
        assert_eq!(s.vibe, Vibe::Playful);
    }

    #[test]
    fn stagger_orders() {
        let seq = Stagger::Sequential { step_ms: 10.0 };
        assert_eq!(seq.delay(3, 5), 30.0);
        let rev = Stagger::Reversed { step_ms: 10.0 };
        assert_eq!(rev.delay(0, 5), 40.0);
        let prop = Stagger::Proportional { total_ms: 400.0 };
        assert_eq!(prop.delay(4, 5), 400.0);
        assert_eq!(prop.delay(0, 1), 0.0);
        let center = Stagger::CenterOut { step_ms: 10.0 };
        assert_eq!(center.delay(2, 5), 0.0);
        assert_eq!(center.delay(0, 5), 20.0);
    }

    #[test]
    fn random_stagger_is_deterministic_and_bounded() {
        let r = Stagger::Random { max_ms: 300.0 };
        for i in 0..20 {
            let d = r.delay(i, 20);
            assert!((0.0..=300.0).contains(&d));
            assert_eq!(d, r.delay(i, 20));
        }
    }
}
