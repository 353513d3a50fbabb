use canopy_animation::{Easing, Timing};
use canopy_core::{Color, Point, Rect, Size};
use canopy_paint::{
    to_svg, Geometry, Paint, ParticleEffect, ParticleKind, ShapeInit, ShapeMeta, Surface,
    EFFECTS_LAYER,
};

fn bar(x: f32, h: f32) -> Geometry {
    Geometry::rect(Rect::new(x, 100.0 - h, 20.0, h), 2.0)
}

#[test]
fn grow_from_baseline_then_settle() {
    let mut s = Surface::new();
    s.mount(Size::new(100.0, 100.0));
    let id = s.insert(
        "series",
        ShapeInit::new("Jan", bar(0.0, 0.0)).paint(Paint::fill(Color::from_hex(0x22C55E))),
    );
    s.transition_geometry(id, bar(0.0, 60.0), Timing::new(400.0, Easing::EaseOutCubic));

    s.tick(200.0);
    let mid = s.shape(id).map(|sh| sh.geometry().bounds().height());
    assert!(mid.is_some_and(|h| h > 0.0 && h < 60.0));
    assert!(s.is_animating());

    s.tick(200.0);
    assert!(!s.is_animating());
    let end = s.shape(id).map(|sh| sh.geometry().bounds());
    assert_eq!(end, Some(Rect::new(0.0, 40.0, 20.0, 60.0)));
}

#[test]
fn hovered_shape_scales_for_hit_testing() {
    let mut s = Surface::new();
    s.mount(Size::new(100.0, 100.0));
    let id = s.insert(
        "series",
        ShapeInit::new("a", bar(40.0, 20.0)).interactive(ShapeMeta {
            label: "a".into(),
            series: None,
            value: 20.0,
        }),
    );
    // Just outside the unscaled rect.
    let p = Point::new(61.0, 90.0);
    assert_eq!(s.hit_test(p), None);
    s.transition_scale(id, 1.2, Timing::instant());
    assert_eq!(s.hit_test(p), Some(id));
}

#[test]
fn particles_render_in_effects_layer_and_fade_out() {
    let mut s = Surface::new();
    s.mount(Size::new(100.0, 100.0));
    s.add_layer("series");
    let id = s.insert("series", ShapeInit::new("a", bar(0.0, 50.0)));
    s.start_decoration(
        id,
        ParticleEffect {
            kind: ParticleKind::Sparkles,
            color: Some(Color::WHITE),
            period_ms: 120.0,
            life_ms: 600.0,
            radius: 2.0,
        },
    );
    s.tick(130.0);
    let svg = to_svg(&s);
    assert!(svg.contains(&format!(r#"<g data-layer="{EFFECTS_LAYER}">"#)));
    assert!(svg.contains("<circle"));

    s.stop_decorations(id);
    s.settle();
    assert_eq!(s.shapes_in(EFFECTS_LAYER).count(), 0);
    assert_eq!(s.shape_count(), 1);
}

#[test]
fn particle_placement_is_deterministic() {
    let run = || {
        let mut s = Surface::new();
        s.mount(Size::new(100.0, 100.0));
        let id = s.insert("series", ShapeInit::new("a", bar(0.0, 50.0)));
        s.start_decoration(
            id,
            ParticleEffect {
                kind: ParticleKind::Embers,
                color: None,
                period_ms: 50.0,
                life_ms: 500.0,
                radius: 2.0,
            },
        );
        s.tick(160.0);
        to_svg(&s)
    };
    assert_eq!(run(), run());
}
