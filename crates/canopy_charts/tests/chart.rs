use std::f32::consts::TAU;

use canopy_charts::layout::{pie, stack, StackOffset};
use canopy_charts::scale::BandScale;
use canopy_charts::steps::SERIES_LAYER;
use canopy_charts::{
    resolve_vibe, Chart, ChartKind, ChartProps, ConfigOverrides, DataPoint, Dataset, TooltipState, TreeNode,
};
use canopy_core::{Color, Event, Point};
use canopy_paint::Geometry;
use canopy_theme::ThemeState;

fn bars(values: &[(&str, f32)]) -> Dataset {
    Dataset::new(
        values
            .iter()
            .map(|(label, v)| DataPoint::labeled(*label).with("value", *v))
            .collect(),
    )
    .unwrap()
}

fn mounted(kind: ChartKind, props: ChartProps) -> Chart {
    let mut chart = Chart::new(kind, props);
    chart.mount(400.0, 300.0);
    chart.settle();
    chart
}

fn bar_chart(values: &[(&str, f32)]) -> Chart {
    mounted(
        ChartKind::Bar,
        ChartProps {
            data: bars(values).into(),
            ..Default::default()
        },
    )
}

fn series_keys(chart: &Chart) -> Vec<String> {
    chart.surface().live_keys(SERIES_LAYER)
}

fn rect_of(chart: &Chart, key: &str) -> canopy_core::Rect {
    let id = chart.surface().find(SERIES_LAYER, key).unwrap();
    match chart.surface().shape(id).unwrap().geometry() {
        Geometry::Rect { rect, .. } => *rect,
        other => panic!("expected a rect, got {}", other.kind_name()),
    }
}

#[test]
fn second_render_without_changes_mutates_nothing() {
    let mut chart = bar_chart(&[("a", 3.0), ("b", 7.0), ("c", 5.0)]);
    let before = chart.surface().mutation_count();
    chart.render();
    chart.render();
    assert_eq!(chart.surface().mutation_count(), before);
    assert_eq!(chart.scale_builds(), 1);
}

#[test]
fn shared_keys_keep_their_shapes_across_updates() {
    let mut chart = bar_chart(&[("A", 1.0), ("B", 2.0), ("C", 3.0)]);
    let surface = chart.surface();
    let b = surface.find(SERIES_LAYER, "B").unwrap();
    let c = surface.find(SERIES_LAYER, "C").unwrap();

    chart.set_data(bars(&[("B", 2.0), ("C", 3.0), ("D", 4.0)]));
    let surface = chart.surface();
    assert_eq!(surface.find(SERIES_LAYER, "B"), Some(b));
    assert_eq!(surface.find(SERIES_LAYER, "C"), Some(c));
    assert_eq!(series_keys(&chart), vec!["B", "C", "D"]);

    // The removed bar plays its exit, then goes away.
    chart.settle();
    assert_eq!(chart.surface().find(SERIES_LAYER, "A"), None);
}

#[test]
fn value_axis_is_niced() {
    let chart = bar_chart(&[("a", 85.0), ("b", 12.0)]);
    assert_eq!(chart.scales().unwrap().y.domain(), (0.0, 90.0));
}

#[test]
fn bands_and_padding_cover_the_range() {
    let keys: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
    let band = BandScale::new(keys, 0.0, 300.0, 0.2, 0.1);
    let covered = 4.0 * band.band_width() + 3.0 * band.gap() + 2.0 * band.outer();
    assert!((covered - 300.0).abs() < 1e-3);
    let last = band.band_start(3).unwrap() + band.band_width() + band.outer();
    assert!((last - 300.0).abs() < 1e-3);
}

#[test]
fn unknown_vibe_falls_back_to_the_kind_default() {
    for kind in ChartKind::all() {
        let fallback = resolve_vibe(Some("no-such-vibe"), *kind);
        assert!(std::ptr::eq(fallback, resolve_vibe(None, *kind)));
    }
    // Volcanic is not offered for treemaps.
    assert_eq!(resolve_vibe(Some("volcanic"), ChartKind::Treemap).name, "rainforest");
}

#[test]
fn empty_container_draws_nothing() {
    let mut chart = Chart::new(
        ChartKind::Bar,
        ChartProps {
            data: bars(&[("a", 1.0)]).into(),
            ..Default::default()
        },
    );
    chart.mount(0.0, 0.0);
    assert_eq!(chart.surface().shape_count(), 0);
    assert_eq!(chart.scale_builds(), 0);
}

#[test]
fn stacked_segments_accumulate() {
    let data = Dataset::new(vec![DataPoint::labeled("x")
        .with("a", 30.0)
        .with("b", 20.0)
        .with("c", 10.0)])
    .unwrap();
    let series = data.series_keys().to_vec();
    let uppers: Vec<f32> = stack(&data, &series, StackOffset::Zero)
        .iter()
        .map(|layer| layer.bands[0].upper)
        .collect();
    assert_eq!(uppers, vec![30.0, 50.0, 60.0]);

    let chart = mounted(
        ChartKind::StackedBar,
        ChartProps {
            data: data.into(),
            ..Default::default()
        },
    );
    assert_eq!(series_keys(&chart), vec!["x/a", "x/b", "x/c"]);
    let a = rect_of(&chart, "x/a");
    let b = rect_of(&chart, "x/b");
    assert!((a.y() - b.bottom()).abs() < 1e-3);
}

#[test]
fn pie_spans_close_the_circle() {
    let slices = pie(&[3.0, 1.0, 4.0, 1.0, 5.0]);
    let total: f32 = slices.iter().map(|s| s.span()).sum();
    assert!((total - TAU).abs() < 1e-4);
    assert_eq!(slices[0].start, 0.0);
}

#[test]
fn hover_returns_to_the_resting_pose() {
    let mut chart = bar_chart(&[("Jan", 30.0), ("Feb", 50.0)]);
    let id = chart.surface().find(SERIES_LAYER, "Feb").unwrap();
    let rest = chart.surface().shape(id).unwrap().opacity();
    let style = chart.style();
    let mut tooltip = TooltipState::default();

    chart.pointer_move(rect_of(&chart, "Feb").center(), 0.0, &mut tooltip);
    chart.settle();
    let shape = chart.surface().shape(id).unwrap();
    assert_eq!(shape.opacity(), style.hover_opacity);
    assert_eq!(shape.scale(), style.hover_scale);
    assert_eq!(tooltip.content().as_deref(), Some("Feb · value: 50"));

    chart.pointer_leave(&mut tooltip);
    chart.settle();
    let shape = chart.surface().shape(id).unwrap();
    assert_eq!(shape.opacity(), rest);
    assert_eq!(shape.scale(), 1.0);
    assert!(!tooltip.visible);
}

#[test]
fn two_month_bar_chart() {
    let chart = bar_chart(&[("Jan", 30.0), ("Feb", 40.0)]);
    assert_eq!(chart.style().name, "evergreen");
    assert_eq!(series_keys(&chart), vec!["Jan", "Feb"]);
    assert_eq!(chart.scales().unwrap().y.domain(), (0.0, 40.0));

    let green = Color::parse_hex("#22C55E").unwrap();
    let id = chart.surface().find(SERIES_LAYER, "Jan").unwrap();
    assert_eq!(chart.surface().shape(id).unwrap().paint().fill, Some(green));

    let jan = rect_of(&chart, "Jan");
    let feb = rect_of(&chart, "Feb");
    assert!(feb.height() > jan.height());
    assert!((feb.height() / jan.height() - 40.0 / 30.0).abs() < 1e-3);
    let bounded = chart.dimensions().unwrap().bounded_height;
    assert!((feb.height() - bounded).abs() < 1e-3);
    assert!(jan.x() < feb.x());
    assert!((jan.bottom() - feb.bottom()).abs() < 1e-3);
    assert!(chart.to_svg().contains("<rect"));
}

#[test]
fn rerender_while_hovered_mutates_nothing() {
    let mut chart = bar_chart(&[("Jan", 30.0), ("Feb", 40.0)]);
    let mut tooltip = TooltipState::default();
    chart.pointer_move(rect_of(&chart, "Feb").center(), 0.0, &mut tooltip);
    chart.settle();

    let before = chart.surface().mutation_count();
    chart.render();
    chart.render();
    assert_eq!(chart.surface().mutation_count(), before);
    assert_eq!(chart.hovered_key(), Some("Feb"));
    assert!(tooltip.visible);
}

#[test]
fn margins_larger_than_the_container_draw_nothing() {
    let mut chart = Chart::new(
        ChartKind::Bar,
        ChartProps {
            data: bars(&[("a", 1.0)]).into(),
            ..Default::default()
        },
    );
    // Default margins take 60px of height.
    chart.mount(400.0, 50.0);
    let dims = chart.dimensions().unwrap();
    assert!(dims.bounded_width > 0.0);
    assert_eq!(dims.bounded_height, 0.0);
    assert_eq!(chart.surface().shape_count(), 0);
    assert_eq!(chart.scale_builds(), 0);

    chart.resize(400.0, 300.0);
    assert_eq!(series_keys(&chart), vec!["a"]);
}

#[test]
fn lowering_min_height_restores_the_container_height() {
    let mut chart = Chart::new(
        ChartKind::Bar,
        ChartProps {
            data: bars(&[("a", 1.0)]).into(),
            config: ConfigOverrides {
                min_height: Some(500.0),
                ..Default::default()
            },
            ..Default::default()
        },
    );
    chart.mount(400.0, 200.0);
    assert_eq!(chart.dimensions().map(|d| d.height), Some(500.0));

    chart.set_config(ConfigOverrides {
        min_height: Some(0.0),
        ..Default::default()
    });
    assert_eq!(chart.dimensions().map(|d| d.height), Some(200.0));
}

#[test]
fn theme_change_recolors_in_place() {
    let mut chart = bar_chart(&[("Jan", 30.0)]);
    let id = chart.surface().find(SERIES_LAYER, "Jan").unwrap();
    let red = Color::parse_hex("#EF4444").unwrap();
    chart.set_theme(ThemeState::new(red));
    assert_eq!(chart.surface().find(SERIES_LAYER, "Jan"), Some(id));
    assert_eq!(chart.surface().shape(id).unwrap().paint().fill, Some(red));
}

#[test]
fn pointer_moves_are_debounced() {
    let mut chart = bar_chart(&[("Jan", 30.0)]);
    let over = rect_of(&chart, "Jan").center();
    let mut tooltip = TooltipState::default();

    assert!(chart.pointer_move(Point::new(1.0, 1.0), 0.0, &mut tooltip));
    assert!(!chart.pointer_move(over, 20.0, &mut tooltip));
    assert_eq!(chart.hovered_key(), None);
    assert!(!chart.flush_pointer(30.0, &mut tooltip));
    assert!(chart.flush_pointer(60.0, &mut tooltip));
    assert_eq!(chart.hovered_key(), Some("Jan"));
}

#[test]
fn unmount_cancels_decorations() {
    let tree = TreeNode::node(
        "root",
        vec![TreeNode::leaf("oak", 6.0), TreeNode::leaf("fir", 4.0)],
    );
    let mut chart = mounted(
        ChartKind::Treemap,
        ChartProps {
            data: tree.into(),
            ..Default::default()
        },
    );
    let (id, shape) = chart.surface().shapes_in(SERIES_LAYER).next().unwrap();
    let center = shape.geometry().bounds().center();

    chart.pointer_move(center, 0.0, &mut ());
    assert!(chart.surface().has_decoration(id));
    assert!(chart.surface().shape(id).unwrap().glow().is_some());
    chart.tick(500.0);

    chart.unmount();
    assert_eq!(chart.surface().active_decorations(), 0);
    assert_eq!(chart.surface().shape_count(), 0);
    chart.tick(500.0);
    assert_eq!(chart.surface().shape_count(), 0);
}

#[test]
fn donut_ignores_axis_toggles() {
    let chart = mounted(
        ChartKind::Donut,
        ChartProps {
            data: bars(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]).into(),
            config: ConfigOverrides {
                show_x_axis: Some(true),
                ..Default::default()
            },
            ..Default::default()
        },
    );
    let arcs = chart
        .surface()
        .shapes_in(SERIES_LAYER)
        .filter(|(_, s)| matches!(s.geometry(), Geometry::Arc { .. }))
        .count();
    assert_eq!(arcs, 3);
    assert!(chart.scales().is_none());
}

#[test]
fn events_drive_the_lifecycle() {
    let mut chart = Chart::new(
        ChartKind::Line,
        ChartProps {
            data: bars(&[("a", 1.0), ("b", 4.0)]).into(),
            ..Default::default()
        },
    );
    let mut tooltip = TooltipState::default();
    chart.handle(&Event::mount(320.0, 240.0, 0.0), &mut tooltip);
    assert!(chart.surface().is_mounted());
    assert_eq!(series_keys(&chart), vec!["line-value", "point-value-a", "point-value-b"]);

    chart.handle(&Event::resize(640.0, 240.0, 10.0), &mut tooltip);
    assert_eq!(chart.dimensions().map(|d| d.width), Some(640.0));
    assert_eq!(chart.scale_builds(), 2);

    chart.handle(&Event::unmount(20.0), &mut tooltip);
    assert!(!chart.surface().is_mounted());
}
