//! Chart options.
//!
//! [`ChartConfig`] is the resolved option set a chart renders with.
//! Callers supply a sparse [`ConfigOverrides`] (camelCase keys, all
//! optional, unknown keys ignored) which is merged over per-kind defaults.

use canopy_paint::CurveKind;
use canopy_theme::PaletteStrategy;
use serde::{Deserialize, Serialize};

use crate::dimensions::Margins;
use crate::kind::ChartKind;
use crate::layout::Tiling;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Left,
    #[default]
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridStyle {
    Solid,
    #[default]
    Dashed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCurve {
    Linear,
    Cardinal,
    #[default]
    Monotone,
    Basis,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    pub show_x_axis: bool,
    pub show_y_axis: bool,
    pub show_x_grid: bool,
    pub show_y_grid: bool,
    pub show_axis_labels: bool,
    pub show_tooltip: bool,
    pub show_legend: bool,
    pub legend_position: LegendPosition,
    pub label_size: f32,
    pub grid_style: GridStyle,
    pub grid_opacity: f32,
    pub axis_opacity: f32,
    pub chart_title: Option<String>,
    pub margins: Margins,
    /// Overrides the vibe's duration when set.
    pub animation_duration: Option<f32>,
    pub palette: PaletteStrategy,
    pub min_height: f32,

    pub bar_padding: f32,
    pub show_values: bool,

    pub line_width: f32,
    pub line_curve: LineCurve,
    pub curve_tension: f32,
    pub line_opacity: f32,
    pub show_points: bool,
    pub point_size: f32,
    pub point_opacity: f32,

    /// Inner radius as a fraction of the outer radius.
    pub inner_radius: f32,
    /// Angular gap between wedges, radians.
    pub pad_angle: f32,
    pub show_labels: bool,

    pub cell_padding: f32,
    pub outer_padding: f32,
    pub tiling: Tiling,
}

impl ChartConfig {
    /// Defaults for `kind`.
    pub fn for_kind(kind: ChartKind) -> Self {
        let base = Self {
            show_x_axis: true,
            show_y_axis: true,
            show_x_grid: false,
            show_y_grid: true,
            show_axis_labels: true,
            show_tooltip: true,
            show_legend: kind.is_multi_series(),
            legend_position: LegendPosition::Right,
            label_size: 11.0,
            grid_style: GridStyle::Dashed,
            grid_opacity: 0.5,
            axis_opacity: 0.8,
            chart_title: None,
            margins: Margins::default(),
            animation_duration: None,
            palette: PaletteStrategy::Hue,
            min_height: 0.0,
            bar_padding: 0.2,
            show_values: false,
            line_width: 2.0,
            line_curve: LineCurve::Monotone,
            curve_tension: 0.5,
            line_opacity: 1.0,
            show_points: true,
            point_size: 3.5,
            point_opacity: 1.0,
            inner_radius: 0.6,
            pad_angle: 0.02,
            show_labels: false,
            cell_padding: 2.0,
            outer_padding: 4.0,
            tiling: Tiling::Squarify,
        };
        match kind {
            ChartKind::Bar | ChartKind::Line => base,
            ChartKind::StackedBar => Self {
                bar_padding: 0.25,
                palette: PaletteStrategy::Lightness,
                ..base
            },
            ChartKind::Stream => Self {
                show_y_axis: false,
                show_y_grid: false,
                margins: Margins::new(16.0, 16.0, 32.0, 16.0),
                ..base
            },
            ChartKind::Donut => Self {
                show_x_axis: false,
                show_y_axis: false,
                show_y_grid: false,
                show_legend: true,
                show_labels: true,
                margins: Margins::uniform(16.0),
                ..base
            },
            ChartKind::Treemap => Self {
                show_x_axis: false,
                show_y_axis: false,
                show_y_grid: false,
                show_labels: true,
                margins: Margins::uniform(8.0),
                ..base
            },
        }
    }

    /// Defaults for `kind` with `overrides` applied.
    pub fn resolve(kind: ChartKind, overrides: &ConfigOverrides) -> Self {
        let mut config = Self::for_kind(kind);
        config.apply(overrides);
        config
    }

    /// Merge `overrides`, clamping out-of-range values.
    pub fn apply(&mut self, o: &ConfigOverrides) {
        macro_rules! set {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = o.$field.clone() { self.$field = v; })*
            };
        }
        set!(
            show_x_axis,
            show_y_axis,
            show_x_grid,
            show_y_grid,
            show_axis_labels,
            show_tooltip,
            show_legend,
            legend_position,
            grid_style,
            palette,
            show_values,
            line_curve,
            show_points,
            show_labels,
            tiling,
        );
        if o.chart_title.is_some() {
            self.chart_title = o.chart_title.clone().filter(|t| !t.trim().is_empty());
        }
        if let Some(m) = &o.margins {
            self.margins = Margins::new(
                non_negative("margins.top", m.top, self.margins.top),
                non_negative("margins.right", m.right, self.margins.right),
                non_negative("margins.bottom", m.bottom, self.margins.bottom),
                non_negative("margins.left", m.left, self.margins.left),
            );
        }
        if let Some(d) = o.animation_duration {
            self.animation_duration = Some(non_negative("animationDuration", Some(d), 0.0));
        }

        self.label_size = positive("labelSize", o.label_size, self.label_size);
        self.line_width = positive("lineWidth", o.line_width, self.line_width);
        self.point_size = non_negative("pointSize", o.point_size, self.point_size);
        self.min_height = non_negative("minHeight", o.min_height, self.min_height);
        self.cell_padding = non_negative("cellPadding", o.cell_padding, self.cell_padding);
        self.outer_padding = non_negative("outerPadding", o.outer_padding, self.outer_padding);
        self.pad_angle = non_negative("padAngle", o.pad_angle, self.pad_angle);

        self.grid_opacity = unit("gridOpacity", o.grid_opacity, self.grid_opacity, 1.0);
        self.axis_opacity = unit("axisOpacity", o.axis_opacity, self.axis_opacity, 1.0);
        self.line_opacity = unit("lineOpacity", o.line_opacity, self.line_opacity, 1.0);
        self.point_opacity = unit("pointOpacity", o.point_opacity, self.point_opacity, 1.0);
        self.curve_tension = unit("curveTension", o.curve_tension, self.curve_tension, 1.0);
        self.bar_padding = unit("barPadding", o.bar_padding, self.bar_padding, 0.95);
        self.inner_radius = unit("innerRadius", o.inner_radius, self.inner_radius, 0.95);
    }

    pub fn curve(&self) -> CurveKind {
        match self.line_curve {
            LineCurve::Linear => CurveKind::Linear,
            LineCurve::Cardinal => CurveKind::cardinal(self.curve_tension),
            LineCurve::Monotone => CurveKind::MonotoneX,
            LineCurve::Basis => CurveKind::Basis,
        }
    }

    pub fn shows_grid(&self) -> bool {
        self.show_x_grid || self.show_y_grid
    }

    pub fn shows_axes(&self) -> bool {
        self.show_x_axis || self.show_y_axis
    }
}

fn checked(key: &str, value: Option<f32>, current: f32, lo: f32, hi: f32) -> f32 {
    let Some(v) = value else {
        return current;
    };
    if !v.is_finite() {
        tracing::warn!(key, "ignoring non-finite config value");
        return current;
    }
    let clamped = v.clamp(lo, hi);
    if clamped != v {
        tracing::warn!(key, value = v, clamped, "config value out of range");
    }
    clamped
}

fn non_negative(key: &str, value: Option<f32>, current: f32) -> f32 {
    checked(key, value, current, 0.0, f32::MAX)
}

fn positive(key: &str, value: Option<f32>, current: f32) -> f32 {
    checked(key, value, current, 0.1, f32::MAX)
}

fn unit(key: &str, value: Option<f32>, current: f32, max: f32) -> f32 {
    checked(key, value, current, 0.0, max)
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarginOverrides {
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,
}

/// Sparse options as supplied by callers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOverrides {
    pub show_x_axis: Option<bool>,
    pub show_y_axis: Option<bool>,
    pub show_x_grid: Option<bool>,
    pub show_y_grid: Option<bool>,
    pub show_axis_labels: Option<bool>,
    pub show_tooltip: Option<bool>,
    pub show_legend: Option<bool>,
    pub legend_position: Option<LegendPosition>,
    pub label_size: Option<f32>,
    pub grid_style: Option<GridStyle>,
    pub grid_opacity: Option<f32>,
    pub axis_opacity: Option<f32>,
    pub chart_title: Option<String>,
    pub margins: Option<MarginOverrides>,
    pub animation_duration: Option<f32>,
    pub palette: Option<PaletteStrategy>,
    pub min_height: Option<f32>,
    pub bar_padding: Option<f32>,
    pub show_values: Option<bool>,
    pub line_width: Option<f32>,
    pub line_curve: Option<LineCurve>,
    pub curve_tension: Option<f32>,
    pub line_opacity: Option<f32>,
    pub show_points: Option<bool>,
    pub point_size: Option<f32>,
    pub point_opacity: Option<f32>,
    pub inner_radius: Option<f32>,
    pub pad_angle: Option<f32>,
    pub show_labels: Option<bool>,
    pub cell_padding: Option<f32>,
    pub outer_padding: Option<f32>,
    pub tiling: Option<Tiling>,
}

impl ConfigOverrides {
    /// Parse from a JSON object; unknown keys are ignored.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }
}
