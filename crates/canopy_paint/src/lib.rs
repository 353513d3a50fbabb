//! Canopy Paint
//!
//! A retained, keyed drawing surface with animated shapes and SVG output.
//!
//! # Features
//!
//! - **Paths**: move/line/cubic/arc commands with flattening and SVG path data
//! - **Curves**: linear, cardinal, monotone-x and basis interpolation
//! - **Geometry**: rects, circles, annular arcs, curves, areas, lines and text
//! - **Surface**: layered shapes addressed by key, tweened per channel
//! - **Decorations**: particle spawners whose timers are owned by a shape

pub mod curve;
pub mod geometry;
pub mod path;
pub mod surface;
pub mod svg;
pub mod text;

pub use curve::{area_path, line_path, CurveKind};
pub use geometry::{polar_angle, Geometry, TextAnchor};
pub use path::{polar_point, Path, PathBuilder, PathCommand};
pub use surface::{
    Glow, Lifecycle, Paint, ParticleEffect, ParticleKind, Shape, ShapeId, ShapeInit, ShapeMeta,
    Surface, EFFECTS_LAYER,
};
pub use svg::to_svg;
pub use text::{ApproxTextMeasurer, TextMeasurer};
