//! Shape geometry descriptors.
//!
//! A [`Geometry`] is the "what" of a shape. It interpolates component-wise
//! between two descriptors of the same kind so the surface can tween it.

use std::borrow::Cow;
use std::f32::consts::TAU;

use canopy_animation::{lerp_f32, Interpolate};
use canopy_core::polygon::{distance_to_polyline, point_in_polygon};
use canopy_core::{Point, Rect, Size};

use crate::curve::{area_path, line_path, CurveKind};
use crate::path::{polar_point, Path, PathBuilder};
use crate::text::{ApproxTextMeasurer, TextMeasurer};

/// Extra pointer slack around stroked curves.
const CURVE_HIT_SLOP: f32 = 3.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Rect {
        rect: Rect,
        radius: f32,
    },
    Circle {
        center: Point,
        radius: f32,
    },
    /// Annular sector; angles run clockwise from 12 o'clock.
    Arc {
        center: Point,
        inner: f32,
        outer: f32,
        start: f32,
        end: f32,
    },
    /// Stroked polyline through `points`. `reveal` in `[0, 1]` is the drawn
    /// fraction of its length.
    Curve {
        points: Vec<Point>,
        curve: CurveKind,
        reveal: f32,
    },
    Area {
        upper: Vec<Point>,
        lower: Vec<Point>,
        curve: CurveKind,
    },
    Line {
        from: Point,
        to: Point,
    },
    Text {
        position: Point,
        text: String,
        anchor: TextAnchor,
        size: f32,
    },
}

impl Geometry {
    pub fn rect(rect: Rect, radius: f32) -> Self {
        Geometry::Rect { rect, radius }
    }

    pub fn text(position: Point, text: impl Into<String>, anchor: TextAnchor, size: f32) -> Self {
        Geometry::Text {
            position,
            text: text.into(),
            anchor,
            size,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Geometry::Rect { .. } => "rect",
            Geometry::Circle { .. } => "circle",
            Geometry::Arc { .. } => "arc",
            Geometry::Curve { .. } => "curve",
            Geometry::Area { .. } => "area",
            Geometry::Line { .. } => "line",
            Geometry::Text { .. } => "text",
        }
    }

    /// Outline path for kinds that are drawn as `<path>`.
    pub fn to_path(&self) -> Option<Path> {
        match self {
            Geometry::Arc {
                center,
                inner,
                outer,
                start,
                end,
            } => Some(arc_path(*center, *inner, *outer, *start, *end)),
            Geometry::Curve { points, curve, .. } => Some(line_path(points, *curve)),
            Geometry::Area {
                upper,
                lower,
                curve,
            } => Some(area_path(upper, lower, *curve)),
            _ => None,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Geometry::Rect { rect, .. } => *rect,
            Geometry::Circle { center, radius } => Rect::new(
                center.x - radius,
                center.y - radius,
                radius * 2.0,
                radius * 2.0,
            ),
            Geometry::Arc { center, outer, .. } => Rect::new(
                center.x - outer,
                center.y - outer,
                outer * 2.0,
                outer * 2.0,
            ),
            Geometry::Curve { points, .. } => bounds_of(points.iter()),
            Geometry::Area { upper, lower, .. } => bounds_of(upper.iter().chain(lower.iter())),
            Geometry::Line { from, to } => Rect::from_corners(from.x, from.y, to.x, to.y),
            Geometry::Text {
                position,
                text,
                anchor,
                size,
            } => {
                let Size { width, height } = ApproxTextMeasurer::default().measure(text, *size);
                let x = match anchor {
                    TextAnchor::Start => position.x,
                    TextAnchor::Middle => position.x - width / 2.0,
                    TextAnchor::End => position.x - width,
                };
                Rect::new(x, position.y - height * 0.8, width, height)
            }
        }
    }

    /// Point containment. Strokes count as hits within `stroke_width`.
    pub fn contains(&self, p: Point, stroke_width: f32) -> bool {
        match self {
            Geometry::Rect { rect, .. } => rect.contains(p),
            Geometry::Circle { center, radius } => center.distance(p) <= *radius,
            Geometry::Arc {
                center,
                inner,
                outer,
                start,
                end,
            } => {
                let r = center.distance(p);
                if r < *inner || r > *outer {
                    return false;
                }
                angle_within(polar_angle(*center, p), *start, *end)
            }
            Geometry::Curve { points, .. } => {
                distance_to_polyline(p, points) <= stroke_width.max(1.0) + CURVE_HIT_SLOP
            }
            Geometry::Area { upper, lower, .. } => {
                let mut ring: Vec<Point> = upper.clone();
                ring.extend(lower.iter().rev().copied());
                point_in_polygon(p, &ring)
            }
            Geometry::Line { .. } | Geometry::Text { .. } => false,
        }
    }
}

/// Angle of `p` around `center`, clockwise from 12 o'clock, in `[0, TAU)`.
pub fn polar_angle(center: Point, p: Point) -> f32 {
    (p.x - center.x).atan2(center.y - p.y).rem_euclid(TAU)
}

fn angle_within(a: f32, start: f32, end: f32) -> bool {
    let span = end - start;
    if span >= TAU - 1e-4 {
        return true;
    }
    (a - start).rem_euclid(TAU) <= span
}

fn arc_path(center: Point, inner: f32, outer: f32, start: f32, end: f32) -> Path {
    let s = polar_point(center, outer, start);
    let b = PathBuilder::new()
        .move_to(s.x, s.y)
        .arc_to(center.x, center.y, outer, start, end);
    let b = if inner > 0.0 {
        let e = polar_point(center, inner, end);
        b.line_to(e.x, e.y)
            .arc_to(center.x, center.y, inner, end, start)
    } else {
        b.line_to(center.x, center.y)
    };
    b.close().build()
}

fn bounds_of<'a>(points: impl Iterator<Item = &'a Point>) -> Rect {
    let mut min = Point::new(f32::INFINITY, f32::INFINITY);
    let mut max = Point::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    if min.x > max.x {
        return Rect::ZERO;
    }
    Rect::from_corners(min.x, min.y, max.x, max.y)
}

fn lerp_rect(a: &Rect, b: &Rect, t: f32) -> Rect {
    Rect::new(
        lerp_f32(a.x(), b.x(), t),
        lerp_f32(a.y(), b.y(), t),
        lerp_f32(a.width(), b.width(), t),
        lerp_f32(a.height(), b.height(), t),
    )
}

/// Blend two polylines. Unequal lengths are first resampled to the longer
/// length by index proportion so points grow out of their neighbours.
fn lerp_points(a: &[Point], b: &[Point], t: f32) -> Vec<Point> {
    if a.is_empty() || b.is_empty() {
        return b.to_vec();
    }
    let n = a.len().max(b.len());
    let (a, b) = (resample(a, n), resample(b, n));
    a.iter().zip(b.iter()).map(|(p, q)| p.interpolate(q, t)).collect()
}

/// `points` spread over `n` evenly spaced positions along its index range.
fn resample(points: &[Point], n: usize) -> Cow<'_, [Point]> {
    if points.len() == n {
        return Cow::Borrowed(points);
    }
    let last = points.len() - 1;
    let step = last as f32 / (n - 1).max(1) as f32;
    Cow::Owned(
        (0..n)
            .map(|i| {
                let pos = i as f32 * step;
                let lo = (pos.floor() as usize).min(last);
                let hi = (lo + 1).min(last);
                points[lo].interpolate(&points[hi], pos - lo as f32)
            })
            .collect(),
    )
}

impl Interpolate for Geometry {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        match (self, to) {
            (Geometry::Rect { rect: a, radius: ra }, Geometry::Rect { rect: b, radius: rb }) => {
                Geometry::Rect {
                    rect: lerp_rect(a, b, t),
                    radius: lerp_f32(*ra, *rb, t),
                }
            }
            (
                Geometry::Circle {
                    center: ca,
                    radius: ra,
                },
                Geometry::Circle {
                    center: cb,
                    radius: rb,
                },
            ) => Geometry::Circle {
                center: ca.interpolate(cb, t),
                radius: lerp_f32(*ra, *rb, t).max(0.0),
            },
            (
                Geometry::Arc {
                    center: ca,
                    inner: ia,
                    outer: oa,
                    start: sa,
                    end: ea,
                },
                Geometry::Arc {
                    center: cb,
                    inner: ib,
                    outer: ob,
                    start: sb,
                    end: eb,
                },
            ) => Geometry::Arc {
                center: ca.interpolate(cb, t),
                inner: lerp_f32(*ia, *ib, t).max(0.0),
                outer: lerp_f32(*oa, *ob, t).max(0.0),
                start: lerp_f32(*sa, *sb, t),
                end: lerp_f32(*ea, *eb, t),
            },
            (
                Geometry::Curve {
                    points: pa,
                    reveal: ra,
                    ..
                },
                Geometry::Curve {
                    points: pb,
                    curve,
                    reveal: rb,
                },
            ) => Geometry::Curve {
                points: lerp_points(pa, pb, t),
                curve: *curve,
                reveal: lerp_f32(*ra, *rb, t).clamp(0.0, 1.0),
            },
            (
                Geometry::Area {
                    upper: ua,
                    lower: la,
                    ..
                },
                Geometry::Area {
                    upper: ub,
                    lower: lb,
                    curve,
                },
            ) => Geometry::Area {
                upper: lerp_points(ua, ub, t),
                lower: lerp_points(la, lb, t),
                curve: *curve,
            },
            (Geometry::Line { from: fa, to: ta }, Geometry::Line { from: fb, to: tb }) => {
                Geometry::Line {
                    from: fa.interpolate(fb, t),
                    to: ta.interpolate(tb, t),
                }
            }
            (
                Geometry::Text {
                    position: pa,
                    size: sa,
                    ..
                },
                Geometry::Text {
                    position: pb,
                    text,
                    anchor,
                    size: sb,
                },
            ) => Geometry::Text {
                position: pa.interpolate(pb, t),
                text: text.clone(),
                anchor: *anchor,
                size: lerp_f32(*sa, *sb, t),
            },
            // Incompatible descriptors cannot blend; jump to the target.
            _ => to.clone(),
        }
    }
}
