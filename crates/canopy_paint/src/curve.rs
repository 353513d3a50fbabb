//! Curve interpolators for lines and areas.
//!
//! Each interpolator turns a sequence of samples into path segments. All of
//! them pass through the first and last sample; cardinal and monotone curves
//! also pass through every interior sample, basis curves only approach them.

use canopy_core::Point;

use crate::path::{Path, PathBuilder};

/// How consecutive samples are joined.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CurveKind {
    #[default]
    Linear,
    /// Catmull-Rom style spline; tension 0 is the loosest, 1 is straight.
    Cardinal { tension: f32 },
    /// Monotone in x: never overshoots between samples.
    MonotoneX,
    /// Uniform cubic B-spline.
    Basis,
}

impl CurveKind {
    pub fn cardinal(tension: f32) -> Self {
        CurveKind::Cardinal {
            tension: tension.clamp(0.0, 1.0),
        }
    }
}

/// Open path through `points`.
pub fn line_path(points: &[Point], curve: CurveKind) -> Path {
    append(PathBuilder::new(), points, curve, true).build()
}

/// Closed band between `upper` and `lower`, both ordered left to right.
pub fn area_path(upper: &[Point], lower: &[Point], curve: CurveKind) -> Path {
    if upper.is_empty() {
        return Path::new();
    }
    let reversed: Vec<Point> = lower.iter().rev().copied().collect();
    let b = append(PathBuilder::new(), upper, curve, true);
    append(b, &reversed, curve, false).close().build()
}

fn append(b: PathBuilder, pts: &[Point], curve: CurveKind, move_first: bool) -> PathBuilder {
    let Some(first) = pts.first() else {
        return b;
    };
    let b = if move_first {
        b.move_to(first.x, first.y)
    } else {
        b.line_to(first.x, first.y)
    };
    if pts.len() == 1 {
        return b;
    }
    if pts.len() == 2 {
        return b.line_to(pts[1].x, pts[1].y);
    }
    match curve {
        CurveKind::Linear => pts[1..].iter().fold(b, |b, p| b.line_to(p.x, p.y)),
        CurveKind::Cardinal { tension } => cardinal(b, pts, tension),
        CurveKind::MonotoneX => monotone_x(b, pts),
        CurveKind::Basis => basis(b, pts),
    }
}

fn cardinal(mut b: PathBuilder, pts: &[Point], tension: f32) -> PathBuilder {
    let k = (1.0 - tension) / 6.0;
    let n = pts.len();
    for i in 0..n - 1 {
        let p0 = pts[i.saturating_sub(1)];
        let p1 = pts[i];
        let p2 = pts[i + 1];
        let p3 = pts[(i + 2).min(n - 1)];
        b = b.cubic_to(
            p1.x + k * (p2.x - p0.x),
            p1.y + k * (p2.y - p0.y),
            p2.x - k * (p3.x - p1.x),
            p2.y - k * (p3.y - p1.y),
            p2.x,
            p2.y,
        );
    }
    b
}

fn sign(v: f32) -> f32 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}

fn monotone_x(mut b: PathBuilder, pts: &[Point]) -> PathBuilder {
    let n = pts.len();
    let mut h = Vec::with_capacity(n - 1);
    let mut s = Vec::with_capacity(n - 1);
    for w in pts.windows(2) {
        let dx = w[1].x - w[0].x;
        h.push(dx);
        s.push(if dx.abs() > f32::EPSILON {
            (w[1].y - w[0].y) / dx
        } else {
            0.0
        });
    }

    let mut tangents = vec![0.0f32; n];
    for i in 1..n - 1 {
        let (s0, s1) = (s[i - 1], s[i]);
        let (h0, h1) = (h[i - 1], h[i]);
        if s0 * s1 <= 0.0 || (h0 + h1).abs() <= f32::EPSILON {
            continue;
        }
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        tangents[i] = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    }
    // One-sided estimates at the ends.
    tangents[0] = end_slope(h[0], s[0], tangents[1]);
    tangents[n - 1] = end_slope(h[n - 2], s[n - 2], tangents[n - 2]);

    for i in 0..n - 1 {
        let (p0, p1) = (pts[i], pts[i + 1]);
        let dx = (p1.x - p0.x) / 3.0;
        b = b.cubic_to(
            p0.x + dx,
            p0.y + dx * tangents[i],
            p1.x - dx,
            p1.y - dx * tangents[i + 1],
            p1.x,
            p1.y,
        );
    }
    b
}

fn end_slope(h: f32, secant: f32, neighbour: f32) -> f32 {
    if h.abs() > f32::EPSILON {
        (3.0 * secant - neighbour) / 2.0
    } else {
        neighbour
    }
}

fn basis(mut b: PathBuilder, pts: &[Point]) -> PathBuilder {
    let (mut a, mut c) = (pts[0], pts[1]);
    b = b.line_to((5.0 * a.x + c.x) / 6.0, (5.0 * a.y + c.y) / 6.0);
    for &p in &pts[2..] {
        b = basis_segment(b, a, c, p);
        a = c;
        c = p;
    }
    b = basis_segment(b, a, c, c);
    b.line_to(c.x, c.y)
}

fn basis_segment(b: PathBuilder, p0: Point, p1: Point, p: Point) -> PathBuilder {
    b.cubic_to(
        (2.0 * p0.x + p1.x) / 3.0,
        (2.0 * p0.y + p1.y) / 3.0,
        (p0.x + 2.0 * p1.x) / 3.0,
        (p0.y + 2.0 * p1.y) / 3.0,
        (p0.x + 4.0 * p1.x + p.x) / 6.0,
        (p0.y + 4.0 * p1.y + p.y) / 6.0,
    )
}
