//! Path building and representation

use std::f32::consts::TAU;
use std::fmt::Write;

use canopy_core::Point;
use smallvec::SmallVec;

/// Samples used when flattening one cubic segment.
const CUBIC_STEPS: usize = 16;

/// Point on a circle with angles measured clockwise from 12 o'clock.
pub fn polar_point(center: Point, radius: f32, angle: f32) -> Point {
    Point::new(
        center.x + radius * angle.sin(),
        center.y - radius * angle.cos(),
    )
}

/// Path command
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Circular arc continuing from the current point, which must sit at
    /// `start_angle` on the circle.
    ArcTo {
        center: Point,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
    Close,
}

/// A 2D path composed of commands
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: SmallVec<[PathCommand; 16]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// SVG path data (`d` attribute).
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();
        for cmd in &self.commands {
            if !d.is_empty() {
                d.push(' ');
            }
            match *cmd {
                PathCommand::MoveTo(p) => {
                    let _ = write!(d, "M{},{}", fmt(p.x), fmt(p.y));
                }
                PathCommand::LineTo(p) => {
                    let _ = write!(d, "L{},{}", fmt(p.x), fmt(p.y));
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    let _ = write!(
                        d,
                        "C{},{} {},{} {},{}",
                        fmt(control1.x),
                        fmt(control1.y),
                        fmt(control2.x),
                        fmt(control2.y),
                        fmt(end.x),
                        fmt(end.y)
                    );
                }
                PathCommand::ArcTo {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                } => {
                    let span = end_angle - start_angle;
                    let sweep = if span >= 0.0 { 1 } else { 0 };
                    // A full turn cannot be expressed by one SVG arc; split it.
                    let mid = if span.abs() >= TAU - 1e-4 {
                        let mid_angle = start_angle + span * 0.5;
                        let m = polar_point(center, radius, mid_angle);
                        let _ = write!(
                            d,
                            "A{r},{r} 0 0 {sweep} {},{} ",
                            fmt(m.x),
                            fmt(m.y),
                            r = fmt(radius)
                        );
                        Some(mid_angle)
                    } else {
                        None
                    };
                    let remaining = match mid {
                        Some(m) => end_angle - m,
                        None => span,
                    };
                    let large = if remaining.abs() > std::f32::consts::PI {
                        1
                    } else {
                        0
                    };
                    let e = polar_point(center, radius, end_angle);
                    let _ = write!(
                        d,
                        "A{r},{r} 0 {large} {sweep} {},{}",
                        fmt(e.x),
                        fmt(e.y),
                        r = fmt(radius)
                    );
                }
                PathCommand::Close => d.push('Z'),
            }
        }
        d
    }

    /// Approximate the path as polylines, one per subpath.
    pub fn flatten(&self) -> Vec<Vec<Point>> {
        let mut out: Vec<Vec<Point>> = Vec::new();
        let mut current = Point::ZERO;
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    out.push(vec![p]);
                    current = p;
                }
                PathCommand::LineTo(p) => {
                    push_point(&mut out, current, p);
                    current = p;
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    for i in 1..=CUBIC_STEPS {
                        let t = i as f32 / CUBIC_STEPS as f32;
                        let p = cubic_point(current, control1, control2, end, t);
                        push_point(&mut out, current, p);
                    }
                    current = end;
                }
                PathCommand::ArcTo {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                } => {
                    let span = end_angle - start_angle;
                    let steps = ((span.abs() / TAU) * 64.0).ceil().max(1.0) as usize;
                    for i in 1..=steps {
                        let a = start_angle + span * (i as f32 / steps as f32);
                        push_point(&mut out, current, polar_point(center, radius, a));
                    }
                    current = polar_point(center, radius, end_angle);
                }
                PathCommand::Close => {
                    if let Some(sub) = out.last_mut() {
                        if let Some(first) = sub.first().copied() {
                            sub.push(first);
                            current = first;
                        }
                    }
                }
            }
        }
        out
    }

    /// Total length of all subpaths.
    pub fn length(&self) -> f32 {
        self.flatten()
            .iter()
            .map(|sub| sub.windows(2).map(|w| w[0].distance(w[1])).sum::<f32>())
            .sum()
    }
}

fn push_point(out: &mut Vec<Vec<Point>>, current: Point, p: Point) {
    match out.last_mut() {
        Some(sub) => sub.push(p),
        None => out.push(vec![current, p]),
    }
}

fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// Compact decimal formatting for SVG output.
pub(crate) fn fmt(v: f32) -> String {
    let v = if v.abs() < 5e-4 { 0.0 } else { v };
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

/// Builder for constructing paths
pub struct PathBuilder {
    path: Path,
    current: Point,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            path: Path::new(),
            current: Point::ZERO,
        }
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        let point = Point::new(x, y);
        self.path.commands.push(PathCommand::MoveTo(point));
        self.current = point;
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        let point = Point::new(x, y);
        self.path.commands.push(PathCommand::LineTo(point));
        self.current = point;
        self
    }

    pub fn cubic_to(mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) -> Self {
        let end = Point::new(x, y);
        self.path.commands.push(PathCommand::CubicTo {
            control1: Point::new(c1x, c1y),
            control2: Point::new(c2x, c2y),
            end,
        });
        self.current = end;
        self
    }

    /// Arc around `center`; the current point must already sit at `start`.
    pub fn arc_to(mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32) -> Self {
        let center = Point::new(cx, cy);
        self.path.commands.push(PathCommand::ArcTo {
            center,
            radius,
            start_angle: start,
            end_angle: end,
        });
        self.current = polar_point(center, radius, end);
        self
    }

    pub fn close(mut self) -> Self {
        self.path.commands.push(PathCommand::Close);
        self
    }

    pub fn build(self) -> Path {
        self.path
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}
