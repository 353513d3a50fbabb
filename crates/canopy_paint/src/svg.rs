//! SVG serialisation of a [`Surface`].

use std::fmt::Write;

use canopy_core::Color;

use crate::geometry::Geometry;
use crate::path::fmt;
use crate::surface::{Shape, Surface};

/// Render the surface's current frame. An unmounted surface yields an empty
/// zero-sized document.
pub fn to_svg(surface: &Surface) -> String {
    let (w, h) = surface
        .size()
        .map(|s| (s.width, s.height))
        .unwrap_or((0.0, 0.0));
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = fmt(w),
        h = fmt(h)
    );
    let layers: Vec<String> = surface.layer_names().map(str::to_string).collect();
    for layer in layers {
        let mut shapes = surface.shapes_in(&layer).peekable();
        if shapes.peek().is_none() {
            continue;
        }
        let _ = writeln!(out, r#"  <g data-layer="{}">"#, escape(&layer));
        for (_, shape) in shapes {
            write_shape(&mut out, shape);
        }
        out.push_str("  </g>\n");
    }
    out.push_str("</svg>\n");
    out
}

fn color_attr(out: &mut String, name: &str, color: Option<Color>) {
    match color {
        Some(c) => {
            let _ = write!(out, r#" {name}="{}""#, c.to_hex_string());
            if c.a < 1.0 {
                let _ = write!(out, r#" {name}-opacity="{}""#, fmt(c.a));
            }
        }
        None => {
            let _ = write!(out, r#" {name}="none""#);
        }
    }
}

fn write_shape(out: &mut String, shape: &Shape) {
    let geometry = shape.geometry();
    let paint = shape.paint();
    let tag = match geometry {
        Geometry::Rect { .. } => "rect",
        Geometry::Circle { .. } => "circle",
        Geometry::Line { .. } => "line",
        Geometry::Text { .. } => "text",
        Geometry::Arc { .. } | Geometry::Curve { .. } | Geometry::Area { .. } => "path",
    };
    let _ = write!(out, r#"    <{tag} data-key="{}""#, escape(shape.key()));

    match geometry {
        Geometry::Rect { rect, radius } => {
            let _ = write!(
                out,
                r#" x="{}" y="{}" width="{}" height="{}""#,
                fmt(rect.x()),
                fmt(rect.y()),
                fmt(rect.width().max(0.0)),
                fmt(rect.height().max(0.0))
            );
            if *radius > 0.0 {
                let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0).max(0.0);
                let _ = write!(out, r#" rx="{}""#, fmt(r));
            }
        }
        Geometry::Circle { center, radius } => {
            let _ = write!(
                out,
                r#" cx="{}" cy="{}" r="{}""#,
                fmt(center.x),
                fmt(center.y),
                fmt(radius.max(0.0))
            );
        }
        Geometry::Line { from, to } => {
            let _ = write!(
                out,
                r#" x1="{}" y1="{}" x2="{}" y2="{}""#,
                fmt(from.x),
                fmt(from.y),
                fmt(to.x),
                fmt(to.y)
            );
        }
        Geometry::Text {
            position,
            anchor,
            size,
            ..
        } => {
            let _ = write!(
                out,
                r#" x="{}" y="{}" font-size="{}" text-anchor="{}""#,
                fmt(position.x),
                fmt(position.y),
                fmt(*size),
                anchor.as_str()
            );
        }
        Geometry::Arc { .. } | Geometry::Curve { .. } | Geometry::Area { .. } => {
            let d = geometry.to_path().map(|p| p.to_svg_d()).unwrap_or_default();
            let _ = write!(out, r#" d="{d}""#);
        }
    }

    if matches!(geometry, Geometry::Curve { .. } | Geometry::Line { .. }) {
        let _ = write!(out, r#" fill="none""#);
    } else {
        color_attr(out, "fill", paint.fill);
    }
    if paint.stroke.is_some() {
        color_attr(out, "stroke", paint.stroke);
        let _ = write!(out, r#" stroke-width="{}""#, fmt(paint.stroke_width));
    }

    match geometry {
        Geometry::Curve { reveal, .. } if *reveal < 1.0 => {
            let length = geometry.to_path().map(|p| p.length()).unwrap_or(0.0);
            let _ = write!(
                out,
                r#" stroke-dasharray="{l} {l}" stroke-dashoffset="{}""#,
                fmt(length * (1.0 - reveal.clamp(0.0, 1.0))),
                l = fmt(length)
            );
        }
        _ => {
            if let Some((dash, gap)) = paint.dash {
                let _ = write!(out, r#" stroke-dasharray="{} {}""#, fmt(dash), fmt(gap));
            }
        }
    }

    let opacity = shape.opacity().clamp(0.0, 1.0);
    if opacity < 1.0 {
        let _ = write!(out, r#" opacity="{}""#, fmt(opacity));
    }
    let scale = shape.scale();
    if (scale - 1.0).abs() > 1e-4 {
        let c = geometry.bounds().center();
        let _ = write!(
            out,
            r#" transform="translate({x} {y}) scale({}) translate({nx} {ny})""#,
            fmt(scale),
            x = fmt(c.x),
            y = fmt(c.y),
            nx = fmt(-c.x),
            ny = fmt(-c.y)
        );
    }
    if let Some(glow) = shape.glow() {
        let _ = write!(
            out,
            r#" style="filter: drop-shadow(0 0 {}px {})""#,
            fmt(glow.radius),
            glow.color.to_hex_string()
        );
    }

    match geometry {
        Geometry::Text { text, .. } => {
            let _ = writeln!(out, ">{}</text>", escape(text));
        }
        _ => out.push_str("/>\n"),
    }
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
