use crate::geometry::Point;

pub fn polygon_area(poly: &[Point]) -> f32 {
    if poly.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0f32;
    for i in 0..poly.len() {
        let a = poly[i];
        let b = poly[(i + 1) % poly.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum.abs() * 0.5
}

pub fn point_in_polygon(p: Point, poly: &[Point]) -> bool {
    if poly.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = poly.len() - 1;
    for i in 0..poly.len() {
        let pi = poly[i];
        let pj = poly[j];
        let intersects = if (pi.y > p.y) != (pj.y > p.y) {
            let dy = pj.y - pi.y;
            if dy.abs() < 1e-12 {
                false
            } else {
                // Boundary convention: points exactly on an edge are treated as outside.
                p.x < (pj.x - pi.x) * (p.y - pi.y) / dy + pi.x
            }
        } else {
            false
        };
        if intersects {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Shortest distance from `p` to an open polyline.
pub fn distance_to_polyline(p: Point, line: &[Point]) -> f32 {
    match line {
        [] => f32::INFINITY,
        [only] => p.distance(*only),
        _ => line
            .windows(2)
            .map(|w| p.distance_to_segment(w[0], w[1]))
            .fold(f32::INFINITY, f32::min),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 1.0),
            Point::new(0.0, 1.0),
        ]
    }

    #[test]
    fn area_and_contains_for_rect() {
        let poly = square();
        assert!((polygon_area(&poly) - 2.0).abs() < 1e-5);
        assert!(point_in_polygon(Point::new(1.0, 0.5), &poly));
        assert!(!point_in_polygon(Point::new(3.0, 0.5), &poly));
    }

    #[test]
    fn contains_handles_descending_non_vertical_edges() {
        let poly = vec![
            Point::new(-1.0, -1.0),
            Point::new(3.0, -1.0),
            Point::new(2.0, 1.0),
            Point::new(-2.0, 1.0),
        ];
        assert!(point_in_polygon(Point::new(1.0, 0.0), &poly));
    }

    #[test]
    fn polyline_distance_uses_nearest_segment() {
        let line = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
        assert!((distance_to_polyline(Point::new(12.0, 5.0), &line) - 2.0).abs() < 1e-5);
        assert!(distance_to_polyline(Point::ZERO, &[]).is_infinite());
    }
}
