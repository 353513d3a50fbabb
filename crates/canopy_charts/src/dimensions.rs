//! Container size observation and the bounded drawing area.

use canopy_core::{Point, Rect};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub const ZERO: Margins = Margins::uniform(0.0);

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(v: f32) -> Self {
        Self::new(v, v, v, v)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(24.0, 24.0, 36.0, 44.0)
    }
}

/// Overall size, margins and the derived inner area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    pub margin: Margins,
    pub bounded_width: f32,
    pub bounded_height: f32,
}

impl Dimensions {
    pub fn new(width: f32, height: f32, margin: Margins) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        Self {
            width,
            height,
            margin,
            bounded_width: (width - margin.left - margin.right).max(0.0),
            bounded_height: (height - margin.top - margin.bottom).max(0.0),
        }
    }

    /// False when either bounded extent is zero; nothing should be drawn.
    pub fn is_drawable(&self) -> bool {
        self.bounded_width > 0.0 && self.bounded_height > 0.0
    }

    /// Top-left corner of the bounded area in surface coordinates.
    pub fn origin(&self) -> Point {
        Point::new(self.margin.left, self.margin.top)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.margin.left,
            self.margin.top,
            self.bounded_width,
            self.bounded_height,
        )
    }
}

/// Tracks the observed container size and reports changes.
#[derive(Clone, Debug)]
pub struct DimensionResolver {
    margin: Margins,
    min_height: f32,
    /// Last size as observed, before the height floor.
    observed: Option<(f32, f32)>,
    current: Option<Dimensions>,
}

impl DimensionResolver {
    pub fn new(margin: Margins, min_height: f32) -> Self {
        Self {
            margin,
            min_height: min_height.max(0.0),
            observed: None,
            current: None,
        }
    }

    /// Feed an observed size. Returns the new dimensions when they changed.
    pub fn observe(&mut self, width: f32, height: f32) -> Option<Dimensions> {
        self.observed = Some((width, height));
        self.derive()
    }

    /// Change margins or the height floor; re-derives from the last observed
    /// size.
    pub fn configure(&mut self, margin: Margins, min_height: f32) -> Option<Dimensions> {
        self.margin = margin;
        self.min_height = min_height.max(0.0);
        self.derive()
    }

    pub fn current(&self) -> Option<Dimensions> {
        self.current
    }

    pub fn reset(&mut self) {
        self.observed = None;
        self.current = None;
    }

    fn derive(&mut self) -> Option<Dimensions> {
        let (width, height) = self.observed?;
        let dims = Dimensions::new(width, height.max(self.min_height), self.margin);
        if self.current == Some(dims) {
            return None;
        }
        tracing::debug!(
            width = dims.width,
            height = dims.height,
            bounded_width = dims.bounded_width,
            bounded_height = dims.bounded_height,
            "dimensions changed"
        );
        self.current = Some(dims);
        Some(dims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_area_never_negative() {
        let d = Dimensions::new(30.0, 10.0, Margins::uniform(20.0));
        assert_eq!(d.bounded_width, 0.0);
        assert_eq!(d.bounded_height, 0.0);
        assert!(!d.is_drawable());
    }

    #[test]
    fn observe_reports_only_changes() {
        let mut r = DimensionResolver::new(Margins::new(10.0, 10.0, 20.0, 30.0), 0.0);
        let d = r.observe(400.0, 300.0).unwrap();
        assert_eq!(d.bounded_width, 360.0);
        assert_eq!(d.bounded_height, 270.0);
        assert!(r.observe(400.0, 300.0).is_none());
        assert!(r.observe(401.0, 300.0).is_some());
    }

    #[test]
    fn min_height_floor_applies() {
        let mut r = DimensionResolver::new(Margins::ZERO, 200.0);
        let d = r.observe(100.0, 50.0).unwrap();
        assert_eq!(d.height, 200.0);
    }

    #[test]
    fn lowering_the_floor_restores_the_observed_height() {
        let mut r = DimensionResolver::new(Margins::ZERO, 500.0);
        assert_eq!(r.observe(400.0, 200.0).unwrap().height, 500.0);

        let d = r.configure(Margins::ZERO, 0.0).unwrap();
        assert_eq!(d.height, 200.0);
        assert!(r.configure(Margins::ZERO, 150.0).is_none());
    }

    #[test]
    fn configure_before_observe_reports_nothing() {
        let mut r = DimensionResolver::new(Margins::ZERO, 0.0);
        assert!(r.configure(Margins::uniform(4.0), 100.0).is_none());
        assert!(r.current().is_none());
    }
}
