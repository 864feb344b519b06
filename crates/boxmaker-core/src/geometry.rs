//! Planar geometry primitives shared by the layout planner and the output sinks.
//!
//! Coordinates are page coordinates in millimetres with the origin at the top-left
//! corner and y growing downwards. Sinks with a y-up convention flip on output.

use serde::{Deserialize, Serialize};

/// Tolerance used when deciding whether two points coincide
pub const POINT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether two points are equal within [`POINT_EPSILON`]
    pub fn approx_eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() < POINT_EPSILON && (self.y - other.y).abs() < POINT_EPSILON
    }
}

/// A single straight cut from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }
}

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(origin: Point, width: f64, height: f64) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.height
    }

    /// Corners in drawing order: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [Point; 4] {
        [
            self.origin,
            Point::new(self.max_x(), self.origin.y),
            Point::new(self.max_x(), self.max_y()),
            Point::new(self.origin.x, self.max_y()),
        ]
    }

    /// The four sides as a closed loop of segments
    pub fn edges(&self) -> [Segment; 4] {
        let [a, b, c, d] = self.corners();
        [
            Segment::new(a, b),
            Segment::new(b, c),
            Segment::new(c, d),
            Segment::new(d, a),
        ]
    }

    /// Whether `other` lies entirely inside this rectangle (edges may touch)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.origin.x >= self.origin.x - POINT_EPSILON
            && other.origin.y >= self.origin.y - POINT_EPSILON
            && other.max_x() <= self.max_x() + POINT_EPSILON
            && other.max_y() <= self.max_y() + POINT_EPSILON
    }

    /// Whether two rectangles overlap with a positive area
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.origin.x < other.max_x() - POINT_EPSILON
            && other.origin.x < self.max_x() - POINT_EPSILON
            && self.origin.y < other.max_y() - POINT_EPSILON
            && other.origin.y < self.max_y() - POINT_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_length() {
        let h = Segment::new(Point::new(0.0, 1.0), Point::new(3.0, 5.0));
        assert!((h.length() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_rect_edges_form_loop() {
        let r = Rect::new(Point::new(1.0, 2.0), 3.0, 4.0);
        let edges = r.edges();
        for pair in edges.windows(2) {
            assert!(pair[0].end.approx_eq(&pair[1].start));
        }
        assert!(edges[3].end.approx_eq(&edges[0].start));
    }

    #[test]
    fn test_rect_overlap_and_containment() {
        let outer = Rect::new(Point::new(0.0, 0.0), 10.0, 10.0);
        let inner = Rect::new(Point::new(2.0, 2.0), 3.0, 3.0);
        let beside = Rect::new(Point::new(10.0, 0.0), 3.0, 3.0);
        assert!(outer.contains_rect(&inner));
        assert!(outer.overlaps(&inner));
        assert!(!outer.overlaps(&beside));
    }
}
