use crate::math::{Point2, TOLERANCE};

use super::Segment;

/// An axis-aligned rectangle stored as its minimal (`p1`) and maximal (`p2`)
/// corners. Produced by obstacle inflation; never stored on an obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub p1: Point2,
    pub p2: Point2,
}

impl Rect {
    /// The four corners in construction order: `(min,min)`, `(min,max)`,
    /// `(max,min)`, `(max,max)`.
    ///
    /// The order is fixed, not sorted: child ordering in the search tree
    /// (and therefore output determinism) depends on it.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        [
            Point2::new(self.p1.x, self.p1.y),
            Point2::new(self.p1.x, self.p2.y),
            Point2::new(self.p2.x, self.p1.y),
            Point2::new(self.p2.x, self.p2.y),
        ]
    }

    /// The four axis-aligned edges, two anchored at each of `p1` and `p2`.
    #[must_use]
    pub fn edges(&self) -> [Segment; 4] {
        [
            Segment::new(self.p1, Point2::new(self.p1.x, self.p2.y)),
            Segment::new(self.p1, Point2::new(self.p2.x, self.p1.y)),
            Segment::new(self.p2, Point2::new(self.p1.x, self.p2.y)),
            Segment::new(self.p2, Point2::new(self.p2.x, self.p1.y)),
        ]
    }

    /// One segment from `origin` to each corner, in [`Rect::corners`] order.
    /// These are the candidate detour directions around the rectangle.
    #[must_use]
    pub fn segments_to_corners(&self, origin: Point2) -> [Segment; 4] {
        self.corners().map(|corner| Segment::new(origin, corner))
    }

    /// Closed containment test: true for points inside the rectangle or on
    /// its boundary, within tolerance.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.p1.x - TOLERANCE
            && p.x <= self.p2.x + TOLERANCE
            && p.y >= self.p1.y - TOLERANCE
            && p.y <= self.p2.y + TOLERANCE
    }
}
