use crate::math::Point2;

/// A directed line segment from `p1` to `p2`.
///
/// Direction matters: collision classification distinguishes a hit at the
/// segment's origin from one at its destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p1: Point2,
    pub p2: Point2,
}

impl Segment {
    /// Creates a segment from `p1` to `p2`.
    #[must_use]
    pub fn new(p1: Point2, p2: Point2) -> Self {
        Self { p1, p2 }
    }

    /// Euclidean length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.p1, &self.p2)
    }
}
