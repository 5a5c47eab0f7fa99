pub mod intersect_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
///
/// Intersection points are produced by the parametric segment formula, so
/// coordinate equality (hit-at-endpoint classification, corner matching)
/// is always tested against this tolerance, never bitwise.
pub const TOLERANCE: f64 = 1e-9;

/// Coordinate-wise point equality within [`TOLERANCE`].
#[must_use]
pub fn points_coincide(a: &Point2, b: &Point2) -> bool {
    (a.x - b.x).abs() < TOLERANCE && (a.y - b.y).abs() < TOLERANCE
}
