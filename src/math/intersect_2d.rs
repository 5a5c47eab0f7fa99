use super::{Point2, Vector2, TOLERANCE};

/// Bounded segment-segment intersection in 2D via the determinant method.
///
/// Returns `(intersection_point, t, u)` where `t` parameterizes the segment
/// `a0..a1` and `u` the segment `b0..b1`, both in `[0, 1]`. Parallel or
/// collinear segments return `None`: a degenerate pair is a valid
/// "no collision" outcome, not an error.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = Vector2::new(a1.x - a0.x, a1.y - a0.y);
    let db = Vector2::new(b1.x - b0.x, b1.y - b0.y);

    let det = da.x * db.y - da.y * db.x;
    if det.abs() < TOLERANCE {
        return None;
    }

    let dx = b0.x - a0.x;
    let dy = b0.y - a0.y;
    let t = (dx * db.y - dy * db.x) / det;
    let u = (dx * da.y - dy * da.x) / det;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        let pt = Point2::new(a0.x + da.x * t_clamped, a0.y + da.y * t_clamped);
        Some((pt, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn segments_crossing() {
        let a0 = Point2::new(0.0, 0.0);
        let a1 = Point2::new(2.0, 2.0);
        let b0 = Point2::new(0.0, 2.0);
        let b1 = Point2::new(2.0, 0.0);
        let (pt, t, u) = segment_segment_intersect_2d(&a0, &a1, &b0, &b1).unwrap();
        assert!((pt.x - 1.0).abs() < TOLERANCE);
        assert!((pt.y - 1.0).abs() < TOLERANCE);
        assert!((t - 0.5).abs() < TOLERANCE);
        assert!((u - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn segments_apart_return_none() {
        let a0 = Point2::new(0.0, 0.0);
        let a1 = Point2::new(1.0, 0.0);
        let b0 = Point2::new(0.0, 1.0);
        let b1 = Point2::new(1.0, 1.0);
        assert!(segment_segment_intersect_2d(&a0, &a1, &b0, &b1).is_none());
    }

    #[test]
    fn parallel_returns_none() {
        let a0 = Point2::new(0.0, 0.0);
        let a1 = Point2::new(2.0, 2.0);
        let b0 = Point2::new(1.0, 0.0);
        let b1 = Point2::new(3.0, 2.0);
        assert!(segment_segment_intersect_2d(&a0, &a1, &b0, &b1).is_none());
    }

    #[test]
    fn collinear_overlap_returns_none() {
        // Coincident lines have determinant zero; treated as no collision.
        let a0 = Point2::new(0.0, 0.0);
        let a1 = Point2::new(2.0, 0.0);
        let b0 = Point2::new(1.0, 0.0);
        let b1 = Point2::new(3.0, 0.0);
        assert!(segment_segment_intersect_2d(&a0, &a1, &b0, &b1).is_none());
    }

    #[test]
    fn touch_at_shared_endpoint() {
        // T-junction: hit exactly at the end of segment a.
        let a0 = Point2::new(0.0, 0.0);
        let a1 = Point2::new(1.0, 1.0);
        let b0 = Point2::new(0.0, 2.0);
        let b1 = Point2::new(2.0, 0.0);
        let (pt, t, _) = segment_segment_intersect_2d(&a0, &a1, &b0, &b1).unwrap();
        assert!((pt.x - 1.0).abs() < TOLERANCE);
        assert!((pt.y - 1.0).abs() < TOLERANCE);
        assert!((t - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn crossing_beyond_segment_end_returns_none() {
        // The infinite lines cross at (3, 3), outside both segments.
        let a0 = Point2::new(0.0, 0.0);
        let a1 = Point2::new(1.0, 1.0);
        let b0 = Point2::new(6.0, 0.0);
        let b1 = Point2::new(0.0, 6.0);
        assert!(segment_segment_intersect_2d(&a0, &a1, &b0, &b1).is_none());
    }
}
