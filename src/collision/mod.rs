use crate::geometry::{Margin, Obstacle, Rect, Segment};
use crate::math::{self, intersect_2d::segment_segment_intersect_2d, Point2, TOLERANCE};

/// A single hit between a query segment and one inflated obstacle edge.
///
/// Ephemeral: produced per query and discarded; never stored in the tree.
#[derive(Debug, Clone, Copy)]
pub struct Collision {
    /// Index of the hit obstacle in the query's obstacle slice.
    pub obstacle: usize,
    /// The query segment that produced the hit.
    pub segment: Segment,
    /// The intersection point.
    pub point: Point2,
    /// Distance from `segment.p1` to the intersection point.
    pub distance: f64,
}

impl Collision {
    /// True unless the hit lies on one of the query segment's endpoints.
    ///
    /// A segment that merely touches an obstacle at its own origin or
    /// destination is expected (detour segments start and end on inflated
    /// corners) and does not block travel.
    #[must_use]
    pub fn is_interior(&self) -> bool {
        !math::points_coincide(&self.point, &self.segment.p1)
            && !math::points_coincide(&self.point, &self.segment.p2)
    }

    /// True iff the hit lies on the query segment's start point.
    #[must_use]
    pub fn is_at_origin(&self) -> bool {
        math::points_coincide(&self.point, &self.segment.p1)
    }
}

/// Intersects `segment` against every edge of every inflated obstacle and
/// collects all hits.
///
/// An empty result means free passage, never an error. Hits arrive in
/// obstacle-slice order, then edge order, which keeps downstream processing
/// deterministic.
#[must_use]
pub fn collisions_on_segment(
    obstacles: &[Obstacle],
    segment: &Segment,
    margin: Margin,
) -> Vec<Collision> {
    let mut hits = Vec::new();
    for (index, obstacle) in obstacles.iter().enumerate() {
        for edge in obstacle.inflate(margin).edges() {
            if let Some((point, _, _)) =
                segment_segment_intersect_2d(&edge.p1, &edge.p2, &segment.p1, &segment.p2)
            {
                hits.push(Collision {
                    obstacle: index,
                    segment: *segment,
                    point,
                    distance: nalgebra::distance(&segment.p1, &point),
                });
            }
        }
    }
    hits
}

/// The interior hit closest to the segment's origin, if any.
///
/// Equidistant hits resolve to the earliest one in `hits`, so ties follow
/// obstacle-slice order.
#[must_use]
pub fn nearest_interior(hits: &[Collision]) -> Option<&Collision> {
    let mut nearest: Option<&Collision> = None;
    for hit in hits.iter().filter(|c| c.is_interior()) {
        let closer = match nearest {
            Some(best) => hit.distance.total_cmp(&best.distance).is_lt(),
            None => true,
        };
        if closer {
            nearest = Some(hit);
        }
    }
    nearest
}

/// Corner-relative direction test: does `segment` depart one of `rect`'s
/// corners heading strictly into the rectangle's interior?
///
/// Such a segment is not a valid detour: it dives into the region it is
/// supposed to skirt. Segments starting anywhere other than a corner are
/// never "into" by this test.
#[must_use]
pub fn points_into_rect(segment: &Segment, rect: &Rect) -> bool {
    let p = segment.p1;
    let on_min_x = (p.x - rect.p1.x).abs() < TOLERANCE;
    let on_max_x = (p.x - rect.p2.x).abs() < TOLERANCE;
    let on_min_y = (p.y - rect.p1.y).abs() < TOLERANCE;
    let on_max_y = (p.y - rect.p2.y).abs() < TOLERANCE;
    if !((on_min_x || on_max_x) && (on_min_y || on_max_y)) {
        return false;
    }

    let dx = segment.p2.x - p.x;
    let dy = segment.p2.y - p.y;
    let inward_x = if on_min_x { dx > TOLERANCE } else { dx < -TOLERANCE };
    let inward_y = if on_min_y { dy > TOLERANCE } else { dy < -TOLERANCE };
    inward_x && inward_y
}

/// [`points_into_rect`] over the obstacle's inflated rectangle.
#[must_use]
pub fn points_into_obstacle(segment: &Segment, obstacle: &Obstacle, margin: Margin) -> bool {
    points_into_rect(segment, &obstacle.inflate(margin))
}
