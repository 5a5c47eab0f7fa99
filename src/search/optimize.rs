use tracing::debug;

use crate::collision;
use crate::error::Result;
use crate::geometry::{Margin, Obstacle, Segment};
use crate::math::Point2;
use crate::tree::PathTree;

/// A collision-free polyline from start to goal.
#[derive(Debug, Clone)]
pub struct Route {
    /// Waypoints in travel order, start first, goal last.
    pub waypoints: Vec<Point2>,
    /// Sum of Euclidean segment lengths.
    pub length: f64,
}

/// Collapses every root-to-leaf branch of a fully expanded tree into a
/// shortcut-minimized polyline.
///
/// Routes reducing to the same length are treated as the same path and kept
/// once; the result is sorted ascending by length, so index 0 is the
/// shortest viable route.
///
/// Consumed leaves get their children list truncated to empty, so a second
/// call over the same tree finds no leaves and returns no routes without
/// touching anything else.
///
/// # Errors
///
/// Propagates tree invariant violations; a fully expanded tree never
/// triggers them.
pub fn optimize(
    tree: &mut PathTree,
    obstacles: &[Obstacle],
    margin: Margin,
) -> Result<Vec<Route>> {
    let mut routes: Vec<Route> = Vec::new();

    while let Some(leaf) = tree.find_first(|node| node.children.is_none()) {
        let waypoints = tree.branch_points(leaf)?;
        tree.truncate_children(leaf)?;

        let route = shortcut(&waypoints, obstacles, margin);
        if routes
            .iter()
            .any(|r| r.length.total_cmp(&route.length).is_eq())
        {
            continue;
        }
        routes.push(route);
    }

    routes.sort_by(|a, b| a.length.total_cmp(&b.length));
    debug!(routes = routes.len(), "optimization finished");
    Ok(routes)
}

/// Greedy shortcutting over one waypoint sequence: from the current waypoint,
/// keep extending the next one forward while the straight segment stays
/// valid, lock in the last valid candidate, and resume from it.
///
/// The step to the immediate successor is always valid; adjacent tree
/// segments were collision-checked when they were built.
pub(crate) fn shortcut(waypoints: &[Point2], obstacles: &[Obstacle], margin: Margin) -> Route {
    let mut kept: Vec<Point2> = waypoints.first().copied().into_iter().collect();
    let mut length = 0.0;

    let mut i = 0;
    while i + 1 < waypoints.len() {
        let mut next = i + 1;
        for j in (i + 2)..waypoints.len() {
            if segment_is_clear(&Segment::new(waypoints[i], waypoints[j]), obstacles, margin) {
                next = j;
            } else {
                break;
            }
        }
        length += nalgebra::distance(&waypoints[i], &waypoints[next]);
        kept.push(waypoints[next]);
        i = next;
    }

    Route {
        waypoints: kept,
        length,
    }
}

/// A shortcut segment is valid when nothing blocks its interior and no single
/// obstacle is touched at both of its endpoints.
///
/// The both-ends pattern catches the corner-to-corner diagonal across one
/// obstacle: it registers only endpoint hits yet cuts straight through the
/// body.
fn segment_is_clear(segment: &Segment, obstacles: &[Obstacle], margin: Margin) -> bool {
    let hits = collision::collisions_on_segment(obstacles, segment, margin);

    let mut at_start: Vec<usize> = Vec::new();
    let mut at_end: Vec<usize> = Vec::new();
    for hit in &hits {
        if hit.is_interior() {
            return false;
        }
        if hit.is_at_origin() {
            at_start.push(hit.obstacle);
        } else {
            at_end.push(hit.obstacle);
        }
    }

    !at_start.iter().any(|index| at_end.contains(index))
}
