use std::collections::VecDeque;

use crate::collision;
use crate::error::Result;
use crate::geometry::{Margin, Obstacle, Segment};
use crate::math::{self, Point2, TOLERANCE};
use crate::tree::{NodeId, PathTree};

/// Breadth-first expansion along the inflated-rectangle edges of the obstacle
/// being circumvented.
///
/// Each entry corner becomes a child of `parent`; every further corner
/// reached over an unobstructed edge attaches under the corner it was reached
/// from. A node is born complete (dead end) when the straight line from it to
/// `goal` dives into the circumvented obstacle; otherwise the work loop will
/// expand it later.
///
/// Returns the indices of obstacles newly discovered blocking an edge.
///
/// # Errors
///
/// Propagates tree invariant violations; geometry itself cannot fail here.
pub fn walk_boundary(
    tree: &mut PathTree,
    parent: NodeId,
    entries: &[Point2],
    goal: Point2,
    circumvented: usize,
    obstacles: &[Obstacle],
    margin: Margin,
) -> Result<Vec<usize>> {
    let rect = obstacles[circumvented].inflate(margin);
    let corners = rect.corners();
    let mut discovered: Vec<usize> = Vec::new();

    for &entry in entries {
        let dead = collision::points_into_rect(&Segment::new(entry, goal), &rect);
        let entry_node = tree.push_child(parent, entry, dead, false)?;

        // Walks never cross into another walk's entry corner.
        let mut visited: Vec<Point2> = entries.to_vec();
        let mut frontier: VecDeque<(Point2, NodeId)> = VecDeque::new();
        frontier.push_back((entry, entry_node));

        while let Some((from, from_node)) = frontier.pop_front() {
            for corner in corners {
                if !edge_connected(&from, &corner) {
                    continue;
                }
                if visited.iter().any(|v| math::points_coincide(v, &corner)) {
                    continue;
                }

                let edge = Segment::new(from, corner);
                let hits = collision::collisions_on_segment(obstacles, &edge, margin);
                let blocked = hits.iter().any(collision::Collision::is_interior);
                if blocked {
                    // Another obstacle occludes this rib; remember it and do
                    // not traverse.
                    for hit in hits.iter().filter(|h| h.is_interior()) {
                        if hit.obstacle != circumvented && !discovered.contains(&hit.obstacle) {
                            discovered.push(hit.obstacle);
                        }
                    }
                    continue;
                }

                visited.push(corner);
                let dead = collision::points_into_rect(&Segment::new(corner, goal), &rect);
                let node = tree.push_child(from_node, corner, dead, false)?;
                frontier.push_back((corner, node));
            }
        }
    }

    Ok(discovered)
}

/// Corners joined by a rectangle edge share exactly one coordinate.
fn edge_connected(a: &Point2, b: &Point2) -> bool {
    if math::points_coincide(a, b) {
        return false;
    }
    (a.x - b.x).abs() < TOLERANCE || (a.y - b.y).abs() < TOLERANCE
}
