use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::collision::{self, Collision};
use crate::error::{InvariantError, PlanError, Result};
use crate::geometry::{Margin, Obstacle, Segment};
use crate::math::Point2;
use crate::tree::{NodeId, PathTree};

use super::boundary_walk::walk_boundary;
use super::observer::{NoTrace, TraceSink};
use super::validate::validate_query;

/// Hard ceiling on tree growth. Termination of the expansion loop rests on
/// the revisited-point guard pruning every cycle; if that guard is ever
/// wrong, the budget turns unbounded growth into an error for this query
/// instead of a hang.
pub const MAX_TREE_NODES: usize = 10_000;

/// Expands the full circumvention tree for one query: every geometrically
/// distinct way to route around the obstacles blocking the straight line
/// from `start` to `goal`.
///
/// # Errors
///
/// Returns a [`crate::error::QueryError`] for invalid input, an
/// [`InvariantError`] for geometric contract violations, or
/// [`PlanError::NodeBudgetExceeded`] when the tree outgrows
/// [`MAX_TREE_NODES`].
pub fn build_search_tree(
    start: Point2,
    goal: Point2,
    obstacles: &[Obstacle],
    margin: Margin,
) -> Result<PathTree> {
    build_search_tree_with_sink(start, goal, obstacles, margin, &mut NoTrace)
}

/// [`build_search_tree`] with a trace sink receiving search events.
///
/// # Errors
///
/// Same failure modes as [`build_search_tree`].
pub fn build_search_tree_with_sink(
    start: Point2,
    goal: Point2,
    obstacles: &[Obstacle],
    margin: Margin,
    sink: &mut dyn TraceSink,
) -> Result<PathTree> {
    validate_query(&start, &goal, obstacles, margin)?;

    let mut tree = PathTree::new(start);
    while let Some(id) = tree.find_first(|node| !node.complete) {
        if tree.len() > MAX_TREE_NODES {
            return Err(PlanError::NodeBudgetExceeded {
                limit: MAX_TREE_NODES,
            });
        }

        if tree.node(id)?.children.is_none() {
            // Terminal node; nothing to expand.
            tree.node_mut(id)?.complete = true;
            continue;
        }

        let processed = resolve_segment(&mut tree, id, goal, obstacles, margin, sink)?;
        let node = tree.node_mut(id)?;
        node.processed = processed;
        node.complete = true;
    }

    debug!(nodes = tree.len(), "search tree fully expanded");
    Ok(tree)
}

/// Expands one incomplete node: appends the terminal goal child when the
/// straight segment to the goal is clear, otherwise circumvents every
/// blocking obstacle reachable from this node.
///
/// Returns the indices of obstacles fully handled here; they are recorded on
/// the node so deeper expansions on this branch skip them.
fn resolve_segment(
    tree: &mut PathTree,
    id: NodeId,
    goal: Point2,
    obstacles: &[Obstacle],
    margin: Margin,
    sink: &mut dyn TraceSink,
) -> Result<Vec<usize>> {
    let point = tree.node(id)?.point;

    // Cycle guard: abandon the branch if this exact point already occurred
    // closer to the root.
    if let Some(parent) = tree.node(id)?.parent {
        if tree.point_on_branch(parent, &point)? {
            trace!(x = point.x, y = point.y, "branch revisits its own point, pruned");
            return Ok(Vec::new());
        }
    }

    let query = Segment::new(point, goal);
    sink.segment_considered(&query);

    let hits = collision::collisions_on_segment(obstacles, &query, margin);
    for hit in hits.iter().filter(|h| h.is_interior()) {
        sink.collision_found(hit);
    }
    let Some(nearest) = collision::nearest_interior(&hits) else {
        // Straight shot: the goal is directly reachable from here.
        tree.push_child(id, goal, true, true)?;
        return Ok(Vec::new());
    };

    let branch_processed = tree.processed_on_branch(id)?;
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut processed: Vec<usize> = Vec::new();
    if !branch_processed.contains(&nearest.obstacle) {
        queue.push_back(nearest.obstacle);
    }

    while let Some(current) = queue.pop_front() {
        sink.obstacle_circumvented(current);
        trace!(obstacle = current, "circumventing");

        let rect = obstacles[current].inflate(margin);
        let mut entries: Vec<Point2> = Vec::new();

        for corner_segment in rect.segments_to_corners(point) {
            sink.segment_considered(&corner_segment);

            // A detour candidate must not cut through the obstacle it is
            // meant to skirt: neither departing a corner inward nor crossing
            // the body on the way to a far corner.
            if collision::points_into_rect(&corner_segment, &rect) {
                continue;
            }

            // Corners already seen along this branch would recurse forever.
            // This also covers a corner coinciding with the node's own point
            // (two inflated rectangles meeting corner-to-corner), whose
            // zero-length segment intersects nothing.
            if tree.point_on_branch(id, &corner_segment.p2)? {
                continue;
            }

            let corner_hits = collision::collisions_on_segment(obstacles, &corner_segment, margin);
            if corner_hits.is_empty() {
                // The segment ends on this obstacle's own inflated corner,
                // so at least that hit is geometrically required.
                return Err(InvariantError::MissingCornerHit.into());
            }
            if corner_hits
                .iter()
                .any(|h| h.obstacle == current && h.is_interior())
            {
                continue;
            }

            let blocking: Vec<&Collision> = corner_hits
                .iter()
                .filter(|h| h.obstacle != current && h.is_interior())
                .collect();
            if let Some(nearest_block) = blocking
                .iter()
                .min_by(|a, b| a.distance.total_cmp(&b.distance))
            {
                for hit in &blocking {
                    sink.collision_found(hit);
                }
                let index = nearest_block.obstacle;
                if !processed.contains(&index)
                    && !queue.contains(&index)
                    && !branch_processed.contains(&index)
                {
                    queue.push_back(index);
                }
                continue;
            }

            entries.push(corner_segment.p2);
        }

        if !entries.is_empty() {
            let discovered = walk_boundary(tree, id, &entries, goal, current, obstacles, margin)?;
            for index in discovered {
                if index != current
                    && !processed.contains(&index)
                    && !queue.contains(&index)
                    && !branch_processed.contains(&index)
                {
                    queue.push_back(index);
                }
            }
        }

        processed.push(current);
    }

    Ok(processed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math;

    fn margin() -> Margin {
        Margin::new(100.0, 100.0)
    }

    // Inflated rectangle spans (450,450)..(950,750).
    fn blocker() -> Obstacle {
        Obstacle::new(500.0, 500.0, 400.0, 200.0)
    }

    fn start() -> Point2 {
        Point2::new(900.0, 1000.0)
    }

    fn goal() -> Point2 {
        Point2::new(100.0, 100.0)
    }

    #[test]
    fn open_plane_yields_goal_leaf_only() {
        let tree = build_search_tree(start(), goal(), &[], margin()).unwrap();
        assert_eq!(tree.len(), 2);
        let leaf = tree.find_first(|n| n.children.is_none()).unwrap();
        let node = tree.node(leaf).unwrap();
        assert!(math::points_coincide(&node.point, &goal()));
        assert!(node.complete);
    }

    #[test]
    fn non_blocking_obstacle_is_ignored() {
        let aside = Obstacle::new(1200.0, 1200.0, 100.0, 100.0);
        let tree = build_search_tree(start(), goal(), &[aside], margin()).unwrap();
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn blocking_obstacle_spawns_detour_corners() {
        let tree = build_search_tree(start(), goal(), &[blocker()], margin()).unwrap();

        // Detours enter at the two corners visible from the start.
        let root_children = tree
            .node(tree.root())
            .unwrap()
            .children
            .clone()
            .unwrap();
        assert_eq!(root_children.len(), 2);
        let entry_points: Vec<Point2> = root_children
            .iter()
            .map(|&c| tree.node(c).unwrap().point)
            .collect();
        assert!(entry_points
            .iter()
            .any(|p| math::points_coincide(p, &Point2::new(450.0, 750.0))));
        assert!(entry_points
            .iter()
            .any(|p| math::points_coincide(p, &Point2::new(950.0, 750.0))));

        // The tree is fully expanded and at least one branch reaches the goal.
        assert!(tree.find_first(|n| !n.complete).is_none());
        assert!(tree
            .find_first(|n| n.children.is_none() && math::points_coincide(&n.point, &goal()))
            .is_some());

        // The blocking obstacle is recorded as processed on the root.
        assert_eq!(tree.node(tree.root()).unwrap().processed, vec![0]);
    }

    #[test]
    fn every_goal_leaf_has_interior_free_branch() {
        let second = Obstacle::new(200.0, 450.0, 200.0, 100.0);
        let obstacles = [blocker(), second];
        let mut tree = build_search_tree(start(), goal(), &obstacles, margin()).unwrap();

        while let Some(leaf) = tree.find_first(|n| n.children.is_none()) {
            let points = tree.branch_points(leaf).unwrap();
            tree.truncate_children(leaf).unwrap();
            for pair in points.windows(2) {
                let segment = Segment::new(pair[0], pair[1]);
                let hits = collision::collisions_on_segment(&obstacles, &segment, margin());
                assert!(
                    !hits.iter().any(|h| h.is_interior()),
                    "branch segment {segment:?} crosses an obstacle"
                );
            }
        }
    }

    #[test]
    fn corner_touching_obstacles_are_circumvented() {
        // Two inflated rectangles meeting corner-to-corner at (10,10). The
        // waypoint landing on the shared corner yields a zero-length segment
        // to the second rectangle's near corner, which must be pruned, not
        // treated as a missing-hit contract violation.
        let lower = Obstacle::new(0.0, 0.0, 10.0, 10.0);
        let upper = Obstacle::new(10.0, 10.0, 10.0, 10.0);
        let tree = build_search_tree(
            Point2::new(-5.0, 5.0),
            Point2::new(30.0, 13.0),
            &[lower, upper],
            Margin::new(0.0, 0.0),
        )
        .unwrap();

        assert!(tree.find_first(|n| !n.complete).is_none());
        assert!(tree
            .find_first(|n| n.children.is_none()
                && math::points_coincide(&n.point, &Point2::new(30.0, 13.0)))
            .is_some());
    }

    #[test]
    fn trace_sink_receives_events() {
        #[derive(Default)]
        struct Recorder {
            segments: usize,
            circumvented: Vec<usize>,
            collisions: usize,
        }
        impl TraceSink for Recorder {
            fn segment_considered(&mut self, _segment: &Segment) {
                self.segments += 1;
            }
            fn obstacle_circumvented(&mut self, obstacle: usize) {
                self.circumvented.push(obstacle);
            }
            fn collision_found(&mut self, _collision: &Collision) {
                self.collisions += 1;
            }
        }

        let mut recorder = Recorder::default();
        build_search_tree_with_sink(start(), goal(), &[blocker()], margin(), &mut recorder)
            .unwrap();
        assert!(recorder.segments > 0);
        assert!(recorder.circumvented.contains(&0));
        assert!(recorder.collisions > 0);
    }

    #[test]
    fn sink_does_not_change_the_result() {
        struct Chatty;
        impl TraceSink for Chatty {
            fn segment_considered(&mut self, _segment: &Segment) {}
        }

        let silent = build_search_tree(start(), goal(), &[blocker()], margin()).unwrap();
        let traced =
            build_search_tree_with_sink(start(), goal(), &[blocker()], margin(), &mut Chatty)
                .unwrap();
        assert_eq!(silent.len(), traced.len());
    }

    #[test]
    fn invalid_query_is_rejected_before_expansion() {
        let inside = Point2::new(500.0, 500.0);
        let err = build_search_tree(inside, goal(), &[blocker()], margin());
        assert!(matches!(err, Err(PlanError::Query(_))));
    }
}
