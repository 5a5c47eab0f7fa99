pub mod boundary_walk;
pub mod expand;
pub mod observer;
pub mod optimize;
pub mod validate;

pub use expand::{build_search_tree, build_search_tree_with_sink, MAX_TREE_NODES};
pub use observer::{NoTrace, TraceSink};
pub use optimize::{optimize, Route};
pub use validate::validate_query;

use crate::error::Result;
use crate::geometry::{Margin, Obstacle};
use crate::math::Point2;

/// Full planning pipeline: validate the query, expand the circumvention
/// tree, and reduce it to shortcut-minimized routes.
///
/// Routes come back sorted ascending by length; index 0 is the shortest
/// viable route. With no blocking obstacle the single route is the straight
/// `start → goal` segment.
///
/// # Errors
///
/// Returns a [`crate::error::QueryError`] for invalid input, an
/// [`crate::error::InvariantError`] for geometric contract violations, or
/// [`crate::PlanError::NodeBudgetExceeded`] when expansion outgrows its
/// budget.
pub fn plan(
    start: Point2,
    goal: Point2,
    obstacles: &[Obstacle],
    margin: Margin,
) -> Result<Vec<Route>> {
    plan_with_sink(start, goal, obstacles, margin, &mut NoTrace)
}

/// [`plan`] with a trace sink receiving search events.
///
/// # Errors
///
/// Same failure modes as [`plan`].
pub fn plan_with_sink(
    start: Point2,
    goal: Point2,
    obstacles: &[Obstacle],
    margin: Margin,
    sink: &mut dyn TraceSink,
) -> Result<Vec<Route>> {
    let mut tree = build_search_tree_with_sink(start, goal, obstacles, margin, sink)?;
    optimize::optimize(&mut tree, obstacles, margin)
}
