use thiserror::Error;

/// Top-level error type for the Planis planning kernel.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Invariant(#[from] InvariantError),

    /// The expansion loop grew the tree past its node ceiling. This only
    /// happens when the revisited-point guard fails to prune a branch.
    #[error("search tree exceeded the {limit}-node budget")]
    NodeBudgetExceeded { limit: usize },
}

/// Input validation failures, reported before any search runs.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("obstacle {index} is degenerate: {width} x {height}")]
    DegenerateObstacle {
        index: usize,
        width: f64,
        height: f64,
    },

    #[error("clearance margin is invalid: {width} x {height}")]
    InvalidMargin { width: f64, height: f64 },

    #[error("start point ({x}, {y}) lies on or inside an inflated obstacle")]
    StartInsideObstacle { x: f64, y: f64 },

    #[error("goal point ({x}, {y}) lies on or inside an inflated obstacle")]
    GoalInsideObstacle { x: f64, y: f64 },
}

/// Geometric or tree contract violations. Fatal to the current query only;
/// the caller can keep issuing new queries.
#[derive(Debug, Error)]
pub enum InvariantError {
    /// A segment ending on an obstacle's own inflated corner must register
    /// at least that corner hit.
    #[error("corner-directed segment produced no boundary collisions")]
    MissingCornerHit,

    /// A node id obtained from this tree no longer resolves.
    #[error("node id does not resolve to a tree node")]
    StaleNodeId,

    /// Terminal nodes carry no children list and cannot be extended.
    #[error("attempted to append a child under a terminal node")]
    TerminalParent,
}

/// Convenience type alias for results using [`PlanError`].
pub type Result<T> = std::result::Result<T, PlanError>;
