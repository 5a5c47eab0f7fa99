use crate::error::{QueryError, Result};
use crate::geometry::{Margin, Obstacle};
use crate::math::Point2;

/// Validates a planning query before any search runs.
///
/// The search itself assumes these preconditions; running it on a start or
/// goal buried inside an inflated rectangle is undefined, so the check is
/// mandatory rather than best-effort.
///
/// # Errors
///
/// Returns a [`QueryError`] for a non-finite or negative margin, an obstacle
/// with non-positive width or negative height (zero height is the legal
/// circle-marker form), or a start/goal on or inside any inflated rectangle.
pub fn validate_query(
    start: &Point2,
    goal: &Point2,
    obstacles: &[Obstacle],
    margin: Margin,
) -> Result<()> {
    if !margin.width.is_finite()
        || !margin.height.is_finite()
        || margin.width < 0.0
        || margin.height < 0.0
    {
        return Err(QueryError::InvalidMargin {
            width: margin.width,
            height: margin.height,
        }
        .into());
    }

    for (index, obstacle) in obstacles.iter().enumerate() {
        if !obstacle.width.is_finite()
            || !obstacle.height.is_finite()
            || obstacle.width <= 0.0
            || obstacle.height < 0.0
        {
            return Err(QueryError::DegenerateObstacle {
                index,
                width: obstacle.width,
                height: obstacle.height,
            }
            .into());
        }

        let rect = obstacle.inflate(margin);
        if rect.contains(start) {
            return Err(QueryError::StartInsideObstacle {
                x: start.x,
                y: start.y,
            }
            .into());
        }
        if rect.contains(goal) {
            return Err(QueryError::GoalInsideObstacle {
                x: goal.x,
                y: goal.y,
            }
            .into());
        }
    }

    Ok(())
}
