use crate::math::Point2;

use super::Rect;

/// Clearance applied around every obstacle to account for the agent's size.
///
/// The full margin is split evenly: each side of the rectangle moves outward
/// by half of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub width: f64,
    pub height: f64,
}

impl Margin {
    /// Creates a clearance margin.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangular no-go region, before clearance inflation.
///
/// `position` is the corner with minimal coordinates. A `height` of zero is
/// legal: the authoring layer renders such obstacles as circles of diameter
/// `width`, but the planner treats every obstacle as a rectangle (a
/// zero-height one gains real height through inflation).
///
/// Equality is exact field equality. Obstacles are copied freely across the
/// search, so identity comparison would be meaningless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub position: Point2,
    pub width: f64,
    pub height: f64,
}

impl Obstacle {
    /// Creates an obstacle anchored at `(x, y)` with the given extent.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            width,
            height,
        }
    }

    /// The minimum clearance rectangle the agent's center must stay outside
    /// of: the obstacle expanded by half the margin on each side.
    #[must_use]
    pub fn inflate(&self, margin: Margin) -> Rect {
        Rect {
            p1: Point2::new(
                self.position.x - margin.width / 2.0,
                self.position.y - margin.height / 2.0,
            ),
            p2: Point2::new(
                self.position.x + self.width + margin.width / 2.0,
                self.position.y + self.height + margin.height / 2.0,
            ),
        }
    }
}
