pub mod obstacle;
pub mod rect;
pub mod segment;

pub use obstacle::{Margin, Obstacle};
pub use rect::Rect;
pub use segment::Segment;
