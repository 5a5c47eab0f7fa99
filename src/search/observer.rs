use crate::collision::Collision;
use crate::geometry::Segment;

/// Passive sink for search trace events, intended for visualization and
/// debugging front ends.
///
/// Every method defaults to a no-op and the search behaves identically with
/// or without a sink attached; nothing downstream may depend on a sink
/// being called.
pub trait TraceSink {
    /// A straight segment is about to be tested for collisions.
    fn segment_considered(&mut self, _segment: &Segment) {}

    /// The obstacle at this index was picked for boundary circumvention.
    fn obstacle_circumvented(&mut self, _obstacle: usize) {}

    /// An interior collision blocked a considered segment.
    fn collision_found(&mut self, _collision: &Collision) {}
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl TraceSink for NoTrace {}
