pub mod collision;
pub mod error;
pub mod geometry;
pub mod math;
pub mod search;
pub mod tree;

pub use error::{PlanError, Result};
