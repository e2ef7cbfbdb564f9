//! Tracker-side types consumed by bridge configuration.

pub mod foot;
pub mod role;

pub use foot::FootPlacement;
pub use role::{TrackerRole, UnknownRole};
