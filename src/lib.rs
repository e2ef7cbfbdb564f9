//! Bridge tracker configuration.
//!
//! Per-bridge settings deciding which tracker roles are exported to an
//! external consumer (e.g. SteamVR) and where exported foot trackers sit.

pub mod config;
pub mod observability;
pub mod tracking;

pub use config::schema::{BridgeTrackerConfig, ServerConfig};
pub use tracking::TrackerRole;
