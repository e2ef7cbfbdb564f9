//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML/JSON)
//!     → loader.rs (parse & deserialize)
//!         → lenient.rs (per-entry coercion of tracker maps)
//!     → validation.rs (warnings only, nothing rejected or rewritten)
//!     → ServerConfig
//!         → bridges: name → BridgeTrackerConfig
//!         → filters: FiltersConfig
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → new ServerConfig sent over a channel
//!     → a failed reload keeps the current config
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - One malformed tracker entry never blocks loading; it reads as disabled
//! - Unknown role keys are preserved so save/load does not drop them
//! - `footTrackerAnkleToToeRatio` is never clamped; validation only warns
//! - No locking here; whoever owns a ServerConfig synchronizes access to it

pub mod filters;
pub mod lenient;
pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use filters::{FilterType, FiltersConfig};
pub use loader::{load_config, save_config, ConfigError, ConfigFormat};
pub use schema::BridgeTrackerConfig;
pub use schema::ServerConfig;
