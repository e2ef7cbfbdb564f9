//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config subsystem produces:
//!     → tracing events (loads, saves, coerced entries, validation warnings)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, filtered by RUST_LOG)
//! ```

pub mod logging;

pub use logging::init_logging;
