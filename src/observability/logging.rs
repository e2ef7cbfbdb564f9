//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the logging subsystem
//! - Let RUST_LOG override the default level at runtime
//!
//! # Design Decisions
//! - Uses the tracing crate for structured log events
//! - Library code only emits events; binaries decide where they go

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `default_directive` applies when RUST_LOG is unset.
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
