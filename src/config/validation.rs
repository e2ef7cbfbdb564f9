//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic checks that serde cannot express
//! - Flag values the bridge runtime may misbehave on (foot ratio out of range)
//! - Report role keys that no known role maps to
//!
//! # Design Decisions
//! - Returns all findings, not just the first
//! - Findings are warnings: a config is never rejected, and nothing is rewritten
//! - Pure function: ServerConfig → Vec<ValidationWarning>

use thiserror::Error;

use crate::config::schema::{BridgeTrackerConfig, ServerConfig};

/// A questionable value found in an otherwise loadable config.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationWarning {
    #[error("bridge '{bridge}': footTrackerAnkleToToeRatio {ratio} is outside [0, 1]")]
    FootRatioOutOfRange { bridge: String, ratio: f32 },

    #[error("bridge '{bridge}': unknown tracker role '{key}' kept as-is")]
    UnknownRole { bridge: String, key: String },

    #[error("filters: amount {0} is outside [0, 1]")]
    FilterAmountOutOfRange(f32),

    #[error("filters: predictBuffer is 0, prediction has no history to work with")]
    EmptyPredictBuffer,
}

/// Collect every warning for `config`.
pub fn validate_config(config: &ServerConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (name, bridge) in &config.bridges {
        warnings.extend(validate_bridge(name, bridge));
    }

    let amount = config.filters.amount;
    if !(0.0..=1.0).contains(&amount) {
        warnings.push(ValidationWarning::FilterAmountOutOfRange(amount));
    }
    if config.filters.predict_buffer == 0 {
        warnings.push(ValidationWarning::EmptyPredictBuffer);
    }

    warnings
}

/// Warnings for a single bridge entry.
pub fn validate_bridge(name: &str, bridge: &BridgeTrackerConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // NaN fails the range check as well.
    let ratio = bridge.foot_tracker_ankle_to_toe_ratio;
    if !(0.0..=1.0).contains(&ratio) {
        warnings.push(ValidationWarning::FootRatioOutOfRange {
            bridge: name.to_string(),
            ratio,
        });
    }

    for key in bridge.unknown_role_keys() {
        warnings.push(ValidationWarning::UnknownRole {
            bridge: name.to_string(),
            key: key.to_string(),
        });
    }

    warnings
}
