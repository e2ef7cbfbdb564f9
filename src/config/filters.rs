//! Rotation filtering settings.

use serde::{Deserialize, Serialize};

/// Kind of filtering applied to tracker rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    None,
    Smoothing,
    #[default]
    Prediction,
}

/// Filtering configuration shared by every tracker on the server.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FiltersConfig {
    /// Filtering applied (none, smoothing or prediction).
    #[serde(rename = "type")]
    pub filter_type: FilterType,

    /// Intensity of the selected filter, 0 to 1.
    pub amount: f32,

    /// Smoothing only: minimum smoothing factor.
    /// Lower values mean stronger smoothing at high `amount`.
    pub smooth_min: f32,

    /// Prediction only: minimum prediction factor.
    pub predict_min: f32,

    /// Prediction only: multiplier applied to `amount`.
    pub predict_multiplier: f32,

    /// Prediction only: number of past rotations used.
    pub predict_buffer: u32,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            filter_type: FilterType::Prediction,
            amount: 0.2,
            smooth_min: 11.0,
            predict_min: 10.0,
            predict_multiplier: 15.0,
            predict_buffer: 6,
        }
    }
}
