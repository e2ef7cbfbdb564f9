//! Foot tracker placement along the ankle→toe segment.

use crate::config::schema::BridgeTrackerConfig;

/// Where a bridge places an exported foot tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootPlacement {
    ratio: Option<f32>,
}

impl FootPlacement {
    pub fn from_config(config: &BridgeTrackerConfig) -> Self {
        Self {
            ratio: config.foot_offset(),
        }
    }

    /// `ankle + (toe - ankle) * ratio`, or `toe` untouched when the offset is off.
    /// Ratios outside [0, 1] extrapolate past the ankle or toe.
    pub fn place(&self, ankle: [f32; 3], toe: [f32; 3]) -> [f32; 3] {
        let Some(ratio) = self.ratio else {
            return toe;
        };

        [
            ankle[0] + (toe[0] - ankle[0]) * ratio,
            ankle[1] + (toe[1] - ankle[1]) * ratio,
            ankle[2] + (toe[2] - ankle[2]) * ratio,
        ]
    }
}
