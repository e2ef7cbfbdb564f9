//! Tracker role identifiers.
//!
//! A role names the body part (or device) a tracker stands for. Bridges key
//! their per-role overrides by the role's canonical lower-case name, never by
//! its ordinal, so persisted files survive variants being added or reordered.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Role a tracker plays in the skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrackerRole {
    Waist,
    LeftFoot,
    RightFoot,
    Chest,
    LeftKnee,
    RightKnee,
    LeftElbow,
    RightElbow,
    LeftShoulder,
    RightShoulder,
    LeftHand,
    RightHand,
    LeftController,
    RightController,
    Head,
    Neck,
    Camera,
    Keyboard,
    Hmd,
    Beacon,
    GenericController,
}

/// Returned when a string does not name any known role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tracker role: {0}")]
pub struct UnknownRole(pub String);

impl TrackerRole {
    /// Every role, in declaration order.
    pub const ALL: [TrackerRole; 21] = [
        TrackerRole::Waist,
        TrackerRole::LeftFoot,
        TrackerRole::RightFoot,
        TrackerRole::Chest,
        TrackerRole::LeftKnee,
        TrackerRole::RightKnee,
        TrackerRole::LeftElbow,
        TrackerRole::RightElbow,
        TrackerRole::LeftShoulder,
        TrackerRole::RightShoulder,
        TrackerRole::LeftHand,
        TrackerRole::RightHand,
        TrackerRole::LeftController,
        TrackerRole::RightController,
        TrackerRole::Head,
        TrackerRole::Neck,
        TrackerRole::Camera,
        TrackerRole::Keyboard,
        TrackerRole::Hmd,
        TrackerRole::Beacon,
        TrackerRole::GenericController,
    ];

    /// Canonical lower-case key used in persisted tracker maps.
    pub const fn key(self) -> &'static str {
        match self {
            TrackerRole::Waist => "waist",
            TrackerRole::LeftFoot => "left_foot",
            TrackerRole::RightFoot => "right_foot",
            TrackerRole::Chest => "chest",
            TrackerRole::LeftKnee => "left_knee",
            TrackerRole::RightKnee => "right_knee",
            TrackerRole::LeftElbow => "left_elbow",
            TrackerRole::RightElbow => "right_elbow",
            TrackerRole::LeftShoulder => "left_shoulder",
            TrackerRole::RightShoulder => "right_shoulder",
            TrackerRole::LeftHand => "left_hand",
            TrackerRole::RightHand => "right_hand",
            TrackerRole::LeftController => "left_controller",
            TrackerRole::RightController => "right_controller",
            TrackerRole::Head => "head",
            TrackerRole::Neck => "neck",
            TrackerRole::Camera => "camera",
            TrackerRole::Keyboard => "keyboard",
            TrackerRole::Hmd => "hmd",
            TrackerRole::Beacon => "beacon",
            TrackerRole::GenericController => "generic_controller",
        }
    }

    /// Look up a role by an already-canonical key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.key() == key)
    }
}

impl fmt::Display for TrackerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TrackerRole {
    type Err = UnknownRole;

    /// Case-insensitive: `LEFT_FOOT`, `Left_Foot` and `left_foot` are the same role.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::from_key(&key).ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl Serialize for TrackerRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for TrackerRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
