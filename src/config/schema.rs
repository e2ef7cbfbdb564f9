//! Configuration schema definitions.
//!
//! Persisted field names are camelCase and stable across versions. Every
//! field has a default so partial files load, and unknown fields are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::filters::FiltersConfig;
use crate::config::lenient::deserialize_bool_map;
use crate::tracking::TrackerRole;

/// Root configuration: every configured bridge plus server-wide filtering.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Per-bridge settings keyed by bridge name (e.g. "steamvr", "owotrack").
    pub bridges: BTreeMap<String, BridgeTrackerConfig>,

    /// Rotation filtering.
    pub filters: FiltersConfig,
}

impl ServerConfig {
    pub fn bridge(&self, name: &str) -> Option<&BridgeTrackerConfig> {
        self.bridges.get(name)
    }

    /// Settings for `name`, created with defaults the first time it is asked for.
    pub fn bridge_mut(&mut self, name: &str) -> &mut BridgeTrackerConfig {
        if !self.bridges.contains_key(name) {
            tracing::debug!(bridge = %name, "Initializing bridge config with defaults");
        }
        self.bridges.entry(name.to_string()).or_default()
    }

    pub fn remove_bridge(&mut self, name: &str) -> Option<BridgeTrackerConfig> {
        self.bridges.remove(name)
    }
}

/// Which tracker roles one bridge exports, and how it places foot trackers.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeTrackerConfig {
    /// Per-role overrides keyed by canonical lower-case role name.
    /// A missing key means no override was recorded.
    #[serde(deserialize_with = "deserialize_bool_map")]
    pub trackers: BTreeMap<String, bool>,

    /// Let the bridge runtime toggle shared roles on its own.
    pub automatic_shared_trackers_toggling: bool,

    /// Apply the ankle-to-toe adjustment when exporting foot trackers.
    pub foot_tracker_offset_enabled: bool,

    /// Where along ankle→toe the foot tracker goes:
    /// 0.0 = ankle, 0.5 = middle, 1.0 = toe (unadjusted).
    /// Not clamped; only meaningful while the offset is enabled.
    pub foot_tracker_ankle_to_toe_ratio: f32,
}

impl Default for BridgeTrackerConfig {
    fn default() -> Self {
        Self {
            trackers: BTreeMap::new(),
            automatic_shared_trackers_toggling: true,
            foot_tracker_offset_enabled: false,
            foot_tracker_ankle_to_toe_ratio: 0.5,
        }
    }
}

impl BridgeTrackerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored override for `role`, or `default` when none was recorded.
    pub fn role_enabled(&self, role: TrackerRole, default: bool) -> bool {
        self.trackers.get(role.key()).copied().unwrap_or(default)
    }

    pub fn set_role_enabled(&mut self, role: TrackerRole, enabled: bool) {
        self.trackers.insert(role.key().to_string(), enabled);
    }

    /// Read-only view of every recorded override.
    pub fn trackers(&self) -> &BTreeMap<String, bool> {
        &self.trackers
    }

    /// The ankle-to-toe ratio, if the foot offset is enabled.
    pub fn foot_offset(&self) -> Option<f32> {
        self.foot_tracker_offset_enabled
            .then_some(self.foot_tracker_ankle_to_toe_ratio)
    }

    /// Keys in `trackers` that no known role maps to. They are kept as-is.
    pub fn unknown_role_keys(&self) -> impl Iterator<Item = &str> {
        self.trackers
            .keys()
            .map(String::as_str)
            .filter(|key| TrackerRole::from_key(key).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let cfg = BridgeTrackerConfig::new();
        assert!(cfg.trackers().is_empty());
        assert!(cfg.automatic_shared_trackers_toggling);
        assert!(!cfg.foot_tracker_offset_enabled);
        assert_eq!(cfg.foot_tracker_ankle_to_toe_ratio, 0.5);
    }

    #[test]
    fn test_empty_config_returns_caller_default() {
        let cfg = BridgeTrackerConfig::new();
        for role in TrackerRole::ALL {
            assert!(cfg.role_enabled(role, true));
            assert!(!cfg.role_enabled(role, false));
        }
        assert!(cfg.trackers().is_empty(), "lookups must not insert entries");
    }

    #[test]
    fn test_set_overrides_default() {
        let mut cfg = BridgeTrackerConfig::new();
        for role in TrackerRole::ALL {
            for value in [true, false] {
                cfg.set_role_enabled(role, value);
                assert_eq!(cfg.role_enabled(role, true), value);
                assert_eq!(cfg.role_enabled(role, false), value);
            }
        }
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut once = BridgeTrackerConfig::new();
        once.set_role_enabled(TrackerRole::Chest, true);

        let mut twice = BridgeTrackerConfig::new();
        twice.set_role_enabled(TrackerRole::Chest, true);
        twice.set_role_enabled(TrackerRole::Chest, true);

        assert_eq!(once, twice);
        assert_eq!(twice.trackers().len(), 1);
    }

    #[test]
    fn test_differently_cased_role_names_share_a_key() {
        let mut cfg = BridgeTrackerConfig::new();
        cfg.set_role_enabled("LEFT_FOOT".parse().unwrap(), true);

        let role: TrackerRole = "left_Foot".parse().unwrap();
        assert!(cfg.role_enabled(role, false));
        assert_eq!(cfg.trackers().len(), 1);
        assert_eq!(cfg.trackers().get("left_foot"), Some(&true));
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let cfg: BridgeTrackerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, BridgeTrackerConfig::default());

        let cfg: BridgeTrackerConfig =
            serde_json::from_str(r#"{"footTrackerOffsetEnabled": true, "somethingNew": 3}"#).unwrap();
        assert!(cfg.foot_tracker_offset_enabled);
        assert!(cfg.automatic_shared_trackers_toggling);
        assert_eq!(cfg.foot_tracker_ankle_to_toe_ratio, 0.5);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut cfg = BridgeTrackerConfig::new();
        cfg.set_role_enabled(TrackerRole::Waist, false);

        let value = serde_json::to_value(&cfg).unwrap();
        assert_eq!(value["trackers"]["waist"], false);
        assert_eq!(value["automaticSharedTrackersToggling"], true);
        assert_eq!(value["footTrackerOffsetEnabled"], false);
        assert_eq!(value["footTrackerAnkleToToeRatio"], 0.5);
        assert_eq!(value["trackers"].as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_entry_reads_as_disabled() {
        let cfg: BridgeTrackerConfig =
            serde_json::from_str(r#"{"trackers": {"head": null, "waist": true}}"#).unwrap();
        assert!(!cfg.role_enabled(TrackerRole::Head, true));
        assert!(cfg.role_enabled(TrackerRole::Waist, false));
    }

    #[test]
    fn test_foot_offset() {
        let mut cfg = BridgeTrackerConfig::new();
        assert_eq!(cfg.foot_offset(), None);

        cfg.foot_tracker_offset_enabled = true;
        cfg.foot_tracker_ankle_to_toe_ratio = 1.5;
        assert_eq!(cfg.foot_offset(), Some(1.5));
    }

    #[test]
    fn test_unknown_keys_preserved() {
        let cfg: BridgeTrackerConfig =
            serde_json::from_str(r#"{"trackers": {"tail": true, "waist": true}}"#).unwrap();
        assert_eq!(cfg.unknown_role_keys().collect::<Vec<_>>(), vec!["tail"]);

        let value = serde_json::to_value(&cfg).unwrap();
        assert_eq!(value["trackers"]["tail"], true);
    }

    #[test]
    fn test_bridge_mut_initializes_defaults() {
        let mut server = ServerConfig::default();
        assert!(server.bridge("steamvr").is_none());

        server.bridge_mut("steamvr").set_role_enabled(TrackerRole::Waist, true);
        server.bridge_mut("owotrack");

        assert_eq!(server.bridges.len(), 2);
        assert!(server.bridge("steamvr").unwrap().role_enabled(TrackerRole::Waist, false));
        assert!(server.bridge("owotrack").unwrap().trackers().is_empty());

        assert!(server.remove_bridge("owotrack").is_some());
        assert!(server.bridge("owotrack").is_none());
    }
}
