//! Tolerant deserialization for per-role boolean maps.
//!
//! One bad entry in a `trackers` table must never stop the whole file from
//! loading. Each value is coerced on its own: booleans pass through, the
//! strings `"true"`/`"false"` are accepted, and everything else (null,
//! numbers, other strings, arrays, tables) becomes `false` with a warning.
//!
//! Keys are lower-cased on the way in so case variants written by hand
//! collapse onto the canonical key. A `trackers` value that is not a map
//! (null, a number, a string, an array) reads as an empty map.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

/// `deserialize_with` hook for `BTreeMap<String, bool>` fields.
pub fn deserialize_bool_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(BoolMapVisitor)
}

struct BoolMapVisitor;

impl<'de> Visitor<'de> for BoolMapVisitor {
    type Value = BTreeMap<String, bool>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of role names to booleans")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = BTreeMap::new();

        while let Some((raw_key, value)) = access.next_entry::<String, LenientBool>()? {
            let key = raw_key.to_ascii_lowercase();
            let value = match value.0 {
                Some(v) => v,
                None => {
                    tracing::warn!(key = %raw_key, "Malformed tracker entry, treating as disabled");
                    false
                }
            };

            if map.insert(key.clone(), value).is_some() {
                tracing::warn!(key = %key, "Duplicate tracker entry after case folding, last value wins");
            }
        }

        Ok(map)
    }

    // A null `trackers` value is one more malformed entry; start empty.
    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        tracing::warn!("Tracker map is null, treating as empty");
        Ok(BTreeMap::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        self.visit_unit()
    }

    // Any other shape is not a map at all; drop it rather than the whole file.
    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(not_a_map("boolean"))
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> Result<Self::Value, E> {
        Ok(not_a_map("integer"))
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> Result<Self::Value, E> {
        Ok(not_a_map("integer"))
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
        Ok(not_a_map("float"))
    }

    fn visit_str<E: de::Error>(self, _v: &str) -> Result<Self::Value, E> {
        Ok(not_a_map("string"))
    }

    fn visit_bytes<E: de::Error>(self, _v: &[u8]) -> Result<Self::Value, E> {
        Ok(not_a_map("bytes"))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(not_a_map("array"))
    }
}

fn not_a_map(found: &str) -> BTreeMap<String, bool> {
    tracing::warn!(found, "Tracker map is not a map, treating as empty");
    BTreeMap::new()
}

/// A boolean that records `None` instead of failing when the input is not one.
struct LenientBool(Option<bool>);

impl<'de> Deserialize<'de> for LenientBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LenientBoolVisitor).map(LenientBool)
    }
}

struct LenientBoolVisitor;

impl<'de> Visitor<'de> for LenientBoolVisitor {
    type Value = Option<bool>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let v = v.trim();
        if v.eq_ignore_ascii_case("true") {
            Ok(Some(true))
        } else if v.eq_ignore_ascii_case("false") {
            Ok(Some(false))
        } else {
            Ok(None)
        }
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_bytes<E: de::Error>(self, _v: &[u8]) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "deserialize_bool_map")]
        trackers: BTreeMap<String, bool>,
    }

    fn from_json(text: &str) -> BTreeMap<String, bool> {
        serde_json::from_str::<Holder>(text).unwrap().trackers
    }

    #[test]
    fn test_booleans_pass_through() {
        let map = from_json(r#"{"trackers": {"waist": true, "chest": false}}"#);
        assert_eq!(map.get("waist"), Some(&true));
        assert_eq!(map.get("chest"), Some(&false));
    }

    #[test]
    fn test_malformed_values_become_false() {
        let map = from_json(
            r#"{"trackers": {"a": null, "b": 1, "c": "yes", "d": [true], "e": {"x": true}, "f": 0.5}}"#,
        );
        assert_eq!(map.len(), 6);
        assert!(map.values().all(|v| !v));
    }

    #[test]
    fn test_boolean_strings_accepted() {
        let map = from_json(r#"{"trackers": {"waist": "TRUE", "chest": "false"}}"#);
        assert_eq!(map.get("waist"), Some(&true));
        assert_eq!(map.get("chest"), Some(&false));
    }

    #[test]
    fn test_keys_are_case_folded() {
        let map = from_json(r#"{"trackers": {"LEFT_FOOT": true}}"#);
        assert_eq!(map.get("left_foot"), Some(&true));
        assert!(!map.contains_key("LEFT_FOOT"));
    }

    #[test]
    fn test_null_map_is_empty() {
        let map = from_json(r#"{"trackers": null}"#);
        assert!(map.is_empty());
    }

    #[test]
    fn test_non_map_values_are_empty() {
        for text in [
            r#"{"trackers": 5}"#,
            r#"{"trackers": -2}"#,
            r#"{"trackers": 1.5}"#,
            r#"{"trackers": true}"#,
            r#"{"trackers": "waist"}"#,
            r#"{"trackers": [true, {"waist": true}]}"#,
        ] {
            assert!(from_json(text).is_empty(), "{}", text);
        }
    }

    #[test]
    fn test_toml_non_table_trackers() {
        let holder: Holder = toml::from_str("trackers = 5").unwrap();
        assert!(holder.trackers.is_empty());

        let holder: Holder = toml::from_str(r#"trackers = ["waist"]"#).unwrap();
        assert!(holder.trackers.is_empty());
    }

    #[test]
    fn test_toml_malformed_entry() {
        let holder: Holder = toml::from_str(
            r#"
            [trackers]
            waist = true
            head = 3
            neck = "maybe"
            "#,
        )
        .unwrap();
        assert_eq!(holder.trackers.get("waist"), Some(&true));
        assert_eq!(holder.trackers.get("head"), Some(&false));
        assert_eq!(holder.trackers.get("neck"), Some(&false));
    }
}
