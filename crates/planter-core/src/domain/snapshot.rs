//! The settings snapshot: a sparse `key → value` copy of one profile.
//!
//! Absence matters.  A key that is missing means "not decided yet", which is
//! different from an explicit `false`; the defaulting engine relies on that
//! distinction to fill gaps without overriding user choices.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value::SettingValue;
use crate::keyspace::SettingKey;

/// Sparse mapping of setting keys to values, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsSnapshot {
    entries: BTreeMap<SettingKey, SettingValue>,
}

impl SettingsSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &SettingKey) -> Option<&SettingValue> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &SettingKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Stores `value`, returning the previous value if the key was present.
    pub fn insert(&mut self, key: SettingKey, value: SettingValue) -> Option<SettingValue> {
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, key: &SettingKey) -> Option<SettingValue> {
        self.entries.remove(key)
    }

    /// Truthiness of `key`; an absent key is falsy.
    pub fn is_truthy(&self, key: &SettingKey) -> bool {
        self.get(key).is_some_and(SettingValue::is_truthy)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SettingKey, &SettingValue)> {
        self.entries.iter()
    }

    /// Copies every entry of `other` over this snapshot.
    pub fn overlay(&mut self, other: &SettingsSnapshot) {
        for (key, value) in other.iter() {
            self.entries.insert(key.clone(), value.clone());
        }
    }
}

impl FromIterator<(SettingKey, SettingValue)> for SettingsSnapshot {
    fn from_iter<I: IntoIterator<Item = (SettingKey, SettingValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SettingsSnapshot {
    type Item = (SettingKey, SettingValue);
    type IntoIter = std::collections::btree_map::IntoIter<SettingKey, SettingValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> SettingKey {
        SettingKey::new(raw)
    }

    #[test]
    fn test_absent_key_differs_from_explicit_false() {
        let mut snapshot = SettingsSnapshot::new();
        snapshot.insert(key("auto_planter_paper"), SettingValue::Bool(false));

        assert!(snapshot.contains(&key("auto_planter_paper")));
        assert!(!snapshot.is_truthy(&key("auto_planter_paper")));
        assert!(!snapshot.contains(&key("auto_planter_candy")));
        assert!(!snapshot.is_truthy(&key("auto_planter_candy")));
    }

    #[test]
    fn test_insert_returns_previous_value() {
        let mut snapshot = SettingsSnapshot::new();
        assert_eq!(snapshot.insert(key("planters_mode"), SettingValue::Int(1)), None);
        assert_eq!(
            snapshot.insert(key("planters_mode"), SettingValue::Int(2)),
            Some(SettingValue::Int(1))
        );
    }

    #[test]
    fn test_overlay_replaces_and_adds_entries() {
        let mut base: SettingsSnapshot = [
            (key("a"), SettingValue::Int(1)),
            (key("b"), SettingValue::Int(2)),
        ]
        .into_iter()
        .collect();
        let top: SettingsSnapshot = [
            (key("b"), SettingValue::Int(20)),
            (key("c"), SettingValue::Int(30)),
        ]
        .into_iter()
        .collect();

        base.overlay(&top);

        assert_eq!(base.len(), 3);
        assert_eq!(base.get(&key("b")), Some(&SettingValue::Int(20)));
        assert_eq!(base.get(&key("a")), Some(&SettingValue::Int(1)));
    }

    #[test]
    fn test_json_document_round_trips_as_flat_object() {
        let json =
            r#"{"auto_field_rose":true,"auto_priority_0_min":70,"cycle1_1_planter":"paper"}"#;
        let snapshot: SettingsSnapshot = serde_json::from_str(json).expect("deserialize");
        assert_eq!(snapshot.len(), 3);
        assert_eq!(serde_json::to_string(&snapshot).expect("serialize"), json);
    }
}
