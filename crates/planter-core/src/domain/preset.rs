//! Auto-planter presets: named literal bundles of settings.
//!
//! A preset covers the nectar priority list and the globally allowed fields.
//! Applying one overwrites exactly those keys and leaves the rest of the
//! profile alone.  Bundles never contain the same key twice, so the order in
//! which their entries are written does not matter.

use crate::domain::value::SettingValue;
use crate::keyspace::{field_allowed_key, priority_min_key, priority_nectar_key, SettingKey};

/// Minimum nectar percentages shared by all built-in presets, by rank.
const PRIORITY_MINIMUMS: [i64; 5] = [70, 80, 80, 80, 40];

/// Fields every built-in preset disallows.
const ALWAYS_DISALLOWED: &[&str] = &["mushroom", "stump", "mountain_top", "coconut"];

/// Fields whose allowance differs between the built-in presets.
const HIVE_DEPENDENT: &[&str] = &["bamboo", "pumpkin"];

/// Fields every built-in preset allows.
const ALWAYS_ALLOWED: &[&str] = &[
    "sunflower",
    "dandelion",
    "blue_flower",
    "clover",
    "strawberry",
    "spider",
    "pineapple",
    "cactus",
    "pine_tree",
    "rose",
    "pepper",
];

/// A named, immutable bundle of settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    name: String,
    entries: Vec<(SettingKey, SettingValue)>,
}

impl Preset {
    pub fn new(name: impl Into<String>, entries: Vec<(SettingKey, SettingValue)>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[(SettingKey, SettingValue)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lookup table of presets by name.
#[derive(Debug, Clone, Default)]
pub struct PresetBook {
    presets: Vec<Preset>,
}

impl PresetBook {
    pub fn new(presets: Vec<Preset>) -> Self {
        Self { presets }
    }

    /// The blue, red and white hive presets.
    pub fn builtin() -> Self {
        Self::new(vec![
            hive_preset(
                "blue",
                ["comforting", "motivating", "satisfying", "refreshing", "invigorating"],
                &[],
            ),
            hive_preset(
                "red",
                ["invigorating", "refreshing", "motivating", "satisfying", "comforting"],
                &["bamboo", "pumpkin"],
            ),
            hive_preset(
                "white",
                ["satisfying", "motivating", "refreshing", "comforting", "invigorating"],
                &["bamboo"],
            ),
        ])
    }

    /// Looks up a preset; unknown names (including "custom") yield `None`.
    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|preset| preset.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(Preset::name)
    }
}

fn hive_preset(name: &str, nectar_order: [&str; 5], extra_allowed: &[&str]) -> Preset {
    let mut entries = Vec::with_capacity(10 + ALWAYS_ALLOWED.len() + ALWAYS_DISALLOWED.len() + 2);

    for (rank, nectar) in nectar_order.iter().enumerate() {
        entries.push((priority_nectar_key(rank), SettingValue::from(*nectar)));
    }
    for (rank, minimum) in PRIORITY_MINIMUMS.iter().enumerate() {
        entries.push((priority_min_key(rank), SettingValue::Int(*minimum)));
    }
    for field in ALWAYS_ALLOWED {
        entries.push((field_allowed_key(field), SettingValue::Bool(true)));
    }
    for field in ALWAYS_DISALLOWED {
        entries.push((field_allowed_key(field), SettingValue::Bool(false)));
    }
    for field in HIVE_DEPENDENT {
        let allowed = extra_allowed.contains(field);
        entries.push((field_allowed_key(field), SettingValue::Bool(allowed)));
    }

    Preset::new(name, entries)
}
