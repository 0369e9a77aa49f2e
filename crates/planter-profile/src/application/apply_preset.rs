//! Applies a named preset over the current profile.
//!
//! Every entry of the bundle is written to the snapshot and persisted with its
//! own write.  A failing write neither stops the remaining entries nor rolls
//! anything back: the profile converges on the preset as far as the store
//! allows.  Unknown names (including the "custom" choice) change nothing.

use planter_core::{PresetBook, SettingsSnapshot};
use tracing::{debug, info};

use super::persist::{Persister, WriteBatch};

/// Outcome of [`apply_preset`].
#[derive(Debug)]
pub struct PresetApplication {
    /// The profile with the bundle merged in.
    pub snapshot: SettingsSnapshot,
    /// One pending write per bundle entry; empty when nothing was applied.
    pub batch: WriteBatch,
    /// Whether `name` matched a preset.
    pub applied: bool,
}

pub fn apply_preset(
    presets: &PresetBook,
    name: &str,
    mut snapshot: SettingsSnapshot,
    persister: &Persister,
) -> PresetApplication {
    let Some(preset) = presets.get(name) else {
        debug!(preset = name, "no preset with this name, profile left as is");
        return PresetApplication {
            snapshot,
            batch: WriteBatch::new(),
            applied: false,
        };
    };

    for (key, value) in preset.entries() {
        snapshot.insert(key.clone(), value.clone());
    }
    let batch = persister.save_all(preset.entries().iter().cloned());
    info!(preset = name, entries = preset.len(), "preset applied");

    PresetApplication {
        snapshot,
        batch,
        applied: true,
    }
}
