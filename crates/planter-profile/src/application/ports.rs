//! Persistence ports used by the application layer.
//!
//! The use cases never touch files directly.  They talk to these traits, and
//! the infrastructure layer provides the implementations (JSON files on disk,
//! or in-memory doubles in tests).

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use planter_core::{Catalogs, SettingKey, SettingValue, SettingsSnapshot};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of planters the auto-planter tracker keeps placed at once.
pub const AUTO_PLANTER_SLOTS: usize = 3;

/// Error type for persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored document could not be parsed.
    #[error("malformed document at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A document could not be serialized for writing.
    #[error("failed to serialize document: {0}")]
    Serialize(String),

    /// The store refused to write a specific key.
    #[error("write rejected for {key}: {reason}")]
    Rejected { key: SettingKey, reason: String },

    /// The background task performing a write panicked or was cancelled.
    #[error("background write task failed: {0}")]
    TaskFailed(String),
}

/// The generic `key → value` profile store.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Returns the full current profile.  A profile never written is empty.
    async fn load_all(&self) -> Result<SettingsSnapshot, StoreError>;

    /// Persists one setting.  The sole write primitive.
    async fn save_setting(&self, key: &SettingKey, value: &SettingValue) -> Result<(), StoreError>;
}

/// One planter tracked by the auto-planter routine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlacedPlanter {
    #[serde(default)]
    pub planter: String,
    #[serde(default)]
    pub nectar: String,
    #[serde(default)]
    pub field: String,
    /// Unix timestamp at which the planter is ready, `0` when unset.
    #[serde(default)]
    pub harvest_time: f64,
    #[serde(default)]
    pub nectar_est_percent: f64,
}

/// State of the auto-planter routine, stored outside the generic key space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AutoPlanterData {
    #[serde(default)]
    pub planters: Vec<PlacedPlanter>,
    /// Last field each nectar was collected from.
    #[serde(default)]
    pub nectar_last_field: BTreeMap<String, String>,
    /// Whether the macro gathers in the field of a freshly placed planter.
    /// `None` when never set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gather: Option<bool>,
}

impl AutoPlanterData {
    /// The reset document: three empty slots and no remembered fields.
    pub fn cleared(catalogs: &Catalogs, gather: Option<bool>) -> Self {
        Self {
            planters: vec![PlacedPlanter::default(); AUTO_PLANTER_SLOTS],
            nectar_last_field: catalogs
                .nectars
                .active()
                .map(|nectar| (nectar.to_string(), String::new()))
                .collect(),
            gather,
        }
    }
}

/// Storage for the auto-planter document and the manual planter tracker.
#[async_trait]
pub trait AutoPlanterStore: Send + Sync {
    async fn load_auto_planters(&self) -> Result<AutoPlanterData, StoreError>;

    async fn set_gather(&self, gather: bool) -> Result<(), StoreError>;

    /// Forgets every manually placed planter.
    async fn clear_manual_planters(&self) -> Result<(), StoreError>;

    /// Resets the auto-planter document, keeping the gather flag.
    async fn clear_auto_planters(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleared_document_has_three_empty_slots() {
        let data = AutoPlanterData::cleared(&Catalogs::standard(), Some(true));

        assert_eq!(data.planters.len(), AUTO_PLANTER_SLOTS);
        assert!(data.planters.iter().all(|p| p.planter.is_empty() && p.harvest_time == 0.0));
        assert_eq!(data.nectar_last_field.len(), 5);
        assert_eq!(data.nectar_last_field.get("comforting"), Some(&String::new()));
        assert_eq!(data.gather, Some(true));
    }

    #[test]
    fn test_document_without_gather_deserializes_to_none() {
        let json = r#"{"planters": [], "nectar_last_field": {}}"#;
        let data: AutoPlanterData = serde_json::from_str(json).expect("deserialize");
        assert_eq!(data.gather, None);
    }

    #[test]
    fn test_unset_gather_is_omitted_when_serialized() {
        let data = AutoPlanterData::cleared(&Catalogs::standard(), None);
        let json = serde_json::to_string(&data).expect("serialize");
        assert!(!json.contains("gather"));
    }
}
