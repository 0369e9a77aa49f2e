//! JSON-file implementation of [`SettingsStore`].
//!
//! Each profile is one flat JSON object stored at
//! `<data_dir>/profiles/<profile>/planters.json`:
//!
//! ```json
//! {
//!   "auto_field_rose": true,
//!   "auto_planter_paper_field_rose": false,
//!   "auto_priority_0_min": 70,
//!   "cycle1_1_planter": "paper",
//!   "planters_mode": 2
//! }
//! ```
//!
//! Keys are written in sorted order so diffs of the file stay readable.
//!
//! # Concurrent writes
//!
//! Every `save_setting` is a read-modify-write of the whole document, and the
//! persister fires writes for different keys concurrently.  An async mutex
//! serializes those read-modify-write cycles so no write is lost.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use planter_core::{SettingKey, SettingValue, SettingsSnapshot};
use tokio::sync::Mutex;
use tracing::debug;

use super::json_file::{read_json, write_json};
use crate::application::ports::{SettingsStore, StoreError};

/// File name of a profile's planter settings document.
pub const PROFILE_FILE: &str = "planters.json";

/// A profile stored as a JSON document on disk.
pub struct JsonProfileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store for the profile named `profile` under `data_dir`.
    pub fn for_profile(data_dir: &Path, profile: &str) -> Self {
        Self::new(data_dir.join("profiles").join(profile).join(PROFILE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<SettingsSnapshot, StoreError> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }
}

#[async_trait]
impl SettingsStore for JsonProfileStore {
    async fn load_all(&self) -> Result<SettingsSnapshot, StoreError> {
        let snapshot = self.read_document().await?;
        debug!(path = %self.path.display(), entries = snapshot.len(), "profile loaded");
        Ok(snapshot)
    }

    async fn save_setting(&self, key: &SettingKey, value: &SettingValue) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        document.insert(key.clone(), value.clone());
        write_json(&self.path, &document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use uuid::Uuid;

    fn scratch_store() -> (PathBuf, JsonProfileStore) {
        let dir = std::env::temp_dir().join(format!("planter_profile_test_{}", Uuid::new_v4()));
        let store = JsonProfileStore::for_profile(&dir, "a");
        (dir, store)
    }

    #[test]
    fn test_profile_path_layout() {
        let store = JsonProfileStore::for_profile(Path::new("/data"), "main");
        assert_eq!(
            store.path(),
            Path::new("/data/profiles/main/planters.json")
        );
    }

    #[tokio::test]
    async fn test_missing_profile_loads_empty() {
        let (_dir, store) = scratch_store();
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_saved_settings_are_reloaded() {
        // Arrange
        let (dir, store) = scratch_store();

        // Act
        store
            .save_setting(&SettingKey::new("auto_priority_0_min"), &SettingValue::Int(70))
            .await
            .unwrap();
        store
            .save_setting(&SettingKey::new("auto_field_rose"), &SettingValue::Bool(false))
            .await
            .unwrap();
        let reloaded = JsonProfileStore::new(store.path()).load_all().await.unwrap();

        // Assert
        assert_eq!(reloaded.len(), 2);
        assert_eq!(
            reloaded.get(&SettingKey::new("auto_field_rose")),
            Some(&SettingValue::Bool(false))
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_concurrent_writes_to_different_keys_are_all_kept() {
        // Arrange
        let (dir, store) = scratch_store();
        let store = Arc::new(store);

        // Act
        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .save_setting(&SettingKey::new(format!("k{i}")), &SettingValue::Int(i))
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // Assert
        assert_eq!(store.load_all().await.unwrap().len(), 20);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_malformed_profile_fails_load_and_write() {
        let (dir, store) = scratch_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "[1, 2").unwrap();

        assert!(matches!(store.load_all().await, Err(StoreError::Parse { .. })));
        let write = store
            .save_setting(&SettingKey::new("planters_mode"), &SettingValue::Int(1))
            .await;
        assert!(write.is_err());
        // The malformed document is left for the user to inspect.
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "[1, 2");

        std::fs::remove_dir_all(&dir).ok();
    }
}
