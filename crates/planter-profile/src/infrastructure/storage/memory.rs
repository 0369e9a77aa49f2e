//! In-memory stores for testing.
//!
//! Allow tests to seed a profile, inject failures for individual keys and
//! inspect every write, without touching the file system.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use planter_core::{Catalogs, SettingKey, SettingValue, SettingsSnapshot};

use crate::application::ports::{AutoPlanterData, AutoPlanterStore, SettingsStore, StoreError};

/// A [`SettingsStore`] that keeps the profile in memory.
#[derive(Default)]
pub struct InMemoryStore {
    settings: Mutex<SettingsSnapshot>,
    writes: Mutex<Vec<(SettingKey, SettingValue)>>,
    failing_keys: Mutex<HashSet<SettingKey>>,
    fail_load: Mutex<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose profile already holds `snapshot`.
    pub fn with_snapshot(snapshot: SettingsSnapshot) -> Self {
        Self {
            settings: Mutex::new(snapshot),
            ..Self::default()
        }
    }

    /// Makes every future write of `key` fail.
    pub fn fail_key(&self, key: SettingKey) {
        self.failing_keys.lock().expect("lock poisoned").insert(key);
    }

    /// Makes every future `load_all` fail.
    pub fn fail_loads(&self) {
        *self.fail_load.lock().expect("lock poisoned") = true;
    }

    /// Current stored value of `key`.
    pub fn value(&self, key: &SettingKey) -> Option<SettingValue> {
        self.settings.lock().expect("lock poisoned").get(key).cloned()
    }

    /// Copy of the stored profile.
    pub fn snapshot(&self) -> SettingsSnapshot {
        self.settings.lock().expect("lock poisoned").clone()
    }

    /// Every successful write, in completion order.
    pub fn writes(&self) -> Vec<(SettingKey, SettingValue)> {
        self.writes.lock().expect("lock poisoned").clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.lock().expect("lock poisoned").len()
    }
}

#[async_trait]
impl SettingsStore for InMemoryStore {
    async fn load_all(&self) -> Result<SettingsSnapshot, StoreError> {
        if *self.fail_load.lock().expect("lock poisoned") {
            return Err(StoreError::Io {
                path: "memory".into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "injected load failure"),
            });
        }
        Ok(self.snapshot())
    }

    async fn save_setting(&self, key: &SettingKey, value: &SettingValue) -> Result<(), StoreError> {
        if self.failing_keys.lock().expect("lock poisoned").contains(key) {
            return Err(StoreError::Rejected {
                key: key.clone(),
                reason: "injected failure".to_string(),
            });
        }
        self.settings
            .lock()
            .expect("lock poisoned")
            .insert(key.clone(), value.clone());
        self.writes
            .lock()
            .expect("lock poisoned")
            .push((key.clone(), value.clone()));
        Ok(())
    }
}

/// An [`AutoPlanterStore`] that keeps the auto-planter document in memory.
pub struct InMemoryAutoPlanterStore {
    catalogs: Catalogs,
    data: Mutex<Option<AutoPlanterData>>,
    manual_clears: Mutex<u32>,
    auto_clears: Mutex<u32>,
    failing: Mutex<bool>,
}

impl InMemoryAutoPlanterStore {
    /// A store with no document yet; loading fails like a missing file would.
    pub fn new() -> Self {
        Self {
            catalogs: Catalogs::standard(),
            data: Mutex::new(None),
            manual_clears: Mutex::new(0),
            auto_clears: Mutex::new(0),
            failing: Mutex::new(false),
        }
    }

    pub fn with_data(data: AutoPlanterData) -> Self {
        let store = Self::new();
        *store.data.lock().expect("lock poisoned") = Some(data);
        store
    }

    /// Makes every future call fail.
    pub fn fail_all(&self) {
        *self.failing.lock().expect("lock poisoned") = true;
    }

    pub fn data(&self) -> Option<AutoPlanterData> {
        self.data.lock().expect("lock poisoned").clone()
    }

    pub fn manual_clears(&self) -> u32 {
        *self.manual_clears.lock().expect("lock poisoned")
    }

    pub fn auto_clears(&self) -> u32 {
        *self.auto_clears.lock().expect("lock poisoned")
    }

    fn check(&self) -> Result<(), StoreError> {
        if *self.failing.lock().expect("lock poisoned") {
            return Err(StoreError::Io {
                path: "memory".into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "injected failure"),
            });
        }
        Ok(())
    }
}

impl Default for InMemoryAutoPlanterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AutoPlanterStore for InMemoryAutoPlanterStore {
    async fn load_auto_planters(&self) -> Result<AutoPlanterData, StoreError> {
        self.check()?;
        self.data
            .lock()
            .expect("lock poisoned")
            .clone()
            .ok_or_else(|| StoreError::Io {
                path: "memory".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no document"),
            })
    }

    async fn set_gather(&self, gather: bool) -> Result<(), StoreError> {
        self.check()?;
        let mut data = self.data.lock().expect("lock poisoned");
        data.get_or_insert_with(|| AutoPlanterData::cleared(&self.catalogs, None))
            .gather = Some(gather);
        Ok(())
    }

    async fn clear_manual_planters(&self) -> Result<(), StoreError> {
        self.check()?;
        *self.manual_clears.lock().expect("lock poisoned") += 1;
        Ok(())
    }

    async fn clear_auto_planters(&self) -> Result<(), StoreError> {
        self.check()?;
        let mut data = self.data.lock().expect("lock poisoned");
        let gather = data.as_ref().and_then(|d| d.gather);
        *data = Some(AutoPlanterData::cleared(&self.catalogs, gather));
        *self.auto_clears.lock().expect("lock poisoned") += 1;
        Ok(())
    }
}
