//! Fills missing planter-field defaults into a loaded profile and persists them.
//!
//! The pure computation lives in [`planter_core::apply_defaults`]; this use
//! case only issues one background write per filled key.  The returned
//! snapshot already contains every default, so the session behaves correctly
//! even if some of the writes later fail.

use planter_core::{apply_defaults, Catalogs, DefaultFill, SettingsSnapshot};
use tracing::info;

use super::persist::{Persister, WriteBatch};

/// Applies defaults to `snapshot` and starts persisting each filled key.
pub fn fill_defaults(
    snapshot: SettingsSnapshot,
    catalogs: &Catalogs,
    persister: &Persister,
) -> (SettingsSnapshot, WriteBatch) {
    let DefaultFill { snapshot, writes } = apply_defaults(snapshot, catalogs);
    if !writes.is_empty() {
        info!(count = writes.len(), "persisting planter-field defaults");
    }
    let batch = persister.save_all(writes);
    (snapshot, batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use planter_core::keyspace::planter_field_key;
    use planter_core::SettingValue;

    use crate::infrastructure::storage::memory::InMemoryStore;

    #[tokio::test]
    async fn test_second_fill_issues_no_writes() {
        // Arrange
        let catalogs = Catalogs::standard();
        let store = Arc::new(InMemoryStore::new());
        let persister = Persister::new(store.clone());

        // Act
        let (first, batch) = fill_defaults(SettingsSnapshot::new(), &catalogs, &persister);
        let first_report = batch.settle().await;
        let (second, second_batch) = fill_defaults(first.clone(), &catalogs, &persister);

        // Assert
        assert_eq!(first_report.attempted(), 14 * 17);
        assert!(second_batch.is_empty());
        assert_eq!(first, second);
        assert_eq!(store.write_count(), 14 * 17);
    }

    #[tokio::test]
    async fn test_explicit_false_survives_and_is_not_rewritten() {
        // Arrange
        let catalogs = Catalogs::standard();
        let key = planter_field_key("paper", "rose");
        let snapshot: SettingsSnapshot =
            [(key.clone(), SettingValue::Bool(false))].into_iter().collect();
        let store = Arc::new(InMemoryStore::new());
        let persister = Persister::new(store.clone());

        // Act
        let (filled, batch) = fill_defaults(snapshot, &catalogs, &persister);
        batch.settle().await;

        // Assert
        assert_eq!(filled.get(&key), Some(&SettingValue::Bool(false)));
        assert!(store.writes().iter().all(|(written, _)| written != &key));
    }

    #[tokio::test]
    async fn test_failed_default_write_still_fills_snapshot() {
        // Arrange
        let catalogs = Catalogs::standard();
        let key = planter_field_key("blue_clay", "pepper");
        let store = Arc::new(InMemoryStore::new());
        store.fail_key(key.clone());
        let persister = Persister::new(store.clone());

        // Act
        let (filled, batch) = fill_defaults(SettingsSnapshot::new(), &catalogs, &persister);
        let report = batch.settle().await;

        // Assert
        assert_eq!(filled.get(&key), Some(&SettingValue::Bool(true)));
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.written.len(), 14 * 17 - 1);
    }
}
