//! Switches the live planter section (off, manual, auto).
//!
//! The only persisted effect is the mode level itself.  Settings of the other
//! sections are left exactly as they are.

use planter_core::keyspace::planter_mode_key;
use planter_core::{PlanterMode, SettingValue, SettingsSnapshot};
use tracing::info;

use super::persist::{Persister, PendingWrite};

/// Records `mode` in `snapshot` and starts persisting it.
pub fn select_mode(
    mode: PlanterMode,
    snapshot: &mut SettingsSnapshot,
    persister: &Persister,
) -> PendingWrite {
    let value = SettingValue::Int(i64::from(mode.level()));
    snapshot.insert(planter_mode_key(), value.clone());
    info!(%mode, "planter mode selected");
    persister.save(planter_mode_key(), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use planter_core::keyspace::planter_field_key;

    use crate::infrastructure::storage::memory::InMemoryStore;

    #[tokio::test]
    async fn test_every_transition_is_direct() {
        // Arrange
        let store = Arc::new(InMemoryStore::new());
        let persister = Persister::new(store.clone());
        let mut snapshot = SettingsSnapshot::new();

        for from in PlanterMode::ALL {
            for to in PlanterMode::ALL {
                // Act
                select_mode(from, &mut snapshot, &persister).outcome().await.unwrap();
                select_mode(to, &mut snapshot, &persister).outcome().await.unwrap();

                // Assert
                assert_eq!(PlanterMode::from_snapshot(&snapshot), to);
                assert_eq!(PlanterMode::from_snapshot(&store.snapshot()), to);
            }
        }
    }

    #[tokio::test]
    async fn test_mode_change_leaves_other_settings_alone() {
        // Arrange
        let store = Arc::new(InMemoryStore::new());
        let persister = Persister::new(store.clone());
        let key = planter_field_key("paper", "rose");
        let mut snapshot: SettingsSnapshot =
            [(key.clone(), SettingValue::Bool(false))].into_iter().collect();

        // Act
        select_mode(PlanterMode::Manual, &mut snapshot, &persister)
            .outcome()
            .await
            .unwrap();

        // Assert
        assert_eq!(snapshot.get(&key), Some(&SettingValue::Bool(false)));
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.writes()[0], (planter_mode_key(), SettingValue::Int(1)));
    }
}
