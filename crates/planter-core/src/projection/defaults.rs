//! Default filling for freshly loaded profiles.
//!
//! Only one family of keys gets an injected default: the planter × field
//! allowance matrix, which defaults to *allowed*.  Every other setting stays
//! absent and is shown as empty by the view.
//!
//! Keys already present in the snapshot are never touched, whatever their
//! value.  An explicit `false` is a user decision, not a gap.

use tracing::debug;

use crate::domain::catalog::Catalogs;
use crate::domain::snapshot::SettingsSnapshot;
use crate::domain::value::SettingValue;
use crate::keyspace::{planter_field_key, SettingKey};

/// Value assigned to a planter-field pair the profile has never recorded.
pub const PLANTER_FIELD_DEFAULT: bool = true;

/// Result of filling defaults into a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultFill {
    /// The snapshot with every default applied.
    pub snapshot: SettingsSnapshot,
    /// The keys that were missing, with their assigned default, in catalog order.
    /// Each must be persisted exactly once.
    pub writes: Vec<(SettingKey, SettingValue)>,
}

/// Lists the planter-field keys absent from `snapshot`, sentinels excluded.
pub fn missing_defaults(
    snapshot: &SettingsSnapshot,
    catalogs: &Catalogs,
) -> Vec<(SettingKey, SettingValue)> {
    let mut missing = Vec::new();
    for planter in catalogs.planters.active() {
        for field in catalogs.fields.active() {
            let key = planter_field_key(planter, field);
            if !snapshot.contains(&key) {
                missing.push((key, SettingValue::Bool(PLANTER_FIELD_DEFAULT)));
            }
        }
    }
    missing
}

/// Fills every missing planter-field key of `snapshot` with its default.
///
/// Running this again on its own output produces no further writes.
pub fn apply_defaults(mut snapshot: SettingsSnapshot, catalogs: &Catalogs) -> DefaultFill {
    let writes = missing_defaults(&snapshot, catalogs);
    for (key, value) in &writes {
        snapshot.insert(key.clone(), value.clone());
    }
    if !writes.is_empty() {
        debug!(count = writes.len(), "filled missing planter-field defaults");
    }
    DefaultFill { snapshot, writes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{EntityCatalog, EntityDomain, NONE};

    fn small_catalogs() -> Catalogs {
        Catalogs::new(
            EntityCatalog::new(EntityDomain::Planter, [NONE, "paper", "candy"]).unwrap(),
            EntityCatalog::new(EntityDomain::Field, [NONE, "rose", "clover", "cactus"]).unwrap(),
            EntityCatalog::new(EntityDomain::Nectar, [NONE, "comforting"]).unwrap(),
        )
    }

    #[test]
    fn test_empty_snapshot_gets_every_pair_defaulted() {
        let fill = apply_defaults(SettingsSnapshot::new(), &small_catalogs());

        assert_eq!(fill.writes.len(), 6);
        assert_eq!(fill.snapshot.len(), 6);
        assert!(fill
            .writes
            .iter()
            .all(|(_, value)| *value == SettingValue::Bool(true)));
    }

    #[test]
    fn test_sentinel_pairs_are_never_defaulted() {
        let fill = apply_defaults(SettingsSnapshot::new(), &small_catalogs());
        assert!(fill
            .writes
            .iter()
            .all(|(key, _)| !key.as_str().contains(NONE)));
    }

    #[test]
    fn test_explicit_false_survives_defaulting() {
        let mut snapshot = SettingsSnapshot::new();
        snapshot.insert(planter_field_key("paper", "rose"), SettingValue::Bool(false));

        let fill = apply_defaults(snapshot, &small_catalogs());

        assert_eq!(
            fill.snapshot.get(&planter_field_key("paper", "rose")),
            Some(&SettingValue::Bool(false))
        );
        assert_eq!(fill.writes.len(), 5);
        assert!(fill
            .writes
            .iter()
            .all(|(key, _)| *key != planter_field_key("paper", "rose")));
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let first = apply_defaults(SettingsSnapshot::new(), &small_catalogs());
        let second = apply_defaults(first.snapshot.clone(), &small_catalogs());

        assert!(second.writes.is_empty());
        assert_eq!(second.snapshot, first.snapshot);
    }

    #[test]
    fn test_unrelated_keys_are_left_absent() {
        let fill = apply_defaults(SettingsSnapshot::new(), &small_catalogs());
        assert!(fill.writes.iter().all(|(key, _)| key.is_planter_key()));
    }
}
