//! Per-planter summaries derived from the snapshot.
//!
//! Each planter panel shows how many fields it may use and whether the planter
//! is enabled for auto mode.  Both are pure functions of the snapshot, so the
//! summaries can be recomputed after any mutation and always agree with the
//! stored keys.  The field matrix is counted whether or not the planter is
//! enabled; disabling a planter keeps its field choices intact.

use crate::domain::catalog::Catalogs;
use crate::domain::snapshot::SettingsSnapshot;
use crate::keyspace::{planter_enabled_key, planter_field_key};

/// Derived display state for one planter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanterSummary {
    pub planter: String,
    /// Non-sentinel fields whose planter-field key is truthy.
    pub allowed_count: usize,
    /// Truthiness of the planter's enabled flag; absent means disabled.
    pub enabled: bool,
}

impl PlanterSummary {
    pub fn label(&self) -> String {
        format!("Allowed fields: {}", self.allowed_count)
    }
}

/// Summaries for every non-sentinel planter, in catalog order.
pub fn recompute_summaries(
    snapshot: &SettingsSnapshot,
    catalogs: &Catalogs,
) -> Vec<PlanterSummary> {
    catalogs
        .planters
        .active()
        .map(|planter| PlanterSummary {
            planter: planter.to_string(),
            allowed_count: catalogs
                .fields
                .active()
                .filter(|field| snapshot.is_truthy(&planter_field_key(planter, field)))
                .count(),
            enabled: snapshot.is_truthy(&planter_enabled_key(planter)),
        })
        .collect()
}

/// Finds the summary for `planter`.
pub fn summary_for<'a>(
    summaries: &'a [PlanterSummary],
    planter: &str,
) -> Option<&'a PlanterSummary> {
    summaries.iter().find(|summary| summary.planter == planter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value::SettingValue;

    #[test]
    fn test_empty_snapshot_summarises_all_planters_as_zero_and_disabled() {
        let catalogs = Catalogs::standard();
        let summaries = recompute_summaries(&SettingsSnapshot::new(), &catalogs);

        assert_eq!(summaries.len(), catalogs.planters.active_len());
        assert!(summaries.iter().all(|s| s.allowed_count == 0 && !s.enabled));
    }

    #[test]
    fn test_counts_only_truthy_field_keys() {
        let catalogs = Catalogs::standard();
        let mut snapshot = SettingsSnapshot::new();
        for field in ["rose", "clover", "cactus"] {
            snapshot.insert(planter_field_key("plastic", field), SettingValue::Bool(true));
        }
        for field in ["pepper", "coconut"] {
            snapshot.insert(planter_field_key("plastic", field), SettingValue::Bool(false));
        }

        let summaries = recompute_summaries(&snapshot, &catalogs);
        let plastic = summary_for(&summaries, "plastic").expect("plastic summary");

        assert_eq!(plastic.allowed_count, 3);
        assert_eq!(plastic.label(), "Allowed fields: 3");
    }

    #[test]
    fn test_disabled_planter_keeps_its_field_count() {
        let catalogs = Catalogs::standard();
        let mut snapshot = SettingsSnapshot::new();
        snapshot.insert(planter_field_key("candy", "rose"), SettingValue::Bool(true));
        snapshot.insert(planter_enabled_key("candy"), SettingValue::Bool(false));

        let summaries = recompute_summaries(&snapshot, &catalogs);
        let candy = summary_for(&summaries, "candy").unwrap();

        assert!(!candy.enabled);
        assert_eq!(candy.allowed_count, 1);
    }

    #[test]
    fn test_enabled_flag_follows_truthiness() {
        let catalogs = Catalogs::standard();
        let mut snapshot = SettingsSnapshot::new();
        snapshot.insert(planter_enabled_key("petal"), SettingValue::Bool(true));
        snapshot.insert(planter_enabled_key("tacky"), SettingValue::Int(0));

        let summaries = recompute_summaries(&snapshot, &catalogs);

        assert!(summary_for(&summaries, "petal").unwrap().enabled);
        assert!(!summary_for(&summaries, "tacky").unwrap().enabled);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let catalogs = Catalogs::standard();
        let mut snapshot = SettingsSnapshot::new();
        snapshot.insert(planter_field_key("paper", "rose"), SettingValue::Bool(true));

        let first = recompute_summaries(&snapshot, &catalogs);
        let second = recompute_summaries(&snapshot, &catalogs);

        assert_eq!(first, second);
    }

    #[test]
    fn test_sentinel_planter_has_no_summary() {
        let summaries = recompute_summaries(&SettingsSnapshot::new(), &Catalogs::standard());
        assert!(summary_for(&summaries, "none").is_none());
    }
}
