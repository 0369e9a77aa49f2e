//! Typed read-only views over the flat cycle and nectar-priority keys.
//!
//! The profile stores cycles and priorities as individual keys.  The macro
//! side wants them as structured plans; these helpers do that projection and
//! fill absent keys with their empty meaning (`none`, `false`, `0`).

use crate::domain::catalog::{Catalogs, NONE};
use crate::domain::snapshot::SettingsSnapshot;
use crate::keyspace::{
    cycle_slot_key, priority_min_key, priority_nectar_key, CycleSlot, SettingKey, SlotPart,
    SLOTS_PER_CYCLE,
};

/// One planter slot of a manual cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPlan {
    pub at: CycleSlot,
    pub planter: String,
    pub field: String,
    pub gather: bool,
    pub glitter: bool,
}

impl SlotPlan {
    /// A slot is skipped unless both its planter and field are set.
    pub fn is_active(&self) -> bool {
        self.planter != NONE && self.field != NONE
    }
}

/// One rank of the auto-planter nectar priority list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NectarPriority {
    pub rank: usize,
    pub nectar: String,
    pub minimum_percent: i64,
}

fn text_or_none(snapshot: &SettingsSnapshot, key: &SettingKey) -> String {
    snapshot
        .get(key)
        .and_then(|value| value.as_text())
        .filter(|text| !text.is_empty())
        .unwrap_or(NONE)
        .to_string()
}

/// The three slots of `cycle` (1-based).  Returns `None` for an invalid cycle.
pub fn cycle_plan(
    snapshot: &SettingsSnapshot,
    cycle: u8,
) -> Option<[SlotPlan; SLOTS_PER_CYCLE as usize]> {
    let slots: Vec<SlotPlan> = (1..=SLOTS_PER_CYCLE)
        .map(|slot| {
            let at = CycleSlot::new(cycle, slot)?;
            Some(SlotPlan {
                at,
                planter: text_or_none(snapshot, &cycle_slot_key(at, SlotPart::Planter)),
                field: text_or_none(snapshot, &cycle_slot_key(at, SlotPart::Field)),
                gather: snapshot.is_truthy(&cycle_slot_key(at, SlotPart::Gather)),
                glitter: snapshot.is_truthy(&cycle_slot_key(at, SlotPart::Glitter)),
            })
        })
        .collect::<Option<_>>()?;
    slots.try_into().ok()
}

/// The nectar priority list in rank order, one entry per priority slot.
pub fn nectar_priorities(
    snapshot: &SettingsSnapshot,
    catalogs: &Catalogs,
) -> Vec<NectarPriority> {
    (0..catalogs.priority_slots())
        .map(|rank| NectarPriority {
            rank,
            nectar: text_or_none(snapshot, &priority_nectar_key(rank)),
            minimum_percent: snapshot
                .get(&priority_min_key(rank))
                .and_then(|value| value.as_int())
                .unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value::SettingValue;

    #[test]
    fn test_empty_snapshot_yields_inactive_slots() {
        let plan: [SlotPlan; 3] = cycle_plan(&SettingsSnapshot::new(), 1).expect("valid cycle");
        let slots: Vec<u8> = plan.iter().map(|slot| slot.at.slot()).collect();
        assert_eq!(slots, vec![1, 2, 3]);
        assert!(plan.iter().all(|slot| !slot.is_active()));
        assert!(plan.iter().all(|slot| !slot.gather && !slot.glitter));
    }

    #[test]
    fn test_cycle_plan_reads_slot_keys() {
        let at = CycleSlot::new(3, 2).unwrap();
        let mut snapshot = SettingsSnapshot::new();
        snapshot.insert(cycle_slot_key(at, SlotPart::Planter), "petal".into());
        snapshot.insert(cycle_slot_key(at, SlotPart::Field), "rose".into());
        snapshot.insert(cycle_slot_key(at, SlotPart::Glitter), SettingValue::Bool(true));

        let plan = cycle_plan(&snapshot, 3).unwrap();

        assert!(!plan[0].is_active());
        assert!(plan[1].is_active());
        assert_eq!(plan[1].planter, "petal");
        assert_eq!(plan[1].field, "rose");
        assert!(plan[1].glitter);
        assert!(!plan[1].gather);
    }

    #[test]
    fn test_invalid_cycle_returns_none() {
        assert!(cycle_plan(&SettingsSnapshot::new(), 0).is_none());
        assert!(cycle_plan(&SettingsSnapshot::new(), 6).is_none());
    }

    #[test]
    fn test_nectar_priorities_fill_gaps_and_parse_text_minimums() {
        let mut snapshot = SettingsSnapshot::new();
        snapshot.insert(priority_nectar_key(0), "satisfying".into());
        snapshot.insert(priority_min_key(0), "75".into());
        snapshot.insert(priority_min_key(1), SettingValue::Int(60));

        let priorities = nectar_priorities(&snapshot, &Catalogs::standard());

        assert_eq!(priorities.len(), 5);
        assert_eq!(priorities[0].nectar, "satisfying");
        assert_eq!(priorities[0].minimum_percent, 75);
        assert_eq!(priorities[1].nectar, NONE);
        assert_eq!(priorities[1].minimum_percent, 60);
        assert_eq!(priorities[4].minimum_percent, 0);
    }
}
