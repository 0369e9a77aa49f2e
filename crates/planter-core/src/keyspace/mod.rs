//! Setting key synthesis.
//!
//! Every persisted planter setting is a flat `key = value` pair.  The keys are
//! derived from a small, closed set of templates, one per kind of setting:
//!
//! ```text
//! cycle{c}_{s}_planter            cycle c (1..=5), slot s (1..=3)
//! cycle{c}_{s}_field | _gather | _glitter
//! auto_priority_{i}_nectar        priority rank i (0-based)
//! auto_priority_{i}_min
//! auto_planter_{planter}          planter enabled for auto mode
//! auto_planter_{planter}_field_{field}
//! auto_field_{field}              field globally allowed
//! auto_planters_gather
//! planters_mode
//! auto_preset
//! ```
//!
//! # Why typed builders? (for beginners)
//!
//! Building keys with `format!` at every call site makes it easy to swap two
//! arguments or misspell a template, and the mistake only shows up as a setting
//! that silently never loads.  [`KeyTemplate`] names each template as an enum
//! variant with exactly the arguments it needs, so the compiler checks arity,
//! and [`CycleSlot`] makes an out-of-range cycle or slot index unrepresentable.
//!
//! # Injectivity
//!
//! Distinct templates never produce the same key: every template has a unique
//! literal prefix or suffix, cycle and slot indices are single digits, and
//! catalog identifiers may not contain [`PLANTER_FIELD_SEPARATOR`] (enforced by
//! [`crate::domain::catalog::EntityCatalog::new`]).  The synthesizer itself does
//! not validate identifiers against a catalog.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Catalogs;

/// Number of planter cycles.
pub const CYCLE_COUNT: u8 = 5;

/// Number of parallel planter slots in each cycle.
pub const SLOTS_PER_CYCLE: u8 = 3;

/// Separator between the planter and field identifiers in planter-field keys.
pub const PLANTER_FIELD_SEPARATOR: &str = "_field_";

/// Prefix shared by the per-planter enabled flag and the planter-field flags.
pub const PLANTER_PREFIX: &str = "auto_planter_";

/// A flat, unique setting key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingKey(String);

impl SettingKey {
    /// Wraps a raw key, e.g. one received from the UI layer.
    ///
    /// Prefer [`KeyTemplate::synthesize`] for keys built inside the crate.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` for keys whose value feeds the per-planter summaries.
    pub fn is_planter_key(&self) -> bool {
        self.0.starts_with(PLANTER_PREFIX)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SettingKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SettingKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// A validated (cycle, slot) coordinate, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CycleSlot {
    cycle: u8,
    slot: u8,
}

impl CycleSlot {
    /// Returns `None` unless `1 <= cycle <= 5` and `1 <= slot <= 3`.
    pub fn new(cycle: u8, slot: u8) -> Option<Self> {
        let cycle_ok = (1..=CYCLE_COUNT).contains(&cycle);
        let slot_ok = (1..=SLOTS_PER_CYCLE).contains(&slot);
        (cycle_ok && slot_ok).then_some(Self { cycle, slot })
    }

    pub fn cycle(self) -> u8 {
        self.cycle
    }

    pub fn slot(self) -> u8 {
        self.slot
    }

    /// All 15 coordinates, cycle-major.
    pub fn all() -> impl Iterator<Item = CycleSlot> {
        (1..=CYCLE_COUNT)
            .flat_map(|cycle| (1..=SLOTS_PER_CYCLE).map(move |slot| CycleSlot { cycle, slot }))
    }
}

/// The four settings stored for every cycle slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotPart {
    Planter,
    Field,
    Gather,
    Glitter,
}

impl SlotPart {
    pub const ALL: [SlotPart; 4] = [Self::Planter, Self::Field, Self::Gather, Self::Glitter];

    fn suffix(self) -> &'static str {
        match self {
            Self::Planter => "planter",
            Self::Field => "field",
            Self::Gather => "gather",
            Self::Glitter => "glitter",
        }
    }
}

/// One key template together with its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTemplate<'a> {
    CycleSlot { at: CycleSlot, part: SlotPart },
    PriorityNectar { rank: usize },
    PriorityMin { rank: usize },
    PlanterEnabled { planter: &'a str },
    PlanterField { planter: &'a str, field: &'a str },
    FieldAllowed { field: &'a str },
    AutoGather,
    PlanterMode,
    SelectedPreset,
}

impl KeyTemplate<'_> {
    /// Renders the template into its flat key.
    pub fn synthesize(&self) -> SettingKey {
        let raw = match *self {
            Self::CycleSlot { at, part } => {
                format!("cycle{}_{}_{}", at.cycle, at.slot, part.suffix())
            }
            Self::PriorityNectar { rank } => format!("auto_priority_{rank}_nectar"),
            Self::PriorityMin { rank } => format!("auto_priority_{rank}_min"),
            Self::PlanterEnabled { planter } => format!("{PLANTER_PREFIX}{planter}"),
            Self::PlanterField { planter, field } => {
                format!("{PLANTER_PREFIX}{planter}{PLANTER_FIELD_SEPARATOR}{field}")
            }
            Self::FieldAllowed { field } => format!("auto_field_{field}"),
            Self::AutoGather => "auto_planters_gather".to_string(),
            Self::PlanterMode => "planters_mode".to_string(),
            Self::SelectedPreset => "auto_preset".to_string(),
        };
        SettingKey(raw)
    }
}

// ── Builders ──────────────────────────────────────────────────────────────────

pub fn cycle_slot_key(at: CycleSlot, part: SlotPart) -> SettingKey {
    KeyTemplate::CycleSlot { at, part }.synthesize()
}

pub fn priority_nectar_key(rank: usize) -> SettingKey {
    KeyTemplate::PriorityNectar { rank }.synthesize()
}

pub fn priority_min_key(rank: usize) -> SettingKey {
    KeyTemplate::PriorityMin { rank }.synthesize()
}

pub fn planter_enabled_key(planter: &str) -> SettingKey {
    KeyTemplate::PlanterEnabled { planter }.synthesize()
}

pub fn planter_field_key(planter: &str, field: &str) -> SettingKey {
    KeyTemplate::PlanterField { planter, field }.synthesize()
}

pub fn field_allowed_key(field: &str) -> SettingKey {
    KeyTemplate::FieldAllowed { field }.synthesize()
}

pub fn auto_gather_key() -> SettingKey {
    KeyTemplate::AutoGather.synthesize()
}

pub fn planter_mode_key() -> SettingKey {
    KeyTemplate::PlanterMode.synthesize()
}

pub fn selected_preset_key() -> SettingKey {
    KeyTemplate::SelectedPreset.synthesize()
}

/// Every key implied by `catalogs`, sentinels excluded.
///
/// Used by tests and benchmarks to reason about the whole key space at once.
pub fn full_key_space(catalogs: &Catalogs) -> Vec<SettingKey> {
    let mut keys = Vec::new();

    for at in CycleSlot::all() {
        for part in SlotPart::ALL {
            keys.push(cycle_slot_key(at, part));
        }
    }
    for rank in 0..catalogs.priority_slots() {
        keys.push(priority_nectar_key(rank));
        keys.push(priority_min_key(rank));
    }
    for planter in catalogs.planters.active() {
        keys.push(planter_enabled_key(planter));
        for field in catalogs.fields.active() {
            keys.push(planter_field_key(planter, field));
        }
    }
    for field in catalogs.fields.active() {
        keys.push(field_allowed_key(field));
    }
    keys.push(auto_gather_key());
    keys.push(planter_mode_key());
    keys.push(selected_preset_key());

    keys
}
