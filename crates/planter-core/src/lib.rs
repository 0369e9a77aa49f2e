//! # planter-core
//!
//! Shared domain library for planter automation profiles: the entity
//! catalogs, the flat setting key space, default filling, derived summaries,
//! presets and the planter mode.
//!
//! It has zero dependencies on the file system, async runtimes or UI code.
//!
//! # Architecture overview (for beginners)
//!
//! A planter profile is a large, sparse set of named settings.  Most of the
//! names are generated: one per cycle slot, one per nectar priority rank, one
//! per planter, one per (planter, field) pair and one per field.  This crate
//! defines:
//!
//! - **`domain`** – the data: catalogs, values, the settings snapshot, presets,
//!   mode and typed schedule views.
//!
//! - **`keyspace`** – how setting keys are synthesized from entity identifiers
//!   and slot indices.  Every template is a typed builder so no two settings
//!   can end up on the same key.
//!
//! - **`projection`** – pure computations over a snapshot: which defaults are
//!   missing, and the per-planter summaries shown in the view.

pub mod domain;
pub mod keyspace;
pub mod projection;

// Re-export the most-used types at the crate root so callers can write
// `planter_core::SettingsSnapshot` instead of the full module path.
pub use domain::catalog::{CatalogError, Catalogs, EntityCatalog, EntityDomain, NONE};
pub use domain::mode::{InvalidModeLevel, PlanterMode};
pub use domain::preset::{Preset, PresetBook};
pub use domain::schedule::{cycle_plan, nectar_priorities, NectarPriority, SlotPlan};
pub use domain::snapshot::SettingsSnapshot;
pub use domain::value::SettingValue;
pub use keyspace::{CycleSlot, KeyTemplate, SettingKey, SlotPart};
pub use projection::defaults::{apply_defaults, DefaultFill};
pub use projection::summary::{recompute_summaries, summary_for, PlanterSummary};
