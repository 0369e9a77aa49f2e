//! Domain entities for planter profiles.
//!
//! This module contains pure business rules with no infrastructure
//! dependencies: no file system, no async runtime, no UI.
//!
//! # What lives here? (for beginners)
//!
//! - **`catalog`** – the known planters, fields and nectars, each list headed
//!   by the `none` sentinel.
//! - **`value`** / **`snapshot`** – the scalar values a setting can hold and the
//!   sparse `key → value` copy of a profile that the rest of the code works on.
//! - **`preset`** – named bundles of settings applied in one go.
//! - **`mode`** – the off / manual / auto switch.
//! - **`schedule`** – typed views of the manual cycles and the nectar priority
//!   list, read out of the flat keys.
//!
//! Code in outer layers depends on the domain, but the domain never depends on
//! them.  That keeps every rule here testable in isolation.

pub mod catalog;
pub mod mode;
pub mod preset;
pub mod schedule;
pub mod snapshot;
pub mod value;
