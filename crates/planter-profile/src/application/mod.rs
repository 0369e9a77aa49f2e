//! Application layer use cases for planter profiles.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure rules in `planter_core`) and the infrastructure (files, UI).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain functions to fulfil a user goal (e.g., "apply the
//!   red hive preset to my profile").
//! - **Depend on abstractions** (the traits in [`ports`] and [`view`]) rather
//!   than concrete implementations, so storage and UI can be swapped.
//! - **Contain no file system access** and no rendering.
//!
//! # Sub-modules
//!
//! - **`ports`** – the store traits and the auto-planter document.
//! - **`persist`** – background, one-write-per-key persistence with an
//!   optional report of failed writes.
//! - **`fill_defaults`** – fills and persists missing planter-field defaults.
//! - **`apply_preset`** – best-effort merge of a named preset.
//! - **`select_mode`** – the off / manual / auto switch.
//! - **`reset_planters`** – debounced manual and auto planter resets.
//! - **`view`** – the port the session pushes display state through.
//! - **`session`** – ties all of the above to one open profile.

pub mod apply_preset;
pub mod fill_defaults;
pub mod persist;
pub mod ports;
pub mod reset_planters;
pub mod select_mode;
pub mod session;
pub mod view;
