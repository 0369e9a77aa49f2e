//! Storage infrastructure: configuration and profile persistence.
//!
//! - **`config`** – the TOML configuration file in the platform config
//!   directory.
//! - **`json_file`** – shared read/write helpers for the JSON documents.
//! - **`profile_store`** – the generic `key → value` profile
//!   ([`SettingsStore`](crate::application::ports::SettingsStore)).
//! - **`auto_planters`** – the auto-planter document and the manual planter
//!   tracker ([`AutoPlanterStore`](crate::application::ports::AutoPlanterStore)).
//! - **`memory`** – in-memory doubles of both stores for tests.

pub mod auto_planters;
pub mod config;
pub mod json_file;
pub mod memory;
pub mod profile_store;
