//! Infrastructure layer for the planter profile tool.
//!
//! Contains the outward-facing adapters: file-system storage (config, profile
//! and auto-planter documents) and the UI command bridge.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `planter_core`, but MUST NOT be imported by the `application` or domain
//! layers.  The one exception is test code, which uses the in-memory stores.

pub mod storage;
pub mod ui_bridge;
