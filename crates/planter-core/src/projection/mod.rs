//! Read-side projections over a settings snapshot.
//!
//! - **`defaults`** – computes the planter-field keys a loaded profile is
//!   missing and the default each one receives.
//! - **`summary`** – derives the per-planter "allowed fields" count and
//!   enabled state shown in the planter panels.
//!
//! Both are pure: they take a snapshot and catalogs and return new data.
//! Persisting the results is the application layer's job.

pub mod defaults;
pub mod summary;
