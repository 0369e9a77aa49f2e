//! The view port: how the session pushes state to whatever renders it.
//!
//! The session may run before its views exist (a tab not yet opened, a window
//! still being built).  Every view call therefore returns a `Result`, and the
//! session treats a failure as "nothing to update": it is logged at `debug!`
//! and otherwise ignored.

use planter_core::{PlanterMode, PlanterSummary, SettingsSnapshot};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewError {
    /// The target widget or section does not exist yet.
    #[error("view target `{0}` is not ready")]
    NotReady(String),

    #[error("view update failed: {0}")]
    Failed(String),
}

/// Receives state updates from a [`ProfileSession`](super::session::ProfileSession).
#[cfg_attr(test, mockall::automock)]
pub trait ViewSink: Send + Sync {
    /// Hydrates input widgets from a flat `key → value` mapping.
    fn load_inputs(&self, values: &SettingsSnapshot) -> Result<(), ViewError>;

    /// Shows the per-planter summaries (allowed field count, enabled highlight).
    fn show_summaries(&self, summaries: &[PlanterSummary]) -> Result<(), ViewError>;

    /// Shows the section belonging to `mode` and hides the other two.
    fn show_section(&self, mode: PlanterMode) -> Result<(), ViewError>;
}

/// Swallows a view failure after logging it.
pub(crate) fn tolerate(operation: &'static str, result: Result<(), ViewError>) {
    if let Err(e) = result {
        debug!(operation, "view update skipped: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_error_names_the_target() {
        let e = ViewError::NotReady("planter-summaries".to_string());
        assert!(e.to_string().contains("planter-summaries"));
    }

    #[test]
    fn test_tolerate_ignores_failures() {
        // Must neither panic nor propagate.
        tolerate("show_section", Err(ViewError::Failed("gone".to_string())));
        tolerate("show_section", Ok(()));
    }
}
