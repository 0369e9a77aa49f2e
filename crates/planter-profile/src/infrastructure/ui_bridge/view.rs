//! [`ViewSink`] implementations that do not render anything.
//!
//! - [`HeadlessView`] logs what would be shown.  Used by the command-line
//!   binary, where there is no window to update.
//! - [`RecordingView`] keeps the last state pushed to it so tests can assert
//!   on what the user would see.

use std::sync::Mutex;

use planter_core::{PlanterMode, PlanterSummary, SettingsSnapshot};
use tracing::{debug, trace};

use crate::application::view::{ViewError, ViewSink};

/// A view that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessView;

impl ViewSink for HeadlessView {
    fn load_inputs(&self, values: &SettingsSnapshot) -> Result<(), ViewError> {
        debug!(inputs = values.len(), "inputs hydrated");
        Ok(())
    }

    fn show_summaries(&self, summaries: &[PlanterSummary]) -> Result<(), ViewError> {
        for summary in summaries {
            trace!(
                planter = %summary.planter,
                allowed = summary.allowed_count,
                enabled = summary.enabled,
                "planter summary"
            );
        }
        Ok(())
    }

    fn show_section(&self, mode: PlanterMode) -> Result<(), ViewError> {
        debug!(section = mode.section(), "planter section shown");
        Ok(())
    }
}

/// A view that remembers the last update of each kind.
#[derive(Debug, Default)]
pub struct RecordingView {
    inputs: Mutex<Vec<SettingsSnapshot>>,
    summaries: Mutex<Option<Vec<PlanterSummary>>>,
    section: Mutex<Option<PlanterMode>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every mapping passed to `load_inputs`, oldest first.
    pub fn hydrations(&self) -> Vec<SettingsSnapshot> {
        self.inputs.lock().expect("lock poisoned").clone()
    }

    pub fn last_summaries(&self) -> Option<Vec<PlanterSummary>> {
        self.summaries.lock().expect("lock poisoned").clone()
    }

    pub fn last_section(&self) -> Option<PlanterMode> {
        *self.section.lock().expect("lock poisoned")
    }
}

impl ViewSink for RecordingView {
    fn load_inputs(&self, values: &SettingsSnapshot) -> Result<(), ViewError> {
        self.inputs.lock().expect("lock poisoned").push(values.clone());
        Ok(())
    }

    fn show_summaries(&self, summaries: &[PlanterSummary]) -> Result<(), ViewError> {
        *self.summaries.lock().expect("lock poisoned") = Some(summaries.to_vec());
        Ok(())
    }

    fn show_section(&self, mode: PlanterMode) -> Result<(), ViewError> {
        *self.section.lock().expect("lock poisoned") = Some(mode);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_view_accepts_everything() {
        let view = HeadlessView;
        assert!(view.load_inputs(&SettingsSnapshot::new()).is_ok());
        assert!(view.show_summaries(&[]).is_ok());
        assert!(view.show_section(PlanterMode::Auto).is_ok());
    }

    #[test]
    fn test_recording_view_keeps_last_section() {
        let view = RecordingView::new();

        view.show_section(PlanterMode::Manual).unwrap();
        view.show_section(PlanterMode::Auto).unwrap();

        assert_eq!(view.last_section(), Some(PlanterMode::Auto));
        assert!(view.hydrations().is_empty());
    }
}
