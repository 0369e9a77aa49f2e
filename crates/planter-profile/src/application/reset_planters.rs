//! Destructive planter resets with button-level debounce.
//!
//! Clearing manual or auto planter data is delegated entirely to the
//! [`AutoPlanterStore`].  The only logic kept here is the debounce: a second
//! press within the window of the last accepted one is ignored.
//!
//! Time is passed in explicitly so the debounce can be tested without sleeping.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::ports::{AutoPlanterStore, StoreError};

/// Default debounce window for the reset buttons.
pub const DEFAULT_RESET_DEBOUNCE: Duration = Duration::from_millis(700);

/// Ignores repeat triggers that arrive within `window` of the last accepted one.
#[derive(Debug, Clone)]
pub struct ResetDebouncer {
    window: Duration,
    last: Option<Instant>,
}

impl ResetDebouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn set_window(&mut self, window: Duration) {
        self.window = window;
    }

    /// Returns `true` and arms the window if the trigger is accepted.
    pub fn try_trigger(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last {
            if now.saturating_duration_since(last) < self.window {
                return false;
            }
        }
        self.last = Some(now);
        true
    }
}

impl Default for ResetDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_RESET_DEBOUNCE)
    }
}

/// Which planter data a reset clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetTarget {
    Manual,
    Auto,
}

/// What happened to a reset request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Cleared,
    /// Ignored as a repeat press.
    Debounced,
}

/// Forwards a reset to `store` unless `debouncer` rejects it.
///
/// # Errors
///
/// Returns the store's error if the reset itself fails.  The debounce window
/// is armed either way.
pub async fn reset_planters(
    target: ResetTarget,
    debouncer: &mut ResetDebouncer,
    store: &dyn AutoPlanterStore,
    now: Instant,
) -> Result<ResetOutcome, StoreError> {
    if !debouncer.try_trigger(now) {
        debug!(?target, "reset ignored, pressed again too soon");
        return Ok(ResetOutcome::Debounced);
    }
    match target {
        ResetTarget::Manual => store.clear_manual_planters().await?,
        ResetTarget::Auto => store.clear_auto_planters().await?,
    }
    info!(?target, "planter data reset");
    Ok(ResetOutcome::Cleared)
}
