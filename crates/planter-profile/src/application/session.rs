//! `ProfileSession`: one open planter profile and everything the view shows of it.
//!
//! # Lifecycle (for beginners)
//!
//! 1. [`ProfileSession::load`] reads the whole profile once, fills the
//!    planter-field defaults, hydrates the view, computes the per-planter
//!    summaries and shows the section of the persisted mode.
//! 2. Each user interaction then calls exactly one mutating method.  The
//!    in-memory snapshot is updated first and the write is started in the
//!    background, so the next interaction never waits for the disk.
//! 3. The next activation calls `load` again and starts over from the store.
//!
//! The session never fails because of the view: every view call may report
//! that its target is not ready, and that is simply skipped.

use std::sync::Arc;
use std::time::{Duration, Instant};

use planter_core::keyspace::{auto_gather_key, selected_preset_key};
use planter_core::{
    recompute_summaries, Catalogs, PlanterMode, PlanterSummary, PresetBook, SettingKey,
    SettingValue, SettingsSnapshot,
};
use tracing::{debug, info, warn};

use super::apply_preset::apply_preset;
use super::fill_defaults::fill_defaults;
use super::persist::{PendingWrite, Persister, WriteBatch};
use super::ports::{AutoPlanterStore, SettingsStore, StoreError};
use super::reset_planters::{reset_planters, ResetDebouncer, ResetOutcome, ResetTarget};
use super::select_mode::select_mode;
use super::view::{tolerate, ViewSink};

pub struct ProfileSession {
    catalogs: Arc<Catalogs>,
    presets: PresetBook,
    persister: Persister,
    auto_store: Arc<dyn AutoPlanterStore>,
    snapshot: SettingsSnapshot,
    summaries: Vec<PlanterSummary>,
    mode: PlanterMode,
    auto_gather: bool,
    manual_reset: ResetDebouncer,
    auto_reset: ResetDebouncer,
}

impl ProfileSession {
    pub fn new(
        catalogs: Arc<Catalogs>,
        presets: PresetBook,
        settings: Arc<dyn SettingsStore>,
        auto_store: Arc<dyn AutoPlanterStore>,
        reset_debounce: Duration,
    ) -> Self {
        Self {
            catalogs,
            presets,
            persister: Persister::new(settings),
            auto_store,
            snapshot: SettingsSnapshot::new(),
            summaries: Vec::new(),
            mode: PlanterMode::default(),
            auto_gather: false,
            manual_reset: ResetDebouncer::new(reset_debounce),
            auto_reset: ResetDebouncer::new(reset_debounce),
        }
    }

    // ── Read access ───────────────────────────────────────────────────────────

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn presets(&self) -> &PresetBook {
        &self.presets
    }

    pub fn snapshot(&self) -> &SettingsSnapshot {
        &self.snapshot
    }

    pub fn summaries(&self) -> &[PlanterSummary] {
        &self.summaries
    }

    pub fn mode(&self) -> PlanterMode {
        self.mode
    }

    pub fn auto_gather(&self) -> bool {
        self.auto_gather
    }

    // ── Load ──────────────────────────────────────────────────────────────────

    /// Loads the profile and brings `view` up to date.
    ///
    /// Returns the background writes of the filled defaults.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the profile cannot be read.  The session
    /// keeps its previous state in that case; nothing is written.
    pub async fn load(&mut self, view: &dyn ViewSink) -> Result<WriteBatch, StoreError> {
        let loaded = self.persister.store().load_all().await?;
        let (snapshot, batch) = fill_defaults(loaded, &self.catalogs, &self.persister);
        self.snapshot = snapshot;

        match self.auto_store.load_auto_planters().await {
            Ok(data) => {
                if let Some(gather) = data.gather {
                    self.auto_gather = gather;
                }
            }
            Err(e) => debug!("no auto-planter data, keeping gather = {}: {e}", self.auto_gather),
        }

        // The gather flag is shown with the other inputs but never stored in the profile.
        let mut inputs = self.snapshot.clone();
        inputs.insert(auto_gather_key(), SettingValue::Bool(self.auto_gather));
        tolerate("load_inputs", view.load_inputs(&inputs));

        self.refresh_summaries(view);

        self.mode = PlanterMode::from_snapshot(&self.snapshot);
        tolerate("show_section", view.show_section(self.mode));

        info!(
            entries = self.snapshot.len(),
            defaults = batch.len(),
            mode = %self.mode,
            "planter profile loaded"
        );
        Ok(batch)
    }

    // ── Mutations ─────────────────────────────────────────────────────────────

    /// Records one edited setting.
    ///
    /// Summaries are recomputed and re-shown when the key belongs to a planter.
    pub fn set_setting(
        &mut self,
        key: SettingKey,
        value: SettingValue,
        view: &dyn ViewSink,
    ) -> PendingWrite {
        let recompute = key.is_planter_key();
        self.snapshot.insert(key.clone(), value.clone());
        let write = self.persister.save(key, value);
        if recompute {
            self.refresh_summaries(view);
        }
        write
    }

    /// Records the chosen preset name and applies its bundle if it exists.
    pub fn select_preset(&mut self, name: &str, view: &dyn ViewSink) -> WriteBatch {
        let choice = SettingValue::Text(name.to_string());
        self.snapshot.insert(selected_preset_key(), choice.clone());
        let mut batch = WriteBatch::from(self.persister.save(selected_preset_key(), choice));

        let snapshot = std::mem::take(&mut self.snapshot);
        let application = apply_preset(&self.presets, name, snapshot, &self.persister);
        self.snapshot = application.snapshot;
        batch.append(application.batch);

        if application.applied {
            if let Some(preset) = self.presets.get(name) {
                let bundle: SettingsSnapshot = preset.entries().iter().cloned().collect();
                tolerate("load_inputs", view.load_inputs(&bundle));
            }
            self.refresh_summaries(view);
        }
        batch
    }

    /// Switches the live section.
    pub fn set_mode(&mut self, mode: PlanterMode, view: &dyn ViewSink) -> PendingWrite {
        let write = select_mode(mode, &mut self.snapshot, &self.persister);
        self.mode = mode;
        tolerate("show_section", view.show_section(mode));
        write
    }

    /// Sets the auto-planter gather flag.
    ///
    /// The session keeps the new value even if the store rejects it.
    ///
    /// # Errors
    ///
    /// Returns the store's error so callers can report it.
    pub async fn set_auto_gather(&mut self, gather: bool) -> Result<(), StoreError> {
        self.auto_gather = gather;
        self.auto_store.set_gather(gather).await.map_err(|e| {
            warn!("failed to persist auto-planter gather flag: {e}");
            e
        })
    }

    /// Clears manually placed planters, ignoring repeat presses.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the reset fails.
    pub async fn clear_manual_planters(
        &mut self,
        now: Instant,
    ) -> Result<ResetOutcome, StoreError> {
        let store = self.auto_store.as_ref();
        reset_planters(ResetTarget::Manual, &mut self.manual_reset, store, now).await
    }

    /// Clears the auto-planter tracker, ignoring repeat presses.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the reset fails.
    pub async fn clear_auto_planters(&mut self, now: Instant) -> Result<ResetOutcome, StoreError> {
        let store = self.auto_store.as_ref();
        reset_planters(ResetTarget::Auto, &mut self.auto_reset, store, now).await
    }

    /// Debounce window shared by both reset buttons.
    pub fn reset_debounce(&self) -> Duration {
        self.manual_reset.window()
    }

    /// Changes the reset debounce window.  Presses already accepted still count.
    pub fn set_reset_debounce(&mut self, window: Duration) {
        self.manual_reset.set_window(window);
        self.auto_reset.set_window(window);
    }

    fn refresh_summaries(&mut self, view: &dyn ViewSink) {
        self.summaries = recompute_summaries(&self.snapshot, &self.catalogs);
        tolerate("show_summaries", view.show_summaries(&self.summaries));
    }
}
