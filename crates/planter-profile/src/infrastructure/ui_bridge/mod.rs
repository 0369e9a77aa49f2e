//! Command bridge: exposes the profile session to a UI frontend.
//!
//! Every command takes the shared [`AppState`], runs one session operation and
//! returns a [`CommandResult`] the frontend can read without a try/catch:
//! `{ success: bool, data: T | null, error: string | null }`.
//!
//! # Background writes (for beginners)
//!
//! Commands never wait for the disk.  The session updates its in-memory
//! profile, queues the write for the background writer and the command returns
//! straight away.  Failed writes are logged with `warn!` by the persister.
//!
//! # Data Transfer Objects
//!
//! DTOs (`PlanterSummaryDto`, `PlantersViewDto`, `PlantersConfigDto`) contain
//! only JSON-friendly fields.  Setting values travel as plain JSON scalars (`true`, `70`,
//! `"paper"`).

pub mod view;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use planter_core::keyspace::auto_gather_key;
use planter_core::{
    Catalogs, InvalidModeLevel, PlanterMode, PlanterSummary, PresetBook, SettingKey, SettingValue,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::application::ports::{AutoPlanterStore, SettingsStore, StoreError};
use crate::application::reset_planters::ResetOutcome;
use crate::application::session::ProfileSession;
use crate::application::view::ViewSink;
use crate::infrastructure::storage::auto_planters::JsonAutoPlanterStore;
use crate::infrastructure::storage::config::{data_dir, save_config_to, AppConfig, ConfigError};
use crate::infrastructure::storage::profile_store::JsonProfileStore;
use view::HeadlessView;

/// Errors surfaced to the frontend as `CommandResult::err`.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("invalid setting key `{0}`")]
    InvalidKey(String),

    #[error(transparent)]
    InvalidMode(#[from] InvalidModeLevel),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ── Shared application state ──────────────────────────────────────────────────

/// State shared by all commands.
///
/// The session is behind an async Tokio mutex because commands run in an
/// async context and some session operations await the store.  `config` is
/// the file at `config_path`; config commands update both together.
pub struct AppState {
    pub session: Mutex<ProfileSession>,
    pub config: Mutex<AppConfig>,
    pub config_path: PathBuf,
    pub view: Arc<dyn ViewSink>,
}

impl AppState {
    /// Builds the state from `config`, backed by the JSON stores in its data directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPlatformConfigDir`] when no data directory is
    /// configured and the platform config directory is unknown.
    pub fn from_config(config: AppConfig, config_path: PathBuf) -> Result<Arc<Self>, ConfigError> {
        let dir = data_dir(&config)?;
        let catalogs = Arc::new(Catalogs::standard());
        let settings: Arc<dyn SettingsStore> =
            Arc::new(JsonProfileStore::for_profile(&dir, &config.profile.name));
        let auto: Arc<dyn AutoPlanterStore> =
            Arc::new(JsonAutoPlanterStore::new(&dir, Arc::clone(&catalogs)));
        info!(data_dir = %dir.display(), profile = %config.profile.name, "using profile store");

        let session = ProfileSession::new(
            catalogs,
            PresetBook::builtin(),
            settings,
            auto,
            config.planters.reset_debounce(),
        );
        Ok(Self::with_parts(config, config_path, session, Arc::new(HeadlessView)))
    }

    pub fn with_parts(
        config: AppConfig,
        config_path: PathBuf,
        session: ProfileSession,
        view: Arc<dyn ViewSink>,
    ) -> Arc<Self> {
        Arc::new(Self {
            session: Mutex::new(session),
            config: Mutex::new(config),
            config_path,
            view,
        })
    }
}

// ── Data Transfer Objects ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanterSummaryDto {
    pub planter: String,
    pub allowed_count: usize,
    pub enabled: bool,
    /// Display text, e.g. `"Allowed fields: 12"`.
    pub label: String,
}

impl From<&PlanterSummary> for PlanterSummaryDto {
    fn from(s: &PlanterSummary) -> Self {
        Self {
            planter: s.planter.clone(),
            allowed_count: s.allowed_count,
            enabled: s.enabled,
            label: s.label(),
        }
    }
}

/// Everything the planters tab needs after a load or a bulk change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantersViewDto {
    pub settings: planter_core::SettingsSnapshot,
    pub summaries: Vec<PlanterSummaryDto>,
    pub mode: u8,
    pub section: String,
    pub auto_gather: bool,
    pub presets: Vec<String>,
}

impl From<&ProfileSession> for PlantersViewDto {
    fn from(session: &ProfileSession) -> Self {
        Self {
            settings: session.snapshot().clone(),
            summaries: summary_dtos(session.summaries()),
            mode: session.mode().level(),
            section: session.mode().section().to_string(),
            auto_gather: session.auto_gather(),
            presets: session.presets().names().map(str::to_string).collect(),
        }
    }
}

/// Editable part of the `[planters]` config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantersConfigDto {
    pub profile: String,
    pub reset_debounce_ms: u64,
}

impl From<&AppConfig> for PlantersConfigDto {
    fn from(config: &AppConfig) -> Self {
        Self {
            profile: config.profile.name.clone(),
            reset_debounce_ms: config.planters.reset_debounce_ms,
        }
    }
}

fn summary_dtos(summaries: &[PlanterSummary]) -> Vec<PlanterSummaryDto> {
    summaries.iter().map(PlanterSummaryDto::from).collect()
}

/// Unified response wrapper used by all commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

impl<T: Serialize> From<Result<T, BridgeError>> for CommandResult<T> {
    fn from(result: Result<T, BridgeError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// Accepts keys made of lowercase ASCII letters, digits and underscores.
pub fn parse_setting_key(raw: &str) -> Result<SettingKey, BridgeError> {
    let valid = !raw.is_empty()
        && raw
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
    if valid {
        Ok(SettingKey::new(raw))
    } else {
        Err(BridgeError::InvalidKey(raw.to_string()))
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Loads the active profile and returns the full planters view.
///
/// # Example (frontend)
/// ```ts
/// const view = await invoke<PlantersViewDto>('load_planters');
/// ```
pub async fn load_planters(state: Arc<AppState>) -> CommandResult<PlantersViewDto> {
    let mut session = state.session.lock().await;
    match session.load(state.view.as_ref()).await {
        // Default writes continue in the background.
        Ok(_batch) => CommandResult::ok(PlantersViewDto::from(&*session)),
        Err(e) => CommandResult::err(BridgeError::from(e).to_string()),
    }
}

/// Records one edited setting and returns the refreshed planter summaries.
///
/// The auto-planter gather flag lives in the auto-planter document, so its
/// key is forwarded there instead of into the profile.
pub async fn save_setting(
    state: Arc<AppState>,
    key: String,
    value: SettingValue,
) -> CommandResult<Vec<PlanterSummaryDto>> {
    let key = match parse_setting_key(&key) {
        Ok(key) => key,
        Err(e) => return CommandResult::err(e.to_string()),
    };
    let mut session = state.session.lock().await;
    if key == auto_gather_key() {
        if let Err(e) = session.set_auto_gather(value.is_truthy()).await {
            return CommandResult::err(BridgeError::from(e).to_string());
        }
    } else {
        let _write = session.set_setting(key, value, state.view.as_ref());
    }
    CommandResult::ok(summary_dtos(session.summaries()))
}

/// Selects a preset by name.  Unknown names only record the choice.
pub async fn change_preset(state: Arc<AppState>, name: String) -> CommandResult<PlantersViewDto> {
    let mut session = state.session.lock().await;
    let _batch = session.select_preset(&name, state.view.as_ref());
    CommandResult::ok(PlantersViewDto::from(&*session))
}

/// Switches the planter mode (`0` off, `1` manual, `2` auto).  Returns the section name.
pub async fn change_planter_mode(state: Arc<AppState>, level: i64) -> CommandResult<String> {
    let mode = match PlanterMode::try_from(level) {
        Ok(mode) => mode,
        Err(e) => return CommandResult::err(BridgeError::from(e).to_string()),
    };
    let mut session = state.session.lock().await;
    let _write = session.set_mode(mode, state.view.as_ref());
    CommandResult::ok(mode.section().to_string())
}

pub async fn toggle_auto_planters_gather(
    state: Arc<AppState>,
    gather: bool,
) -> CommandResult<bool> {
    let mut session = state.session.lock().await;
    session
        .set_auto_gather(gather)
        .await
        .map(|()| gather)
        .map_err(BridgeError::from)
        .into()
}

/// Clears manual planter data.  Returns `false` when ignored as a repeat press.
pub async fn clear_manual_planters(state: Arc<AppState>) -> CommandResult<bool> {
    let mut session = state.session.lock().await;
    session
        .clear_manual_planters(Instant::now())
        .await
        .map(|outcome| outcome == ResetOutcome::Cleared)
        .map_err(BridgeError::from)
        .into()
}

/// Clears auto planter data.  Returns `false` when ignored as a repeat press.
pub async fn clear_auto_planters(state: Arc<AppState>) -> CommandResult<bool> {
    let mut session = state.session.lock().await;
    session
        .clear_auto_planters(Instant::now())
        .await
        .map(|outcome| outcome == ResetOutcome::Cleared)
        .map_err(BridgeError::from)
        .into()
}

/// Returns the active profile name and the reset debounce window.
pub async fn get_planters_config(state: Arc<AppState>) -> CommandResult<PlantersConfigDto> {
    let config = state.config.lock().await;
    CommandResult::ok(PlantersConfigDto::from(&*config))
}

/// Persists a new reset debounce window and applies it to the session.
///
/// The session is only changed once the config file has been written.
pub async fn update_reset_debounce(
    state: Arc<AppState>,
    reset_debounce_ms: u64,
) -> CommandResult<PlantersConfigDto> {
    let mut config = state.config.lock().await;
    let mut updated = config.clone();
    updated.planters.reset_debounce_ms = reset_debounce_ms;

    if let Err(e) = save_config_to(&state.config_path, &updated) {
        return CommandResult::err(BridgeError::from(e).to_string());
    }
    state
        .session
        .lock()
        .await
        .set_reset_debounce(updated.planters.reset_debounce());
    info!(reset_debounce_ms, "reset debounce updated");

    *config = updated;
    CommandResult::ok(PlantersConfigDto::from(&*config))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
