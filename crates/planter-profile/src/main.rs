//! planter-profile command-line entry point.
//!
//! ```text
//! planter-profile                  load the profile, fill defaults
//! planter-profile preset <name>    ... then apply a preset (blue, red, white)
//! planter-profile mode <0|1|2>     ... then switch to off, manual or auto
//! ```
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config_from()         -- config.toml, defaults on first run
//!  └─ AppState::from_config()    -- JSON stores in the data directory
//!  └─ ProfileSession::load()     -- defaults, summaries, section
//!  └─ optional preset / mode
//!  └─ settle all writes, log summaries
//! ```

use anyhow::{bail, Context};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use planter_core::keyspace::CYCLE_COUNT;
use planter_core::{cycle_plan, nectar_priorities, PlanterMode};
use planter_profile::application::persist::WriteBatch;
use planter_profile::infrastructure::storage::config::{config_file_path, load_config_from};
use planter_profile::infrastructure::ui_bridge::AppState;

enum Action {
    LoadOnly,
    Preset(String),
    Mode(PlanterMode),
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Action> {
    let action = match (args.next().as_deref(), args.next()) {
        (None, _) => Action::LoadOnly,
        (Some("preset"), Some(name)) => Action::Preset(name),
        (Some("mode"), Some(level)) => {
            let level: i64 = level
                .parse()
                .with_context(|| format!("mode level `{level}` is not a number"))?;
            Action::Mode(PlanterMode::try_from(level)?)
        }
        _ => bail!("usage: planter-profile [preset <name> | mode <0|1|2>]"),
    };
    Ok(action)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = config_file_path()?;
    let config = load_config_from(&config_path).context("failed to load configuration")?;

    // Initialise structured logging.  `RUST_LOG` overrides the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level)),
        )
        .init();

    let action = parse_args(std::env::args().skip(1))?;

    info!(profile = %config.profile.name, "planter profile starting");
    let state = AppState::from_config(config, config_path)?;
    let mut session = state.session.lock().await;
    let view = state.view.as_ref();

    let mut writes: WriteBatch = session.load(view).await.context("failed to load profile")?;
    match action {
        Action::LoadOnly => {}
        Action::Preset(name) => {
            if session.presets().get(&name).is_none() {
                warn!(preset = %name, "unknown preset, only the choice is recorded");
            }
            writes.append(session.select_preset(&name, view));
        }
        Action::Mode(mode) => writes.push(session.set_mode(mode, view)),
    }

    let report = writes.settle().await;
    for (key, error) in &report.failed {
        warn!(%key, "not persisted: {error}");
    }
    info!(written = report.written.len(), failed = report.failed.len(), "writes settled");

    for summary in session.summaries() {
        info!(
            planter = %summary.planter,
            enabled = summary.enabled,
            "{}",
            summary.label()
        );
    }
    info!(section = session.mode().section(), "active planter section");
    match session.mode() {
        PlanterMode::Off => {}
        PlanterMode::Manual => {
            for cycle in 1..=CYCLE_COUNT {
                let Some(slots) = cycle_plan(session.snapshot(), cycle) else {
                    continue;
                };
                for slot in slots.iter().filter(|slot| slot.is_active()) {
                    info!(
                        cycle,
                        slot = slot.at.slot(),
                        planter = %slot.planter,
                        field = %slot.field,
                        gather = slot.gather,
                        glitter = slot.glitter,
                        "manual cycle slot"
                    );
                }
            }
        }
        PlanterMode::Auto => {
            for priority in nectar_priorities(session.snapshot(), session.catalogs()) {
                info!(
                    rank = priority.rank,
                    nectar = %priority.nectar,
                    minimum = priority.minimum_percent,
                    "nectar priority"
                );
            }
        }
    }
    Ok(())
}
