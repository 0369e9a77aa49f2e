//! Planter mode: which planter section (off, manual, auto) is live.
//!
//! The three states are fully connected; any state can be entered from any
//! other directly.  Switching modes never touches the settings of the other
//! sections, it only changes which one is presented and considered live.

use thiserror::Error;

use crate::domain::snapshot::SettingsSnapshot;
use crate::keyspace::planter_mode_key;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid planter mode level {0}; expected 0 (off), 1 (manual) or 2 (auto)")]
pub struct InvalidModeLevel(pub i64);

/// The three planter modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlanterMode {
    #[default]
    Off,
    Manual,
    Auto,
}

impl PlanterMode {
    pub const ALL: [PlanterMode; 3] = [Self::Off, Self::Manual, Self::Auto];

    /// The persisted numeric level.
    pub fn level(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Manual => 1,
            Self::Auto => 2,
        }
    }

    /// Name of the view section shown for this mode.
    pub fn section(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Manual => "manual",
            Self::Auto => "auto",
        }
    }

    /// Reads the mode recorded in `snapshot`.
    ///
    /// A missing or unrecognised value means [`PlanterMode::Off`].  Text levels
    /// (`"2"`) are accepted since sliders may store their value as a string.
    pub fn from_snapshot(snapshot: &SettingsSnapshot) -> Self {
        snapshot
            .get(&planter_mode_key())
            .and_then(|value| value.as_int())
            .and_then(|level| Self::try_from(level).ok())
            .unwrap_or_default()
    }
}

impl TryFrom<i64> for PlanterMode {
    type Error = InvalidModeLevel;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Self::Off),
            1 => Ok(Self::Manual),
            2 => Ok(Self::Auto),
            other => Err(InvalidModeLevel(other)),
        }
    }
}

impl std::fmt::Display for PlanterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.section())
    }
}
