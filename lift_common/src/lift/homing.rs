//! Homing state for the lift.
//!
//! Tracks whether the absolute position reference is trustworthy.
//! "Zeroed but still seeking the limit" has no representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Homing state of the lift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomingState {
    /// Power-on state: reference never established.
    #[default]
    Unhomed,
    /// Re-home requested: creeping toward the bottom limit.
    Homing,
    /// Zero reference confirmed by the bottom limit.
    Homed,
}

impl HomingState {
    /// Whether the zero reference is trustworthy.
    #[inline]
    pub const fn is_homed(self) -> bool {
        matches!(self, Self::Homed)
    }
}

impl fmt::Display for HomingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unhomed => "unhomed",
            Self::Homing => "homing",
            Self::Homed => "homed",
        })
    }
}
