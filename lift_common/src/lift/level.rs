//! Preset levels.
//!
//! Named, compile-time setpoints ordered by physical height. Each level maps
//! to exactly one `Position`; the top level defines the upper travel limit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::position::Position;

/// Named preset level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Carriage resting on the bottom limit.
    Bottom,
    /// Lowest scoring level.
    L1,
    /// Second scoring level.
    L2,
    /// Ball pickup between L2 and L3.
    LowBall,
    /// Third scoring level.
    L3,
    /// Ball pickup between L3 and L4.
    HighBall,
    /// Top scoring level, also the upper travel limit.
    L4,
}

impl Level {
    /// All levels, ordered by height.
    pub const ALL: [Level; 7] = [
        Self::Bottom,
        Self::L1,
        Self::L2,
        Self::LowBall,
        Self::L3,
        Self::HighBall,
        Self::L4,
    ];

    /// Highest preset.
    pub const TOP: Level = Self::L4;

    /// Position this level maps to [sensor units].
    #[inline]
    pub const fn position(self) -> Position {
        Position::new(match self {
            Self::Bottom => 0.0,
            Self::L1 => 12.0,
            Self::L2 => 24.5,
            Self::LowBall => 30.0,
            Self::L3 => 40.0,
            Self::HighBall => 51.0,
            Self::L4 => 63.2,
        })
    }

    /// Lowest level strictly above `p`, if any.
    pub fn next_above(p: Position) -> Option<Level> {
        Self::ALL.into_iter().find(|l| l.position() > p)
    }

    /// Highest level strictly below `p`, if any.
    pub fn next_below(p: Position) -> Option<Level> {
        Self::ALL.into_iter().rev().find(|l| l.position() < p)
    }

    /// Lowercase name used by CLI and dashboard bindings.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::L1 => "l1",
            Self::L2 => "l2",
            Self::LowBall => "low_ball",
            Self::L3 => "l3",
            Self::HighBall => "high_ball",
            Self::L4 => "l4",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown level name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown level '{0}' (expected one of: bottom, l1, l2, low_ball, l3, high_ball, l4)")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|l| l.name() == lower)
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}
