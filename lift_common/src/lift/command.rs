//! Hardware command emitted once per control cycle.

use serde::{Deserialize, Serialize};

use crate::hal::driver::{HalError, MotorDriver};

use super::position::Position;

/// The single hardware command issued by one control tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HardwareCommand {
    /// Closed-loop motion profile toward `target`.
    ProfilePosition {
        /// Clamped target position.
        target: Position,
        /// Open-loop compensation added by the drive.
        feedforward: f64,
    },
    /// Open-loop power in `[-1, 1]` (negative = down).
    Power(f64),
    /// Neutral, zero-velocity hold.
    HoldBrake,
}

impl HardwareCommand {
    /// Whether this is a closed-loop profile command.
    #[inline]
    pub const fn is_profile(&self) -> bool {
        matches!(self, Self::ProfilePosition { .. })
    }

    /// Forward the command to a driver.
    pub fn apply<D: MotorDriver + ?Sized>(&self, driver: &mut D) -> Result<(), HalError> {
        match *self {
            Self::ProfilePosition {
                target,
                feedforward,
            } => driver.command_profile_position(target, feedforward),
            Self::Power(power) => driver.command_power(power),
            Self::HoldBrake => driver.hold_brake(),
        }
    }
}
