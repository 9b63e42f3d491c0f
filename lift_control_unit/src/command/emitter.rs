//! Per-tick command decision.
//!
//! `plan_tick` is a pure function of (homing state, target, sensor reading)
//! producing exactly one hardware command plus the next controller state.
//! It performs no I/O; the controller applies the plan to the hardware.
//!
//! ## Algorithm
//!
//! 1. Limit reading → homing transition (may request a zero reset).
//! 2. Not homed → creep down, target cleared.
//! 3. Homed with target → motion profile toward target with feedforward.
//! 4. Homed without target → hold-brake.

use lift_common::lift::command::HardwareCommand;
use lift_common::lift::homing::HomingState;
use lift_common::lift::position::Position;

use super::homing::{HomingUpdate, limit_transition};
use crate::control::feedforward::Feedforward;

/// Sensor state sampled at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    /// Bottom limit closed.
    pub at_limit: bool,
    /// Encoder reading (meaningless until homed).
    pub measured: Position,
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickPlan {
    /// Homing state after this tick.
    pub homing: HomingState,
    /// Target after this tick.
    pub target: Option<Position>,
    /// Homing transition observed this tick.
    pub update: HomingUpdate,
    /// The single command to issue.
    pub command: HardwareCommand,
}

/// Decide the next controller state and hardware command.
///
/// `creep_power` is the magnitude of the downward homing power.
pub fn plan_tick(
    homing: HomingState,
    target: Option<Position>,
    reading: SensorReading,
    creep_power: f64,
    feedforward: &dyn Feedforward,
) -> TickPlan {
    let (next, update) = limit_transition(homing, reading.at_limit);

    // A fresh reference invalidates anything computed against the old one.
    let target = if next.is_homed() && !update.zero_reference() {
        target
    } else {
        None
    };

    let command = match (next, target) {
        (HomingState::Unhomed | HomingState::Homing, _) => HardwareCommand::Power(-creep_power.abs()),
        (HomingState::Homed, Some(t)) => HardwareCommand::ProfilePosition {
            target: t,
            feedforward: feedforward.compute(reading.measured),
        },
        (HomingState::Homed, None) => HardwareCommand::HoldBrake,
    };

    TickPlan {
        homing: next,
        target,
        update,
        command,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
