//! Dashboard telemetry snapshot.
//!
//! Built from the controller's pure reads. The measured position is
//! reported as the unknown-position sentinel until the lift is homed.

use lift_common::consts::UNKNOWN_POSITION_SENTINEL;
use lift_common::lift::command::HardwareCommand;
use lift_common::lift::homing::HomingState;
use serde::Serialize;
use tracing::info;

/// Point-in-time view of the lift for dashboard consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TelemetrySnapshot {
    /// Cycles executed so far.
    pub cycle: u64,
    /// Homing state.
    pub homing: HomingState,
    /// Measured position, or the sentinel while not homed.
    pub measured: f64,
    /// Active target, if any.
    pub target: Option<f64>,
    /// Carriage height [m], when homed.
    pub height_m: Option<f64>,
    /// Bottom limit closed.
    pub at_limit: bool,
    /// Last command issued to the drive.
    pub command: Option<HardwareCommand>,
}

impl TelemetrySnapshot {
    /// Whether the measured value is the unknown sentinel.
    pub fn position_unknown(&self) -> bool {
        self.measured == UNKNOWN_POSITION_SENTINEL
    }

    /// Serialize as a single JSON line.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Emit as a structured `info!` event on the `telemetry` target.
    pub fn log(&self) {
        match self.to_json() {
            Ok(json) => info!(target: "telemetry", cycle = self.cycle, "{json}"),
            Err(e) => info!(target: "telemetry", cycle = self.cycle, "snapshot unavailable: {e}"),
        }
    }
}
