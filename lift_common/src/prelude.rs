//! Prelude module for common re-exports.
//!
//! ```rust
//! use lift_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{DEFAULT_CYCLE_TIME_US, UNKNOWN_POSITION_SENTINEL};

// ─── Lift Types ─────────────────────────────────────────────────────
pub use crate::lift::command::HardwareCommand;
pub use crate::lift::config::LiftConfig;
pub use crate::lift::homing::HomingState;
pub use crate::lift::level::Level;
pub use crate::lift::position::{Position, TravelLimits};

// ─── Hardware Contracts ─────────────────────────────────────────────
pub use crate::hal::driver::{HalError, LimitSensor, MotorDriver};
