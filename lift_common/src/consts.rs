//! System-wide constants for the lift workspace.
//!
//! Single source of truth for numeric limits and defaults.

/// Default control cycle time in microseconds (50 Hz).
pub const DEFAULT_CYCLE_TIME_US: u32 = 20_000;

/// Default creep power magnitude used while seeking the bottom limit.
pub const DEFAULT_CREEP_POWER: f64 = 0.2;

/// Upper bound for the configured creep power magnitude.
///
/// Homing must stay well below normal control authority.
pub const MAX_CREEP_POWER: f64 = 0.5;

/// Maximum number of follower motor controllers.
pub const MAX_FOLLOWERS: usize = 8;

/// Default number of cycles between telemetry snapshots (1 s at 50 Hz).
pub const DEFAULT_TELEMETRY_INTERVAL: u32 = 50;

/// Default carriage height travelled per sensor unit [m].
pub const DEFAULT_METERS_PER_UNIT: f64 = 0.0285;

/// Position reported to dashboards while the zero reference is not trusted.
pub const UNKNOWN_POSITION_SENTINEL: f64 = -1.0;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config/lift.toml";
