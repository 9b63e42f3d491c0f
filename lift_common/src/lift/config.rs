//! Lift configuration schema and validation.
//!
//! One TOML file describes the control cadence, homing creep, advisory
//! interference band, leader/follower wiring, motion profile, feedforward
//! and (for the simulation driver) the physical model.
//!
//! ```toml
//! [shared]
//! service_name = "lift"
//!
//! [control]
//! cycle_time_us = 20000
//! creep_power = 0.2
//! interference_threshold = 30.0
//!
//! [leader]
//! device_id = 5
//!
//! [[followers]]
//! device_id = 6
//! leader_id = 5
//! ```

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, SharedConfig};
use crate::consts::{
    DEFAULT_CREEP_POWER, DEFAULT_CYCLE_TIME_US, DEFAULT_METERS_PER_UNIT,
    DEFAULT_TELEMETRY_INTERVAL, MAX_CREEP_POWER, MAX_FOLLOWERS,
};
use crate::hal::types::{FollowerConfig, LeaderConfig, MotionProfileConfig};

use super::position::{Position, TravelLimits};

/// Complete lift configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiftConfig {
    /// Service identity and log level.
    pub shared: SharedConfig,
    /// Control loop parameters.
    #[serde(default)]
    pub control: ControlConfig,
    /// Leader motor controller orientation.
    #[serde(default)]
    pub leader: LeaderConfig,
    /// Closed-loop profile settings.
    #[serde(default)]
    pub motion_profile: MotionProfileConfig,
    /// Follower motor controllers.
    #[serde(default)]
    pub followers: heapless::Vec<FollowerConfig, MAX_FOLLOWERS>,
    /// Feedforward model.
    #[serde(default)]
    pub feedforward: FeedforwardConfig,
    /// Physical model used by the simulation driver.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Control loop parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Tick period [µs].
    #[serde(default = "default_cycle_time_us")]
    pub cycle_time_us: u32,
    /// Magnitude of the downward open-loop power used while seeking the limit.
    #[serde(default = "default_creep_power")]
    pub creep_power: f64,
    /// Boundary of another mechanism's working envelope; crossing it warns the operator.
    #[serde(default)]
    pub interference_threshold: Option<Position>,
    /// Cycles between telemetry snapshots.
    #[serde(default = "default_telemetry_interval")]
    pub telemetry_interval: u32,
    /// Carriage height per sensor unit [m].
    #[serde(default = "default_meters_per_unit")]
    pub meters_per_unit: f64,
}

fn default_cycle_time_us() -> u32 {
    DEFAULT_CYCLE_TIME_US
}
fn default_creep_power() -> f64 {
    DEFAULT_CREEP_POWER
}
fn default_telemetry_interval() -> u32 {
    DEFAULT_TELEMETRY_INTERVAL
}
fn default_meters_per_unit() -> f64 {
    DEFAULT_METERS_PER_UNIT
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            cycle_time_us: DEFAULT_CYCLE_TIME_US,
            creep_power: DEFAULT_CREEP_POWER,
            interference_threshold: None,
            telemetry_interval: DEFAULT_TELEMETRY_INTERVAL,
            meters_per_unit: default_meters_per_unit(),
        }
    }
}

impl ControlConfig {
    /// Tick period.
    #[inline]
    pub fn cycle_time(&self) -> Duration {
        Duration::from_micros(u64::from(self.cycle_time_us))
    }
}

/// Linear feedforward model: `gravity + per_position × measured`.
///
/// All-zero disables feedforward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeedforwardConfig {
    /// Constant gravity compensation.
    #[serde(default)]
    pub gravity: f64,
    /// Additional compensation per sensor unit of height.
    #[serde(default)]
    pub per_position: f64,
}

/// Physical model for the simulation driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Carriage height at power-on [units above the physical bottom].
    #[serde(default = "default_start_position")]
    pub start_position: f64,
    /// Mechanical hard stop above the bottom [units].
    #[serde(default = "default_max_travel")]
    pub max_travel: f64,
    /// Speed reached at full open-loop power [units/s].
    #[serde(default = "default_full_power_velocity")]
    pub full_power_velocity: f64,
    /// Height below which the bottom limit switch closes [units].
    #[serde(default = "default_limit_window")]
    pub limit_window: f64,
}

fn default_start_position() -> f64 {
    5.0
}
fn default_max_travel() -> f64 {
    66.0
}
fn default_full_power_velocity() -> f64 {
    20.0
}
fn default_limit_window() -> f64 {
    0.05
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_position: default_start_position(),
            max_travel: default_max_travel(),
            full_power_velocity: default_full_power_velocity(),
            limit_window: default_limit_window(),
        }
    }
}

impl LiftConfig {
    /// Minimal valid configuration with all defaults.
    pub fn with_service_name(name: &str) -> Self {
        Self {
            shared: SharedConfig {
                log_level: Default::default(),
                service_name: name.to_string(),
            },
            control: ControlConfig::default(),
            leader: LeaderConfig::default(),
            motion_profile: MotionProfileConfig::default(),
            followers: heapless::Vec::new(),
            feedforward: FeedforwardConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }

    /// Validate parameter bounds and wiring.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        validate_control(&self.control)?;
        validate_motion_profile(&self.motion_profile)?;
        validate_followers(&self.leader, &self.followers)?;
        validate_feedforward(&self.feedforward)?;
        validate_simulation(&self.simulation)?;
        Ok(())
    }
}

fn invalid(msg: String) -> ConfigError {
    ConfigError::ValidationError(msg)
}

fn validate_control(c: &ControlConfig) -> Result<(), ConfigError> {
    if c.cycle_time_us == 0 {
        return Err(invalid("control.cycle_time_us must be > 0".to_string()));
    }
    if !(c.creep_power > 0.0 && c.creep_power <= MAX_CREEP_POWER) {
        return Err(invalid(format!(
            "control.creep_power {} out of range (0, {MAX_CREEP_POWER}]",
            c.creep_power
        )));
    }
    if let Some(threshold) = c.interference_threshold {
        if !TravelLimits::DEFAULT.contains(threshold) {
            return Err(invalid(format!(
                "control.interference_threshold {threshold} outside travel limits [{}, {}]",
                TravelLimits::DEFAULT.lower,
                TravelLimits::DEFAULT.upper
            )));
        }
    }
    if c.telemetry_interval == 0 {
        return Err(invalid("control.telemetry_interval must be >= 1".to_string()));
    }
    if !(c.meters_per_unit.is_finite() && c.meters_per_unit > 0.0) {
        return Err(invalid(format!(
            "control.meters_per_unit {} must be > 0",
            c.meters_per_unit
        )));
    }
    Ok(())
}

fn validate_motion_profile(p: &MotionProfileConfig) -> Result<(), ConfigError> {
    for (name, v) in [("kp", p.kp), ("ki", p.ki), ("kd", p.kd), ("kf", p.kf)] {
        if !(v.is_finite() && v >= 0.0) {
            return Err(invalid(format!("motion_profile.{name} {v} must be >= 0")));
        }
    }
    for (name, v) in [
        ("cruise_velocity", p.cruise_velocity),
        ("acceleration", p.acceleration),
    ] {
        if !(v.is_finite() && v > 0.0) {
            return Err(invalid(format!("motion_profile.{name} {v} must be > 0")));
        }
    }
    for (name, v) in [("jerk", p.jerk), ("tolerance_window", p.tolerance_window)] {
        if !(v.is_finite() && v >= 0.0) {
            return Err(invalid(format!("motion_profile.{name} {v} must be >= 0")));
        }
    }
    Ok(())
}

fn validate_followers(leader: &LeaderConfig, followers: &[FollowerConfig]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for f in followers {
        if f.device_id == leader.device_id {
            return Err(invalid(format!(
                "follower device_id {} collides with leader",
                f.device_id
            )));
        }
        if !seen.insert(f.device_id) {
            return Err(invalid(format!("duplicate follower device_id {}", f.device_id)));
        }
    }
    // Every follower must chain back to the leader.
    let known: HashSet<u8> = seen.iter().copied().chain([leader.device_id]).collect();
    for f in followers {
        if !known.contains(&f.leader_id) || f.leader_id == f.device_id {
            return Err(invalid(format!(
                "follower {} follows unknown device {}",
                f.device_id, f.leader_id
            )));
        }
    }
    Ok(())
}

fn validate_feedforward(ff: &FeedforwardConfig) -> Result<(), ConfigError> {
    if !(ff.gravity.is_finite() && ff.per_position.is_finite()) {
        return Err(invalid("feedforward terms must be finite".to_string()));
    }
    Ok(())
}

fn validate_simulation(s: &SimulationConfig) -> Result<(), ConfigError> {
    if s.max_travel < TravelLimits::DEFAULT.upper.value() {
        return Err(invalid(format!(
            "simulation.max_travel {} below top preset {}",
            s.max_travel,
            TravelLimits::DEFAULT.upper
        )));
    }
    if !(0.0..=s.max_travel).contains(&s.start_position) {
        return Err(invalid(format!(
            "simulation.start_position {} outside [0, {}]",
            s.start_position, s.max_travel
        )));
    }
    if !(s.full_power_velocity > 0.0) {
        return Err(invalid("simulation.full_power_velocity must be > 0".to_string()));
    }
    if !(s.limit_window >= 0.0) {
        return Err(invalid("simulation.limit_window must be >= 0".to_string()));
    }
    Ok(())
}
