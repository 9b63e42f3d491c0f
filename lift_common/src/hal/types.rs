//! HAL configuration types passed to drivers during setup.

use serde::{Deserialize, Serialize};

/// Closed-loop motion profile settings for the leader controller.
///
/// Gains are in the drive's native units; velocity, acceleration and jerk
/// are in sensor units per second (squared, cubed).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionProfileConfig {
    /// Proportional gain.
    #[serde(default = "default_kp")]
    pub kp: f64,
    /// Integral gain.
    #[serde(default)]
    pub ki: f64,
    /// Derivative gain.
    #[serde(default)]
    pub kd: f64,
    /// Velocity feedforward gain of the drive's own loop.
    #[serde(default = "default_kf")]
    pub kf: f64,
    /// Cruise velocity [units/s].
    #[serde(default = "default_cruise_velocity")]
    pub cruise_velocity: f64,
    /// Acceleration [units/s²].
    #[serde(default = "default_acceleration")]
    pub acceleration: f64,
    /// Jerk limit [units/s³] (0 = trapezoidal).
    #[serde(default)]
    pub jerk: f64,
    /// Allowed closed-loop error before the drive reports in-position [units].
    #[serde(default = "default_tolerance_window")]
    pub tolerance_window: f64,
}

fn default_kp() -> f64 {
    0.1
}
fn default_kf() -> f64 {
    0.01
}
fn default_cruise_velocity() -> f64 {
    std::f64::consts::PI
}
fn default_acceleration() -> f64 {
    std::f64::consts::PI
}
fn default_tolerance_window() -> f64 {
    3.0
}

impl Default for MotionProfileConfig {
    fn default() -> Self {
        Self {
            kp: default_kp(),
            ki: 0.0,
            kd: 0.0,
            kf: default_kf(),
            cruise_velocity: default_cruise_velocity(),
            acceleration: default_acceleration(),
            jerk: 0.0,
            tolerance_window: default_tolerance_window(),
        }
    }
}

/// Leader motor controller orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LeaderConfig {
    /// Bus device id of the leader controller.
    #[serde(default)]
    pub device_id: u8,
    /// Invert motor output direction.
    #[serde(default)]
    pub inverted: bool,
    /// Invert sensor phase relative to output.
    #[serde(default)]
    pub sensor_phase: bool,
}

/// A controller that mirrors another controller's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowerConfig {
    /// Bus device id of the follower.
    pub device_id: u8,
    /// Device id of the controller it follows.
    pub leader_id: u8,
    /// Oppose the leader's direction (motors mounted mirrored).
    #[serde(default)]
    pub invert: bool,
}
