//! Hardware collaborator traits and error types.
//!
//! This module defines:
//! - `MotorDriver` trait - Leader motor controller with a closed-loop profile executor
//! - `LimitSensor` trait - Binary bottom-limit sensor
//! - `HalError` enum - Error types for HAL operations
//! - `DriverFactory` type alias - Factory function type
//! - `HalDevices` struct - The pair of collaborators a factory produces

use thiserror::Error;

use crate::hal::types::{FollowerConfig, LeaderConfig, MotionProfileConfig};
use crate::lift::config::LiftConfig;
use crate::lift::position::Position;

/// Error types for HAL operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HalError {
    /// Driver initialization failed
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Hardware communication error
    #[error("Hardware communication error: {0}")]
    CommunicationError(String),

    /// The drive refused a command
    #[error("Command rejected: {0}")]
    CommandRejected(String),

    /// Driver not found
    #[error("Driver not found: {0}")]
    DriverNotFound(String),
}

/// Leader motor controller as seen by the control unit.
///
/// # Lifecycle
///
/// 1. Setup calls (`factory_reset` … `configure_follower`) - once at construction
/// 2. Exactly one of `command_profile_position` / `command_power` / `hold_brake` per cycle
/// 3. `hold_brake` on shutdown
///
/// Command calls must not block; they are issued from the periodic tick.
pub trait MotorDriver: Send {
    /// Returns the driver's unique identifier (e.g., "simulation").
    fn name(&self) -> &'static str;

    /// Restore controller defaults.
    fn factory_reset(&mut self) -> Result<(), HalError>;

    /// Configure gains and motion profile limits.
    fn configure_motion_profile(&mut self, profile: &MotionProfileConfig) -> Result<(), HalError>;

    /// Invert motor output direction.
    fn set_inverted(&mut self, inverted: bool) -> Result<(), HalError>;

    /// Invert sensor phase.
    fn set_sensor_phase(&mut self, phase: bool) -> Result<(), HalError>;

    /// Slave another controller to this one (or to another follower).
    fn configure_follower(&mut self, follower: &FollowerConfig) -> Result<(), HalError>;

    /// Run a closed-loop motion profile toward `target`.
    fn command_profile_position(&mut self, target: Position, feedforward: f64)
    -> Result<(), HalError>;

    /// Open-loop power in `[-1, 1]`.
    fn command_power(&mut self, power: f64) -> Result<(), HalError>;

    /// Neutral, zero-velocity hold.
    fn hold_brake(&mut self) -> Result<(), HalError>;

    /// Current encoder reading relative to the last zero.
    fn read_position(&self) -> Position;

    /// Make the current encoder reading the zero reference.
    fn reset_position_to_zero(&mut self) -> Result<(), HalError>;

    /// Apply leader orientation in one call.
    ///
    /// Default: `set_inverted` then `set_sensor_phase`.
    fn configure_leader(&mut self, leader: &LeaderConfig) -> Result<(), HalError> {
        self.set_inverted(leader.inverted)?;
        self.set_sensor_phase(leader.sensor_phase)
    }
}

/// Binary sensor closed when the carriage sits on the bottom reference.
pub trait LimitSensor: Send {
    /// `true` = mechanism physically at the home/bottom reference.
    fn read_limit_contact(&self) -> bool;
}

impl<T: MotorDriver + ?Sized> MotorDriver for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }
    fn factory_reset(&mut self) -> Result<(), HalError> {
        (**self).factory_reset()
    }
    fn configure_motion_profile(&mut self, profile: &MotionProfileConfig) -> Result<(), HalError> {
        (**self).configure_motion_profile(profile)
    }
    fn set_inverted(&mut self, inverted: bool) -> Result<(), HalError> {
        (**self).set_inverted(inverted)
    }
    fn set_sensor_phase(&mut self, phase: bool) -> Result<(), HalError> {
        (**self).set_sensor_phase(phase)
    }
    fn configure_follower(&mut self, follower: &FollowerConfig) -> Result<(), HalError> {
        (**self).configure_follower(follower)
    }
    fn command_profile_position(
        &mut self,
        target: Position,
        feedforward: f64,
    ) -> Result<(), HalError> {
        (**self).command_profile_position(target, feedforward)
    }
    fn command_power(&mut self, power: f64) -> Result<(), HalError> {
        (**self).command_power(power)
    }
    fn hold_brake(&mut self) -> Result<(), HalError> {
        (**self).hold_brake()
    }
    fn read_position(&self) -> Position {
        (**self).read_position()
    }
    fn reset_position_to_zero(&mut self) -> Result<(), HalError> {
        (**self).reset_position_to_zero()
    }
    fn configure_leader(&mut self, leader: &LeaderConfig) -> Result<(), HalError> {
        (**self).configure_leader(leader)
    }
}

impl<T: LimitSensor + ?Sized> LimitSensor for Box<T> {
    fn read_limit_contact(&self) -> bool {
        (**self).read_limit_contact()
    }
}

/// Motor driver and limit sensor built by one factory.
pub struct HalDevices {
    /// Leader motor controller.
    pub motor: Box<dyn MotorDriver>,
    /// Bottom limit sensor.
    pub limit: Box<dyn LimitSensor>,
}

/// Factory function type for creating driver instances.
pub type DriverFactory = fn(&LiftConfig) -> Result<HalDevices, HalError>;
