//! Simulation driver implementation.
//!
//! `SimulationDriver` implements `MotorDriver` on top of [`LiftPhysics`].
//! Each motion command (profile, power, brake) sets the drive mode and
//! advances the physics by one control period, so the driver keeps pace
//! with whatever loop is ticking the controller. The paired
//! [`SimulatedLimitSwitch`] sees the switch state published after every
//! step.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use lift_common::hal::driver::{HalDevices, HalError, LimitSensor, MotorDriver};
use lift_common::hal::types::{FollowerConfig, MotionProfileConfig};
use lift_common::lift::config::LiftConfig;
use lift_common::lift::position::Position;
use tracing::{debug, info, trace};

use super::physics::{DriveMode, LiftPhysics};

/// Simulated leader motor controller.
pub struct SimulationDriver {
    /// Carriage model
    physics: LiftPhysics,
    /// Limit state shared with the switch
    limit: Arc<AtomicBool>,
    /// Active profile configuration
    profile: MotionProfileConfig,
    /// Output inversion
    inverted: bool,
    /// Sensor phase inversion
    sensor_phase: bool,
    /// Configured followers
    followers: Vec<FollowerConfig>,
    /// Fault injection: refuse motion commands
    reject_commands: bool,
    /// Motion commands accepted
    commands: u64,
}

impl SimulationDriver {
    /// Create a driver from the `[simulation]` and `[motion_profile]` sections.
    ///
    /// # Errors
    /// `HalError::ConfigError` if the configuration does not validate.
    pub fn new(config: &LiftConfig) -> Result<Self, HalError> {
        config
            .validate()
            .map_err(|e| HalError::ConfigError(e.to_string()))?;
        let physics = LiftPhysics::new(
            &config.simulation,
            &config.motion_profile,
            config.control.cycle_time(),
        );
        let limit = Arc::new(AtomicBool::new(physics.at_limit()));
        Ok(Self {
            physics,
            limit,
            profile: config.motion_profile,
            inverted: false,
            sensor_phase: false,
            followers: Vec::new(),
            reject_commands: false,
            commands: 0,
        })
    }

    /// Limit switch wired to this carriage.
    pub fn limit_switch(&self) -> SimulatedLimitSwitch {
        SimulatedLimitSwitch {
            closed: Arc::clone(&self.limit),
        }
    }

    /// Make every subsequent motion command fail with `CommandRejected`.
    pub fn set_reject_commands(&mut self, reject: bool) {
        self.reject_commands = reject;
    }

    pub fn physics(&self) -> &LiftPhysics {
        &self.physics
    }

    pub fn followers(&self) -> &[FollowerConfig] {
        &self.followers
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn sensor_phase(&self) -> bool {
        self.sensor_phase
    }

    /// Motion commands accepted so far.
    pub fn command_count(&self) -> u64 {
        self.commands
    }

    fn drive(&mut self, mode: DriveMode) -> Result<(), HalError> {
        if self.reject_commands {
            return Err(HalError::CommandRejected(format!("simulated fault ({mode:?})")));
        }
        self.physics.set_mode(mode);
        self.physics.step();
        self.limit.store(self.physics.at_limit(), Ordering::Release);
        self.commands += 1;
        Ok(())
    }
}

impl MotorDriver for SimulationDriver {
    fn name(&self) -> &'static str {
        "simulation"
    }

    fn factory_reset(&mut self) -> Result<(), HalError> {
        self.profile = MotionProfileConfig::default();
        self.physics.set_profile(&self.profile);
        self.physics.set_mode(DriveMode::Hold);
        self.inverted = false;
        self.sensor_phase = false;
        self.followers.clear();
        debug!("Simulation drive factory reset");
        Ok(())
    }

    fn configure_motion_profile(&mut self, profile: &MotionProfileConfig) -> Result<(), HalError> {
        self.profile = *profile;
        self.physics.set_profile(profile);
        debug!(
            "Motion profile: cruise={:.3}, accel={:.3}, kp={}",
            profile.cruise_velocity, profile.acceleration, profile.kp
        );
        Ok(())
    }

    fn set_inverted(&mut self, inverted: bool) -> Result<(), HalError> {
        self.inverted = inverted;
        Ok(())
    }

    fn set_sensor_phase(&mut self, phase: bool) -> Result<(), HalError> {
        self.sensor_phase = phase;
        Ok(())
    }

    fn configure_follower(&mut self, follower: &FollowerConfig) -> Result<(), HalError> {
        if self.followers.iter().any(|f| f.device_id == follower.device_id) {
            return Err(HalError::ConfigError(format!(
                "follower {} configured twice",
                follower.device_id
            )));
        }
        debug!(
            "Follower {} -> {} (invert={})",
            follower.device_id, follower.leader_id, follower.invert
        );
        self.followers.push(*follower);
        Ok(())
    }

    fn command_profile_position(
        &mut self,
        target: Position,
        feedforward: f64,
    ) -> Result<(), HalError> {
        trace!("profile -> {target} (ff={feedforward:.3})");
        let height = self.physics.encoder_to_height(target.value());
        self.drive(DriveMode::Profile { height })
    }

    fn command_power(&mut self, power: f64) -> Result<(), HalError> {
        self.drive(DriveMode::Power(power))
    }

    fn hold_brake(&mut self) -> Result<(), HalError> {
        self.drive(DriveMode::Hold)
    }

    fn read_position(&self) -> Position {
        Position::new(self.physics.encoder())
    }

    fn reset_position_to_zero(&mut self) -> Result<(), HalError> {
        self.physics.zero_encoder();
        info!("Encoder zeroed at height {:.3}", self.physics.height());
        Ok(())
    }
}

/// Bottom limit switch of a simulated carriage.
#[derive(Debug, Clone)]
pub struct SimulatedLimitSwitch {
    closed: Arc<AtomicBool>,
}

impl LimitSensor for SimulatedLimitSwitch {
    fn read_limit_contact(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

/// Factory registered under `"simulation"`.
pub fn create_devices(config: &LiftConfig) -> Result<HalDevices, HalError> {
    let motor = SimulationDriver::new(config)?;
    let limit = motor.limit_switch();
    Ok(HalDevices {
        motor: Box::new(motor),
        limit: Box::new(limit),
    })
}
