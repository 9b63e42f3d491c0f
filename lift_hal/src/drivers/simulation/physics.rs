//! Lift carriage physics.
//!
//! One-dimensional carriage between the physical bottom (height 0) and a
//! hard stop at `max_travel`. The relative encoder reads height minus an
//! offset that is replaced on every zeroing; at power-on it reads zero
//! wherever the carriage happens to be.

use lift_common::hal::types::MotionProfileConfig;
use lift_common::lift::config::SimulationConfig;
use std::time::Duration;
use tracing::trace;

/// What the drive is currently doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriveMode {
    /// Zero-velocity hold.
    Hold,
    /// Open-loop power in `[-1, 1]`.
    Power(f64),
    /// Closed-loop move toward a physical height.
    Profile {
        /// Target height above the physical bottom.
        height: f64,
    },
}

/// Carriage kinematics advanced once per command.
#[derive(Debug, Clone)]
pub struct LiftPhysics {
    height: f64,
    velocity: f64,
    encoder_offset: f64,
    mode: DriveMode,
    dt: f64,
    cruise_velocity: f64,
    acceleration: f64,
    sim: SimulationConfig,
}

impl LiftPhysics {
    pub fn new(sim: &SimulationConfig, profile: &MotionProfileConfig, dt: Duration) -> Self {
        let height = sim.start_position.clamp(0.0, sim.max_travel);
        Self {
            height,
            velocity: 0.0,
            encoder_offset: height,
            mode: DriveMode::Hold,
            dt: dt.as_secs_f64(),
            cruise_velocity: profile.cruise_velocity,
            acceleration: profile.acceleration,
            sim: *sim,
        }
    }

    /// Adopt new profile limits (drive reconfiguration).
    pub fn set_profile(&mut self, profile: &MotionProfileConfig) {
        self.cruise_velocity = profile.cruise_velocity;
        self.acceleration = profile.acceleration;
    }

    pub fn set_mode(&mut self, mode: DriveMode) {
        self.mode = mode;
    }

    #[inline]
    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    /// Physical height above the bottom.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Encoder reading relative to the last zero.
    #[inline]
    pub fn encoder(&self) -> f64 {
        self.height - self.encoder_offset
    }

    /// Physical height for an encoder reading.
    #[inline]
    pub fn encoder_to_height(&self, encoder: f64) -> f64 {
        encoder + self.encoder_offset
    }

    /// Make the current height read zero.
    pub fn zero_encoder(&mut self) {
        self.encoder_offset = self.height;
    }

    /// Bottom limit switch state.
    #[inline]
    pub fn at_limit(&self) -> bool {
        self.height <= self.sim.limit_window
    }

    /// Advance one period under the current mode.
    pub fn step(&mut self) {
        match self.mode {
            DriveMode::Hold => self.velocity = 0.0,
            DriveMode::Power(power) => {
                self.velocity = power.clamp(-1.0, 1.0) * self.sim.full_power_velocity;
            }
            DriveMode::Profile { height } => self.update_profile(height),
        }

        self.height += self.velocity * self.dt;
        if self.height <= 0.0 || self.height >= self.sim.max_travel {
            self.height = self.height.clamp(0.0, self.sim.max_travel);
            self.velocity = 0.0;
        }

        trace!(
            "lift: h={:.3}, v={:.3}, enc={:.3}, mode={:?}",
            self.height,
            self.velocity,
            self.encoder(),
            self.mode
        );
    }

    /// Trapezoidal approach: accelerate to cruise, brake within stopping distance.
    fn update_profile(&mut self, target: f64) {
        let error = target - self.height;
        let max_vel = self.cruise_velocity;
        let max_acc = self.acceleration;

        let stopping_distance = self.velocity * self.velocity / (2.0 * max_acc);
        let desired = if error.abs() <= stopping_distance {
            error.signum() * (2.0 * max_acc * error.abs()).sqrt().min(max_vel)
        } else {
            error.signum() * max_vel
        };

        let max_change = max_acc * self.dt;
        self.velocity += (desired - self.velocity).clamp(-max_change, max_change);
        self.velocity = self.velocity.clamp(-max_vel, max_vel);

        // Land exactly instead of oscillating around the target.
        if error.abs() <= 1e-3 && self.velocity.abs() <= max_change {
            self.height = target;
            self.velocity = 0.0;
        }
    }
}
