//! Lift actuator position controller.
//!
//! Owns the leader motor driver and the bottom limit sensor. `tick` is the
//! only place hardware motion commands are issued on the periodic path;
//! the public API only mutates the target and homing state, except for
//! `brake_now` and `shutdown`, which brake immediately.
//!
//! All mutable state is confined to the caller's thread. Callers that
//! share the controller across threads must serialize access (e.g. behind
//! the cycle runner).

use lift_common::consts::UNKNOWN_POSITION_SENTINEL;
use lift_common::hal::driver::{LimitSensor, MotorDriver};
use lift_common::lift::command::HardwareCommand;
use lift_common::lift::config::LiftConfig;
use lift_common::lift::homing::HomingState;
use lift_common::lift::level::Level;
use lift_common::lift::position::{Position, TravelLimits};
use tracing::{debug, info, trace};

use crate::command::emitter::{SensorReading, plan_tick};
use crate::command::homing::{HomingSupervisor, HomingUpdate};
use crate::command::resolver::{MoveRequest, TargetResolver};
use crate::control::feedforward::{self, Feedforward};
use crate::error::ControlError;
use crate::safety::interference::{InterferenceBand, OperatorNotifier, TracingNotifier};
use crate::telemetry::TelemetrySnapshot;

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// Target stored; takes effect on the next tick.
    Accepted(Position),
    /// Not homed: the request was dropped and creep continues.
    IgnoredNotHomed,
}

/// Position controller for one lift mechanism.
pub struct LiftController<D: MotorDriver, S: LimitSensor> {
    motor: D,
    limit: S,
    homing: HomingSupervisor,
    target: Option<Position>,
    resolver: TargetResolver,
    creep_power: f64,
    feedforward: Box<dyn Feedforward>,
    interference: Option<InterferenceBand>,
    notifier: Box<dyn OperatorNotifier>,
    last_command: Option<HardwareCommand>,
}

impl<D: MotorDriver, S: LimitSensor> LiftController<D, S> {
    /// Configure the hardware and start `Unhomed` with no target.
    ///
    /// The configuration is validated before the drive is touched. Setup
    /// order: factory reset, motion profile, leader orientation, followers,
    /// then hold-brake.
    pub fn new(mut motor: D, limit: S, config: &LiftConfig) -> Result<Self, ControlError> {
        config.validate()?;
        motor.factory_reset()?;
        motor.configure_motion_profile(&config.motion_profile)?;
        motor.configure_leader(&config.leader)?;
        for follower in &config.followers {
            motor.configure_follower(follower)?;
        }
        motor.hold_brake()?;

        info!(
            driver = motor.name(),
            followers = config.followers.len(),
            "Lift controller configured, awaiting bottom limit"
        );

        Ok(Self {
            motor,
            limit,
            homing: HomingSupervisor::new(),
            target: None,
            resolver: TargetResolver::new(TravelLimits::DEFAULT, config.control.meters_per_unit),
            creep_power: config.control.creep_power,
            feedforward: feedforward::from_config(&config.feedforward),
            interference: config.control.interference_threshold.map(InterferenceBand::new),
            notifier: Box::new(TracingNotifier),
            last_command: None,
        })
    }

    /// Replace the feedforward law.
    pub fn with_feedforward(mut self, feedforward: impl Feedforward + 'static) -> Self {
        self.feedforward = Box::new(feedforward);
        self
    }

    /// Replace the interference-band notifier.
    pub fn with_notifier(mut self, notifier: impl OperatorNotifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    // ─── Periodic Tick ──────────────────────────────────────────────

    /// Run one control cycle and issue exactly one motion command.
    ///
    /// Driver errors are returned unchanged; nothing is retried, the next
    /// tick re-issues a command from current state.
    pub fn tick(&mut self) -> Result<HardwareCommand, ControlError> {
        let reading = SensorReading {
            at_limit: self.limit.read_limit_contact(),
            measured: self.motor.read_position(),
        };

        let plan = plan_tick(
            self.homing.state(),
            self.target,
            reading,
            self.creep_power,
            self.feedforward.as_ref(),
        );

        if let HomingUpdate::Referenced { from, brake_pulse } = plan.update {
            self.motor.reset_position_to_zero()?;
            info!(from = %from, brake_pulse, "Bottom limit reached, position reference zeroed");
        }

        self.homing.apply(plan.update);
        debug_assert_eq!(self.homing.state(), plan.homing);
        self.target = plan.target;

        trace!(command = ?plan.command, "tick");
        plan.command.apply(&mut self.motor)?;
        self.last_command = Some(plan.command);
        Ok(plan.command)
    }

    // ─── Public API ─────────────────────────────────────────────────

    /// Store a new target; takes effect on the next tick.
    ///
    /// Heights are converted with the configured `meters_per_unit`. Ignored
    /// while not homed.
    pub fn move_to(&mut self, request: impl Into<MoveRequest>) -> MoveOutcome {
        let request = request.into();
        if !self.homing.is_homed() {
            debug!(?request, state = %self.homing.state(), "Move ignored, lift not homed");
            return MoveOutcome::IgnoredNotHomed;
        }

        let measured = self.motor.read_position();
        let resolved = self
            .resolver
            .resolve_request(request, self.target, Some(measured));

        let changed = self.target != Some(resolved);
        self.target = Some(resolved);
        debug!(?request, target = %resolved, "Move accepted");

        // Advisory only; the target is already set for the next tick.
        if changed {
            if let Some(warning) = self
                .interference
                .and_then(|band| band.crossing(measured, resolved))
            {
                self.notifier.notify(&warning);
            }
        }
        MoveOutcome::Accepted(resolved)
    }

    /// Move to the next preset above the current reference.
    pub fn move_up(&mut self) -> MoveOutcome {
        let level = Level::next_above(self.reference()).unwrap_or(Level::TOP);
        self.move_to(level)
    }

    /// Move to the next preset below the current reference.
    pub fn move_down(&mut self) -> MoveOutcome {
        let level = Level::next_below(self.reference()).unwrap_or(Level::Bottom);
        self.move_to(level)
    }

    /// Hold-brake now and pin the target to where the lift is.
    ///
    /// While not homed the target stays cleared; the next tick resumes creep.
    pub fn brake_now(&mut self) -> Result<(), ControlError> {
        self.motor.hold_brake()?;
        self.last_command = Some(HardwareCommand::HoldBrake);
        self.target = if self.homing.is_homed() {
            Some(self.resolver.resolve(self.motor.read_position()))
        } else {
            None
        };
        Ok(())
    }

    /// Re-seek the bottom limit. Idempotent.
    pub fn request_rehome(&mut self) {
        let prev = self.homing.request_rehome();
        self.target = None;
        if prev != HomingState::Homing {
            info!(from = %prev, "Re-home requested");
        }
    }

    /// Safe state for disable or process exit: hold-brake, no target.
    pub fn shutdown(&mut self) -> Result<(), ControlError> {
        self.target = None;
        self.motor.hold_brake()?;
        self.last_command = Some(HardwareCommand::HoldBrake);
        info!("Lift controller shut down");
        Ok(())
    }

    // ─── Reads ──────────────────────────────────────────────────────

    /// Measured position, `None` until the reference is trustworthy.
    pub fn measured_position(&self) -> Option<Position> {
        self.homing
            .is_homed()
            .then(|| self.motor.read_position())
    }

    /// Measured position scalar, or the unknown sentinel while not homed.
    pub fn measured_or_sentinel(&self) -> f64 {
        self.measured_position()
            .map_or(UNKNOWN_POSITION_SENTINEL, Position::value)
    }

    #[inline]
    pub fn target_position(&self) -> Option<Position> {
        self.target
    }

    /// Live read of the bottom limit sensor.
    #[inline]
    pub fn at_limit(&self) -> bool {
        self.limit.read_limit_contact()
    }

    #[inline]
    pub fn homing_state(&self) -> HomingState {
        self.homing.state()
    }

    #[inline]
    pub fn is_homed(&self) -> bool {
        self.homing.is_homed()
    }

    /// Last command issued to the drive.
    #[inline]
    pub fn last_command(&self) -> Option<HardwareCommand> {
        self.last_command
    }

    /// Carriage height [m], when homed.
    pub fn height_m(&self) -> Option<f64> {
        self.measured_position()
            .map(|p| p.height(self.resolver.meters_per_unit()))
    }

    /// Telemetry view at `cycle`.
    pub fn snapshot(&self, cycle: u64) -> TelemetrySnapshot {
        TelemetrySnapshot {
            cycle,
            homing: self.homing_state(),
            measured: self.measured_or_sentinel(),
            target: self.target.map(Position::value),
            height_m: self.height_m(),
            at_limit: self.at_limit(),
            command: self.last_command,
        }
    }

    /// Borrow the motor driver.
    pub fn motor(&self) -> &D {
        &self.motor
    }

    /// Mutably borrow the motor driver.
    pub fn motor_mut(&mut self) -> &mut D {
        &mut self.motor
    }

    /// Base for step moves: target if set, else measured.
    fn reference(&self) -> Position {
        self.target
            .or_else(|| self.measured_position())
            .unwrap_or(Position::ZERO)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
