//! Recording hardware doubles shared by the integration tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use lift_common::hal::driver::{HalError, LimitSensor, MotorDriver};
use lift_common::hal::types::{FollowerConfig, MotionProfileConfig};
use lift_common::lift::command::HardwareCommand;
use lift_common::lift::config::LiftConfig;
use lift_common::lift::position::Position;
use lift_control_unit::LiftController;

/// One call observed by [`RecordingDriver`].
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Setup(&'static str),
    Command(HardwareCommand),
    ZeroReset,
}

#[derive(Default)]
struct Inner {
    log: Vec<Recorded>,
    encoder: f64,
}

/// Motor driver that records every call. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingDriver {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingDriver {
    fn record(&self, entry: Recorded) {
        self.inner.lock().unwrap().log.push(entry);
    }

    /// All recorded calls.
    pub fn log(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().log.clone()
    }

    /// Motion commands only.
    pub fn commands(&self) -> Vec<HardwareCommand> {
        self.log()
            .into_iter()
            .filter_map(|e| match e {
                Recorded::Command(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    pub fn zero_resets(&self) -> usize {
        self.log()
            .iter()
            .filter(|e| **e == Recorded::ZeroReset)
            .count()
    }

    pub fn clear(&self) {
        self.inner.lock().unwrap().log.clear();
    }

    /// Move the encoder reading.
    pub fn set_encoder(&self, value: f64) {
        self.inner.lock().unwrap().encoder = value;
    }
}

impl MotorDriver for RecordingDriver {
    fn name(&self) -> &'static str {
        "recording"
    }
    fn factory_reset(&mut self) -> Result<(), HalError> {
        self.record(Recorded::Setup("factory_reset"));
        Ok(())
    }
    fn configure_motion_profile(&mut self, _: &MotionProfileConfig) -> Result<(), HalError> {
        self.record(Recorded::Setup("motion_profile"));
        Ok(())
    }
    fn set_inverted(&mut self, _: bool) -> Result<(), HalError> {
        self.record(Recorded::Setup("inverted"));
        Ok(())
    }
    fn set_sensor_phase(&mut self, _: bool) -> Result<(), HalError> {
        self.record(Recorded::Setup("sensor_phase"));
        Ok(())
    }
    fn configure_follower(&mut self, _: &FollowerConfig) -> Result<(), HalError> {
        self.record(Recorded::Setup("follower"));
        Ok(())
    }
    fn command_profile_position(&mut self, target: Position, feedforward: f64) -> Result<(), HalError> {
        self.record(Recorded::Command(HardwareCommand::ProfilePosition {
            target,
            feedforward,
        }));
        Ok(())
    }
    fn command_power(&mut self, power: f64) -> Result<(), HalError> {
        self.record(Recorded::Command(HardwareCommand::Power(power)));
        Ok(())
    }
    fn hold_brake(&mut self) -> Result<(), HalError> {
        self.record(Recorded::Command(HardwareCommand::HoldBrake));
        Ok(())
    }
    fn read_position(&self) -> Position {
        Position::new(self.inner.lock().unwrap().encoder)
    }
    fn reset_position_to_zero(&mut self) -> Result<(), HalError> {
        self.record(Recorded::ZeroReset);
        self.set_encoder(0.0);
        Ok(())
    }
}

/// Bottom limit switch driven by the test.
#[derive(Clone, Default)]
pub struct ManualSwitch(Arc<AtomicBool>);

impl ManualSwitch {
    pub fn set(&self, closed: bool) {
        self.0.store(closed, Ordering::SeqCst);
    }
}

impl LimitSensor for ManualSwitch {
    fn read_limit_contact(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub type TestController = LiftController<RecordingDriver, ManualSwitch>;

/// Fresh `Unhomed` controller with setup calls cleared from the log.
pub fn unhomed() -> (TestController, RecordingDriver, ManualSwitch) {
    let driver = RecordingDriver::default();
    let switch = ManualSwitch::default();
    let ctl = LiftController::new(
        driver.clone(),
        switch.clone(),
        &LiftConfig::with_service_name("integration"),
    )
    .unwrap();
    driver.clear();
    (ctl, driver, switch)
}

/// Controller homed on the first tick, switch released, log cleared.
pub fn homed() -> (TestController, RecordingDriver, ManualSwitch) {
    let (mut ctl, driver, switch) = unhomed();
    switch.set(true);
    ctl.tick().unwrap();
    switch.set(false);
    driver.clear();
    (ctl, driver, switch)
}
