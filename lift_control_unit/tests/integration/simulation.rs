//! Integration test: controller + cycle runner on the simulated carriage.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use lift_common::hal::driver::{HalError, MotorDriver};
use lift_common::lift::command::HardwareCommand;
use lift_common::lift::config::LiftConfig;
use lift_common::lift::homing::HomingState;
use lift_common::lift::level::Level;
use lift_control_unit::{ControlError, MoveRequest};
use lift_control_unit::config::load_config;
use lift_control_unit::controller::LiftController;
use lift_control_unit::cycle::CycleRunner;
use lift_hal::DriverRegistry;
use lift_hal::drivers::simulation::{SimulatedLimitSwitch, SimulationDriver};

type SimRunner = CycleRunner<SimulationDriver, SimulatedLimitSwitch>;

fn shipped_config() -> LiftConfig {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../config/lift.toml");
    load_config(&path).expect("shipped config must be valid")
}

fn sim_runner(config: &LiftConfig) -> SimRunner {
    let motor = SimulationDriver::new(config).unwrap();
    let limit = motor.limit_switch();
    let controller = LiftController::new(motor, limit, config).unwrap();
    CycleRunner::new(controller, &config.control, Arc::new(AtomicBool::new(true)))
}

/// Ticks until homed; panics after `max` cycles.
fn home(runner: &mut SimRunner, max: u64) -> u64 {
    for n in 1..=max {
        runner.step().unwrap();
        if runner.controller().is_homed() {
            return n;
        }
    }
    panic!("not homed after {max} cycles");
}

#[test]
fn homes_from_power_on() {
    let config = LiftConfig::with_service_name("sim");
    let mut runner = sim_runner(&config);

    let cycles = home(&mut runner, 500);
    // 5 units at 0.2 × 20 units/s, 20 ms per cycle
    assert!(cycles > 50, "homed too early: {cycles}");

    let ctl = runner.controller();
    assert!(ctl.at_limit());
    assert_eq!(ctl.measured_or_sentinel(), 0.0);
    assert!(ctl.motor().physics().height() <= config.simulation.limit_window);
}

#[test]
fn pending_move_applies_once_homed() {
    let config = LiftConfig::with_service_name("sim");
    let mut runner = sim_runner(&config);
    runner.request_move(Level::L1);
    runner.request_move(Level::L2);

    home(&mut runner, 500);
    assert_eq!(runner.pending_move(), Some(Level::L2.into()));

    runner.run_cycles(1_500).unwrap();
    assert_eq!(runner.pending_move(), None);

    let ctl = runner.controller();
    assert_eq!(ctl.target_position(), Some(Level::L2.position()));
    let measured = ctl.measured_position().unwrap().value();
    assert!((measured - 24.5).abs() < 0.1, "measured {measured}");
    assert!(!ctl.at_limit());
}

#[test]
fn height_request_lands_at_converted_position() {
    let config = LiftConfig::with_service_name("sim");
    let mut runner = sim_runner(&config);
    // 0.342 m at the default 0.0285 m per unit is the L1 preset.
    runner.request_move(MoveRequest::Height(0.342));
    home(&mut runner, 500);
    runner.run_cycles(1_000).unwrap();

    let ctl = runner.controller();
    let target = ctl.target_position().unwrap().value();
    assert!((target - 12.0).abs() < 1e-9, "target {target}");
    let measured = ctl.measured_position().unwrap().value();
    assert!((measured - 12.0).abs() < 0.1, "measured {measured}");
    assert!((ctl.height_m().unwrap() - 0.342).abs() < 0.01);
}

#[test]
fn rehome_returns_to_the_bottom() {
    let config = LiftConfig::with_service_name("sim");
    let mut runner = sim_runner(&config);
    home(&mut runner, 500);

    runner.controller_mut().move_to(Level::L1);
    runner.run_cycles(800).unwrap();
    assert!(runner.controller().measured_position().unwrap().value() > 11.0);

    runner.controller_mut().request_rehome();
    let cycles = home(&mut runner, 1_000);
    assert!(cycles > 100);
    let ctl = runner.controller();
    assert_eq!(ctl.homing_state(), HomingState::Homed);
    assert_eq!(ctl.target_position(), None);
    assert_eq!(ctl.last_command(), Some(HardwareCommand::HoldBrake));
}

#[test]
fn brake_now_holds_position() {
    let config = LiftConfig::with_service_name("sim");
    let mut runner = sim_runner(&config);
    home(&mut runner, 500);

    runner.controller_mut().move_to(Level::L4);
    runner.run_cycles(200).unwrap();
    runner.controller_mut().brake_now().unwrap();
    let pinned = runner.controller().target_position().unwrap();

    runner.run_cycles(100).unwrap();
    let measured = runner.controller().measured_position().unwrap();
    assert!(pinned.value() > 5.0 && pinned.value() < 63.2);
    assert!((measured.value() - pinned.value()).abs() < 1.0);
}

#[test]
fn budgeted_run_ends_braked() {
    let config = LiftConfig::with_service_name("sim");
    let mut runner = sim_runner(&config).with_max_cycles(3);
    let stats = runner.run().unwrap();
    assert_eq!(stats.cycle_count, 3);
    assert_eq!(runner.controller().target_position(), None);
    assert_eq!(
        runner.controller().last_command(),
        Some(HardwareCommand::HoldBrake)
    );
}

#[test]
fn stopped_flag_runs_nothing() {
    let config = LiftConfig::with_service_name("sim");
    let motor = SimulationDriver::new(&config).unwrap();
    let limit = motor.limit_switch();
    let controller = LiftController::new(motor, limit, &config).unwrap();
    let mut runner = CycleRunner::new(controller, &config.control, Arc::new(AtomicBool::new(false)));
    let stats = runner.run().unwrap();
    assert_eq!(stats.cycle_count, 0);
}

#[test]
fn driver_fault_propagates_out_of_the_loop() {
    let config = LiftConfig::with_service_name("sim");
    let mut runner = sim_runner(&config);
    runner.run_cycles(2).unwrap();

    runner.controller_mut().motor_mut().set_reject_commands(true);
    assert!(matches!(
        runner.step(),
        Err(ControlError::Hal(HalError::CommandRejected(_)))
    ));
    assert!(matches!(
        runner.with_max_cycles(10).run(),
        Err(ControlError::Hal(_))
    ));
}

#[test]
fn negative_acceleration_is_refused_at_construction() {
    let config = LiftConfig::with_service_name("sim");
    let motor = SimulationDriver::new(&config).unwrap();
    let limit = motor.limit_switch();

    let mut bad = config.clone();
    bad.motion_profile.acceleration = -1.0;
    assert!(matches!(
        LiftController::new(motor, limit, &bad),
        Err(ControlError::Config(_))
    ));
    assert!(matches!(
        SimulationDriver::new(&bad),
        Err(HalError::ConfigError(_))
    ));
}

#[test]
fn shipped_config_drives_the_registry_simulation() {
    let config = shipped_config();
    let devices = DriverRegistry::with_builtin()
        .create_devices("simulation", &config)
        .unwrap();
    assert_eq!(devices.motor.name(), "simulation");

    let controller = LiftController::new(devices.motor, devices.limit, &config).unwrap();
    let mut runner = CycleRunner::new(controller, &config.control, Arc::new(AtomicBool::new(true)));
    runner.request_move(Level::L3);
    runner.run_cycles(3_000).unwrap();

    let ctl = runner.controller();
    assert!(ctl.is_homed());
    assert_eq!(ctl.target_position(), Some(Level::L3.position()));
    let snap = ctl.snapshot(runner.stats().cycle_count);
    assert!(!snap.position_unknown());
    assert!((snap.measured - 40.0).abs() < 0.5, "{snap:?}");
}
