//! End-to-end controller behavior against a recording driver.

use lift_common::lift::command::HardwareCommand;
use lift_common::lift::homing::HomingState;
use lift_common::lift::level::Level;
use lift_common::lift::position::Position;
use lift_control_unit::{MoveOutcome, MoveRequest};

use super::support::{homed, unhomed};

#[test]
fn move_while_unhomed_creeps() {
    let (mut ctl, driver, _) = unhomed();
    assert_eq!(ctl.move_to(Level::L3), MoveOutcome::IgnoredNotHomed);
    ctl.tick().unwrap();
    assert_eq!(driver.commands(), vec![HardwareCommand::Power(-0.2)]);
}

#[test]
fn top_preset_profiles_on_next_tick() {
    let (mut ctl, driver, _) = homed();
    assert_eq!(ctl.target_position(), None);
    ctl.move_to(Level::L4);
    assert!(driver.commands().is_empty(), "move_to must not touch hardware");
    ctl.tick().unwrap();
    assert_eq!(
        driver.commands(),
        vec![HardwareCommand::ProfilePosition {
            target: Position::new(63.2),
            feedforward: 0.0
        }]
    );
}

#[test]
fn out_of_range_target_clamps() {
    let (mut ctl, _, _) = homed();
    ctl.move_to(Position::new(70.0));
    assert_eq!(ctl.target_position(), Some(Position::new(63.2)));
}

#[test]
fn contact_mid_travel_is_noop() {
    let (mut ctl, driver, switch) = homed();
    ctl.move_to(Level::L3);
    driver.set_encoder(20.0);
    switch.set(true);
    ctl.tick().unwrap();

    assert_eq!(ctl.homing_state(), HomingState::Homed);
    assert_eq!(driver.zero_resets(), 0);
    assert_eq!(ctl.target_position(), Some(Level::L3.position()));
    assert_eq!(ctl.measured_position(), Some(Position::new(20.0)));
}

#[test]
fn rehome_from_target_clears_and_creeps() {
    let (mut ctl, driver, switch) = homed();
    ctl.move_to(Position::new(40.0));
    ctl.tick().unwrap();
    driver.set_encoder(40.0);

    ctl.request_rehome();
    assert_eq!(ctl.target_position(), None);
    assert_eq!(ctl.homing_state(), HomingState::Homing);

    driver.clear();
    for _ in 0..10 {
        ctl.tick().unwrap();
    }
    assert!(driver.commands().iter().all(|c| *c == HardwareCommand::Power(-0.2)));

    switch.set(true);
    assert_eq!(ctl.tick().unwrap(), HardwareCommand::HoldBrake);
    assert_eq!(ctl.homing_state(), HomingState::Homed);
    assert_eq!(ctl.measured_position(), Some(Position::ZERO));
}

#[test]
fn relative_moves_chain_from_target() {
    let (mut ctl, driver, _) = homed();
    driver.set_encoder(10.0);
    ctl.move_to(MoveRequest::Relative(5.0));
    assert_eq!(ctl.target_position(), Some(Position::new(15.0)));
    ctl.move_to(MoveRequest::Relative(5.0));
    assert_eq!(ctl.target_position(), Some(Position::new(20.0)));
    ctl.move_to(MoveRequest::Relative(100.0));
    assert_eq!(ctl.target_position(), Some(Level::TOP.position()));
}

#[test]
fn last_move_wins() {
    let (mut ctl, driver, _) = homed();
    ctl.move_to(Level::L1);
    ctl.move_to(Level::HighBall);
    ctl.tick().unwrap();
    assert_eq!(
        driver.commands(),
        vec![HardwareCommand::ProfilePosition {
            target: Level::HighBall.position(),
            feedforward: 0.0
        }]
    );
}

#[test]
fn accepted_targets_stay_in_range() {
    let (mut ctl, _, _) = homed();
    let limits = lift_common::lift::position::TravelLimits::DEFAULT;
    for raw in [-1e9, -0.001, 0.0, 31.0, 63.2, 63.21, 1e9, f64::NAN] {
        ctl.move_to(Position::new(raw));
        let t = ctl.target_position().unwrap();
        assert!(limits.contains(t), "{raw} -> {t}");
    }
}
