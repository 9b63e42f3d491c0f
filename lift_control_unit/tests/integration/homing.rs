//! Integration test: homing lifecycle.
//!
//! Power-on → creep → limit → homed → re-home → creep → limit → homed.

use lift_common::lift::command::HardwareCommand;
use lift_common::lift::homing::HomingState;
use lift_common::lift::level::Level;
use lift_common::lift::position::Position;

use super::support::{homed, unhomed};

#[test]
fn never_profiles_before_limit_contact() {
    let (mut ctl, driver, _) = unhomed();
    for _ in 0..200 {
        ctl.move_to(Level::L3);
        ctl.move_up();
        ctl.tick().unwrap();
    }
    assert!(driver.commands().iter().all(|c| *c == HardwareCommand::Power(-0.2)));
    assert_eq!(ctl.target_position(), None);
    assert_eq!(ctl.homing_state(), HomingState::Unhomed);
}

#[test]
fn limit_contact_zeroes_and_reports_position() {
    let (mut ctl, driver, switch) = unhomed();
    driver.set_encoder(-4.7);
    ctl.tick().unwrap();
    assert_eq!(ctl.measured_or_sentinel(), -1.0);

    switch.set(true);
    assert_eq!(ctl.tick().unwrap(), HardwareCommand::HoldBrake);
    assert_eq!(ctl.homing_state(), HomingState::Homed);
    assert_eq!(ctl.measured_position(), Some(Position::ZERO));
    assert_eq!(driver.zero_resets(), 1);
}

#[test]
fn resting_on_the_limit_zeroes_once() {
    let (mut ctl, driver, switch) = unhomed();
    switch.set(true);
    for _ in 0..50 {
        ctl.tick().unwrap();
    }
    assert_eq!(driver.zero_resets(), 1);
    assert!(ctl.at_limit());
}

#[test]
fn rehome_twice_equals_once() {
    let (mut ctl, _, _) = homed();
    ctl.move_to(Level::L2);
    ctl.request_rehome();
    let after_one = (ctl.homing_state(), ctl.target_position());
    ctl.request_rehome();
    assert_eq!((ctl.homing_state(), ctl.target_position()), after_one);
    assert_eq!(after_one, (HomingState::Homing, None));
}

#[test]
fn rehome_while_unhomed_goes_to_homing() {
    let (mut ctl, _, _) = unhomed();
    ctl.request_rehome();
    assert_eq!(ctl.homing_state(), HomingState::Homing);
    assert_eq!(ctl.tick().unwrap(), HardwareCommand::Power(-0.2));
}
