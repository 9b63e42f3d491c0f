//! Simulation driver module.
//!
//! Software lift carriage for development and testing without physical
//! hardware: a leader drive plus its bottom limit switch.

mod driver;
mod physics;

pub use driver::{SimulatedLimitSwitch, SimulationDriver, create_devices};
pub use physics::{DriveMode, LiftPhysics};
