//! # Lift Control Unit Library
//!
//! Position controller for a single elevator/lift mechanism driven by a
//! leader motor controller (with followers) and a binary bottom-limit
//! sensor.
//!
//! ## Layers
//!
//! 1. **Homing**: `Unhomed → Homed` on limit contact; re-home on request
//! 2. **Target resolution**: presets, absolute and relative moves, clamped
//!    into the travel range
//! 3. **Tick planning**: one pure decision per cycle producing exactly one
//!    hardware command
//! 4. **Controller**: hardware I/O around the planner plus the public API
//! 5. **Cycle runner**: fixed-rate loop, pending-move slot, telemetry
//!
//! The hardware never receives a motion-profile command while the zero
//! reference is unconfirmed.

pub mod command;
pub mod config;
pub mod control;
pub mod controller;
pub mod cycle;
pub mod error;
pub mod safety;
pub mod telemetry;

pub use command::resolver::MoveRequest;
pub use controller::{LiftController, MoveOutcome};
pub use error::ControlError;
