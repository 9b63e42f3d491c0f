//! Hardware abstraction contracts.
//!
//! The controller consumes hardware as a capability; concrete drivers
//! live in `lift_hal`.

pub mod driver;
pub mod types;
