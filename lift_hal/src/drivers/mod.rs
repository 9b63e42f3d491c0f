//! HAL driver implementations.
//!
//! - [`simulation`] - Software lift carriage for development and testing
//!
//! # Adding New Drivers
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement `MotorDriver` and `LimitSensor` from `lift_common::hal::driver`
//! 3. Expose a `DriverFactory` and register it in [`register_builtin`]

pub mod simulation;

use crate::driver_registry::DriverRegistry;

/// Register every built-in driver.
pub fn register_builtin(registry: &mut DriverRegistry) {
    registry.register("simulation", simulation::create_devices);
}
