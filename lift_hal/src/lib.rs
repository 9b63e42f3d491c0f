//! # Lift HAL Library
//!
//! Hardware abstraction for the lift: a name → factory driver registry and
//! the built-in drivers. Drivers implement `MotorDriver` and `LimitSensor`
//! from `lift_common::hal::driver`.
//!
//! # Module Structure
//!
//! - [`driver_registry`] - Driver factory registration
//! - [`drivers`] - HAL driver implementations
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    lift_hal                         │
//! │  ┌──────────────────┐      ┌─────────────────────┐  │
//! │  │ DriverRegistry   │─────►│ DriverFactory       │  │
//! │  │ name → factory   │      │ (&LiftConfig)       │  │
//! │  └──────────────────┘      └─────────┬───────────┘  │
//! │                                      ▼              │
//! │               HalDevices { motor, limit }           │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod driver_registry;
pub mod drivers;

pub use crate::driver_registry::DriverRegistry;
