//! Lift shared types.
//!
//! All types shared between the control unit and other lift modules live
//! here, organized by domain: positions and travel limits, preset levels,
//! homing state, hardware commands and the configuration schema.

pub mod command;
pub mod config;
pub mod homing;
pub mod level;
pub mod position;
