//! Lift Common Library
//!
//! Shared value types, hardware collaborator contracts and configuration
//! loading for all lift workspace crates.
//!
//! # Module Structure
//!
//! - [`lift`] - Position, preset levels, homing state, hardware commands, config schema
//! - [`hal`] - Motor driver / limit sensor traits and HAL error type
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - System-wide limits and defaults
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use lift_common::prelude::*;
//!
//! let target = TravelLimits::DEFAULT.clamp(Position::new(70.0));
//! assert_eq!(target, Level::L4.position());
//! ```

pub mod config;
pub mod consts;
pub mod hal;
pub mod lift;
pub mod prelude;
