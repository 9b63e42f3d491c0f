//! Command processing root.
//!
//! Homing supervision, target resolution, and per-tick command planning.

pub mod emitter;
pub mod homing;
pub mod resolver;
