//! Position value object and travel limits.
//!
//! A `Position` is an opaque scalar in sensor units (rotations/radians of the
//! leader encoder), always relative to the zero reference established by
//! homing. Conversions to physical height are explicit and per-mechanism.

use std::fmt;

use serde::{Deserialize, Serialize};
use static_assertions::assert_impl_all;

use super::level::Level;

/// Mechanism position in sensor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(f64);

assert_impl_all!(Position: Copy, Send, Sync);

impl Position {
    /// The zero reference (mechanism at the bottom limit).
    pub const ZERO: Self = Self(0.0);

    /// Wrap a raw sensor reading.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Underlying scalar in sensor units.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Build a position from a carriage height.
    ///
    /// `meters_per_unit` is the mechanism's height travelled per sensor unit.
    #[inline]
    pub fn from_height(meters: f64, meters_per_unit: f64) -> Self {
        Self(meters / meters_per_unit)
    }

    /// Carriage height for this position.
    #[inline]
    pub fn height(self, meters_per_unit: f64) -> f64 {
        self.0 * meters_per_unit
    }

    /// Position shifted by `delta` sensor units (unclamped).
    #[inline]
    pub fn offset(self, delta: f64) -> Self {
        Self(self.0 + delta)
    }
}

impl From<f64> for Position {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Level> for Position {
    fn from(level: Level) -> Self {
        level.position()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// Mechanically safe travel range `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelLimits {
    /// Lower bound (the homed zero).
    pub lower: Position,
    /// Upper bound (the highest preset).
    pub upper: Position,
}

impl TravelLimits {
    /// Zero to the top preset.
    pub const DEFAULT: Self = Self {
        lower: Position::ZERO,
        upper: Level::TOP.position(),
    };

    /// Saturate `raw` into `[lower, upper]`.
    ///
    /// NaN saturates to `lower`.
    #[inline]
    pub fn clamp(&self, raw: Position) -> Position {
        let v = raw.value();
        if v.is_nan() || v < self.lower.value() {
            self.lower
        } else if v > self.upper.value() {
            self.upper
        } else {
            raw
        }
    }

    /// Whether `p` lies inside the range (inclusive).
    #[inline]
    pub fn contains(&self, p: Position) -> bool {
        p >= self.lower && p <= self.upper
    }
}

impl Default for TravelLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}
