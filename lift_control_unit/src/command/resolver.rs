//! Target resolution: raw requests → clamped, safe positions.
//!
//! Out-of-range input saturates to the nearest travel limit. Saturation is
//! the defined policy, never an error.

use lift_common::consts::DEFAULT_METERS_PER_UNIT;
use lift_common::lift::level::Level;
use lift_common::lift::position::{Position, TravelLimits};

/// A move request from an operator binding or dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveRequest {
    /// Absolute position [sensor units].
    Absolute(Position),
    /// Named preset.
    Preset(Level),
    /// Delta from the current target (or measured position).
    Relative(f64),
    /// Carriage height above the homed zero [m].
    Height(f64),
}

impl From<Position> for MoveRequest {
    fn from(p: Position) -> Self {
        Self::Absolute(p)
    }
}

impl From<Level> for MoveRequest {
    fn from(level: Level) -> Self {
        Self::Preset(level)
    }
}

/// Clamps requests into the travel range.
#[derive(Debug, Clone, Copy)]
pub struct TargetResolver {
    limits: TravelLimits,
    /// Height per sensor unit [m], for `MoveRequest::Height`.
    meters_per_unit: f64,
}

impl TargetResolver {
    pub const fn new(limits: TravelLimits, meters_per_unit: f64) -> Self {
        Self {
            limits,
            meters_per_unit,
        }
    }

    #[inline]
    pub const fn limits(&self) -> TravelLimits {
        self.limits
    }

    #[inline]
    pub const fn meters_per_unit(&self) -> f64 {
        self.meters_per_unit
    }

    /// Saturate a raw target into `[lower, upper]`.
    #[inline]
    pub fn resolve(&self, raw: Position) -> Position {
        self.limits.clamp(raw)
    }

    /// `resolve(base + delta)` where base is the current target if set,
    /// else the measured position, else zero.
    pub fn resolve_relative(
        &self,
        delta: f64,
        target: Option<Position>,
        measured: Option<Position>,
    ) -> Position {
        let base = target.or(measured).unwrap_or(Position::ZERO);
        self.resolve(base.offset(delta))
    }

    /// Preset lookup, still passed through `resolve`.
    #[inline]
    pub fn resolve_preset(&self, level: Level) -> Position {
        self.resolve(level.position())
    }

    /// Convert a carriage height to sensor units, then `resolve`.
    #[inline]
    pub fn resolve_height(&self, meters: f64) -> Position {
        self.resolve(Position::from_height(meters, self.meters_per_unit))
    }

    /// Resolve any request kind.
    pub fn resolve_request(
        &self,
        request: MoveRequest,
        target: Option<Position>,
        measured: Option<Position>,
    ) -> Position {
        match request {
            MoveRequest::Absolute(p) => self.resolve(p),
            MoveRequest::Preset(level) => self.resolve_preset(level),
            MoveRequest::Relative(delta) => self.resolve_relative(delta, target, measured),
            MoveRequest::Height(meters) => self.resolve_height(meters),
        }
    }
}

impl Default for TargetResolver {
    fn default() -> Self {
        Self::new(TravelLimits::DEFAULT, DEFAULT_METERS_PER_UNIT)
    }
}
