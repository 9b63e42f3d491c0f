//! Feedforward models.
//!
//! Gravity/friction compensation as a function of measured position,
//! added to every motion-profile command. Zero gains disable each term.

use lift_common::lift::config::FeedforwardConfig;
use lift_common::lift::position::Position;

/// Pluggable feedforward law.
pub trait Feedforward: Send {
    /// Compensation for the mechanism at `measured`.
    fn compute(&self, measured: Position) -> f64;
}

/// No compensation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroFeedforward;

impl Feedforward for ZeroFeedforward {
    #[inline]
    fn compute(&self, _measured: Position) -> f64 {
        0.0
    }
}

/// `gravity + per_position × measured`.
#[derive(Debug, Clone, Copy)]
pub struct LinearFeedforward {
    /// Constant gravity term.
    pub gravity: f64,
    /// Slope per sensor unit.
    pub per_position: f64,
}

impl LinearFeedforward {
    pub const fn new(gravity: f64, per_position: f64) -> Self {
        Self {
            gravity,
            per_position,
        }
    }
}

impl Feedforward for LinearFeedforward {
    #[inline]
    fn compute(&self, measured: Position) -> f64 {
        let mut output = 0.0;

        if self.gravity != 0.0 {
            output += self.gravity;
        }

        if self.per_position != 0.0 {
            output += self.per_position * measured.value();
        }

        output
    }
}

impl<F> Feedforward for F
where
    F: Fn(Position) -> f64 + Send,
{
    #[inline]
    fn compute(&self, measured: Position) -> f64 {
        self(measured)
    }
}

/// Build the configured model; all-zero terms yield `ZeroFeedforward`.
pub fn from_config(config: &FeedforwardConfig) -> Box<dyn Feedforward> {
    if config.gravity == 0.0 && config.per_position == 0.0 {
        Box::new(ZeroFeedforward)
    } else {
        Box::new(LinearFeedforward::new(config.gravity, config.per_position))
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
