//! Interference-band advisory.
//!
//! When a newly accepted target crosses the boundary of another mechanism's
//! working envelope, the operator gets a single warning. This is telemetry
//! only: it never blocks or delays the motion command.

use lift_common::lift::position::Position;
use serde::Serialize;
use tracing::warn;

/// Advisory raised for a band-crossing move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InterferenceWarning {
    /// Measured position when the move was accepted.
    pub from: Position,
    /// Accepted target.
    pub to: Position,
    /// Band boundary that is crossed.
    pub threshold: Position,
}

impl InterferenceWarning {
    /// Whether the move goes up through the boundary.
    #[inline]
    pub fn is_rising(&self) -> bool {
        self.to > self.from
    }
}

/// Boundary of another mechanism's envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterferenceBand {
    threshold: Position,
}

impl InterferenceBand {
    pub const fn new(threshold: Position) -> Self {
        Self { threshold }
    }

    /// Warning if `from → to` crosses the boundary in either direction.
    pub fn crossing(&self, from: Position, to: Position) -> Option<InterferenceWarning> {
        let t = self.threshold;
        let crosses = (from < t && to > t) || (from > t && to < t);
        crosses.then_some(InterferenceWarning {
            from,
            to,
            threshold: t,
        })
    }
}

/// Receiver for operator-facing advisories.
pub trait OperatorNotifier: Send {
    fn notify(&mut self, warning: &InterferenceWarning);
}

/// Logs advisories as `warn!` events.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl OperatorNotifier for TracingNotifier {
    fn notify(&mut self, warning: &InterferenceWarning) {
        warn!(
            from = warning.from.value(),
            to = warning.to.value(),
            threshold = warning.threshold.value(),
            "lift move crosses interference band ({})",
            if warning.is_rising() { "rising" } else { "falling" }
        );
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
