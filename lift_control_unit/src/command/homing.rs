//! Homing supervision against a binary bottom-limit sensor.
//!
//! Establishes and preserves a trustworthy zero reference without any
//! operator action beyond requesting a re-home.
//!
//! ## Transition Table
//!
//! | State   | Limit contact                      | `request_rehome`       | Tick, no contact      |
//! |---------|------------------------------------|------------------------|-----------------------|
//! | Unhomed | → Homed, zero reference            | → Homing               | creep down            |
//! | Homing  | → Homed, zero reference, brake     | → Homing (idempotent)  | creep down            |
//! | Homed   | no-op                              | → Homing, clear target | profile or hold-brake |
//!
//! The brake pulse is only applied while actively seeking the limit. Once
//! homed, contact is ignored so the profile controller is never fought.

use lift_common::lift::homing::HomingState;

// ─── Homing Update ──────────────────────────────────────────────────

/// Result of feeding one limit-sensor reading to the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomingUpdate {
    /// No transition this cycle.
    Unchanged,
    /// Limit reached: caller must zero the position reference.
    Referenced {
        /// State the supervisor left.
        from: HomingState,
        /// Whether a neutral brake pulse is due (was actively homing).
        brake_pulse: bool,
    },
}

impl HomingUpdate {
    /// Whether the position reference must be reset to zero.
    #[inline]
    pub const fn zero_reference(&self) -> bool {
        matches!(self, Self::Referenced { .. })
    }
}

/// Pure transition on a limit-sensor reading.
#[inline]
pub const fn limit_transition(state: HomingState, at_limit: bool) -> (HomingState, HomingUpdate) {
    match (state, at_limit) {
        (HomingState::Unhomed, true) => (
            HomingState::Homed,
            HomingUpdate::Referenced {
                from: HomingState::Unhomed,
                brake_pulse: false,
            },
        ),
        (HomingState::Homing, true) => (
            HomingState::Homed,
            HomingUpdate::Referenced {
                from: HomingState::Homing,
                brake_pulse: true,
            },
        ),
        (s, _) => (s, HomingUpdate::Unchanged),
    }
}

// ─── Homing Supervisor ──────────────────────────────────────────────

/// Homing state machine for the lift.
#[derive(Debug, Clone)]
pub struct HomingSupervisor {
    state: HomingState,
}

impl HomingSupervisor {
    /// Create a supervisor in `Unhomed`.
    pub const fn new() -> Self {
        Self {
            state: HomingState::Unhomed,
        }
    }

    /// Current homing state.
    #[inline]
    pub const fn state(&self) -> HomingState {
        self.state
    }

    /// Whether the zero reference is trustworthy.
    #[inline]
    pub const fn is_homed(&self) -> bool {
        self.state.is_homed()
    }

    /// Explicit re-home request. Idempotent.
    ///
    /// Returns the state the supervisor left.
    pub fn request_rehome(&mut self) -> HomingState {
        let prev = self.state;
        self.state = HomingState::Homing;
        prev
    }

    /// Apply a transition produced by [`limit_transition`].
    ///
    /// `Referenced` always lands in `Homed`; `Unchanged` leaves the state alone.
    pub fn apply(&mut self, update: HomingUpdate) {
        if update.zero_reference() {
            self.state = HomingState::Homed;
        }
    }
}

impl Default for HomingSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use HomingState::*;

    /// Same path as the controller tick: pure transition, then apply.
    fn observe(sv: &mut HomingSupervisor, at_limit: bool) -> HomingUpdate {
        let (_, update) = limit_transition(sv.state(), at_limit);
        sv.apply(update);
        update
    }

    #[test]
    fn starts_unhomed() {
        let sv = HomingSupervisor::new();
        assert_eq!(sv.state(), Unhomed);
        assert!(!sv.is_homed());
    }

    #[test]
    fn unhomed_contact_references_without_brake() {
        let mut sv = HomingSupervisor::new();
        assert_eq!(
            observe(&mut sv, true),
            HomingUpdate::Referenced {
                from: Unhomed,
                brake_pulse: false
            }
        );
        assert_eq!(sv.state(), Homed);
    }

    #[test]
    fn homing_contact_references_with_brake() {
        let mut sv = HomingSupervisor::new();
        sv.request_rehome();
        assert_eq!(observe(&mut sv, false), HomingUpdate::Unchanged);
        assert_eq!(sv.state(), Homing);
        assert_eq!(
            observe(&mut sv, true),
            HomingUpdate::Referenced {
                from: Homing,
                brake_pulse: true
            }
        );
        assert_eq!(sv.state(), Homed);
    }

    #[test]
    fn homed_contact_is_noop() {
        let mut sv = HomingSupervisor::new();
        observe(&mut sv, true);
        let update = observe(&mut sv, true);
        assert_eq!(update, HomingUpdate::Unchanged);
        assert!(!update.zero_reference());
        assert_eq!(sv.state(), Homed);
    }

    #[test]
    fn rehome_is_idempotent() {
        let mut sv = HomingSupervisor::new();
        observe(&mut sv, true);
        assert_eq!(sv.request_rehome(), Homed);
        assert_eq!(sv.request_rehome(), Homing);
        assert_eq!(sv.state(), Homing);
    }

    #[test]
    fn no_contact_never_changes_state() {
        for s in [Unhomed, Homing, Homed] {
            assert_eq!(limit_transition(s, false), (s, HomingUpdate::Unchanged));
        }
    }

    #[test]
    fn apply_agrees_with_limit_transition() {
        for s in [Unhomed, Homing, Homed] {
            for at_limit in [false, true] {
                let (next, update) = limit_transition(s, at_limit);
                let mut sv = HomingSupervisor { state: s };
                sv.apply(update);
                assert_eq!(sv.state(), next, "{s:?} {at_limit}");
            }
        }
    }
}
