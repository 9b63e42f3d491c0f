//! Periodic cycle runner.
//!
//! Drives the controller at a fixed cadence on one thread, so every public
//! API call and every tick are serialized. Move requests from other
//! callbacks go through a single pending slot (last write wins) that is
//! drained at the start of a cycle.
//!
//! ## Cycle
//!
//! ```text
//! ┌─ pending move (if homed) ─→ tick ─→ stats ─→ telemetry ─→ sleep ─┐
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Overruns are counted and logged, never fatal. A driver error ends the
//! loop after the hardware is put in its safe state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use lift_common::hal::driver::{LimitSensor, MotorDriver};
use lift_common::lift::command::HardwareCommand;
use lift_common::lift::config::ControlConfig;
use tracing::{debug, error, info, warn};

use crate::command::resolver::MoveRequest;
use crate::controller::LiftController;
use crate::error::ControlError;

// ─── Cycle Statistics ───────────────────────────────────────────────

/// Cycle timing statistics.
#[derive(Debug, Clone, Copy)]
pub struct CycleStats {
    /// Total cycles executed.
    pub cycle_count: u64,
    /// Last cycle duration [ns].
    pub last_cycle_ns: i64,
    /// Minimum cycle duration [ns].
    pub min_cycle_ns: i64,
    /// Maximum cycle duration [ns].
    pub max_cycle_ns: i64,
    /// Running sum for average computation.
    pub sum_cycle_ns: i64,
    /// Cycles that exceeded the configured period.
    pub overruns: u64,
}

impl CycleStats {
    pub const fn new() -> Self {
        Self {
            cycle_count: 0,
            last_cycle_ns: 0,
            min_cycle_ns: i64::MAX,
            max_cycle_ns: 0,
            sum_cycle_ns: 0,
            overruns: 0,
        }
    }

    /// Record a cycle duration.
    #[inline]
    pub fn record(&mut self, duration_ns: i64) {
        self.cycle_count += 1;
        self.last_cycle_ns = duration_ns;
        self.min_cycle_ns = self.min_cycle_ns.min(duration_ns);
        self.max_cycle_ns = self.max_cycle_ns.max(duration_ns);
        self.sum_cycle_ns = self.sum_cycle_ns.saturating_add(duration_ns);
    }

    /// Average cycle time [ns] (0 if no cycles).
    #[inline]
    pub fn avg_cycle_ns(&self) -> i64 {
        if self.cycle_count == 0 {
            0
        } else {
            self.sum_cycle_ns / self.cycle_count as i64
        }
    }
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Cycle Runner ───────────────────────────────────────────────────

/// Fixed-rate driver of a [`LiftController`].
pub struct CycleRunner<D: MotorDriver, S: LimitSensor> {
    controller: LiftController<D, S>,
    cycle_time: Duration,
    telemetry_interval: u32,
    running: Arc<AtomicBool>,
    max_cycles: Option<u64>,
    pending: Option<MoveRequest>,
    stats: CycleStats,
}

impl<D: MotorDriver, S: LimitSensor> CycleRunner<D, S> {
    /// Wrap a controller; the loop runs while `running` is set.
    pub fn new(
        controller: LiftController<D, S>,
        control: &ControlConfig,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self {
            controller,
            cycle_time: control.cycle_time(),
            telemetry_interval: control.telemetry_interval.max(1),
            running,
            max_cycles: None,
            pending: None,
            stats: CycleStats::new(),
        }
    }

    /// Stop after `n` cycles.
    pub fn with_max_cycles(mut self, n: u64) -> Self {
        self.max_cycles = Some(n);
        self
    }

    /// Queue a move for the first cycle on which the lift is homed.
    ///
    /// A later request replaces an earlier one that has not been applied.
    pub fn request_move(&mut self, request: impl Into<MoveRequest>) {
        self.pending = Some(request.into());
    }

    /// Move queued but not yet applied.
    pub fn pending_move(&self) -> Option<MoveRequest> {
        self.pending
    }

    pub fn controller(&self) -> &LiftController<D, S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut LiftController<D, S> {
        &mut self.controller
    }

    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }

    /// One cycle: apply the pending move, tick, emit telemetry.
    pub fn step(&mut self) -> Result<HardwareCommand, ControlError> {
        let start = Instant::now();

        if self.controller.is_homed() {
            if let Some(request) = self.pending.take() {
                self.controller.move_to(request);
            }
        }

        let command = self.controller.tick()?;

        self.stats.record(start.elapsed().as_nanos() as i64);
        if self.stats.cycle_count % u64::from(self.telemetry_interval) == 0 {
            self.controller.snapshot(self.stats.cycle_count).log();
        }
        Ok(command)
    }

    /// Run `n` cycles back to back without pacing.
    ///
    /// The hardware is left in whatever state the last tick put it in.
    pub fn run_cycles(&mut self, n: u64) -> Result<(), ControlError> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// Paced loop until `running` is cleared or the cycle budget is spent.
    ///
    /// Always ends with `shutdown()`. A tick error is returned after the
    /// shutdown attempt.
    pub fn run(&mut self) -> Result<CycleStats, ControlError> {
        info!(
            cycle_time_us = self.cycle_time.as_micros() as u64,
            max_cycles = ?self.max_cycles,
            "Entering control loop"
        );

        let result = self.run_loop();
        if let Err(e) = &result {
            error!("Control loop stopped: {e}");
        }

        let shutdown = self.controller.shutdown();
        info!(
            cycles = self.stats.cycle_count,
            avg_ns = self.stats.avg_cycle_ns(),
            max_ns = self.stats.max_cycle_ns,
            overruns = self.stats.overruns,
            "Control loop exited"
        );

        result?;
        shutdown?;
        Ok(self.stats)
    }

    fn run_loop(&mut self) -> Result<(), ControlError> {
        while self.running.load(Ordering::SeqCst) {
            if self
                .max_cycles
                .is_some_and(|max| self.stats.cycle_count >= max)
            {
                debug!("Cycle budget exhausted");
                break;
            }

            let start = Instant::now();
            self.step()?;

            let elapsed = start.elapsed();
            if let Some(remaining) = self.cycle_time.checked_sub(elapsed) {
                std::thread::sleep(remaining);
            } else {
                self.stats.overruns += 1;
                warn!(
                    cycle = self.stats.cycle_count,
                    elapsed_us = elapsed.as_micros() as u64,
                    "Cycle overrun"
                );
            }
        }
        Ok(())
    }
}
