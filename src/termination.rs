//! Stop conditions shared by every strategy.
//!
//! All runners check the same four conditions once per iteration, at the
//! iteration boundary: iteration budget, stagnation of the best cost, a
//! wall-clock budget and an optional known target cost.

use crate::error::{Result, ScpError};
use std::fmt;
use std::time::{Duration, Instant};

/// Tolerance used when comparing a best cost against a target cost.
pub(crate) const COST_EPS: f64 = 1e-9;

/// Budget and early-exit parameters of a run.
///
/// # Examples
///
/// ```
/// use scp_heur::Termination;
///
/// let t = Termination::default()
///     .with_max_iterations(500)
///     .with_stagnation_limit(50)
///     .with_time_limit_ms(2_000)
///     .with_target_cost(187.0);
/// assert!(t.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Termination {
    /// Maximum number of iterations (generations for the GA). 0 runs no iteration.
    pub max_iterations: usize,

    /// Iterations without improvement of the best cost before stopping.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub stagnation_limit: usize,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked at the start of each iteration, so a run may overshoot by
    /// one iteration's worth of work.
    pub time_limit_ms: Option<u64>,

    /// Stop as soon as the best cost reaches this value (benchmarking with
    /// a known optimum).
    pub target_cost: Option<f64>,
}

impl Default for Termination {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            stagnation_limit: 0,
            time_limit_ms: None,
            target_cost: None,
        }
    }
}

impl Termination {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_stagnation_limit(mut self, n: usize) -> Self {
        self.stagnation_limit = n;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    pub fn with_target_cost(mut self, cost: f64) -> Self {
        self.target_cost = Some(cost);
        self
    }

    /// Validates the termination parameters.
    pub fn validate(&self) -> Result<()> {
        if self.time_limit_ms == Some(0) {
            return Err(ScpError::config("time_limit_ms must be positive or None"));
        }
        if let Some(target) = self.target_cost {
            if !target.is_finite() {
                return Err(ScpError::config("target_cost must be finite"));
            }
        }
        Ok(())
    }

    /// Returns the first stop condition that fires before iteration
    /// `iteration` (0-based) starts, if any.
    pub(crate) fn check(
        &self,
        iteration: usize,
        stagnation: usize,
        best_cost: f64,
        clock: &SearchClock,
    ) -> Option<StopReason> {
        if self.reached_target(best_cost) {
            return Some(StopReason::TargetReached);
        }
        if iteration >= self.max_iterations {
            return Some(StopReason::IterationLimit);
        }
        if self.stagnation_limit > 0 && stagnation >= self.stagnation_limit {
            return Some(StopReason::Stagnation);
        }
        if let Some(ms) = self.time_limit_ms {
            if clock.elapsed() >= Duration::from_millis(ms) {
                return Some(StopReason::TimeLimit);
            }
        }
        None
    }

    pub(crate) fn reached_target(&self, best_cost: f64) -> bool {
        self.target_cost
            .is_some_and(|target| best_cost <= target + COST_EPS)
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// The iteration budget was exhausted.
    IterationLimit,
    /// The best cost did not improve for `stagnation_limit` iterations.
    Stagnation,
    /// The wall-clock budget was exceeded.
    TimeLimit,
    /// The best cost reached the configured target.
    TargetReached,
    /// Lagrangian lower and upper bounds met.
    BoundGapClosed,
    /// Lagrangian subgradient vanished.
    ZeroSubgradient,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StopReason::IterationLimit => "iteration limit reached",
            StopReason::Stagnation => "no improvement within stagnation limit",
            StopReason::TimeLimit => "time limit reached",
            StopReason::TargetReached => "target cost reached",
            StopReason::BoundGapClosed => "lower and upper bounds met",
            StopReason::ZeroSubgradient => "subgradient vanished",
        };
        f.write_str(text)
    }
}

/// Wall clock of one run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchClock {
    start: Instant,
}

impl SearchClock {
    pub(crate) fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub(crate) fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}
