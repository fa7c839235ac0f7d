//! Lagrangian heuristic configuration.

use crate::error::{Result, ScpError};
use crate::termination::Termination;

/// Configuration for the Lagrangian heuristic.
///
/// The heuristic is deterministic, so there is no seed.
///
/// # Examples
///
/// ```
/// use scp_heur::lagrangian::LagrangianConfig;
///
/// let config = LagrangianConfig::default()
///     .with_step_factor(1.5)
///     .with_step_decay_interval(20)
///     .with_max_iterations(300);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LagrangianConfig {
    /// Initial step-size factor `f` of the Polyak step
    /// `f · (margin · z_ub - z_lb) / Σ g²`.
    pub step_factor: f64,

    /// Iterations without a new best lower bound after which `f` is halved.
    ///
    /// Set to 0 to keep `f` fixed.
    pub step_decay_interval: usize,

    /// Multiplier applied to the upper bound in the step numerator.
    pub bound_margin: f64,

    /// Stop conditions. Stagnation counts iterations without a cheaper cover.
    pub termination: Termination,

    /// Capture the primal cover of every iteration in the trajectory.
    pub record_masks: bool,
}

impl Default for LagrangianConfig {
    fn default() -> Self {
        Self {
            step_factor: 2.0,
            step_decay_interval: 30,
            bound_margin: 1.05,
            termination: Termination::default(),
            record_masks: false,
        }
    }
}

impl LagrangianConfig {
    pub fn with_step_factor(mut self, f: f64) -> Self {
        self.step_factor = f;
        self
    }

    pub fn with_step_decay_interval(mut self, n: usize) -> Self {
        self.step_decay_interval = n;
        self
    }

    pub fn with_bound_margin(mut self, margin: f64) -> Self {
        self.bound_margin = margin;
        self
    }

    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.termination.max_iterations = n;
        self
    }

    pub fn with_stagnation_limit(mut self, n: usize) -> Self {
        self.termination.stagnation_limit = n;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.termination.time_limit_ms = Some(ms);
        self
    }

    pub fn with_target_cost(mut self, cost: f64) -> Self {
        self.termination.target_cost = Some(cost);
        self
    }

    pub fn with_mask_recording(mut self, record: bool) -> Self {
        self.record_masks = record;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.step_factor.is_finite() || self.step_factor <= 0.0 {
            return Err(ScpError::config("step_factor must be positive"));
        }
        if !self.bound_margin.is_finite() || self.bound_margin < 1.0 {
            return Err(ScpError::config("bound_margin must be at least 1.0"));
        }
        self.termination.validate()
    }
}
