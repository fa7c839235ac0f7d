//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::crossover::Crossover;
use super::schedule::Schedule;
use super::selection::Selection;
use crate::error::{Result, ScpError};
use crate::termination::Termination;

/// Penalty mode: part of every generation skips repair and is fined per
/// uncovered element instead.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Penalty {
    /// Fitness deducted per uncovered element.
    pub fine: f64,

    /// Fraction of the population size that skips repair, counted afresh
    /// for the initial population and for each generation's offspring.
    /// Must leave at least one repaired member.
    pub infeasible_share: f64,
}

impl Penalty {
    pub fn new(fine: f64, infeasible_share: f64) -> Self {
        Self {
            fine,
            infeasible_share,
        }
    }

    /// Number of chromosomes per batch created without repair.
    pub(crate) fn unrepaired_quota(&self, population_size: usize) -> usize {
        (self.infeasible_share * population_size as f64).ceil() as usize
    }
}

/// Configuration for the genetic algorithm.
///
/// # Defaults
///
/// ```
/// use scp_heur::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 20);
/// assert_eq!(config.termination.max_iterations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use scp_heur::ga::{Crossover, GaConfig, Penalty, Schedule, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(40)
///     .with_mutation_rate(0.3)
///     .with_selection(
///         Schedule::from_shares(&[(0.3, Selection::Proportional), (0.7, Selection::Elite)])
///             .unwrap(),
///     )
///     .with_crossover(Schedule::constant(Crossover::Uniform))
///     .with_penalty(Penalty::new(50.0, 0.25));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of chromosomes kept after each selection.
    pub population_size: usize,

    /// Probability that a child gets one random gene flipped.
    pub mutation_rate: f64,

    /// Selection scheme over run progress.
    pub selection: Schedule<Selection>,

    /// Crossover operator over run progress.
    pub crossover: Schedule<Crossover>,

    /// Optional penalty mode.
    pub penalty: Option<Penalty>,

    /// Stop conditions.
    pub termination: Termination,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,

    /// Capture the best feasible chromosome of every generation in the
    /// trajectory.
    pub record_masks: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            mutation_rate: 0.5,
            selection: Schedule::constant(Selection::Elite),
            crossover: Schedule::constant(Crossover::OnePoint),
            penalty: None,
            termination: Termination::default()
                .with_max_iterations(500)
                .with_stagnation_limit(50),
            seed: None,
            record_masks: false,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_selection(mut self, schedule: Schedule<Selection>) -> Self {
        self.selection = schedule;
        self
    }

    pub fn with_crossover(mut self, schedule: Schedule<Crossover>) -> Self {
        self.crossover = schedule;
        self
    }

    pub fn with_penalty(mut self, penalty: Penalty) -> Self {
        self.penalty = Some(penalty);
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

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_mask_recording(mut self, record: bool) -> Self {
        self.record_masks = record;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(ScpError::config("population_size must be at least 2"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ScpError::config("mutation_rate must be in [0.0, 1.0]"));
        }
        if let Some(penalty) = &self.penalty {
            if !penalty.fine.is_finite() || penalty.fine < 0.0 {
                return Err(ScpError::config("penalty fine must be non-negative"));
            }
            if !(0.0..1.0).contains(&penalty.infeasible_share)
                || penalty.unrepaired_quota(self.population_size) >= self.population_size
            {
                return Err(ScpError::config(
                    "penalty infeasible_share must leave at least one repaired chromosome",
                ));
            }
        }
        self.termination.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 20);
        assert_eq!(config.selection.at(0.5), Selection::Elite);
        assert_eq!(config.crossover.at(0.5), Crossover::OnePoint);
        assert!(config.penalty.is_none());
        assert_eq!(config.termination.stagnation_limit, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_population_size() {
        assert!(GaConfig::default()
            .with_population_size(1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_mutation_rate() {
        assert!(GaConfig::default()
            .with_mutation_rate(1.5)
            .validate()
            .is_err());
    }

    #[test]
    fn test_unrepaired_quota_rounds_up() {
        assert_eq!(Penalty::new(1.0, 0.25).unrepaired_quota(10), 3);
        assert_eq!(Penalty::new(1.0, 0.0).unrepaired_quota(10), 0);
    }

    #[test]
    fn test_validate_penalty_share() {
        let base = GaConfig::default().with_population_size(20);
        assert!(base.clone().with_penalty(Penalty::new(10.0, 0.5)).validate().is_ok());
        assert!(base.clone().with_penalty(Penalty::new(10.0, 1.0)).validate().is_err());
        // ceil(0.99 · 20) = 20 leaves nothing repaired
        assert!(base.clone().with_penalty(Penalty::new(10.0, 0.99)).validate().is_err());
        assert!(base.with_penalty(Penalty::new(-1.0, 0.5)).validate().is_err());
    }
}
