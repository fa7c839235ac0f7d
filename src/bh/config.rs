//! Black-hole search configuration.

use crate::error::{Result, ScpError};
use crate::termination::Termination;

/// How a star is tested against the event horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizonTest {
    /// Absorb when a uniform draw falls below the radius.
    #[default]
    Probabilistic,
    /// Absorb when the Euclidean distance to the black hole, divided by
    /// `sqrt(num_sets)`, falls below the radius.
    Euclidean,
}

/// Configuration for the black-hole search.
///
/// # Examples
///
/// ```
/// use scp_heur::bh::{BhConfig, HorizonTest};
///
/// let config = BhConfig::default()
///     .with_star_count(30)
///     .with_horizon(HorizonTest::Euclidean)
///     .with_resize_threshold(50)
///     .with_max_iterations(500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BhConfig {
    /// Initial number of stars (candidates).
    pub star_count: usize,

    /// Event-horizon test.
    pub horizon: HorizonTest,

    /// Iterations without improvement after which the population is
    /// resized every iteration until the black hole improves.
    ///
    /// Set to 0 to keep the population size fixed.
    pub resize_threshold: usize,

    /// Divisor of the moved coordinate before the logistic squashing.
    pub sigmoid_scale: f64,

    /// Stop conditions.
    pub termination: Termination,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,

    /// Capture the black hole of every iteration in the trajectory.
    pub record_masks: bool,
}

impl Default for BhConfig {
    fn default() -> Self {
        Self {
            star_count: 20,
            horizon: HorizonTest::default(),
            resize_threshold: 100,
            sigmoid_scale: 3.0,
            termination: Termination::default(),
            seed: None,
            record_masks: false,
        }
    }
}

impl BhConfig {
    pub fn with_star_count(mut self, n: usize) -> Self {
        self.star_count = n;
        self
    }

    pub fn with_horizon(mut self, horizon: HorizonTest) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_resize_threshold(mut self, n: usize) -> Self {
        self.resize_threshold = n;
        self
    }

    pub fn with_sigmoid_scale(mut self, scale: f64) -> Self {
        self.sigmoid_scale = scale;
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
        if self.star_count == 0 {
            return Err(ScpError::config("star_count must be at least 1"));
        }
        if !self.sigmoid_scale.is_finite() || self.sigmoid_scale <= 0.0 {
            return Err(ScpError::config("sigmoid_scale must be positive"));
        }
        self.termination.validate()
    }
}
