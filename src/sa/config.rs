//! SA configuration and cooling schedules.

use crate::error::{Result, ScpError};
use crate::termination::Termination;

/// Cooling schedule for temperature reduction.
///
/// The temperature of iteration `k` (0-based) is always `T0` for `k = 0`.
///
/// # References
///
/// - Logarithmic: Geman & Geman (1984), convergence in probability
/// - Geometric: standard textbook approach
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Logarithmic cooling: `T_k = T_0 · ln 2 / ln(k + 2)`.
    ///
    /// Slow; keeps accepting uphill moves for a long time.
    Logarithmic,

    /// Geometric (exponential) cooling: `T_k = T_0 · alpha^k`.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta · T_k)`.
    LundyMees {
        /// Cooling parameter, positive.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Logarithmic
    }
}

impl CoolingSchedule {
    /// Temperature of iteration `k` given the previous iteration's temperature.
    pub(crate) fn temperature(&self, initial: f64, k: usize, previous: f64) -> f64 {
        if k == 0 {
            return initial;
        }
        match *self {
            CoolingSchedule::Logarithmic => {
                initial * std::f64::consts::LN_2 / ((k + 2) as f64).ln()
            }
            CoolingSchedule::Geometric { alpha } => initial * alpha.powi(k as i32),
            CoolingSchedule::LundyMees { beta } => previous / (1.0 + beta * previous),
        }
    }
}

/// Configuration for Simulated Annealing over set selections.
///
/// # Examples
///
/// ```
/// use scp_heur::sa::{CoolingSchedule, SaConfig};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(10_000.0)
///     .with_cooling(CoolingSchedule::Logarithmic)
///     .with_max_iterations(5_000)
///     .with_stagnation_limit(1_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature. 0 turns the search into pure descent.
    pub initial_temperature: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Upper bound on the number of bits flipped per move.
    pub max_flips: usize,

    /// One extra flip per this many sets, up to `max_flips`.
    pub sets_per_flip: usize,

    /// Stop conditions.
    pub termination: Termination,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,

    /// Capture the current selection of every iteration in the trajectory.
    pub record_masks: bool,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 10_000.0,
            cooling: CoolingSchedule::default(),
            max_flips: 2,
            sets_per_flip: 50,
            termination: Termination::default().with_max_iterations(10_000),
            seed: None,
            record_masks: false,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_max_flips(mut self, n: usize) -> Self {
        self.max_flips = n;
        self
    }

    pub fn with_sets_per_flip(mut self, n: usize) -> Self {
        self.sets_per_flip = n;
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
        if !self.initial_temperature.is_finite() || self.initial_temperature < 0.0 {
            return Err(ScpError::config(
                "initial_temperature must be finite and non-negative",
            ));
        }
        if self.max_flips == 0 {
            return Err(ScpError::config("max_flips must be at least 1"));
        }
        if self.sets_per_flip == 0 {
            return Err(ScpError::config("sets_per_flip must be at least 1"));
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if alpha <= 0.0 || alpha >= 1.0 {
                    return Err(ScpError::config(format!(
                        "geometric alpha must be in (0, 1), got {alpha}"
                    )));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if beta <= 0.0 {
                    return Err(ScpError::config(format!(
                        "lundy-mees beta must be positive, got {beta}"
                    )));
                }
            }
            CoolingSchedule::Logarithmic => {}
        }
        self.termination.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.initial_temperature - 10_000.0).abs() < 1e-10);
        assert_eq!(config.cooling, CoolingSchedule::Logarithmic);
        assert_eq!(config.max_flips, 2);
        assert_eq!(config.termination.max_iterations, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_temperature_is_valid() {
        assert!(SaConfig::default()
            .with_initial_temperature(0.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_negative_temperature() {
        let config = SaConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_alpha() {
        let config = SaConfig::default().with_cooling(CoolingSchedule::Geometric { alpha: 1.5 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_beta() {
        let config = SaConfig::default().with_cooling(CoolingSchedule::LundyMees { beta: -1.0 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_flips() {
        assert!(SaConfig::default().with_max_flips(0).validate().is_err());
    }

    #[test]
    fn test_logarithmic_schedule() {
        let s = CoolingSchedule::Logarithmic;
        assert!((s.temperature(100.0, 0, 100.0) - 100.0).abs() < 1e-12);
        let t1 = s.temperature(100.0, 1, 100.0);
        assert!((t1 - 100.0 * 2f64.ln() / 3f64.ln()).abs() < 1e-12);
        let t10 = s.temperature(100.0, 10, t1);
        assert!(t10 < t1);
    }

    #[test]
    fn test_geometric_schedule() {
        let s = CoolingSchedule::Geometric { alpha: 0.5 };
        assert!((s.temperature(8.0, 3, 0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_lundy_mees_schedule() {
        let s = CoolingSchedule::LundyMees { beta: 1.0 };
        assert!((s.temperature(1.0, 1, 1.0) - 0.5).abs() < 1e-12);
    }
}
