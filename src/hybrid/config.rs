//! Hybrid orchestration configuration.

use crate::error::{Result, ScpError};

/// Configuration for chaining two strategies.
///
/// # Examples
///
/// ```
/// use scp_heur::hybrid::HybridConfig;
///
/// // 10 s in total, 30% for the first phase
/// let config = HybridConfig::default()
///     .with_time_limit_ms(10_000)
///     .with_first_share(0.3)
///     .with_seed(42);
/// assert_eq!(config.phase_budgets(), Some((3_000, 7_000)));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HybridConfig {
    /// Total wall-clock budget split between the phases.
    ///
    /// `None` leaves each strategy's own termination untouched.
    pub time_limit_ms: Option<u64>,

    /// Fraction of the budget given to the first phase (0.0–1.0 exclusive).
    pub first_share: f64,

    /// Random seed for the single generator threaded through every stage.
    pub seed: Option<u64>,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: None,
            first_share: 0.5,
            seed: None,
        }
    }
}

impl HybridConfig {
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    pub fn with_first_share(mut self, share: f64) -> Self {
        self.first_share = share;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// `(first, second)` phase budgets in milliseconds.
    pub fn phase_budgets(&self) -> Option<(u64, u64)> {
        self.time_limit_ms.map(|total| {
            let first = (total as f64 * self.first_share).round() as u64;
            (first, total.saturating_sub(first))
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.first_share > 0.0 && self.first_share < 1.0) {
            return Err(ScpError::config("first_share must be in (0.0, 1.0)"));
        }
        if self.time_limit_ms == Some(0) {
            return Err(ScpError::config("time_limit_ms must be positive or None"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HybridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.phase_budgets(), None);
    }

    #[test]
    fn test_even_split() {
        let config = HybridConfig::default().with_time_limit_ms(1001);
        assert_eq!(config.phase_budgets(), Some((501, 500)));
    }

    #[test]
    fn test_validate_share() {
        assert!(HybridConfig::default().with_first_share(0.0).validate().is_err());
        assert!(HybridConfig::default().with_first_share(1.0).validate().is_err());
        assert!(HybridConfig::default().with_time_limit_ms(0).validate().is_err());
    }
}
