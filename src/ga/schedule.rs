//! Operator schedules over the progress of a run.

use crate::error::{Result, ScpError};

/// A piecewise-constant choice of operator over run progress in `[0, 1]`.
///
/// Each phase is a `(start_fraction, operator)` pair; the operator of the
/// last phase whose start is at or before the current progress applies.
///
/// # Examples
///
/// ```
/// use scp_heur::ga::{Schedule, Selection};
///
/// // 20% random, 20% proportional, 60% elite
/// let schedule = Schedule::from_shares(&[
///     (0.2, Selection::Random),
///     (0.2, Selection::Proportional),
///     (0.6, Selection::Elite),
/// ])
/// .unwrap();
///
/// assert_eq!(schedule.at(0.1), Selection::Random);
/// assert_eq!(schedule.at(0.3), Selection::Proportional);
/// assert_eq!(schedule.at(0.9), Selection::Elite);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule<T> {
    phases: Vec<(f64, T)>,
}

impl<T: Copy> Schedule<T> {
    /// A single operator for the whole run.
    pub fn constant(op: T) -> Self {
        Self {
            phases: vec![(0.0, op)],
        }
    }

    /// Builds a schedule from explicit `(start_fraction, operator)` phases.
    ///
    /// Starts must be ascending, lie in `[0, 1]` and the first must be 0.
    pub fn new(phases: Vec<(f64, T)>) -> Result<Self> {
        match phases.first() {
            None => return Err(ScpError::config("schedule needs at least one phase")),
            Some(&(start, _)) if start != 0.0 => {
                return Err(ScpError::config("first schedule phase must start at 0"))
            }
            _ => {}
        }
        if phases.iter().any(|&(s, _)| !(0.0..=1.0).contains(&s)) {
            return Err(ScpError::config("schedule starts must lie in [0, 1]"));
        }
        if phases.windows(2).any(|w| w[1].0 < w[0].0) {
            return Err(ScpError::config("schedule starts must be ascending"));
        }
        Ok(Self { phases })
    }

    /// Builds a schedule from consecutive `(share, operator)` pairs.
    ///
    /// Shares are fractions of the run; zero shares are skipped and the
    /// last non-empty phase extends to the end of the run.
    pub fn from_shares(shares: &[(f64, T)]) -> Result<Self> {
        if shares.iter().any(|&(share, _)| !share.is_finite() || share < 0.0) {
            return Err(ScpError::config("schedule shares must be non-negative"));
        }
        let total: f64 = shares.iter().map(|&(share, _)| share).sum();
        if total > 1.0 + 1e-9 {
            return Err(ScpError::config(format!(
                "schedule shares sum to {total}, more than 1"
            )));
        }

        let mut start = 0.0;
        let mut phases = Vec::with_capacity(shares.len());
        for &(share, op) in shares {
            if share > 0.0 {
                phases.push((start, op));
                start += share;
            }
        }
        Self::new(phases)
    }

    /// Operator at `progress` (fraction of the iteration budget used).
    pub fn at(&self, progress: f64) -> T {
        self.phases
            .iter()
            .take_while(|&&(start, _)| start <= progress)
            .last()
            .map_or(self.phases[0].1, |&(_, op)| op)
    }

    pub fn phases(&self) -> &[(f64, T)] {
        &self.phases
    }
}
