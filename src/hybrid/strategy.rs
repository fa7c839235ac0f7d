//! The seam between the orchestrator and the four strategies.

use crate::bh::{BhConfig, BhRunner};
use crate::candidate::Candidate;
use crate::error::Result;
use crate::ga::{GaConfig, GaRunner};
use crate::instance::Instance;
use crate::lagrangian::{LagrangianConfig, LagrangianRunner};
use crate::sa::{SaConfig, SaRunner};
use crate::termination::{StopReason, Termination};
use crate::trajectory::Trajectory;
use rand::Rng;

/// What one strategy run hands back to the orchestrator.
#[derive(Debug, Clone)]
pub struct StageOutcome {
    pub best: Candidate,
    pub iterations: usize,
    pub stop_reason: StopReason,
    pub trajectory: Trajectory,
}

/// A search strategy that can be chained.
///
/// Implemented by every strategy configuration: the configuration *is* the
/// strategy, and running it with seeds is a warm start.
pub trait Strategy {
    /// Short name used in logs and stage summaries.
    fn name(&self) -> &'static str;

    fn termination(&self) -> &Termination;

    fn termination_mut(&mut self) -> &mut Termination;

    /// Runs the strategy, warm-started from `seeds`.
    fn run_from<R: Rng>(
        &self,
        instance: &Instance,
        seeds: &[Vec<bool>],
        rng: &mut R,
    ) -> Result<StageOutcome>;

    /// A copy whose wall-clock budget is `ms` (at least 1 ms).
    fn with_time_budget(&self, ms: u64) -> Self
    where
        Self: Clone,
    {
        let mut copy = self.clone();
        copy.termination_mut().time_limit_ms = Some(ms.max(1));
        copy
    }
}

impl Strategy for SaConfig {
    fn name(&self) -> &'static str {
        "sa"
    }

    fn termination(&self) -> &Termination {
        &self.termination
    }

    fn termination_mut(&mut self) -> &mut Termination {
        &mut self.termination
    }

    fn run_from<R: Rng>(&self, instance: &Instance, seeds: &[Vec<bool>], rng: &mut R) -> Result<StageOutcome> {
        let r = SaRunner::run_with_rng(instance, self, seeds, rng)?;
        Ok(StageOutcome {
            best: r.best,
            iterations: r.iterations,
            stop_reason: r.stop_reason,
            trajectory: r.trajectory,
        })
    }
}

impl Strategy for BhConfig {
    fn name(&self) -> &'static str {
        "bh"
    }

    fn termination(&self) -> &Termination {
        &self.termination
    }

    fn termination_mut(&mut self) -> &mut Termination {
        &mut self.termination
    }

    fn run_from<R: Rng>(&self, instance: &Instance, seeds: &[Vec<bool>], rng: &mut R) -> Result<StageOutcome> {
        let r = BhRunner::run_with_rng(instance, self, seeds, rng)?;
        Ok(StageOutcome {
            best: r.best,
            iterations: r.iterations,
            stop_reason: r.stop_reason,
            trajectory: r.trajectory,
        })
    }
}

impl Strategy for GaConfig {
    fn name(&self) -> &'static str {
        "ga"
    }

    fn termination(&self) -> &Termination {
        &self.termination
    }

    fn termination_mut(&mut self) -> &mut Termination {
        &mut self.termination
    }

    fn run_from<R: Rng>(&self, instance: &Instance, seeds: &[Vec<bool>], rng: &mut R) -> Result<StageOutcome> {
        let r = GaRunner::run_with_rng(instance, self, seeds, rng)?;
        Ok(StageOutcome {
            best: r.best,
            iterations: r.generations,
            stop_reason: r.stop_reason,
            trajectory: r.trajectory,
        })
    }
}

impl Strategy for LagrangianConfig {
    fn name(&self) -> &'static str {
        "lagrangian"
    }

    fn termination(&self) -> &Termination {
        &self.termination
    }

    fn termination_mut(&mut self) -> &mut Termination {
        &mut self.termination
    }

    /// Deterministic: `rng` is not drawn from.
    fn run_from<R: Rng>(&self, instance: &Instance, seeds: &[Vec<bool>], _rng: &mut R) -> Result<StageOutcome> {
        let r = LagrangianRunner::run_from(instance, self, seeds)?;
        Ok(StageOutcome {
            best: r.best,
            iterations: r.iterations,
            stop_reason: r.stop_reason,
            trajectory: r.trajectory,
        })
    }
}
