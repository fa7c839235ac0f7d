//! Two-phase chaining.

use super::config::HybridConfig;
use super::strategy::{StageOutcome, Strategy};
use crate::candidate::Candidate;
use crate::error::{Result, ScpError};
use crate::instance::Instance;
use crate::random::create_rng;
use crate::termination::{SearchClock, StopReason};
use crate::trajectory::Trajectory;
use rand::Rng;

/// Summary of one strategy run inside a chain.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageSummary {
    pub name: String,
    pub best_cost: f64,
    pub iterations: usize,
    pub stop_reason: StopReason,
    pub elapsed_secs: f64,
}

/// Result of a hybrid run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HybridResult {
    /// Best cover of the last phase.
    pub best: Candidate,

    /// Cost of the best cover.
    pub best_cost: f64,

    /// One entry per strategy run, in execution order.
    pub stages: Vec<StageSummary>,

    /// First-phase trajectory followed by the second phase's, with the
    /// second phase's timestamps shifted past the first.
    pub trajectory: Trajectory,
}

/// Chains strategies, warm-starting each phase from the previous one.
///
/// # Examples
///
/// ```
/// use scp_heur::ga::GaConfig;
/// use scp_heur::hybrid::{HybridConfig, HybridRunner};
/// use scp_heur::sa::SaConfig;
/// use scp_heur::Instance;
///
/// let instance = Instance::new(
///     vec![vec![true, false, true], vec![false, true, true]],
///     vec![1.0, 1.0, 3.0],
/// )
/// .unwrap();
/// let ga = GaConfig::default().with_max_iterations(10);
/// let sa = SaConfig::default().with_max_iterations(50);
/// let config = HybridConfig::default().with_seed(7);
///
/// let result = HybridRunner::chain(&instance, &ga, &sa, &config).unwrap();
/// assert_eq!(result.stages.len(), 2);
/// assert!(instance.is_cover(result.best.selection()));
/// ```
pub struct HybridRunner;

impl HybridRunner {
    /// Runs `first`, then `second` seeded with the best cover of `first`.
    pub fn chain<A, B>(instance: &Instance, first: &A, second: &B, config: &HybridConfig) -> Result<HybridResult>
    where
        A: Strategy + Clone,
        B: Strategy + Clone,
    {
        let mut rng = create_rng(config.seed);
        Self::chain_with_rng(instance, first, second, config, &mut rng)
    }

    /// [`chain`](Self::chain) with an injected generator.
    pub fn chain_with_rng<A, B, R>(
        instance: &Instance,
        first: &A,
        second: &B,
        config: &HybridConfig,
        rng: &mut R,
    ) -> Result<HybridResult>
    where
        A: Strategy + Clone,
        B: Strategy + Clone,
        R: Rng,
    {
        Self::restart_chain_with_rng(instance, first, 1, second, config, rng)
    }

    /// Runs `first` `restarts` times independently, then `second` seeded
    /// with every restart's best cover.
    ///
    /// With a time budget, each restart gets `1 / restarts` of the first
    /// phase. The reported trajectory starts with the best restart's.
    pub fn restart_chain<A, B>(
        instance: &Instance,
        first: &A,
        restarts: usize,
        second: &B,
        config: &HybridConfig,
    ) -> Result<HybridResult>
    where
        A: Strategy + Clone,
        B: Strategy + Clone,
    {
        let mut rng = create_rng(config.seed);
        Self::restart_chain_with_rng(instance, first, restarts, second, config, &mut rng)
    }

    /// [`restart_chain`](Self::restart_chain) with an injected generator.
    pub fn restart_chain_with_rng<A, B, R>(
        instance: &Instance,
        first: &A,
        restarts: usize,
        second: &B,
        config: &HybridConfig,
        rng: &mut R,
    ) -> Result<HybridResult>
    where
        A: Strategy + Clone,
        B: Strategy + Clone,
        R: Rng,
    {
        config.validate()?;
        if restarts == 0 {
            return Err(ScpError::config("restarts must be at least 1"));
        }

        let (first, second) = match config.phase_budgets() {
            Some((a, b)) => (
                first.with_time_budget(a / restarts as u64),
                second.with_time_budget(b),
            ),
            None => (first.clone(), second.clone()),
        };
        log::debug!(
            "hybrid: {} x{restarts} -> {} (budgets {:?} / {:?} ms)",
            first.name(),
            second.name(),
            first.termination().time_limit_ms,
            second.termination().time_limit_ms
        );

        let mut stages = Vec::with_capacity(restarts + 1);
        let mut seeds = Vec::with_capacity(restarts);
        let mut leader: Option<StageOutcome> = None;
        for _ in 0..restarts {
            let outcome = run_stage(&first, instance, &[], rng, &mut stages)?;
            seeds.push(outcome.best.selection().to_vec());
            if leader
                .as_ref()
                .map_or(true, |l| outcome.best.cost() < l.best.cost())
            {
                leader = Some(outcome);
            }
        }

        let last = run_stage(&second, instance, &seeds, rng, &mut stages)?;
        let mut trajectory = leader.map(|l| l.trajectory).unwrap_or_default();
        trajectory.extend_shifted(&last.trajectory);

        log::debug!("hybrid: done, best={}", last.best.cost());
        Ok(HybridResult {
            best_cost: last.best.cost(),
            best: last.best,
            stages,
            trajectory,
        })
    }
}

fn run_stage<S: Strategy, R: Rng>(
    strategy: &S,
    instance: &Instance,
    seeds: &[Vec<bool>],
    rng: &mut R,
    stages: &mut Vec<StageSummary>,
) -> Result<StageOutcome> {
    let clock = SearchClock::start();
    let outcome = strategy.run_from(instance, seeds, rng)?;
    stages.push(StageSummary {
        name: strategy.name().to_string(),
        best_cost: outcome.best.cost(),
        iterations: outcome.iterations,
        stop_reason: outcome.stop_reason,
        elapsed_secs: clock.elapsed_secs(),
    });
    Ok(outcome)
}
