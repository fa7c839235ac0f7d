//! Subgradient loop.

use super::config::LagrangianConfig;
use crate::candidate::{repaired_seeds, Candidate};
use crate::error::Result;
use crate::instance::Instance;
use crate::repair::Repairer;
use crate::termination::{SearchClock, StopReason, COST_EPS};
use crate::trajectory::Trajectory;

/// Result of a Lagrangian heuristic run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LagrangianResult {
    /// The cheapest cover found (upper bound `z_ub`).
    pub best: Candidate,

    /// Cost of the best cover.
    pub best_cost: f64,

    /// Best Lagrangian lower bound `z_max`.
    pub lower_bound: f64,

    /// Number of iterations executed.
    pub iterations: usize,

    /// Why the run ended.
    pub stop_reason: StopReason,

    /// `z_max` after each iteration.
    pub lower_bound_history: Vec<f64>,

    /// Multipliers `t[e]` at the end of the run.
    pub multipliers: Vec<f64>,

    /// Best cover cost per iteration; masks are the iteration's cover.
    pub trajectory: Trajectory,
}

impl LagrangianResult {
    /// `best_cost - lower_bound`.
    pub fn gap(&self) -> f64 {
        self.best_cost - self.lower_bound
    }
}

/// Executes the Lagrangian heuristic.
pub struct LagrangianRunner;

impl LagrangianRunner {
    /// Runs the heuristic with the all-sets cover as initial upper bound.
    pub fn run(instance: &Instance, config: &LagrangianConfig) -> Result<LagrangianResult> {
        Self::run_from(instance, config, &[])
    }

    /// Runs the heuristic; the cheapest repaired seed becomes the initial
    /// upper bound.
    pub fn run_from(
        instance: &Instance,
        config: &LagrangianConfig,
        seeds: &[Vec<bool>],
    ) -> Result<LagrangianResult> {
        config.validate()?;

        let clock = SearchClock::start();
        let repairer = Repairer::new(instance);
        let mut best = Candidate::all_sets(instance);
        for seed in repaired_seeds(&repairer, seeds)? {
            if seed.cost() < best.cost() {
                best = seed;
            }
        }

        let mut state = DualState::new(instance);
        let mut step_factor = config.step_factor;
        let mut z_max = f64::NEG_INFINITY;
        log::debug!(
            "lagrangian: start z_ub={} elements={} sets={}",
            best.cost(),
            instance.num_elements(),
            instance.num_sets()
        );

        let mut trajectory = Trajectory::new(config.record_masks);
        let mut lower_bound_history = Vec::new();
        let mut iteration = 0usize;
        let mut stagnation = 0usize;
        let mut bound_stagnation = 0usize;

        let stop_reason = loop {
            if let Some(reason) = config
                .termination
                .check(iteration, stagnation, best.cost(), &clock)
            {
                break reason;
            }

            // 1. Relaxed subproblem and lower bound
            let (z_lb, reduced) = state.solve_relaxation(instance);
            if z_lb > z_max + COST_EPS {
                z_max = z_lb;
                bound_stagnation = 0;
            } else {
                bound_stagnation += 1;
            }

            // 2. Primal cover from the relaxed solution
            let mut cover = state.x.clone();
            repairer.repair_with_costs(&mut cover, &state.costs);
            let cover = Candidate::evaluate(instance, cover);
            if cover.cost() < best.cost() - COST_EPS {
                best = cover.clone();
                stagnation = 0;
                log::trace!("lagrangian: iteration {iteration} z_ub={} z_max={z_max}", best.cost());
            } else {
                stagnation += 1;
            }

            trajectory.record(best.cost(), clock.elapsed_secs(), cover.selection());
            lower_bound_history.push(z_max);
            iteration += 1;

            // 3. Bound gap
            if gap_closed(instance, z_max, best.cost()) {
                break StopReason::BoundGapClosed;
            }

            // 4. Cost fixing
            let fixed = state.fix_costs(z_lb, &reduced, best.cost());
            if fixed > 0 {
                log::trace!("lagrangian: iteration {iteration} fixed {fixed} sets");
            }

            // 5. Step decay
            if config.step_decay_interval > 0 && bound_stagnation >= config.step_decay_interval {
                step_factor /= 2.0;
                bound_stagnation = 0;
                log::debug!("lagrangian: step factor halved to {step_factor}");
            }

            // 6. Subgradient step
            let g = state.subgradient(instance);
            let norm: f64 = g.iter().map(|v| v * v).sum();
            if norm == 0.0 {
                break StopReason::ZeroSubgradient;
            }
            let step = step_factor * (config.bound_margin * best.cost() - z_lb) / norm;
            for (t, gi) in state.t.iter_mut().zip(&g) {
                *t = (*t + step * gi).max(0.0);
            }
        };

        log::debug!(
            "lagrangian: stop ({stop_reason}) after {iteration} iterations, z_ub={} z_max={z_max}",
            best.cost()
        );

        Ok(LagrangianResult {
            best_cost: best.cost(),
            best,
            lower_bound: z_max,
            iterations: iteration,
            stop_reason,
            lower_bound_history,
            multipliers: state.t,
            trajectory,
        })
    }
}

/// Multipliers, working costs and the current relaxed solution.
struct DualState {
    /// Multiplier per element.
    t: Vec<f64>,
    /// Set costs; fixed-out sets are infinite.
    costs: Vec<f64>,
    /// Cost-fixing ceiling per set.
    p: Vec<f64>,
    /// Relaxed solution.
    x: Vec<bool>,
}

impl DualState {
    /// Multipliers start at the cheapest cost among the sets covering each
    /// element.
    fn new(instance: &Instance) -> Self {
        let t = (0..instance.num_elements())
            .map(|e| {
                instance
                    .sets_covering(e)
                    .iter()
                    .map(|&s| instance.cost(s))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        Self {
            t,
            costs: instance.costs().to_vec(),
            p: instance.costs().to_vec(),
            x: vec![false; instance.num_sets()],
        }
    }

    /// Sets `x[s]` iff the reduced cost is non-positive and returns
    /// `(z_lb, reduced_costs)`.
    fn solve_relaxation(&mut self, instance: &Instance) -> (f64, Vec<f64>) {
        let reduced: Vec<f64> = (0..instance.num_sets())
            .map(|s| {
                let dual: f64 = instance.elements_covered_by(s).iter().map(|&e| self.t[e]).sum();
                self.costs[s] - dual
            })
            .collect();

        let mut z_lb: f64 = self.t.iter().sum();
        for (s, &rc) in reduced.iter().enumerate() {
            self.x[s] = rc <= 0.0;
            if self.x[s] {
                z_lb += rc;
            }
        }
        (z_lb, reduced)
    }

    /// Raises the ceilings and fixes out every set whose ceiling exceeds
    /// `z_ub`. Returns the number of newly fixed sets.
    fn fix_costs(&mut self, z_lb: f64, reduced: &[f64], z_ub: f64) -> usize {
        let mut fixed = 0;
        for s in 0..self.p.len() {
            let bound = if self.x[s] { z_lb } else { z_lb + reduced[s] };
            self.p[s] = self.p[s].max(bound);
            if self.p[s] > z_ub + COST_EPS && self.costs[s].is_finite() {
                self.costs[s] = f64::INFINITY;
                fixed += 1;
            }
        }
        fixed
    }

    /// `g[e] = 1 - Σ_{s ∋ e} x[s]`, clamped to 0 where `t[e] = 0` and
    /// `g[e] < 0`.
    fn subgradient(&self, instance: &Instance) -> Vec<f64> {
        (0..instance.num_elements())
            .map(|e| {
                let covered = instance.sets_covering(e).iter().filter(|&&s| self.x[s]).count();
                let g = 1.0 - covered as f64;
                if self.t[e] == 0.0 && g < 0.0 {
                    0.0
                } else {
                    g
                }
            })
            .collect()
    }
}

/// With integral costs the optimum is an integer, so `ceil(z_max)` is a
/// valid bound.
fn gap_closed(instance: &Instance, z_max: f64, z_ub: f64) -> bool {
    let bound = if instance.has_integral_costs() {
        (z_max - COST_EPS).ceil()
    } else {
        z_max
    };
    bound >= z_ub - COST_EPS
}
