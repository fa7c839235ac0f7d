//! SA execution loop.

use super::config::SaConfig;
use crate::candidate::{repaired_seeds, Candidate};
use crate::error::Result;
use crate::instance::Instance;
use crate::random::create_rng;
use crate::repair::Repairer;
use crate::termination::{SearchClock, StopReason, COST_EPS};
use crate::trajectory::Trajectory;
use rand::Rng;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaResult {
    /// The best cover found.
    pub best: Candidate,

    /// Cost of the best cover.
    pub best_cost: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Why the run ended.
    pub stop_reason: StopReason,

    /// Temperature of the last iteration.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Number of accepted strictly worsening moves.
    pub uphill_moves: usize,

    /// Best cost per iteration; masks are the current state.
    pub trajectory: Trajectory,
}

/// Executes Simulated Annealing over set selections.
///
/// Each move flips one or two bits drawn with probability proportional to
/// `cost[s] / |elements_covered_by[s]|` and repairs the result; the move is
/// accepted by the Metropolis criterion.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA from a random cover.
    pub fn run(instance: &Instance, config: &SaConfig) -> Result<SaResult> {
        let mut rng = create_rng(config.seed);
        Self::run_with_rng(instance, config, &[], &mut rng)
    }

    /// Runs SA with an injected generator, starting from the first of
    /// `seeds` (repaired) when given.
    pub fn run_with_rng<R: Rng>(
        instance: &Instance,
        config: &SaConfig,
        seeds: &[Vec<bool>],
        rng: &mut R,
    ) -> Result<SaResult> {
        config.validate()?;

        let clock = SearchClock::start();
        let repairer = Repairer::new(instance);
        let picker = FlipPicker::new(instance);
        let flips = instance
            .num_sets()
            .div_ceil(config.sets_per_flip)
            .clamp(1, config.max_flips);

        let mut current = match repaired_seeds(&repairer, seeds)?.into_iter().next() {
            Some(seed) => seed,
            None => Candidate::random(&repairer, rng),
        };
        let mut best = current.clone();
        log::debug!(
            "sa: start cost={} flips={} t0={}",
            current.cost(),
            flips,
            config.initial_temperature
        );

        let mut trajectory = Trajectory::new(config.record_masks);
        let mut temperature = config.initial_temperature;
        let mut iteration = 0usize;
        let mut stagnation = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut uphill_moves = 0usize;

        let stop_reason = loop {
            if let Some(reason) = config
                .termination
                .check(iteration, stagnation, best.cost(), &clock)
            {
                break reason;
            }

            temperature = config
                .cooling
                .temperature(config.initial_temperature, iteration, temperature);

            let mut selection = current.selection().to_vec();
            for s in picker.pick_distinct(flips, rng) {
                selection[s] = !selection[s];
            }
            let neighbor = Candidate::repaired(&repairer, selection);
            let delta = neighbor.cost() - current.cost();

            // Metropolis acceptance criterion
            let accept = if delta <= 0.0 {
                true
            } else if temperature > 0.0 {
                rng.random_range(0.0..1.0) < (-delta / temperature).exp()
            } else {
                false
            };

            if accept {
                accepted_moves += 1;
                if delta < 0.0 {
                    improving_moves += 1;
                } else if delta > 0.0 {
                    uphill_moves += 1;
                }
                current = neighbor;
            }

            if current.cost() < best.cost() - COST_EPS {
                best = current.clone();
                stagnation = 0;
                log::trace!("sa: iteration {iteration} best={}", best.cost());
            } else {
                stagnation += 1;
            }

            trajectory.record(best.cost(), clock.elapsed_secs(), current.selection());
            iteration += 1;
        };

        log::debug!(
            "sa: stop ({stop_reason}) after {iteration} iterations, best={}",
            best.cost()
        );

        Ok(SaResult {
            best_cost: best.cost(),
            best,
            iterations: iteration,
            stop_reason,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            uphill_moves,
            trajectory,
        })
    }
}

/// Roulette over sets weighted by cost per covered element.
struct FlipPicker {
    cumulative: Vec<f64>,
}

impl FlipPicker {
    fn new(instance: &Instance) -> Self {
        let mut total = 0.0;
        let cumulative = (0..instance.num_sets())
            .map(|s| {
                let covered = instance.elements_covered_by(s).len();
                let weight = if covered == 0 {
                    2.0 * instance.cost(s)
                } else {
                    instance.cost(s) / covered as f64
                };
                total += weight;
                total
            })
            .collect();
        Self { cumulative }
    }

    fn pick<R: Rng>(&self, rng: &mut R) -> usize {
        let n = self.cumulative.len();
        let total = self.cumulative[n - 1];
        if total <= 0.0 {
            return rng.random_range(0..n);
        }
        let threshold = rng.random_range(0.0..total);
        self.cumulative
            .partition_point(|&c| c <= threshold)
            .min(n - 1)
    }

    /// Up to `count` distinct sets; fewer when the draws keep colliding.
    fn pick_distinct<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<usize> {
        let count = count.min(self.cumulative.len());
        let mut picked = Vec::with_capacity(count);
        for _ in 0..count * 8 {
            if picked.len() == count {
                break;
            }
            let s = self.pick(rng);
            if !picked.contains(&s) {
                picked.push(s);
            }
        }
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::tests::{generated_instance, small_instance};
    use crate::repair::is_irredundant;
    use crate::sa::CoolingSchedule;

    #[test]
    fn test_sa_finds_cover() {
        let inst = generated_instance(1, 40, 25);
        let config = SaConfig::default()
            .with_initial_temperature(50.0)
            .with_max_iterations(300)
            .with_seed(42);

        let result = SaRunner::run(&inst, &config).unwrap();

        assert!(inst.is_cover(result.best.selection()));
        assert!(is_irredundant(&inst, result.best.selection()));
        assert!((result.best_cost - result.best.cost()).abs() < 1e-12);
        assert_eq!(result.iterations, 300);
        assert_eq!(result.stop_reason, StopReason::IterationLimit);
        assert_eq!(result.trajectory.len(), 300);
    }

    #[test]
    fn test_sa_history_non_increasing() {
        let inst = generated_instance(2, 40, 30);
        let config = SaConfig::default()
            .with_initial_temperature(500.0)
            .with_max_iterations(400)
            .with_seed(7);

        let result = SaRunner::run(&inst, &config).unwrap();

        for window in result.trajectory.costs().windows(2) {
            assert!(
                window[1] <= window[0] + 1e-10,
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_sa_zero_temperature_never_goes_uphill() {
        let inst = generated_instance(3, 40, 30);
        let config = SaConfig::default()
            .with_initial_temperature(0.0)
            .with_max_iterations(500)
            .with_mask_recording(true)
            .with_seed(3);

        let result = SaRunner::run(&inst, &config).unwrap();

        assert_eq!(result.uphill_moves, 0);
        let current_costs: Vec<f64> = result
            .trajectory
            .masks()
            .iter()
            .map(|m| inst.selection_cost(m))
            .collect();
        for window in current_costs.windows(2) {
            assert!(window[1] <= window[0] + 1e-10);
        }
    }

    #[test]
    fn test_sa_high_temperature_accepts_uphill() {
        let inst = generated_instance(4, 40, 30);
        let config = SaConfig::default()
            .with_initial_temperature(1e9)
            .with_cooling(CoolingSchedule::Geometric { alpha: 0.999_999 })
            .with_max_iterations(500)
            .with_seed(4);

        let result = SaRunner::run(&inst, &config).unwrap();

        assert!(result.accepted_moves as f64 / result.iterations as f64 > 0.9);
    }

    #[test]
    fn test_sa_warm_start() {
        let inst = small_instance();
        let config = SaConfig::default()
            .with_initial_temperature(0.0)
            .with_max_iterations(0);
        let mut rng = create_rng(Some(1));

        let result =
            SaRunner::run_with_rng(&inst, &config, &[vec![true; 4]], &mut rng).unwrap();

        // all-sets seed is repaired to {0, 1}
        assert_eq!(result.best.selection(), &[true, true, false, false]);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_sa_bad_seed_length() {
        let inst = small_instance();
        let mut rng = create_rng(Some(1));
        let result = SaRunner::run_with_rng(&inst, &SaConfig::default(), &[vec![true; 3]], &mut rng);
        assert!(result.is_err());
    }

    #[test]
    fn test_sa_target_cost_stops_early() {
        let inst = small_instance();
        let config = SaConfig::default().with_target_cost(5.0).with_seed(9);
        let result = SaRunner::run(&inst, &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::TargetReached);
        assert!(result.best_cost <= 5.0 + 1e-9);
    }

    #[test]
    fn test_sa_stagnation_stops() {
        let inst = small_instance();
        let config = SaConfig::default()
            .with_stagnation_limit(20)
            .with_max_iterations(100_000)
            .with_seed(5);
        let result = SaRunner::run(&inst, &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::Stagnation);
        assert!(result.iterations < 100_000);
    }

    #[test]
    fn test_flip_picker_prefers_heavy_sets() {
        let inst = Instance::new(vec![vec![true, true]], vec![1.0, 99.0]).unwrap();
        let picker = FlipPicker::new(&inst);
        let mut rng = create_rng(Some(42));
        let heavy = (0..1000).filter(|_| picker.pick(&mut rng) == 1).count();
        assert!(heavy > 900, "heavy set picked {heavy}/1000 times");
    }

    #[test]
    fn test_same_seed_same_result() {
        let inst = generated_instance(6, 30, 20);
        let config = SaConfig::default().with_max_iterations(100).with_seed(11);
        let a = SaRunner::run(&inst, &config).unwrap();
        let b = SaRunner::run(&inst, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.trajectory.costs(), b.trajectory.costs());
    }
}
