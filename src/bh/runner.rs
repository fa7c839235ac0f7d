//! Black-hole search loop.

use super::config::{BhConfig, HorizonTest};
use crate::candidate::{repaired_seeds, Candidate};
use crate::error::Result;
use crate::instance::Instance;
use crate::random::create_rng;
use crate::repair::Repairer;
use crate::termination::{SearchClock, StopReason, COST_EPS};
use crate::trajectory::Trajectory;
use rand::Rng;
use std::collections::HashSet;

/// Random draws allowed per requested star when building a distinct population.
const DISTINCT_ATTEMPTS_PER_STAR: usize = 100;

/// Result of a black-hole run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BhResult {
    /// The best cover found (the final black hole).
    pub best: Candidate,

    /// Cost of the best cover.
    pub best_cost: f64,

    /// Number of iterations executed.
    pub iterations: usize,

    /// Why the run ended.
    pub stop_reason: StopReason,

    /// Population size at the end of each iteration.
    pub population_history: Vec<usize>,

    /// Black-hole cost per iteration; masks are the black hole.
    pub trajectory: Trajectory,
}

/// Executes the black-hole search.
pub struct BhRunner;

impl BhRunner {
    /// Runs the search from a random population.
    pub fn run(instance: &Instance, config: &BhConfig) -> Result<BhResult> {
        let mut rng = create_rng(config.seed);
        Self::run_with_rng(instance, config, &[], &mut rng)
    }

    /// Runs the search with an injected generator.
    ///
    /// Repaired `seeds` become the first stars; random covers fill the rest.
    pub fn run_with_rng<R: Rng>(
        instance: &Instance,
        config: &BhConfig,
        seeds: &[Vec<bool>],
        rng: &mut R,
    ) -> Result<BhResult> {
        config.validate()?;

        let clock = SearchClock::start();
        let repairer = Repairer::new(instance);
        let seeds = repaired_seeds(&repairer, seeds)?;
        let mut stars = initial_stars(&repairer, seeds, config.star_count, rng);
        let mut black_hole = Candidate::all_sets(instance);
        adopt_best(&stars, &mut black_hole);
        log::debug!(
            "bh: start stars={} horizon={:?}",
            stars.len(),
            config.horizon
        );

        let mut trajectory = Trajectory::new(config.record_masks);
        let mut population_history = Vec::new();
        let mut iteration = 0usize;
        let mut stagnation = 0usize;

        let stop_reason = loop {
            if let Some(reason) =
                config
                    .termination
                    .check(iteration, stagnation, black_hole.cost(), &clock)
            {
                break reason;
            }

            // 1. Black hole adoption
            if adopt_best(&stars, &mut black_hole) {
                stagnation = 0;
                log::trace!("bh: iteration {iteration} black hole={}", black_hole.cost());
            } else {
                stagnation += 1;
            }

            // 2. Adaptive population size
            if config.resize_threshold > 0 && stagnation > config.resize_threshold {
                resize_population(&mut stars, &black_hole, &repairer, rng);
            }

            // 3. Absorption
            let mut total: f64 = stars.iter().map(Candidate::cost).sum();
            for i in 0..stars.len() {
                let radius = if total > 0.0 {
                    black_hole.cost() / total
                } else {
                    0.0
                };
                if absorbed(&stars[i], &black_hole, radius, config.horizon, rng) {
                    let fresh = Candidate::random(&repairer, rng);
                    total += fresh.cost() - stars[i].cost();
                    stars[i] = fresh;
                }
            }

            // 4. Transformation
            stars = stars
                .iter()
                .map(|star| pull_toward(star, &black_hole, config.sigmoid_scale, &repairer, rng))
                .collect();

            trajectory.record(black_hole.cost(), clock.elapsed_secs(), black_hole.selection());
            population_history.push(stars.len());
            iteration += 1;
        };

        log::debug!(
            "bh: stop ({stop_reason}) after {iteration} iterations, best={} stars={}",
            black_hole.cost(),
            stars.len()
        );

        Ok(BhResult {
            best_cost: black_hole.cost(),
            best: black_hole,
            iterations: iteration,
            stop_reason,
            population_history,
            trajectory,
        })
    }
}

/// Seeds first (distinct), then distinct random covers up to `count`.
///
/// Small instances may not have `count` distinct irredundant covers; after
/// the attempt budget is spent the population is filled with duplicates.
fn initial_stars<R: Rng>(
    repairer: &Repairer<'_>,
    seeds: Vec<Candidate>,
    count: usize,
    rng: &mut R,
) -> Vec<Candidate> {
    let mut seen = HashSet::with_capacity(count);
    let mut stars = Vec::with_capacity(count);
    for seed in seeds {
        if stars.len() < count && seen.insert(seed.clone()) {
            stars.push(seed);
        }
    }

    let mut attempts = count * DISTINCT_ATTEMPTS_PER_STAR;
    while stars.len() < count && attempts > 0 {
        let star = Candidate::random(repairer, rng);
        if seen.insert(star.clone()) {
            stars.push(star);
        }
        attempts -= 1;
    }
    if stars.len() < count {
        log::warn!(
            "bh: only {} distinct covers found, filling {} stars with duplicates",
            stars.len(),
            count
        );
        while stars.len() < count {
            stars.push(Candidate::random(repairer, rng));
        }
    }
    stars
}

/// Replaces the black hole with the cheapest star if it is strictly better.
fn adopt_best(stars: &[Candidate], black_hole: &mut Candidate) -> bool {
    let Some(best) = stars
        .iter()
        .min_by(|a, b| a.cost().total_cmp(&b.cost()))
    else {
        return false;
    };
    if best.cost() < black_hole.cost() - COST_EPS {
        *black_hole = best.clone();
        true
    } else {
        false
    }
}

fn absorbed<R: Rng>(
    star: &Candidate,
    black_hole: &Candidate,
    radius: f64,
    horizon: HorizonTest,
    rng: &mut R,
) -> bool {
    match horizon {
        HorizonTest::Probabilistic => radius > rng.random_range(0.0..1.0),
        HorizonTest::Euclidean => {
            let differing = star
                .selection()
                .iter()
                .zip(black_hole.selection())
                .filter(|(a, b)| a != b)
                .count();
            let n = star.selection().len() as f64;
            (differing as f64).sqrt() / n.sqrt() < radius
        }
    }
}

/// Moves a star toward the black hole and repairs it.
///
/// Coordinate `x` moves to `x - r·(bh - x)`, is squashed by
/// `1 / (1 + exp(-v / scale))`, and the star's bit survives with that
/// probability (cleared otherwise).
fn pull_toward<R: Rng>(
    star: &Candidate,
    black_hole: &Candidate,
    scale: f64,
    repairer: &Repairer<'_>,
    rng: &mut R,
) -> Candidate {
    let selection = star
        .selection()
        .iter()
        .zip(black_hole.selection())
        .map(|(&x, &bh)| {
            let (xf, bf) = (f64::from(u8::from(x)), f64::from(u8::from(bh)));
            let moved = xf - rng.random_range(0.0..1.0) * (bf - xf);
            let squashed = 1.0 / (1.0 + (-moved / scale).exp());
            x && rng.random_range(0.0..1.0) <= squashed
        })
        .collect();
    Candidate::repaired(repairer, selection)
}

/// Grows or shrinks the population by `round(p · size)` members, where
/// `p = |bh - worst| / Σ costs`.
///
/// With probability `1 - p` the population grows, either with copies of the
/// black hole or with fresh random covers (one coin for the whole batch);
/// otherwise the worst star is removed repeatedly. The last star is never
/// removed.
fn resize_population<R: Rng>(
    stars: &mut Vec<Candidate>,
    black_hole: &Candidate,
    repairer: &Repairer<'_>,
    rng: &mut R,
) {
    let total: f64 = stars.iter().map(Candidate::cost).sum();
    let Some(worst) = stars.iter().map(Candidate::cost).max_by(f64::total_cmp) else {
        return;
    };
    if total <= 0.0 {
        return;
    }

    let p = (black_hole.cost() - worst).abs() / total;
    let size = stars.len();
    let amount = (p * size as f64).round() as usize;
    if amount == 0 {
        return;
    }

    if rng.random_range(0.0..1.0) > p {
        let copy_black_hole = rng.random_range(0.0..1.0) > p;
        for _ in 0..amount {
            stars.push(if copy_black_hole {
                black_hole.clone()
            } else {
                Candidate::random(repairer, rng)
            });
        }
        log::debug!("bh: population grown {size} -> {}", stars.len());
    } else if amount < size {
        for _ in 0..amount {
            if let Some(idx) = worst_index(stars) {
                stars.swap_remove(idx);
            }
        }
        log::debug!("bh: population shrunk {size} -> {}", stars.len());
    }
}

fn worst_index(stars: &[Candidate]) -> Option<usize> {
    stars
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.cost().total_cmp(&b.1.cost()))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::tests::{generated_instance, small_instance};
    use crate::repair::is_irredundant;

    #[test]
    fn test_bh_finds_cover() {
        let inst = generated_instance(1, 40, 25);
        let config = BhConfig::default()
            .with_star_count(10)
            .with_max_iterations(50)
            .with_seed(42);

        let result = BhRunner::run(&inst, &config).unwrap();

        assert!(inst.is_cover(result.best.selection()));
        assert!(is_irredundant(&inst, result.best.selection()));
        assert!(result.best_cost < inst.total_cost());
        assert_eq!(result.iterations, 50);
        assert_eq!(result.population_history.len(), 50);
    }

    #[test]
    fn test_bh_history_non_increasing() {
        let inst = generated_instance(2, 40, 30);
        for horizon in [HorizonTest::Probabilistic, HorizonTest::Euclidean] {
            let config = BhConfig::default()
                .with_star_count(8)
                .with_horizon(horizon)
                .with_resize_threshold(3)
                .with_max_iterations(60)
                .with_seed(7);

            let result = BhRunner::run(&inst, &config).unwrap();

            for window in result.trajectory.costs().windows(2) {
                assert!(
                    window[1] <= window[0] + 1e-10,
                    "{horizon:?}: black hole cost should never increase: {} > {}",
                    window[1],
                    window[0]
                );
            }
            assert!(result.population_history.iter().all(|&n| n >= 1));
        }
    }

    #[test]
    fn test_bh_last_sample_matches_best() {
        let inst = generated_instance(9, 40, 30);
        for seed in 0..40 {
            let config = BhConfig::default()
                .with_star_count(8)
                .with_max_iterations(5)
                .with_seed(seed);
            let result = BhRunner::run(&inst, &config).unwrap();
            assert!(result.iterations > 0);
            assert_eq!(result.trajectory.costs().last(), Some(&result.best_cost));
        }
    }

    #[test]
    fn test_bh_single_star_zero_iterations() {
        let inst = generated_instance(3, 30, 20);
        let config = BhConfig::default()
            .with_star_count(1)
            .with_max_iterations(0)
            .with_seed(5);

        let result = BhRunner::run(&inst, &config).unwrap();

        let mut rng = create_rng(Some(5));
        let expected = Candidate::random(&Repairer::new(&inst), &mut rng);
        assert_eq!(result.best, expected);
        assert_eq!(result.iterations, 0);
        assert!(result.trajectory.is_empty());
    }

    #[test]
    fn test_bh_seeded_star_returned_unchanged() {
        let inst = small_instance();
        let config = BhConfig::default().with_star_count(1).with_max_iterations(0);
        let mut rng = create_rng(Some(1));
        let seed = vec![true, false, true, false];

        let result = BhRunner::run_with_rng(&inst, &config, &[seed.clone()], &mut rng).unwrap();

        assert_eq!(result.best.selection(), seed.as_slice());
        assert!((result.best_cost - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_initial_stars_distinct() {
        let inst = generated_instance(4, 40, 30);
        let repairer = Repairer::new(&inst);
        let mut rng = create_rng(Some(4));
        let stars = initial_stars(&repairer, Vec::new(), 15, &mut rng);
        let distinct: HashSet<_> = stars.iter().collect();
        assert_eq!(stars.len(), 15);
        assert_eq!(distinct.len(), 15);
    }

    #[test]
    fn test_initial_stars_fill_when_few_covers_exist() {
        // {0, 1}, {0, 2}, {0, 3} and {2, 3} are the only irredundant covers
        let inst = small_instance();
        let repairer = Repairer::new(&inst);
        let mut rng = create_rng(Some(2));
        let stars = initial_stars(&repairer, Vec::new(), 10, &mut rng);
        assert_eq!(stars.len(), 10);
    }

    #[test]
    fn test_resize_grows_or_drops_worst() {
        let inst = small_instance();
        let repairer = Repairer::new(&inst);
        let cheap = Candidate::evaluate(&inst, vec![true, true, false, false]);
        let dear = Candidate::evaluate(&inst, vec![false, false, true, true]);

        for seed in 0..20 {
            let mut rng = create_rng(Some(seed));
            let mut stars = vec![cheap.clone(), dear.clone()];
            // p = |5 - 9| / 14, round(p * 2) = 1
            resize_population(&mut stars, &cheap, &repairer, &mut rng);
            match stars.len() {
                3 => {}
                1 => assert_eq!(stars[0], cheap),
                n => panic!("unexpected population size {n}"),
            }
        }
    }

    #[test]
    fn test_euclidean_absorbs_black_hole_copy() {
        let inst = small_instance();
        let bh = Candidate::evaluate(&inst, vec![true, true, false, false]);
        let far = Candidate::evaluate(&inst, vec![false, false, true, true]);
        let mut rng = create_rng(Some(1));
        assert!(absorbed(&bh, &bh, 0.1, HorizonTest::Euclidean, &mut rng));
        assert!(!absorbed(&far, &bh, 0.1, HorizonTest::Euclidean, &mut rng));
    }

    #[test]
    fn test_target_cost_stops() {
        let inst = small_instance();
        let config = BhConfig::default()
            .with_star_count(4)
            .with_target_cost(5.0)
            .with_seed(3);
        let result = BhRunner::run(&inst, &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::TargetReached);
        assert!((result.best_cost - 5.0).abs() < 1e-9);
    }
}
