//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! selection → pairwise crossover → mutation → union → selection → repeat.

use super::config::GaConfig;
use super::types::Chromosome;
use crate::candidate::{random_selection, Candidate};
use crate::error::Result;
use crate::instance::Instance;
use crate::random::create_rng;
use crate::repair::Repairer;
use crate::termination::{SearchClock, StopReason, COST_EPS};
use crate::trajectory::Trajectory;
use rand::Rng;
use std::collections::HashSet;

/// Random draws allowed per requested member when building a distinct
/// initial population.
const DISTINCT_ATTEMPTS_PER_MEMBER: usize = 100;

/// Result of a GA run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// The cheapest feasible chromosome seen during the run.
    pub best: Candidate,

    /// Cost of the best cover.
    pub best_cost: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Why the run ended.
    pub stop_reason: StopReason,

    /// Share of feasible chromosomes in the population after each
    /// generation.
    pub feasible_share_history: Vec<f64>,

    /// Best cost per generation; masks are each generation's best
    /// feasible chromosome.
    pub trajectory: Trajectory,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use scp_heur::ga::{GaConfig, GaRunner};
/// use scp_heur::Instance;
///
/// let instance = Instance::new(
///     vec![vec![true, false, true], vec![false, true, true]],
///     vec![1.0, 1.0, 3.0],
/// )
/// .unwrap();
/// let config = GaConfig::default().with_max_iterations(20).with_seed(42);
/// let result = GaRunner::run(&instance, &config).unwrap();
/// assert!(instance.is_cover(result.best.selection()));
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA from a random population.
    pub fn run(instance: &Instance, config: &GaConfig) -> Result<GaResult> {
        let mut rng = create_rng(config.seed);
        Self::run_with_rng(instance, config, &[], &mut rng)
    }

    /// Runs the GA with an injected generator.
    ///
    /// Repaired `seeds` form the start of the initial population; random
    /// chromosomes fill the rest.
    pub fn run_with_rng<R: Rng>(
        instance: &Instance,
        config: &GaConfig,
        seeds: &[Vec<bool>],
        rng: &mut R,
    ) -> Result<GaResult> {
        config.validate()?;
        for seed in seeds {
            instance.check_selection(seed)?;
        }

        let clock = SearchClock::start();
        let mut breeder = Breeder::new(instance, config);
        let mut population = breeder.initial_population(seeds, rng);

        let mut best = Candidate::all_sets(instance);
        if let Some(initial) = best_feasible(&population) {
            if initial.cost() < best.cost() {
                best = initial.candidate.clone();
            }
        }
        log::debug!(
            "ga: start population={} initial best={}",
            population.len(),
            best.cost()
        );

        let mut trajectory = Trajectory::new(config.record_masks);
        let mut feasible_share_history = Vec::new();
        let mut generation = 0usize;
        let mut stagnation = 0usize;

        let stop_reason = loop {
            if let Some(reason) = config
                .termination
                .check(generation, stagnation, best.cost(), &clock)
            {
                break reason;
            }

            let progress = generation as f64 / config.termination.max_iterations as f64;
            let selection = config.selection.at(progress);
            let crossover = config.crossover.at(progress);

            // 1. Parent selection
            let parents = selection.select(population, config.population_size, rng);

            // 2. Offspring from consecutive pairs, joined with the parents
            breeder.start_generation();
            let mut seen: HashSet<Vec<bool>> = HashSet::with_capacity(parents.len() * 2);
            let mut pool: Vec<Chromosome> = Vec::with_capacity(parents.len() * 2);
            for pair in parents.chunks_exact(2) {
                for genes in crossover.cross(&pair[0], &pair[1], rng) {
                    let child = breeder.offspring(genes, rng);
                    if seen.insert(child.genes().to_vec()) {
                        pool.push(child);
                    }
                }
            }
            for parent in parents {
                if seen.insert(parent.genes().to_vec()) {
                    pool.push(parent);
                }
            }

            // 3. Survivor selection
            population = selection.select(pool, config.population_size, rng);

            let generation_best = best_feasible(&population);
            match generation_best {
                Some(gb) if gb.cost() < best.cost() - COST_EPS => {
                    best = gb.candidate.clone();
                    stagnation = 0;
                    log::trace!("ga: generation {generation} best={}", best.cost());
                }
                _ => stagnation += 1,
            }

            let mask = generation_best.map_or(best.selection(), |gb| gb.genes());
            trajectory.record(best.cost(), clock.elapsed_secs(), mask);
            feasible_share_history.push(feasible_share(&population));
            generation += 1;
        };

        log::debug!(
            "ga: stop ({stop_reason}) after {generation} generations, best={}",
            best.cost()
        );

        Ok(GaResult {
            best_cost: best.cost(),
            best,
            generations: generation,
            stop_reason,
            feasible_share_history,
            trajectory,
        })
    }
}

/// Creates chromosomes, tracking how many may still skip repair in the
/// current batch.
struct Breeder<'a> {
    repairer: Repairer<'a>,
    config: &'a GaConfig,
    quota: usize,
    unrepaired_left: usize,
}

impl<'a> Breeder<'a> {
    fn new(instance: &'a Instance, config: &'a GaConfig) -> Self {
        let quota = config
            .penalty
            .map_or(0, |p| p.unrepaired_quota(config.population_size));
        Self {
            repairer: Repairer::new(instance),
            config,
            quota,
            unrepaired_left: quota,
        }
    }

    /// Refills the unrepaired quota for a new batch of offspring.
    fn start_generation(&mut self) {
        self.unrepaired_left = self.quota;
    }

    fn create<R: Rng>(&mut self, genes: Vec<bool>, rng: &mut R) -> Chromosome {
        match self.config.penalty {
            Some(penalty) if self.unrepaired_left > 0 => {
                self.unrepaired_left -= 1;
                Chromosome::penalized(self.repairer.instance(), genes, penalty.fine, rng)
            }
            _ => Chromosome::repaired(&self.repairer, genes),
        }
    }

    fn offspring<R: Rng>(&mut self, mut genes: Vec<bool>, rng: &mut R) -> Chromosome {
        if !genes.is_empty() && rng.random_bool(self.config.mutation_rate) {
            let i = rng.random_range(0..genes.len());
            genes[i] = !genes[i];
        }
        self.create(genes, rng)
    }

    /// Seeds (repaired, distinct) followed by distinct random chromosomes.
    fn initial_population<R: Rng>(&mut self, seeds: &[Vec<bool>], rng: &mut R) -> Vec<Chromosome> {
        let size = self.config.population_size;
        let mut seen = HashSet::with_capacity(size);
        let mut population = Vec::with_capacity(size);

        for seed in seeds {
            if population.len() >= size {
                break;
            }
            let member = Chromosome::repaired(&self.repairer, seed.clone());
            if seen.insert(member.genes().to_vec()) {
                population.push(member);
            }
        }

        let num_sets = self.repairer.instance().num_sets();
        let mut attempts = size * DISTINCT_ATTEMPTS_PER_MEMBER;
        while population.len() < size && attempts > 0 {
            let member = self.create(random_selection(num_sets, rng), rng);
            if seen.insert(member.genes().to_vec()) {
                population.push(member);
            }
            attempts -= 1;
        }
        if population.len() < size {
            log::warn!(
                "ga: only {} distinct chromosomes found for a population of {size}",
                population.len()
            );
        }
        population
    }
}

fn best_feasible(population: &[Chromosome]) -> Option<&Chromosome> {
    population
        .iter()
        .filter(|c| c.is_feasible())
        .min_by(|a, b| a.cost().total_cmp(&b.cost()))
}

fn feasible_share(population: &[Chromosome]) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    population.iter().filter(|c| c.is_feasible()).count() as f64 / population.len() as f64
}
