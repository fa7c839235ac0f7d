//! Survivor selection.
//!
//! Selection shrinks a pool of chromosomes back to the population size.
//! Fitness is **maximised** (see [`Chromosome`]).
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Chromosome;
use rand::seq::index;
use rand::Rng;

/// Selection scheme applied to a pool of chromosomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Keep the `count` fittest, ties in pool order.
    #[default]
    Elite,

    /// `count` distinct members drawn with probability proportional to
    /// fitness.
    ///
    /// Non-positive fitness values are lifted to the smallest positive
    /// fitness in the pool; a pool with no positive fitness is drawn
    /// uniformly.
    Proportional,

    /// `count` distinct members drawn uniformly.
    Random,
}

impl Selection {
    /// Selects `count` members from `pool`.
    ///
    /// Members are never drawn twice, so the whole pool is returned when it
    /// is not larger than `count`.
    pub fn select<R: Rng>(self, mut pool: Vec<Chromosome>, count: usize, rng: &mut R) -> Vec<Chromosome> {
        if pool.is_empty() {
            return pool;
        }
        match self {
            Selection::Elite => {
                pool.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
                pool.truncate(count);
                pool
            }
            Selection::Random => {
                if pool.len() <= count {
                    return pool;
                }
                index::sample(rng, pool.len(), count)
                    .into_iter()
                    .map(|i| pool[i].clone())
                    .collect()
            }
            Selection::Proportional => {
                if pool.len() <= count {
                    return pool;
                }
                let weights = selection_weights(&pool);
                let picked = match index::sample_weighted(rng, pool.len(), |i| weights[i], count) {
                    Ok(picked) => picked,
                    Err(err) => {
                        log::warn!("ga: proportional selection fell back to uniform: {err}");
                        index::sample(rng, pool.len(), count)
                    }
                };
                picked.into_iter().map(|i| pool[i].clone()).collect()
            }
        }
    }
}

fn selection_weights(pool: &[Chromosome]) -> Vec<f64> {
    let floor = pool
        .iter()
        .map(|c| c.fitness)
        .filter(|&f| f > 0.0)
        .min_by(f64::total_cmp);

    pool.iter()
        .map(|c| match floor {
            Some(floor) if c.fitness <= 0.0 => floor,
            Some(_) => c.fitness,
            None => 1.0,
        })
        .collect()
}
