//! Population members.

use crate::candidate::Candidate;
use crate::instance::Instance;
use crate::repair::Repairer;
use rand::Rng;

/// A GA population member: a candidate plus its fitness.
///
/// Fitness is maximised: `total_cost - cost + 1`, minus
/// `fine · uncovered_elements` for members created without repair.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    pub candidate: Candidate,
    pub fitness: f64,
}

impl Chromosome {
    /// Repairs the genes and scores them.
    pub fn repaired(repairer: &Repairer<'_>, genes: Vec<bool>) -> Self {
        let candidate = Candidate::repaired(repairer, genes);
        let fitness = base_fitness(repairer.instance(), candidate.cost());
        Self { candidate, fitness }
    }

    /// Scores the genes as-is and fines every uncovered element.
    ///
    /// An all-zero vector gets one random gene switched on first.
    pub fn penalized<R: Rng>(instance: &Instance, mut genes: Vec<bool>, fine: f64, rng: &mut R) -> Self {
        if !genes.contains(&true) {
            let i = rng.random_range(0..genes.len());
            genes[i] = true;
        }
        let uncovered = instance.uncovered_count(&genes);
        let candidate = Candidate::evaluate(instance, genes);
        let fitness = base_fitness(instance, candidate.cost()) - fine * uncovered as f64;
        Self { candidate, fitness }
    }

    pub fn genes(&self) -> &[bool] {
        self.candidate.selection()
    }

    pub fn is_feasible(&self) -> bool {
        self.candidate.is_feasible()
    }

    pub fn cost(&self) -> f64 {
        self.candidate.cost()
    }
}

fn base_fitness(instance: &Instance, cost: f64) -> f64 {
    instance.total_cost() - cost + 1.0
}
