//! Scored selection vectors.

use crate::error::Result;
use crate::instance::Instance;
use crate::repair::Repairer;
use rand::Rng;
use std::hash::{Hash, Hasher};

/// A binary selection vector with its cost and feasibility.
///
/// Candidates are immutable once scored: every perturbation builds a new
/// one. Equality and hashing look at the selection vector only, so a
/// `HashSet<Candidate>` de-duplicates populations by vector identity.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    selection: Vec<bool>,
    cost: f64,
    feasible: bool,
}

impl Candidate {
    /// Scores a selection vector as-is, without repairing it.
    ///
    /// # Panics
    /// Panics if the vector length differs from the number of sets.
    pub fn evaluate(instance: &Instance, selection: Vec<bool>) -> Self {
        assert_eq!(
            selection.len(),
            instance.num_sets(),
            "selection length must equal the number of sets"
        );
        let cost = instance.selection_cost(&selection);
        let feasible = instance.is_cover(&selection);
        Self {
            selection,
            cost,
            feasible,
        }
    }

    /// Repairs a selection vector and scores the result.
    pub fn repaired(repairer: &Repairer<'_>, mut selection: Vec<bool>) -> Self {
        repairer.repair(&mut selection);
        let cost = repairer.instance().selection_cost(&selection);
        Self {
            selection,
            cost,
            feasible: true,
        }
    }

    /// A random vector (each set selected with probability 1/2), repaired.
    pub fn random<R: Rng>(repairer: &Repairer<'_>, rng: &mut R) -> Self {
        Self::repaired(repairer, random_selection(repairer.instance().num_sets(), rng))
    }

    /// The trivial cover selecting every set.
    pub fn all_sets(instance: &Instance) -> Self {
        Self {
            selection: vec![true; instance.num_sets()],
            cost: instance.total_cost(),
            feasible: true,
        }
    }

    pub fn selection(&self) -> &[bool] {
        &self.selection
    }

    pub fn into_selection(self) -> Vec<bool> {
        self.selection
    }

    /// Sum of the costs of the selected sets.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Whether every element is covered.
    pub fn is_feasible(&self) -> bool {
        self.feasible
    }

    /// Indices of the selected sets, ascending.
    pub fn selected_sets(&self) -> Vec<usize> {
        self.selection
            .iter()
            .enumerate()
            .filter_map(|(s, &on)| on.then_some(s))
            .collect()
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.selection == other.selection
    }
}

impl Eq for Candidate {}

impl Hash for Candidate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.selection.hash(state);
    }
}

/// Repairs warm-start vectors after checking their lengths.
pub(crate) fn repaired_seeds(repairer: &Repairer<'_>, seeds: &[Vec<bool>]) -> Result<Vec<Candidate>> {
    seeds
        .iter()
        .map(|seed| {
            repairer.instance().check_selection(seed)?;
            Ok(Candidate::repaired(repairer, seed.clone()))
        })
        .collect()
}

/// Uniform random bit vector.
pub fn random_selection<R: Rng>(len: usize, rng: &mut R) -> Vec<bool> {
    (0..len).map(|_| rng.random_bool(0.5)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::tests::small_instance;
    use crate::random::create_rng;
    use std::collections::HashSet;

    #[test]
    fn test_evaluate_infeasible() {
        let inst = small_instance();
        let c = Candidate::evaluate(&inst, vec![false, true, false, false]);
        assert!(!c.is_feasible());
        assert!((c.cost() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_sets_is_worst_cover() {
        let inst = small_instance();
        let c = Candidate::all_sets(&inst);
        assert!(c.is_feasible());
        assert!((c.cost() - inst.total_cost()).abs() < 1e-12);
    }

    #[test]
    fn test_equality_ignores_cost() {
        let inst = small_instance();
        let a = Candidate::evaluate(&inst, vec![true, false, true, false]);
        let b = Candidate::evaluate(&inst, vec![true, false, true, false]);
        let c = Candidate::evaluate(&inst, vec![false, true, false, true]);
        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_random_is_feasible() {
        let inst = small_instance();
        let repairer = Repairer::new(&inst);
        let mut rng = create_rng(Some(1));
        for _ in 0..20 {
            let c = Candidate::random(&repairer, &mut rng);
            assert!(inst.is_cover(c.selection()));
        }
    }

    #[test]
    fn test_selected_sets() {
        let inst = small_instance();
        let c = Candidate::evaluate(&inst, vec![true, false, true, false]);
        assert_eq!(c.selected_sets(), vec![0, 2]);
    }
}
