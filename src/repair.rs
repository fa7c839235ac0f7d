//! Feasibility repair shared by every strategy.
//!
//! [`Repairer::repair`] turns an arbitrary selection vector into a feasible,
//! irredundant cover in two deterministic phases:
//!
//! 1. **Cover**: uncovered elements are visited in ascending index order.
//!    For each one still uncovered, the covering set with the lowest
//!    *density* `cost[s] / |uncovered ∩ elements_covered_by[s]|` is selected
//!    (ties keep the lowest set index).
//! 2. **Prune**: selected sets are visited by descending cost (ascending index
//!    among equal costs); a set is dropped when every element it covers is
//!    covered at least twice.
//!
//! The output is always a cover, and no selected set can be dropped on its own
//! without uncovering an element. Repair is idempotent. It is not guaranteed to
//! be a minimum-cost cover.
//!
//! # References
//!
//! - Chvátal (1979), "A Greedy Heuristic for the Set-Covering Problem"
//! - Beasley & Chu (1996), "A genetic algorithm for the set covering problem"

use crate::instance::Instance;

/// Greedy completion and redundancy pruning over one instance.
#[derive(Debug, Clone, Copy)]
pub struct Repairer<'a> {
    instance: &'a Instance,
}

impl<'a> Repairer<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Repairs `selection` in place using the instance costs.
    ///
    /// # Panics
    /// Panics if `selection.len()` differs from the number of sets.
    pub fn repair(&self, selection: &mut [bool]) {
        self.repair_with_costs(selection, self.instance.costs());
    }

    /// Repairs `selection` in place, ranking sets by `costs` instead of the
    /// instance costs.
    ///
    /// Used by the Lagrangian heuristic, where fixed-out sets carry an
    /// infinite cost so they are chosen last and pruned first.
    pub fn repair_with_costs(&self, selection: &mut [bool], costs: &[f64]) {
        let inst = self.instance;
        assert_eq!(selection.len(), inst.num_sets(), "selection length mismatch");
        assert_eq!(costs.len(), inst.num_sets(), "cost vector length mismatch");

        let mut coverage_count = vec![0usize; inst.num_elements()];
        for (s, _) in selection.iter().enumerate().filter(|(_, &on)| on) {
            for &e in inst.elements_covered_by(s) {
                coverage_count[e] += 1;
            }
        }
        let mut uncovered: Vec<bool> = coverage_count.iter().map(|&c| c == 0).collect();

        // Cover phase
        for e in 0..inst.num_elements() {
            if !uncovered[e] {
                continue;
            }
            let mut best_set = usize::MAX;
            let mut best_density = f64::INFINITY;
            for &s in inst.sets_covering(e) {
                let newly = inst
                    .elements_covered_by(s)
                    .iter()
                    .filter(|&&v| uncovered[v])
                    .count();
                let density = costs[s] / newly as f64;
                if best_set == usize::MAX || density < best_density {
                    best_set = s;
                    best_density = density;
                }
            }
            selection[best_set] = true;
            for &v in inst.elements_covered_by(best_set) {
                coverage_count[v] += 1;
                uncovered[v] = false;
            }
        }

        // Prune phase
        let mut selected: Vec<usize> = (0..inst.num_sets()).filter(|&s| selection[s]).collect();
        selected.sort_by(|&a, &b| {
            costs[b]
                .partial_cmp(&costs[a])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        for s in selected {
            let covered = inst.elements_covered_by(s);
            if covered.iter().all(|&e| coverage_count[e] >= 2) {
                selection[s] = false;
                for &e in covered {
                    coverage_count[e] -= 1;
                }
            }
        }
    }
}

/// Whether every selected set is the sole cover of at least one element.
pub fn is_irredundant(instance: &Instance, selection: &[bool]) -> bool {
    let mut coverage_count = vec![0usize; instance.num_elements()];
    for (s, _) in selection.iter().enumerate().filter(|(_, &on)| on) {
        for &e in instance.elements_covered_by(s) {
            coverage_count[e] += 1;
        }
    }
    selection
        .iter()
        .enumerate()
        .filter(|(_, &on)| on)
        .all(|(s, _)| {
            instance
                .elements_covered_by(s)
                .iter()
                .any(|&e| coverage_count[e] == 1)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::tests::small_instance;

    #[test]
    fn test_repair_empty_selection() {
        let inst = small_instance();
        let repairer = Repairer::new(&inst);
        let mut sel = vec![false; 4];
        repairer.repair(&mut sel);

        // Element 0: densities 2/2 (set 0) vs 4/2 (set 2) -> set 0, covering 0 and 1.
        // Element 2: densities 3, 4, 5 -> set 1.
        assert_eq!(sel, vec![true, true, false, false]);
        assert!(inst.is_cover(&sel));
        assert!(inst.selection_cost(&sel) <= 7.0);
        assert!(is_irredundant(&inst, &sel));
    }

    #[test]
    fn test_repair_prunes_expensive_first() {
        let inst = small_instance();
        let repairer = Repairer::new(&inst);
        let mut sel = vec![true; 4];
        repairer.repair(&mut sel);

        // Set 3 (cost 5) goes first, then set 2 (cost 4); sets 0 and 1 remain.
        assert_eq!(sel, vec![true, true, false, false]);
    }

    #[test]
    fn test_repair_keeps_feasible_irredundant() {
        let inst = small_instance();
        let repairer = Repairer::new(&inst);
        let mut sel = vec![true, false, true, false];
        repairer.repair(&mut sel);
        assert_eq!(sel, vec![true, false, true, false]);
    }

    #[test]
    fn test_repair_is_idempotent() {
        let inst = small_instance();
        let repairer = Repairer::new(&inst);
        for mask in 0u8..16 {
            let mut sel: Vec<bool> = (0..4).map(|i| mask & (1 << i) != 0).collect();
            repairer.repair(&mut sel);
            let once = sel.clone();
            repairer.repair(&mut sel);
            assert_eq!(sel, once, "mask {mask:04b}");
            assert!(inst.is_cover(&sel));
            assert!(is_irredundant(&inst, &sel));
        }
    }

    #[test]
    fn test_repair_with_infinite_costs_avoids_fixed_sets() {
        let inst = small_instance();
        let repairer = Repairer::new(&inst);
        let costs = [f64::INFINITY, 3.0, 4.0, 5.0];
        let mut sel = vec![false; 4];
        repairer.repair_with_costs(&mut sel, &costs);
        assert!(!sel[0]);
        assert!(inst.is_cover(&sel));
    }

    #[test]
    fn test_is_irredundant_detects_redundancy() {
        let inst = small_instance();
        assert!(!is_irredundant(&inst, &[true, true, true, false]));
        assert!(is_irredundant(&inst, &[true, true, false, false]));
    }
}
