//! Set Covering Problem instances.
//!
//! An [`Instance`] is immutable once built and shared by reference across
//! every strategy of a run (including every stage of a hybrid chain). The
//! adjacency indices `elements_covered_by` and `sets_covering` are computed
//! once at construction so the search loops never scan the dense matrix.
//!
//! # Submodules
//!
//! - [`format`]: Plain-text encoding of instances (load / save)
//! - [`generate`]: Random geometric instance generator

pub mod format;
pub mod generate;

use crate::error::{Result, ScpError};

/// Planar layout an instance was generated from.
///
/// Only used by external collaborators (rendering, file round trips);
/// the search never looks at it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    /// Coverage radius: a set covers every element within this distance.
    pub radius: u32,
    /// Side length of the square grid.
    pub map_size: u32,
    /// Grid position of each element.
    pub element_coords: Vec<(u32, u32)>,
    /// Grid position of each covering set.
    pub set_coords: Vec<(u32, u32)>,
}

/// A weighted set covering instance.
///
/// `coverage[e][s]` is `true` iff set `s` covers element `e`.
///
/// # Examples
///
/// ```
/// use scp_heur::Instance;
///
/// let instance = Instance::new(
///     vec![
///         vec![true, false, true, false],
///         vec![true, false, false, true],
///         vec![false, true, true, true],
///     ],
///     vec![2.0, 3.0, 4.0, 5.0],
/// )
/// .unwrap();
///
/// assert_eq!(instance.num_elements(), 3);
/// assert_eq!(instance.num_sets(), 4);
/// assert_eq!(instance.sets_covering(0), &[0, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    coverage: Vec<Vec<bool>>,
    costs: Vec<f64>,
    elements_covered_by: Vec<Vec<usize>>,
    sets_covering: Vec<Vec<usize>>,
    total_cost: f64,
    integral_costs: bool,
    geometry: Option<Geometry>,
}

impl Instance {
    /// Builds an instance from an element × set coverage matrix and set costs.
    ///
    /// # Errors
    ///
    /// - [`ScpError::EmptyInstance`] if there are no elements or no sets
    /// - [`ScpError::DimensionMismatch`] if a row or the cost vector has the wrong length
    /// - [`ScpError::NonPositiveCost`] if a cost is not a positive finite number
    /// - [`ScpError::UncoverableElement`] if some element is covered by no set
    pub fn new(coverage: Vec<Vec<bool>>, costs: Vec<f64>) -> Result<Self> {
        let num_elements = coverage.len();
        let num_sets = costs.len();
        if num_elements == 0 || num_sets == 0 {
            return Err(ScpError::EmptyInstance);
        }

        for row in &coverage {
            if row.len() != num_sets {
                return Err(ScpError::DimensionMismatch {
                    what: "coverage row",
                    expected: num_sets,
                    actual: row.len(),
                });
            }
        }

        for (set, &cost) in costs.iter().enumerate() {
            if !cost.is_finite() || cost <= 0.0 {
                return Err(ScpError::NonPositiveCost { set, cost });
            }
        }

        let mut elements_covered_by = vec![Vec::new(); num_sets];
        let mut sets_covering = vec![Vec::new(); num_elements];
        for (e, row) in coverage.iter().enumerate() {
            for (s, &covered) in row.iter().enumerate() {
                if covered {
                    elements_covered_by[s].push(e);
                    sets_covering[e].push(s);
                }
            }
        }

        if let Some(element) = sets_covering.iter().position(Vec::is_empty) {
            return Err(ScpError::UncoverableElement { element });
        }

        let total_cost = costs.iter().sum();
        let integral_costs = costs.iter().all(|c| c.fract() == 0.0);

        Ok(Self {
            coverage,
            costs,
            elements_covered_by,
            sets_covering,
            total_cost,
            integral_costs,
            geometry: None,
        })
    }

    /// Attaches the planar layout the instance was generated from.
    pub fn with_geometry(mut self, geometry: Geometry) -> Result<Self> {
        if geometry.element_coords.len() != self.num_elements() {
            return Err(ScpError::DimensionMismatch {
                what: "element coordinates",
                expected: self.num_elements(),
                actual: geometry.element_coords.len(),
            });
        }
        if geometry.set_coords.len() != self.num_sets() {
            return Err(ScpError::DimensionMismatch {
                what: "set coordinates",
                expected: self.num_sets(),
                actual: geometry.set_coords.len(),
            });
        }
        self.geometry = Some(geometry);
        Ok(self)
    }

    /// Number of elements to be covered.
    pub fn num_elements(&self) -> usize {
        self.coverage.len()
    }

    /// Number of candidate covering sets.
    pub fn num_sets(&self) -> usize {
        self.costs.len()
    }

    /// Whether set `s` covers element `e`.
    pub fn covers(&self, element: usize, set: usize) -> bool {
        self.coverage[element][set]
    }

    /// The element × set coverage matrix.
    pub fn coverage(&self) -> &[Vec<bool>] {
        &self.coverage
    }

    /// Cost of set `s`.
    pub fn cost(&self, set: usize) -> f64 {
        self.costs[set]
    }

    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// Sum of all set costs (the cost of selecting every set).
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Whether every cost is a whole number.
    ///
    /// With integral costs any feasible cover costs an integer, so a lower
    /// bound can be rounded up before comparing it with an upper bound.
    pub fn has_integral_costs(&self) -> bool {
        self.integral_costs
    }

    /// Elements covered by set `s`, ascending.
    pub fn elements_covered_by(&self, set: usize) -> &[usize] {
        &self.elements_covered_by[set]
    }

    /// Sets covering element `e`, ascending.
    pub fn sets_covering(&self, element: usize) -> &[usize] {
        &self.sets_covering[element]
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// Cost of a selection vector.
    pub fn selection_cost(&self, selection: &[bool]) -> f64 {
        selection
            .iter()
            .zip(&self.costs)
            .filter(|(&selected, _)| selected)
            .map(|(_, &c)| c)
            .sum()
    }

    /// Number of elements not covered by any selected set.
    pub fn uncovered_count(&self, selection: &[bool]) -> usize {
        self.sets_covering
            .iter()
            .filter(|sets| !sets.iter().any(|&s| selection[s]))
            .count()
    }

    /// Whether every element is covered by at least one selected set.
    pub fn is_cover(&self, selection: &[bool]) -> bool {
        self.uncovered_count(selection) == 0
    }

    /// Checks that a selection vector has one entry per set.
    pub fn check_selection(&self, selection: &[bool]) -> Result<()> {
        if selection.len() != self.num_sets() {
            return Err(ScpError::DimensionMismatch {
                what: "selection vector",
                expected: self.num_sets(),
                actual: selection.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Three elements, four sets: rows `[1,0,1,0]`, `[1,0,0,1]`, `[0,1,1,1]`.
    pub(crate) fn small_instance() -> Instance {
        Instance::new(
            vec![
                vec![true, false, true, false],
                vec![true, false, false, true],
                vec![false, true, true, true],
            ],
            vec![2.0, 3.0, 4.0, 5.0],
        )
        .unwrap()
    }

    /// A seeded geometric instance on a 40 × 40 grid.
    pub(crate) fn generated_instance(seed: u64, elements: usize, sets: usize) -> Instance {
        generate::GeneratorConfig::new(elements, sets)
            .with_map_size(40)
            .with_radius(8)
            .generate(&mut crate::random::create_rng(Some(seed)))
            .unwrap()
    }

    #[test]
    fn test_indices() {
        let inst = small_instance();
        assert_eq!(inst.elements_covered_by(0), &[0, 1]);
        assert_eq!(inst.elements_covered_by(1), &[2]);
        assert_eq!(inst.elements_covered_by(3), &[1, 2]);
        assert_eq!(inst.sets_covering(2), &[1, 2, 3]);
        assert!((inst.total_cost() - 14.0).abs() < 1e-12);
        assert!(inst.has_integral_costs());
    }

    #[test]
    fn test_selection_cost_and_cover() {
        let inst = small_instance();
        let sel = [true, false, true, false];
        assert!((inst.selection_cost(&sel) - 6.0).abs() < 1e-12);
        assert!(inst.is_cover(&sel));
        assert_eq!(inst.uncovered_count(&[false, true, false, false]), 2);
    }

    #[test]
    fn test_rejects_uncoverable_element() {
        let err = Instance::new(vec![vec![true, false], vec![false, false]], vec![1.0, 1.0])
            .unwrap_err();
        assert!(matches!(err, ScpError::UncoverableElement { element: 1 }));
    }

    #[test]
    fn test_rejects_bad_cost() {
        let err = Instance::new(vec![vec![true, true]], vec![1.0, 0.0]).unwrap_err();
        assert!(matches!(err, ScpError::NonPositiveCost { set: 1, .. }));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = Instance::new(vec![vec![true, true], vec![true]], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, ScpError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            Instance::new(vec![], vec![1.0]),
            Err(ScpError::EmptyInstance)
        ));
    }

    #[test]
    fn test_fractional_costs_flag() {
        let inst = Instance::new(vec![vec![true, true]], vec![1.5, 2.0]).unwrap();
        assert!(!inst.has_integral_costs());
    }

    #[test]
    fn test_geometry_length_checked() {
        let inst = small_instance();
        let geometry = Geometry {
            radius: 3,
            map_size: 10,
            element_coords: vec![(0, 0); 2],
            set_coords: vec![(1, 1); 4],
        };
        assert!(inst.with_geometry(geometry).is_err());
    }
}
