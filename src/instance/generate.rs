//! Random geometric instances.
//!
//! Elements and covering sets are scattered over distinct cells of a square
//! grid; a set covers every element within the coverage radius. The radius is
//! grown one unit at a time until every element is covered, so the generated
//! instance always satisfies the coverability precondition of [`Instance`].

use super::{Geometry, Instance};
use crate::error::{Result, ScpError};
use rand::Rng;
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Parameters of the geometric instance generator.
///
/// # Examples
///
/// ```
/// use scp_heur::instance::generate::GeneratorConfig;
/// use scp_heur::random::create_rng;
///
/// let mut rng = create_rng(Some(1));
/// let instance = GeneratorConfig::new(30, 20)
///     .with_radius(15)
///     .generate(&mut rng)
///     .unwrap();
/// assert_eq!(instance.num_elements(), 30);
/// assert_eq!(instance.num_sets(), 20);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    /// Side length of the grid.
    pub map_size: u32,
    pub elements: usize,
    pub sets: usize,
    /// Initial coverage radius; grown until the instance is coverable.
    pub radius: u32,
    /// Inclusive range of integer set costs.
    pub cost_range: RangeInclusive<u32>,
}

impl GeneratorConfig {
    /// Creates a configuration on a 100 × 100 grid with radius 10 and costs in `5..=100`.
    pub fn new(elements: usize, sets: usize) -> Self {
        Self {
            map_size: 100,
            elements,
            sets,
            radius: 10,
            cost_range: 5..=100,
        }
    }

    pub fn with_map_size(mut self, size: u32) -> Self {
        self.map_size = size;
        self
    }

    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_cost_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.cost_range = range;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.elements == 0 || self.sets == 0 {
            return Err(ScpError::EmptyInstance);
        }
        let cells = self.map_size as usize * self.map_size as usize;
        if self.elements + self.sets > cells {
            return Err(ScpError::config(format!(
                "{} points do not fit on a {}x{} grid",
                self.elements + self.sets,
                self.map_size,
                self.map_size
            )));
        }
        if *self.cost_range.start() == 0 || self.cost_range.is_empty() {
            return Err(ScpError::config("cost_range must be non-empty and positive"));
        }
        Ok(())
    }

    /// Generates a coverable instance.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<Instance> {
        self.validate()?;

        let mut occupied = HashSet::with_capacity(self.elements + self.sets);
        let element_coords = self.place(self.elements, &mut occupied, rng);
        let set_coords = self.place(self.sets, &mut occupied, rng);
        let costs: Vec<f64> = (0..self.sets)
            .map(|_| rng.random_range(self.cost_range.clone()) as f64)
            .collect();

        let mut radius = self.radius;
        let coverage = loop {
            if let Some(coverage) = coverage_within(&element_coords, &set_coords, radius) {
                break coverage;
            }
            radius += 1;
        };
        log::debug!(
            "generated instance: {} elements, {} sets, radius {}",
            self.elements,
            self.sets,
            radius
        );

        Instance::new(coverage, costs)?.with_geometry(Geometry {
            radius,
            map_size: self.map_size,
            element_coords,
            set_coords,
        })
    }

    fn place<R: Rng>(
        &self,
        count: usize,
        occupied: &mut HashSet<(u32, u32)>,
        rng: &mut R,
    ) -> Vec<(u32, u32)> {
        let mut points = Vec::with_capacity(count);
        while points.len() < count {
            let p = (
                rng.random_range(0..self.map_size),
                rng.random_range(0..self.map_size),
            );
            if occupied.insert(p) {
                points.push(p);
            }
        }
        points
    }
}

/// Coverage matrix for a radius, or `None` if some element stays uncovered.
fn coverage_within(
    elements: &[(u32, u32)],
    sets: &[(u32, u32)],
    radius: u32,
) -> Option<Vec<Vec<bool>>> {
    let r2 = radius as i64 * radius as i64;
    elements
        .iter()
        .map(|&(ex, ey)| {
            let row: Vec<bool> = sets
                .iter()
                .map(|&(sx, sy)| {
                    let dx = sx as i64 - ex as i64;
                    let dy = sy as i64 - ey as i64;
                    dx * dx + dy * dy <= r2
                })
                .collect();
            row.contains(&true).then_some(row)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_generated_instance_is_coverable() {
        let mut rng = create_rng(Some(3));
        let inst = GeneratorConfig::new(40, 25)
            .with_radius(1)
            .generate(&mut rng)
            .unwrap();
        let g = inst.geometry().unwrap();
        assert!(g.radius >= 1);
        for e in 0..inst.num_elements() {
            assert!(!inst.sets_covering(e).is_empty());
        }
    }

    #[test]
    fn test_points_are_distinct() {
        let mut rng = create_rng(Some(5));
        let inst = GeneratorConfig::new(10, 6)
            .with_map_size(5)
            .generate(&mut rng)
            .unwrap();
        let g = inst.geometry().unwrap();
        let all: HashSet<_> = g.element_coords.iter().chain(&g.set_coords).collect();
        assert_eq!(all.len(), 16);
    }

    #[test]
    fn test_costs_in_range() {
        let mut rng = create_rng(Some(9));
        let inst = GeneratorConfig::new(10, 30)
            .with_cost_range(7..=9)
            .generate(&mut rng)
            .unwrap();
        assert!(inst.costs().iter().all(|&c| (7.0..=9.0).contains(&c)));
        assert!(inst.has_integral_costs());
    }

    #[test]
    fn test_too_many_points() {
        let mut rng = create_rng(Some(1));
        let result = GeneratorConfig::new(20, 10).with_map_size(5).generate(&mut rng);
        assert!(result.is_err());
    }

    #[test]
    fn test_same_seed_same_instance() {
        let a = GeneratorConfig::new(15, 10)
            .generate(&mut create_rng(Some(11)))
            .unwrap();
        let b = GeneratorConfig::new(15, 10)
            .generate(&mut create_rng(Some(11)))
            .unwrap();
        assert_eq!(a.to_text(), b.to_text());
    }
}
