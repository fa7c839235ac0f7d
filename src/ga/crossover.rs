//! Binary crossover operators.

use super::types::Chromosome;
use rand::Rng;

/// Crossover producing two children from two parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Swap tails after one random cut.
    #[default]
    OnePoint,

    /// Swap the middle segment between two random cuts.
    TwoPoint,

    /// Each gene comes from the second parent with probability
    /// `c1 / (c1 + c2)`, so the cheaper parent contributes more.
    Uniform,

    /// Each gene comes from either parent with probability 1/2.
    Random,
}

impl Crossover {
    /// Produces two children.
    ///
    /// Vectors shorter than two genes are copied unchanged by the
    /// cut-based operators.
    pub fn cross<R: Rng>(self, p1: &Chromosome, p2: &Chromosome, rng: &mut R) -> [Vec<bool>; 2] {
        let (a, b) = (p1.genes(), p2.genes());
        let n = a.len();
        match self {
            Crossover::OnePoint => {
                if n < 2 {
                    return [a.to_vec(), b.to_vec()];
                }
                let cut = rng.random_range(1..n);
                [splice(a, b, cut, n), splice(b, a, cut, n)]
            }
            Crossover::TwoPoint => {
                if n < 2 {
                    return [a.to_vec(), b.to_vec()];
                }
                let lo = rng.random_range(1..n);
                let hi = rng.random_range(lo..=n);
                [splice(a, b, lo, hi), splice(b, a, lo, hi)]
            }
            Crossover::Uniform => {
                let (c1, c2) = (p1.cost(), p2.cost());
                let p = if c1 + c2 > 0.0 { c1 / (c1 + c2) } else { 0.5 };
                [mix(a, b, p, rng), mix(a, b, p, rng)]
            }
            Crossover::Random => [mix(a, b, 0.5, rng), mix(a, b, 0.5, rng)],
        }
    }
}

/// `base` with `[lo, hi)` taken from `donor`.
fn splice(base: &[bool], donor: &[bool], lo: usize, hi: usize) -> Vec<bool> {
    let mut child = base.to_vec();
    child[lo..hi].copy_from_slice(&donor[lo..hi]);
    child
}

/// Each gene from `second` with probability `p`.
fn mix<R: Rng>(first: &[bool], second: &[bool], p: f64, rng: &mut R) -> Vec<bool> {
    first
        .iter()
        .zip(second)
        .map(|(&x, &y)| if rng.random_bool(p) { y } else { x })
        .collect()
}
