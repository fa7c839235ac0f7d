//! Genetic algorithm for set covering.
//!
//! Chromosomes are selection vectors. Each generation selects parents,
//! crosses consecutive pairs, mutates the children with one random bit flip,
//! repairs them, and selects survivors from the de-duplicated union of
//! parents and children. The best feasible chromosome ever seen is the result.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, operator schedules, penalty mode)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best cover with per-generation statistics
//! - [`Schedule`]: Operator choice over run progress
//!
//! # Penalty mode
//!
//! With a [`Penalty`], the first chromosomes of the initial population and
//! of each generation's offspring skip repair and lose `fine` fitness per
//! uncovered element, keeping infeasible genetic material in the population.
//! Only feasible chromosomes can become the result.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Beasley & Chu (1996), "A genetic algorithm for the set covering problem"

mod config;
mod crossover;
mod runner;
mod schedule;
mod selection;
mod types;

pub use config::{GaConfig, Penalty};
pub use crossover::Crossover;
pub use runner::{GaResult, GaRunner};
pub use schedule::Schedule;
pub use selection::Selection;
pub use types::Chromosome;
