//! Simulated annealing (SA).
//!
//! A single-solution trajectory metaheuristic. Each iteration flips a few
//! sets of the current cover, chosen with probability proportional to
//! `cost / |covered elements|`, repairs the result, and accepts it by the
//! Metropolis criterion at the current temperature.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Hajek (1988), "Cooling Schedules for Optimal Annealing"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod runner;

pub use config::{CoolingSchedule, SaConfig};
pub use runner::{SaResult, SaRunner};
