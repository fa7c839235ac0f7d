//! Anytime heuristics for the weighted set covering problem.
//!
//! Given elements, candidate sets with positive costs and a 0/1 coverage
//! matrix, find a minimum-cost selection of sets covering every element.
//!
//! - **Feasibility repair** ([`Repairer`]): turns any selection vector into
//!   a feasible, irredundant cover. Every strategy is built on it.
//! - **Black-hole search** ([`bh`]): population search with adaptive
//!   population resizing.
//! - **Simulated annealing** ([`sa`]): cost-weighted bit flips with
//!   Metropolis acceptance.
//! - **Genetic algorithm** ([`ga`]): scheduled selection and crossover with
//!   an optional penalty mode.
//! - **Lagrangian heuristic** ([`lagrangian`]): subgradient optimization
//!   yielding both a lower bound and covers.
//! - **Hybrid orchestration** ([`hybrid`]): chains strategies, warm-starting
//!   each from the previous best.
//!
//! Every run returns its best cover, why it stopped, and a [`Trajectory`] of
//! `(best cost, elapsed seconds)` samples, one per iteration.
//!
//! # Example
//!
//! ```
//! use scp_heur::instance::generate::GeneratorConfig;
//! use scp_heur::random::create_rng;
//! use scp_heur::sa::{SaConfig, SaRunner};
//!
//! let mut rng = create_rng(Some(42));
//! let instance = GeneratorConfig::new(30, 20).generate(&mut rng).unwrap();
//!
//! let config = SaConfig::default().with_max_iterations(200).with_seed(42);
//! let result = SaRunner::run(&instance, &config).unwrap();
//! assert!(instance.is_cover(result.best.selection()));
//! ```

pub mod bh;
pub mod candidate;
pub mod error;
pub mod ga;
pub mod hybrid;
pub mod instance;
pub mod lagrangian;
pub mod random;
pub mod repair;
pub mod sa;
pub mod termination;
pub mod trajectory;

pub use candidate::Candidate;
pub use error::{Result, ScpError};
pub use instance::{Geometry, Instance};
pub use repair::Repairer;
pub use termination::{StopReason, Termination};
pub use trajectory::{MaskSink, Sample, Trajectory};
