//! Black-hole search.
//!
//! A population metaheuristic: the best star found so far becomes the
//! *black hole*. Every iteration, stars inside the event horizon (radius
//! `black_hole_cost / Σ star costs`) are absorbed and replaced by fresh random
//! covers, and all other stars are pulled toward the black hole through a
//! logistic squashing of `x - r·(bh - x)` followed by repair. When the black
//! hole stops improving, the population is grown or shrunk adaptively.
//!
//! # References
//!
//! - Hatamlou (2013), "Black hole: A new heuristic optimization approach for
//!   data clustering"
//! - Soto et al. (2017), "Solving the non-unicost set covering problem by
//!   using cuckoo search and black hole optimization"

mod config;
mod runner;

pub use config::{BhConfig, HorizonTest};
pub use runner::{BhResult, BhRunner};
