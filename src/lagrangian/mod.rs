//! Lagrangian relaxation with subgradient optimization.
//!
//! Relaxing the covering constraints with multipliers `t[e] ≥ 0` gives a
//! subproblem solved in closed form: take every set whose reduced cost
//! `c[s] - Σ_{e ∈ s} t[e]` is non-positive. Its value is a lower bound on the
//! optimum. Each iteration repairs that relaxed solution into a cover (an
//! upper bound), fixes out sets that provably cannot improve on the best
//! cover, and moves the multipliers along the subgradient with a Polyak step.
//!
//! The run stops early when the bound gap closes (the best cover is
//! optimal) or the subgradient vanishes.
//!
//! # References
//!
//! - Beasley (1990), "A Lagrangian heuristic for set-covering problems"
//! - Held, Wolfe & Crowder (1974), "Validation of subgradient optimization"

mod config;
mod runner;

pub use config::LagrangianConfig;
pub use runner::{LagrangianResult, LagrangianRunner};
