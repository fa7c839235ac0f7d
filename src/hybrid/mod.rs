//! Hybrid orchestration.
//!
//! Chains two strategies under a shared time budget: the best cover of the
//! first phase warm-starts the second, and the two trajectories are joined
//! into one. Any pairing of the four strategies works; the common ones are
//! GA→SA, Lagrangian→SA, BH→SA and Lagrangian→BH, plus SA restarts feeding
//! a GA population through [`HybridRunner::restart_chain`].

mod config;
mod runner;
mod strategy;

pub use config::HybridConfig;
pub use runner::{HybridResult, HybridRunner, StageSummary};
pub use strategy::{StageOutcome, Strategy};
