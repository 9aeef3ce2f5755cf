//! Searches for turn sequences that bring a cube to a goal state.

#![warn(clippy::pedantic)]

pub mod config;
pub mod filter;
pub mod goal;
pub mod heuristic;
pub mod search;

pub use config::{ConfiguredSolver, FilterKind, HeuristicKind, SolverConfig, SolverConfigError, StrategyKind};
pub use search::{SearchStrategy, Solver, StagedSolver};

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}
