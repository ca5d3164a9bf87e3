//! N-Queens backtracking engine.
//!
//! Enumerates all placements of N non-attacking queens on an N×N board,
//! column by column, reporting each placement and removal through an event
//! channel so a presentation layer can animate the search. The search runs
//! on a dedicated worker thread (see [`spawn`]) and can be cancelled at any
//! point through its [`RunHandle`].

mod board;
mod error;
mod run;
mod solver;

pub use board::{Board, Position, Solution};
pub use error::SolverError;
pub use run::{spawn, RunHandle};
pub use solver::{SearchEvent, Solver};
