use thiserror::Error;

/// Configuration errors reported before a search is allowed to start
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// The board must hold at least one queen
    #[error("board size must be at least 1, got {size}")]
    InvalidSize { size: usize },
}
