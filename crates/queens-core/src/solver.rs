use crate::board::{Board, Solution};
use crate::error::SolverError;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Notification sent from the search worker to the presentation side.
///
/// Each event is a point-in-time fact: a single cell transition, or the
/// final solution-set snapshot. The consumer drains them at its own pace;
/// it never reads the worker's board directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchEvent {
    /// A queen was placed on (`placed == true`) or removed from a cell
    Step {
        row: usize,
        col: usize,
        placed: bool,
    },
    /// The run finished, completed or cancelled; sent exactly once per run
    Complete(Vec<Solution>),
}

/// Recursive backtracking engine over a mutable N×N board.
///
/// Owns the board, the accepted solutions, and the cancellation flag for
/// one run at a time. `run()` drives a full search synchronously; use
/// [`crate::spawn`] to put it on a worker thread.
pub struct Solver {
    board: Board,
    solutions: Vec<Solution>,
    cancel: Arc<AtomicBool>,
    pacing: Duration,
    events: Option<Sender<SearchEvent>>,
}

impl Solver {
    /// Create a solver for an N×N board. Rejects `size == 0`.
    pub fn new(size: usize) -> Result<Self, SolverError> {
        if size == 0 {
            return Err(SolverError::InvalidSize { size });
        }
        Ok(Self {
            board: Board::new(size),
            solutions: Vec::new(),
            cancel: Arc::new(AtomicBool::new(false)),
            pacing: Duration::ZERO,
            events: None,
        })
    }

    /// Sleep this long on the worker after each step event
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Deliver step and completion notifications through this channel
    pub fn with_events(mut self, events: Sender<SearchEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Shared handle to the cancellation flag. Setting it stops the search
    /// at the next candidate-row attempt.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn solution_count(&self) -> usize {
        self.solutions.len()
    }

    /// Read accessor for a stored solution, used by playback
    pub fn solution(&self, index: usize) -> Option<&Solution> {
        self.solutions.get(index)
    }

    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }

    /// Run one full search.
    ///
    /// Clears the solution set and the board, explores the whole tree (or
    /// stops early if cancelled), then clears the cancellation flag and
    /// emits [`SearchEvent::Complete`] with the possibly partial result.
    pub fn run(&mut self) -> &[Solution] {
        self.solutions.clear();
        self.board.clear();
        self.search(0);
        self.cancel.store(false, Ordering::Release);
        if let Some(events) = &self.events {
            let _ = events.send(SearchEvent::Complete(self.solutions.clone()));
        }
        &self.solutions
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    /// Place queens into column `col` and recurse.
    ///
    /// Rows are tried in ascending order, which fixes the solution
    /// discovery order. Cancellation is checked at the top of every row
    /// attempt; already-placed queens in outer frames are still unwound
    /// (with their removal events) on the way out.
    fn search(&mut self, col: usize) {
        let size = self.board.size();
        if col == size {
            self.solutions.push(self.board.snapshot());
            return;
        }

        for row in 0..size {
            if self.cancelled() {
                return;
            }
            if !self.board.is_safe(row, col) {
                continue;
            }

            self.board.place(row, col);
            self.emit(row, col, true);

            self.search(col + 1);

            self.board.remove(row, col);
            self.emit(row, col, false);
        }
    }

    fn emit(&self, row: usize, col: usize, placed: bool) {
        if let Some(events) = &self.events {
            let _ = events.send(SearchEvent::Step { row, col, placed });
        }
        // Pacing is skipped once cancelled so unwinding stays bounded
        if !self.pacing.is_zero() && !self.cancelled() {
            thread::sleep(self.pacing);
        }
    }
}
