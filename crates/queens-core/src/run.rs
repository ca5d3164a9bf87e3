use crate::board::Solution;
use crate::solver::Solver;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Token for one in-flight search run.
///
/// Returned by [`spawn`]; cancellation and completion are tracked per
/// handle, so a late cancel request can never apply to the wrong run.
/// Exactly one run exists per handle; callers that want to restart must
/// `stop()` the old handle first, which blocks until the worker has
/// actually exited.
pub struct RunHandle {
    cancel: Arc<AtomicBool>,
    worker: JoinHandle<Vec<Solution>>,
}

/// Start the solver's search on a dedicated worker thread.
///
/// The solver's event channel (if any) keeps delivering step notifications
/// while the worker runs; the final [`crate::SearchEvent::Complete`] is
/// sent before the worker exits.
pub fn spawn(mut solver: Solver) -> RunHandle {
    let cancel = solver.cancel_flag();
    let worker = thread::spawn(move || {
        solver.run();
        solver.into_solutions()
    });
    RunHandle { cancel, worker }
}

impl RunHandle {
    /// Ask the run to stop. Observed at the next candidate-row attempt.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Cancel and block until the worker has exited, returning whatever
    /// solutions were accumulated before the flag was observed.
    pub fn stop(self) -> Vec<Solution> {
        self.cancel();
        self.join()
    }

    /// Block until the run finishes naturally
    pub fn join(self) -> Vec<Solution> {
        self.worker.join().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::SearchEvent;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_spawned_run_completes() {
        let solver = Solver::new(8).unwrap();
        let handle = spawn(solver);
        let solutions = handle.join();
        assert_eq!(solutions.len(), 92);
    }

    #[test]
    fn test_stop_yields_prefix_of_full_set() {
        let mut full_solver = Solver::new(8).unwrap();
        let full = full_solver.run().to_vec();

        // Pacing keeps the run alive long enough to cancel mid-search
        let solver = Solver::new(8)
            .unwrap()
            .with_pacing(Duration::from_millis(1));
        let handle = spawn(solver);
        std::thread::sleep(Duration::from_millis(50));
        let partial = handle.stop();

        assert!(partial.len() <= full.len());
        assert_eq!(partial[..], full[..partial.len()]);
        for solution in &partial {
            assert!(solution.is_valid());
        }
    }

    #[test]
    fn test_complete_event_delivered_after_cancel() {
        let (tx, rx) = mpsc::channel();
        let solver = Solver::new(10)
            .unwrap()
            .with_pacing(Duration::from_millis(1))
            .with_events(tx);
        let handle = spawn(solver);
        std::thread::sleep(Duration::from_millis(20));
        handle.stop();

        let mut completions = 0;
        while let Ok(event) = rx.try_recv() {
            if let SearchEvent::Complete(_) = event {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_is_finished() {
        let solver = Solver::new(4).unwrap();
        let handle = spawn(solver);
        let solutions = handle.join();
        assert_eq!(solutions.len(), 2);

        let solver = Solver::new(12)
            .unwrap()
            .with_pacing(Duration::from_millis(5));
        let handle = spawn(solver);
        assert!(!handle.is_finished());
        handle.stop();
    }
}
