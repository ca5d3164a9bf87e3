use crate::prefs::Preferences;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use queens_core::{spawn, Board, RunHandle, SearchEvent, Solution, Solver};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};

/// Smallest board the UI will configure
pub const MIN_SIZE: usize = 1;
/// Largest board the UI will render
pub const MAX_SIZE: usize = 16;
/// Upper bound for the pacing delay, in milliseconds
pub const MAX_DELAY_MS: u64 = 2000;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// What the board area is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No search has run yet, or the board was cleared
    Idle,
    /// A worker is exploring the search tree
    Searching,
    /// A finished run's solutions are available for stepping through
    Browsing,
}

/// The main application state.
///
/// The board here is a view: it is mutated only by events drained from the
/// search worker's channel, never by reading the worker's own board, so it
/// can never show a torn intermediate state.
pub struct App {
    /// Board size for the next run
    pub size: usize,
    /// Pacing delay for the next run, in milliseconds
    pub delay_ms: u64,
    /// Color theme
    pub theme: Theme,
    theme_index: usize,
    /// Current phase
    pub phase: Phase,
    /// Event-driven view of the search board
    pub board: Board,
    /// Solution set from the last completed run
    pub solutions: Vec<Solution>,
    /// Playback cursor into the solution set
    pub cursor: usize,
    /// Cell of the most recent placement, for highlighting
    pub last_step: Option<(usize, usize)>,
    /// Step notifications seen this run
    pub steps: u64,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    run: Option<RunHandle>,
    events: Option<Receiver<SearchEvent>>,
    search_started: Option<Instant>,
    search_elapsed: Duration,
}

impl App {
    /// Create the app from merged preferences. Rejects sizes the grid
    /// cannot hold.
    pub fn new(prefs: Preferences) -> Result<Self, String> {
        if prefs.size < MIN_SIZE || prefs.size > MAX_SIZE {
            return Err(format!(
                "board size must be between {} and {}, got {}",
                MIN_SIZE, MAX_SIZE, prefs.size
            ));
        }
        let theme_index = Theme::NAMES
            .iter()
            .position(|&name| name == prefs.theme)
            .unwrap_or(0);
        Ok(Self {
            size: prefs.size,
            delay_ms: prefs.delay_ms.min(MAX_DELAY_MS),
            theme: Theme::by_name(Theme::NAMES[theme_index]),
            theme_index,
            phase: Phase::Idle,
            board: Board::new(prefs.size),
            solutions: Vec::new(),
            cursor: 0,
            last_step: None,
            steps: 0,
            message: None,
            message_timer: 0,
            run: None,
            events: None,
            search_started: None,
            search_elapsed: Duration::ZERO,
        })
    }

    /// Current preferences, for saving on exit
    pub fn preferences(&self) -> Preferences {
        Preferences {
            size: self.size,
            delay_ms: self.delay_ms,
            theme: Theme::NAMES[self.theme_index].to_string(),
        }
    }

    /// Get the tick rate based on current phase
    pub fn tick_rate(&self) -> Duration {
        match self.phase {
            Phase::Searching => Duration::from_millis(33),
            Phase::Idle | Phase::Browsing => Duration::from_millis(100),
        }
    }

    /// Wall-clock time of the current or last run
    pub fn elapsed(&self) -> Duration {
        match (self.phase, self.search_started) {
            (Phase::Searching, Some(started)) => started.elapsed(),
            _ => self.search_elapsed,
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30;
    }

    /// Update timers and drain pending search events (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }
        self.drain_events();
    }

    fn drain_events(&mut self) {
        let Some(events) = self.events.take() else {
            return;
        };
        let mut closed = false;
        loop {
            match events.try_recv() {
                Ok(event) => {
                    if self.apply_event(event) {
                        closed = true;
                        break;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    closed = true;
                    break;
                }
            }
        }
        if !closed {
            self.events = Some(events);
        }
    }

    /// Apply one event to the view. Returns true once the run is over and
    /// the channel can be dropped.
    fn apply_event(&mut self, event: SearchEvent) -> bool {
        match event {
            SearchEvent::Step { row, col, placed } => {
                if placed {
                    self.board.place(row, col);
                    self.last_step = Some((row, col));
                } else {
                    self.board.remove(row, col);
                    if self.last_step == Some((row, col)) {
                        self.last_step = None;
                    }
                }
                self.steps += 1;
                false
            }
            SearchEvent::Complete(solutions) => {
                self.finish_run(solutions);
                true
            }
        }
    }

    fn finish_run(&mut self, solutions: Vec<Solution>) {
        if let Some(run) = self.run.take() {
            // Complete was already delivered, so this join is immediate
            run.join();
        }
        if let Some(started) = self.search_started.take() {
            self.search_elapsed = started.elapsed();
        }
        self.solutions = solutions;
        self.cursor = 0;
        self.last_step = None;
        self.phase = Phase::Browsing;
        if self.solutions.is_empty() {
            self.board.clear();
            self.show_message(&format!("No solutions found for N = {}", self.size));
        } else {
            self.show_solution(0);
            self.show_message(&format!(
                "Found {} solutions for N = {}",
                self.solutions.len(),
                self.size
            ));
        }
    }

    /// Start a new run. If one is still active it is force-cancelled and
    /// joined first, so exactly one worker ever exists.
    pub fn start(&mut self) {
        self.stop_active();
        let solver = match Solver::new(self.size) {
            Ok(solver) => solver,
            Err(e) => {
                self.show_message(&e.to_string());
                return;
            }
        };
        let (tx, rx) = mpsc::channel();
        let solver = solver
            .with_pacing(Duration::from_millis(self.delay_ms))
            .with_events(tx);
        self.run = Some(spawn(solver));
        self.events = Some(rx);
        self.board = Board::new(self.size);
        self.solutions.clear();
        self.cursor = 0;
        self.last_step = None;
        self.steps = 0;
        self.search_started = Some(Instant::now());
        self.phase = Phase::Searching;
        self.show_message(&format!("Searching N = {}", self.size));
    }

    /// Ask the active run to stop. The phase stays Searching until its
    /// Complete event arrives through the channel.
    pub fn cancel(&mut self) {
        if let Some(run) = &self.run {
            run.cancel();
            self.show_message("Cancelling...");
        }
    }

    /// Cancel and join any active run, discarding its stale channel
    fn stop_active(&mut self) {
        if let Some(run) = self.run.take() {
            run.stop();
        }
        self.events = None;
    }

    /// Cancel any active run and persist preferences (called on exit)
    pub fn shutdown(&mut self) {
        self.stop_active();
        self.preferences().save();
    }

    /// Display one stored solution: clear the board, mark exactly its
    /// cells. Idempotent.
    pub fn show_solution(&mut self, index: usize) {
        let Some(solution) = self.solutions.get(index) else {
            return;
        };
        self.board = Board::new(self.size);
        for queen in solution.queens() {
            self.board.place(queen.row, queen.col);
        }
        self.cursor = index;
        self.last_step = None;
    }

    /// Advance the playback cursor, wrapping modulo the set size
    pub fn next_solution(&mut self) {
        if self.solutions.is_empty() {
            return;
        }
        let index = (self.cursor + 1) % self.solutions.len();
        self.show_solution(index);
        self.announce_cursor();
    }

    /// Step the playback cursor backwards, with the same wrap
    pub fn prev_solution(&mut self) {
        if self.solutions.is_empty() {
            return;
        }
        let index = (self.cursor + self.solutions.len() - 1) % self.solutions.len();
        self.show_solution(index);
        self.announce_cursor();
    }

    fn announce_cursor(&mut self) {
        self.show_message(&format!(
            "Solution #{} / {}",
            self.cursor + 1,
            self.solutions.len()
        ));
    }

    fn adjust_size(&mut self, delta: i64) {
        if self.phase == Phase::Searching {
            self.show_message("Stop the search first");
            return;
        }
        let size = (self.size as i64 + delta).clamp(MIN_SIZE as i64, MAX_SIZE as i64) as usize;
        if size != self.size {
            self.size = size;
            self.board = Board::new(size);
            self.solutions.clear();
            self.cursor = 0;
            self.steps = 0;
            self.phase = Phase::Idle;
            self.show_message(&format!("Board size {0} x {0}", size));
        }
    }

    fn adjust_delay(&mut self, delta: i64) {
        let delay = (self.delay_ms as i64 + delta).clamp(0, MAX_DELAY_MS as i64) as u64;
        if delay != self.delay_ms {
            self.delay_ms = delay;
            self.show_message(&format!("Delay {} ms", delay));
        }
    }

    fn cycle_theme(&mut self) {
        self.theme_index = (self.theme_index + 1) % Theme::NAMES.len();
        self.theme = Theme::by_name(Theme::NAMES[self.theme_index]);
        self.show_message(&format!("{} theme", Theme::NAMES[self.theme_index]));
    }

    fn clear_board(&mut self) {
        if self.phase == Phase::Searching {
            self.show_message("Stop the search first");
            return;
        }
        self.board = Board::new(self.size);
        self.last_step = None;
        self.phase = Phase::Idle;
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,

            // The original's single button: start, or stop while running
            KeyCode::Char('s') | KeyCode::Enter | KeyCode::Char(' ') => {
                if self.phase == Phase::Searching {
                    self.cancel();
                } else {
                    self.start();
                }
            }

            // Solution playback
            KeyCode::Char('n') | KeyCode::Right => self.next_solution(),
            KeyCode::Char('p') | KeyCode::Left => self.prev_solution(),

            // Board size (idle only)
            KeyCode::Char(']') | KeyCode::Up => self.adjust_size(1),
            KeyCode::Char('[') | KeyCode::Down => self.adjust_size(-1),

            // Pacing delay (applies to the next run)
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_delay(10),
            KeyCode::Char('-') => self.adjust_delay(-10),

            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Char('c') => self.clear_board(),

            _ => {}
        }
        AppAction::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_solutions(size: usize) -> App {
        let mut app = App::new(Preferences {
            size,
            delay_ms: 0,
            theme: "dark".to_string(),
        })
        .unwrap();
        let mut solver = Solver::new(size).unwrap();
        app.solutions = solver.run().to_vec();
        app.phase = Phase::Browsing;
        app
    }

    #[test]
    fn test_rejects_out_of_range_size() {
        let prefs = Preferences {
            size: 0,
            ..Preferences::default()
        };
        assert!(App::new(prefs).is_err());
        let prefs = Preferences {
            size: MAX_SIZE + 1,
            ..Preferences::default()
        };
        assert!(App::new(prefs).is_err());
    }

    #[test]
    fn test_cycling_returns_to_start() {
        let mut app = app_with_solutions(6);
        assert_eq!(app.solutions.len(), 4);
        app.show_solution(0);
        for _ in 0..app.solutions.len() {
            app.next_solution();
        }
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_prev_wraps_backwards() {
        let mut app = app_with_solutions(4);
        app.show_solution(0);
        app.prev_solution();
        assert_eq!(app.cursor, app.solutions.len() - 1);
        app.next_solution();
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_next_solution_noop_on_empty_set() {
        let mut app = app_with_solutions(3);
        assert!(app.solutions.is_empty());
        app.next_solution();
        assert_eq!(app.cursor, 0);
        assert_eq!(app.board.occupied_count(), 0);
    }

    #[test]
    fn test_show_solution_is_idempotent() {
        let mut app = app_with_solutions(5);
        app.show_solution(3);
        let once = app.board.clone();
        app.show_solution(3);
        assert_eq!(app.board, once);
        assert_eq!(app.board.occupied_count(), 5);
    }

    #[test]
    fn test_show_solution_replaces_previous_display() {
        let mut app = app_with_solutions(4);
        app.show_solution(0);
        app.show_solution(1);
        let expected = &app.solutions[1];
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(app.board.is_occupied(row, col), expected.is_occupied(row, col));
            }
        }
    }

    #[test]
    fn test_step_events_drive_the_view() {
        let mut app = app_with_solutions(4);
        assert!(!app.apply_event(SearchEvent::Step {
            row: 2,
            col: 0,
            placed: true
        }));
        assert!(app.board.is_occupied(2, 0));
        assert_eq!(app.last_step, Some((2, 0)));
        assert!(!app.apply_event(SearchEvent::Step {
            row: 2,
            col: 0,
            placed: false
        }));
        assert!(!app.board.is_occupied(2, 0));
        assert_eq!(app.last_step, None);
        assert_eq!(app.steps, 2);
    }

    #[test]
    fn test_complete_event_shows_first_solution() {
        let mut app = app_with_solutions(4);
        let solutions = app.solutions.clone();
        app.solutions.clear();
        app.phase = Phase::Searching;
        assert!(app.apply_event(SearchEvent::Complete(solutions)));
        assert_eq!(app.phase, Phase::Browsing);
        assert_eq!(app.cursor, 0);
        assert_eq!(app.board.occupied_count(), 4);
    }

    #[test]
    fn test_complete_with_no_solutions_clears_board() {
        let mut app = app_with_solutions(3);
        app.board.place(1, 1);
        app.phase = Phase::Searching;
        app.apply_event(SearchEvent::Complete(Vec::new()));
        assert_eq!(app.board.occupied_count(), 0);
        assert!(app.message.as_deref().unwrap_or("").contains("No solutions"));
    }

    #[test]
    fn test_run_end_to_end_through_channel() {
        let mut app = App::new(Preferences {
            size: 6,
            delay_ms: 0,
            theme: "dark".to_string(),
        })
        .unwrap();
        app.start();
        assert_eq!(app.phase, Phase::Searching);
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.phase == Phase::Searching && Instant::now() < deadline {
            app.tick();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(app.phase, Phase::Browsing);
        assert_eq!(app.solutions.len(), 4);
        // Board shows the first discovered solution
        assert_eq!(app.board.occupied_count(), 6);
    }

    #[test]
    fn test_restart_while_active_spawns_a_fresh_run() {
        let mut app = App::new(Preferences {
            size: 8,
            delay_ms: 20,
            theme: "dark".to_string(),
        })
        .unwrap();
        app.start();
        // Second start force-stops the first worker before spawning
        app.start();
        assert_eq!(app.phase, Phase::Searching);
        assert!(app.solutions.is_empty());
        assert_eq!(app.steps, 0);
        app.stop_active();
        assert!(app.run.is_none());
    }

    #[test]
    fn test_size_adjustment_clamps_and_resets() {
        let mut app = app_with_solutions(4);
        app.adjust_size(1);
        assert_eq!(app.size, 5);
        assert!(app.solutions.is_empty());
        assert_eq!(app.phase, Phase::Idle);
        for _ in 0..100 {
            app.adjust_size(1);
        }
        assert_eq!(app.size, MAX_SIZE);
        for _ in 0..100 {
            app.adjust_size(-1);
        }
        assert_eq!(app.size, MIN_SIZE);
    }
}
