mod app;
mod prefs;
mod render;
mod theme;

use app::App;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use prefs::Preferences;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Animated N-Queens backtracking visualizer
#[derive(Parser, Debug)]
#[command(name = "queens", version, about)]
struct Args {
    /// Board size (number of queens)
    #[arg(short = 'n', long)]
    size: Option<usize>,

    /// Pacing delay between search steps, in milliseconds
    #[arg(short, long)]
    delay: Option<u64>,

    /// Color theme: dark, light, or high-contrast
    #[arg(short, long)]
    theme: Option<String>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // Saved preferences provide the defaults; flags override them
    let mut prefs = Preferences::load();
    if let Some(size) = args.size {
        prefs.size = size;
    }
    if let Some(delay) = args.delay {
        prefs.delay_ms = delay;
    }
    if let Some(theme) = args.theme {
        prefs.theme = theme;
    }

    let app = match App::new(prefs) {
        Ok(app) => app,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            std::process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Run the app
    let result = run_app(&mut stdout, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, mut app: App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.tick_rate();

        // Render
        render::render(stdout, &app)?;
        stdout.flush()?;

        // Handle input with timeout so search events keep animating
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            if let Event::Key(key) = event::read()? {
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }

        // Drain search events and update timers
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    app.shutdown();
    Ok(())
}
