use crate::app::{App, Phase};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io;
use std::time::Duration;

/// Each board square is CELL_W x CELL_H terminal cells
const CELL_W: u16 = 4;
const CELL_H: u16 = 2;
/// Width reserved for the info panel right of the board
const PANEL_W: u16 = 26;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide, Clear(ClearType::All))?;
    execute!(stdout, SetBackgroundColor(app.theme.bg))?;

    let grid_width = app.size as u16 * CELL_W;
    let grid_height = app.size as u16 * CELL_H;

    // Center board + panel horizontally, clamp to the top-left corner on
    // small terminals
    let total_width = grid_width + 3 + PANEL_W;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = if term_height > grid_height + 6 { 2 } else { 1 };

    render_board(stdout, app, start_x, start_y)?;

    let panel_x = start_x + grid_width + 3;
    render_info_panel(stdout, app, panel_x, start_y)?;

    let controls_y = start_y + grid_height.max(10) + 1;
    render_controls(stdout, app, start_x, controls_y)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width, controls_y + 2)?;
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_board(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    for row in 0..app.size {
        for col in 0..app.size {
            let bg = if app.last_step == Some((row, col)) {
                theme.active_bg
            } else if (row + col) % 2 == 0 {
                theme.light_square
            } else {
                theme.dark_square
            };

            let cell_x = x + col as u16 * CELL_W;
            let cell_y = y + row as u16 * CELL_H;
            let top = if app.board.is_occupied(row, col) {
                " Q  "
            } else {
                "    "
            };

            execute!(
                stdout,
                SetBackgroundColor(bg),
                SetForegroundColor(theme.queen),
                MoveTo(cell_x, cell_y),
                Print(top),
                MoveTo(cell_x, cell_y + 1),
                Print("    ")
            )?;
        }
    }

    execute!(stdout, SetBackgroundColor(theme.bg))?;
    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        MoveTo(x, y),
        SetForegroundColor(theme.fg),
        Print("N-QUEENS")
    )?;

    let (status, status_color) = match app.phase {
        Phase::Idle => ("Idle", theme.info),
        Phase::Searching => ("Searching...", theme.key),
        Phase::Browsing => {
            if app.solutions.is_empty() {
                ("No solutions", theme.error)
            } else {
                ("Done", theme.success)
            }
        }
    };
    execute!(
        stdout,
        MoveTo(x, y + 2),
        SetForegroundColor(status_color),
        Print(status)
    )?;

    let mut line = y + 4;
    let mut info = |stdout: &mut io::Stdout, label: &str, value: String| -> io::Result<()> {
        execute!(
            stdout,
            MoveTo(x, line),
            SetForegroundColor(theme.info),
            Print(format!("{:<10}", label)),
            SetForegroundColor(theme.fg),
            Print(value)
        )?;
        line += 1;
        Ok(())
    };

    info(stdout, "Board", format!("{0} x {0}", app.size))?;
    info(stdout, "Delay", format!("{} ms", app.delay_ms))?;
    info(stdout, "Steps", format!("{}", app.steps))?;
    info(stdout, "Elapsed", format_duration(app.elapsed()))?;

    if app.phase == Phase::Browsing {
        info(stdout, "Solutions", format!("{}", app.solutions.len()))?;
        if !app.solutions.is_empty() {
            info(
                stdout,
                "Showing",
                format!("#{} / {}", app.cursor + 1, app.solutions.len()),
            )?;
        }
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let bindings = [
        ("s", "start/stop"),
        ("n/p", "next/prev"),
        ("[/]", "size"),
        ("-/+", "delay"),
        ("t", "theme"),
        ("c", "clear"),
        ("q", "quit"),
    ];

    execute!(stdout, MoveTo(x, y), SetBackgroundColor(theme.bg))?;
    for (key, action) in bindings.iter() {
        execute!(
            stdout,
            SetForegroundColor(theme.key),
            Print(*key),
            SetForegroundColor(theme.info),
            Print(format!(" {}  ", action))
        )?;
    }
    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
    y: u16,
) -> io::Result<()> {
    let x = if term_width > msg.len() as u16 {
        (term_width - msg.len() as u16) / 2
    } else {
        0
    };
    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(app.theme.bg),
        SetForegroundColor(app.theme.key),
        Print(msg)
    )?;
    Ok(())
}

fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{:.1}s", elapsed.as_secs_f64())
    }
}
