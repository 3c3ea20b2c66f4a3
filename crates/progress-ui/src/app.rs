//! Application state and TUI event loop for the chart view.
//!
//! [`App`] owns the theme and the current view mode, and drives a blocking
//! crossterm event loop over a fully computed progress series.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tracing::warn;

use progress_core::models::{ProgressSeries, ProgressSummary};

use crate::charts::{self, BookCharts};
use crate::table_view;
use crate::themes::Theme;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which screen the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Progress and density charts.
    Charts,
    /// Per-annotation table.
    Table,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Charts => ViewMode::Table,
            ViewMode::Table => ViewMode::Charts,
        }
    }
}

// ── Terminal setup ────────────────────────────────────────────────────────────

/// Raw mode plus the alternate screen, undone when dropped.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal(&mut io::stdout(), disable_raw_mode) {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}

/// Leave raw mode and the alternate screen and show the cursor.
///
/// Every step runs even when an earlier one fails; the first error is returned.
fn restore_terminal<W: Write>(
    out: &mut W,
    disable_raw: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    let raw = disable_raw();
    let screen = execute!(out, LeaveAlternateScreen, Show);
    raw.and(screen)
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the reading-progress TUI.
pub struct App {
    pub theme: Theme,
    pub view_mode: ViewMode,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view_mode: ViewMode::Charts,
            should_quit: false,
        }
    }

    /// Apply a key press: `q`/`Q`/`Esc`/`Ctrl+C` quit, `t`/`Tab` toggles the view.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('t') | KeyCode::Char('T') | KeyCode::Tab => {
                self.view_mode = self.view_mode.toggled();
            }
            _ => {}
        }
    }

    /// Show `series` until the user quits.
    ///
    /// The terminal is restored on every exit path, including setup failures.
    pub fn run(
        mut self,
        series: &ProgressSeries,
        charts: &BookCharts,
        summary: &ProgressSummary,
    ) -> io::Result<()> {
        let _guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        let tick_rate = Duration::from_millis(250);

        loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame, series, charts, summary)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        }
    }

    /// Render the current view into `frame`.
    pub fn render(
        &self,
        frame: &mut Frame,
        series: &ProgressSeries,
        charts: &BookCharts,
        summary: &ProgressSummary,
    ) {
        let area = frame.area();

        if series.is_empty() {
            table_view::render_no_data(frame, area, &self.theme);
            return;
        }

        match self.view_mode {
            ViewMode::Charts => {
                charts::render_chart_view(frame, area, series, charts, summary, &self.theme)
            }
            ViewMode::Table => {
                table_view::render_table_view(frame, area, series, summary, &self.theme)
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
