use progress_core::models::LocationType;
use ratatui::style::{Color, Modifier, Style};

/// Complete theme definition carrying all UI styles used by progress-ui
/// components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub warning: Style,
    pub error: Style,

    // ── Progress bar ─────────────────────────────────────────────────────────
    /// Filled portion below 50 % read.
    pub progress_early: Style,
    /// Filled portion between 50 % and 90 %.
    pub progress_middle: Style,
    /// Filled portion at or above 90 %.
    pub progress_late: Style,
    pub progress_empty: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub chart_border: Style,
    pub chart_axis: Style,
    pub progress_line: Style,
    pub density_line: Style,

    // ── Annotation types ─────────────────────────────────────────────────────
    pub highlight: Style,
    pub bookmark: Style,
    pub note: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            progress_early: Style::default().fg(Color::Cyan),
            progress_middle: Style::default().fg(Color::Blue),
            progress_late: Style::default().fg(Color::Green),
            progress_empty: Style::default().fg(Color::DarkGray),

            chart_border: Style::default().fg(Color::DarkGray),
            chart_axis: Style::default().fg(Color::Gray),
            progress_line: Style::default().fg(Color::Blue),
            density_line: Style::default().fg(Color::Red),

            highlight: Style::default().fg(Color::Red),
            bookmark: Style::default().fg(Color::Green),
            note: Style::default().fg(Color::Cyan),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            progress_early: Style::default().fg(Color::Blue),
            progress_middle: Style::default().fg(Color::Magenta),
            progress_late: Style::default().fg(Color::Green),
            progress_empty: Style::default().fg(Color::Gray),

            chart_border: Style::default().fg(Color::Gray),
            chart_axis: Style::default().fg(Color::DarkGray),
            progress_line: Style::default().fg(Color::Blue),
            density_line: Style::default().fg(Color::Red),

            highlight: Style::default().fg(Color::Red),
            bookmark: Style::default().fg(Color::Green),
            note: Style::default().fg(Color::Blue),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
        }
    }

    /// Classic theme using only the basic 8-colour ANSI palette, no bold.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            progress_early: Style::default().fg(Color::Cyan),
            progress_middle: Style::default().fg(Color::Blue),
            progress_late: Style::default().fg(Color::Green),
            progress_empty: Style::default().fg(Color::DarkGray),

            chart_border: Style::default().fg(Color::DarkGray),
            chart_axis: Style::default().fg(Color::White),
            progress_line: Style::default().fg(Color::Blue),
            density_line: Style::default().fg(Color::Red),

            highlight: Style::default().fg(Color::Red),
            bookmark: Style::default().fg(Color::Green),
            note: Style::default().fg(Color::Blue),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
        }
    }

    /// Construct a theme by name.  Unknown names get the dark theme.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "classic" => Self::classic(),
            _ => Self::dark(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Progress-bar fill style for a percentage read.
    ///
    /// * `< 50 %`  → `progress_early`
    /// * `50–90 %` → `progress_middle`
    /// * `≥ 90 %`  → `progress_late`
    pub fn progress_style(&self, percentage: f64) -> Style {
        if percentage >= 90.0 {
            self.progress_late
        } else if percentage >= 50.0 {
            self.progress_middle
        } else {
            self.progress_early
        }
    }

    /// Colour assigned to an annotation type in charts and tables.
    pub fn location_type_style(&self, location_type: LocationType) -> Style {
        match location_type {
            LocationType::Highlight => self.highlight,
            LocationType::Bookmark => self.bookmark,
            LocationType::Note => self.note,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
