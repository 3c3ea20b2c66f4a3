use crate::components::truncate_to_width;
use crate::themes::Theme;
use progress_core::formatting::format_days;
use progress_core::models::ProgressSummary;
use ratatui::text::{Line, Span};

/// Decorative accent placed either side of the application title.
pub const ACCENTS: &str = "✦ ✧ ✦ ✧";

/// Widest title shown in the header before truncation.
const MAX_TITLE_WIDTH: usize = 48;

/// Chart view header rendering four lines:
///
/// 1. Application title with accents.
/// 2. A 60-column `=` separator.
/// 3. `[ title | N annotations | span ]`.
/// 4. An empty line.
pub struct Header<'a> {
    pub book_title: &'a str,
    pub summary: &'a ProgressSummary,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(book_title: &'a str, summary: &'a ProgressSummary, theme: &'a Theme) -> Self {
        Self {
            book_title,
            summary,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(vec![
                Span::styled(ACCENTS, self.theme.header_accent),
                Span::styled(" READING PROGRESS ", self.theme.header),
                Span::styled(ACCENTS, self.theme.header_accent),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(
                    truncate_to_width(self.book_title, MAX_TITLE_WIDTH),
                    self.theme.value,
                ),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!("{} annotations", self.summary.total()),
                    self.theme.value,
                ),
                Span::styled(" | ", self.theme.label),
                Span::styled(format_days(self.summary.span_days), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
