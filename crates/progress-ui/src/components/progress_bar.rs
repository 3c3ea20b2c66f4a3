use crate::themes::Theme;
use progress_core::formatting::{format_fraction, format_location};
use progress_core::models::{LocationType, ProgressSummary};
use ratatui::text::{Line, Span};

/// Configuration controlling visual appearance of a progress bar.
pub struct ProgressBarConfig {
    /// Width in terminal columns of the bar portion (excluding label).
    pub width: u16,
    pub filled_char: char,
    pub empty_char: char,
}

impl Default for ProgressBarConfig {
    fn default() -> Self {
        Self {
            width: 50,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
        }
    }
}

// ── ReadingProgressBar ───────────────────────────────────────────────────────

/// Horizontal bar showing how far into the book the reader has annotated.
///
/// Renders as a coloured fill + empty portion followed by a label with the
/// percentage and the `furthest / length` locations.
pub struct ReadingProgressBar<'a> {
    /// Percentage reached, clamped to `[0.0, 100.0]` for the fill only.
    pub percentage: f64,
    pub furthest_location: u64,
    pub book_length: u64,
    pub theme: &'a Theme,
    pub config: ProgressBarConfig,
}

impl<'a> ReadingProgressBar<'a> {
    pub fn new(furthest_location: u64, book_length: u64, theme: &'a Theme) -> Self {
        let percentage = if book_length > 0 {
            (furthest_location as f64 / book_length as f64) * 100.0
        } else {
            0.0
        };
        Self {
            percentage,
            furthest_location,
            book_length,
            theme,
            config: ProgressBarConfig::default(),
        }
    }

    /// Render the bar as a [`Line`].
    pub fn to_line(&self) -> Line<'a> {
        let clamped = self.percentage.clamp(0.0, 100.0);
        let filled = ((clamped / 100.0) * self.config.width as f64) as u16;
        let empty = self.config.width.saturating_sub(filled);

        let filled_str: String =
            std::iter::repeat_n(self.config.filled_char, filled as usize).collect();
        let empty_str: String =
            std::iter::repeat_n(self.config.empty_char, empty as usize).collect();

        let label = format!(
            " {} ({}/{})",
            format_fraction(self.percentage / 100.0, 1),
            format_location(self.furthest_location),
            format_location(self.book_length),
        );

        Line::from(vec![
            Span::styled(filled_str, self.theme.progress_style(self.percentage)),
            Span::styled(empty_str, self.theme.progress_empty),
            Span::styled(label, self.theme.label),
        ])
    }
}

// ── AnnotationMixBar ─────────────────────────────────────────────────────────

/// A proportional multi-coloured bar of highlight / bookmark / note shares.
pub struct AnnotationMixBar<'a> {
    /// `(type, count)` pairs in display order.
    pub counts: Vec<(LocationType, usize)>,
    pub theme: &'a Theme,
    pub width: u16,
}

impl<'a> AnnotationMixBar<'a> {
    pub fn new(summary: &ProgressSummary, theme: &'a Theme) -> Self {
        Self {
            counts: vec![
                (LocationType::Highlight, summary.highlights),
                (LocationType::Bookmark, summary.bookmarks),
                (LocationType::Note, summary.notes),
            ],
            theme,
            width: 50,
        }
    }

    /// Render the bar as a [`Line`].
    pub fn to_line(&self) -> Line<'a> {
        let total: usize = self.counts.iter().map(|(_, c)| c).sum();
        let mut spans: Vec<Span<'a>> = Vec::new();

        if total > 0 {
            for (location_type, count) in &self.counts {
                let chars =
                    ((*count as f64 / total as f64) * self.width as f64).round() as usize;
                if chars > 0 {
                    spans.push(Span::styled(
                        "█".repeat(chars),
                        self.theme.location_type_style(*location_type),
                    ));
                }
            }
        }

        spans.push(Span::raw(" "));

        for (location_type, count) in &self.counts {
            if *count > 0 {
                spans.push(Span::styled(
                    format!("{}: {} ", location_type.label(), count),
                    self.theme.location_type_style(*location_type),
                ));
            }
        }

        Line::from(spans)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    // ── ReadingProgressBar ───────────────────────────────────────────────────

    #[test]
    fn test_reading_progress_bar_to_line() {
        let theme = Theme::dark();
        let line = ReadingProgressBar::new(2500, 10000, &theme).to_line();

        assert_eq!(line.spans.len(), 3, "expected filled, empty, label");
        assert_eq!(line.spans[0].content.chars().count(), 12);
        assert!(line.spans[0].content.chars().all(|c| c == '█'));
        assert_eq!(line.spans[1].content.chars().count(), 38);

        let label = &line.spans[2].content;
        assert!(label.contains("25.0%"), "label was: {label}");
        assert!(label.contains("2,500/10,000"), "label was: {label}");
    }

    #[test]
    fn test_reading_progress_bar_full() {
        let theme = Theme::dark();
        let line = ReadingProgressBar::new(90, 90, &theme).to_line();
        assert_eq!(line.spans[0].content.chars().count(), 50);
        assert_eq!(line.spans[1].content.len(), 0);
    }

    #[test]
    fn test_reading_progress_bar_beyond_length_clamps_fill() {
        let theme = Theme::dark();
        let bar = ReadingProgressBar::new(150, 100, &theme);
        let line = bar.to_line();
        assert_eq!(line.spans[0].content.chars().count(), 50);
        assert!(line.spans[2].content.contains("150.0%"));
    }

    #[test]
    fn test_reading_progress_bar_zero_length() {
        let theme = Theme::dark();
        let bar = ReadingProgressBar::new(10, 0, &theme);
        assert_eq!(bar.percentage, 0.0);
        assert_eq!(bar.to_line().spans.len(), 3);
    }

    // ── AnnotationMixBar ─────────────────────────────────────────────────────

    #[test]
    fn test_annotation_mix_bar_labels() {
        let theme = Theme::dark();
        let summary = ProgressSummary {
            highlights: 6,
            bookmarks: 2,
            notes: 2,
            ..Default::default()
        };
        let line = AnnotationMixBar::new(&summary, &theme).to_line();
        let text = text_of(&line);
        assert!(text.contains("Highlight: 6"), "text: {text}");
        assert!(text.contains("Bookmark: 2"), "text: {text}");
        assert!(text.contains("Note: 2"), "text: {text}");
        assert_eq!(line.spans[0].content.chars().count(), 30);
    }

    #[test]
    fn test_annotation_mix_bar_skips_absent_types() {
        let theme = Theme::dark();
        let summary = ProgressSummary {
            highlights: 4,
            ..Default::default()
        };
        let text = text_of(&AnnotationMixBar::new(&summary, &theme).to_line());
        assert!(!text.contains("Note"), "text: {text}");
        assert!(!text.contains("Bookmark"), "text: {text}");
    }

    #[test]
    fn test_annotation_mix_bar_empty_summary() {
        let theme = Theme::dark();
        let line = AnnotationMixBar::new(&ProgressSummary::default(), &theme).to_line();
        assert_eq!(line.spans.len(), 1);
    }
}
