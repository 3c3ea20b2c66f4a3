//! Plain-text reports printed to stdout for the `books` and `progress` views.

use unicode_width::UnicodeWidthStr;

use progress_core::calculations::ProgressCalculator;
use progress_core::formatting::{format_days, format_fraction, format_location, format_timestamp};
use progress_core::models::{ProgressSeries, ProgressSummary};

const COLUMN_GAP: &str = "  ";

/// Pad `text` with spaces to `width` display columns.
fn pad_right(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(pad))
}

fn pad_left(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{}{}", " ".repeat(pad), text)
}

/// Join `lines`, terminating each with a newline.
fn join_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

/// One numbered line per title, or a notice when there are none.
pub fn books_report(titles: &[String]) -> String {
    if titles.is_empty() {
        return "No books found.\n".to_string();
    }
    let number_width = titles.len().to_string().len();
    let lines: Vec<String> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| format!("{}. {}", pad_left(&(i + 1).to_string(), number_width), title))
        .collect();
    join_lines(&lines)
}

/// Progress table for one book followed by its summary figures.
pub fn progress_report(series: &ProgressSeries, summary: &ProgressSummary) -> String {
    let headers = ["Time", "Location", "Progress", "Type"];
    let rows: Vec<[String; 4]> = series
        .points
        .iter()
        .map(|p| {
            [
                format_timestamp(&p.timestamp),
                format_location(p.location),
                format_fraction(p.fraction, 1),
                p.location_type.label().to_string(),
            ]
        })
        .collect();

    let mut widths = headers.map(|h| h.width());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
    }

    let mut lines = vec![
        series.book_title.clone(),
        "=".repeat(series.book_title.width().max(1)),
    ];

    let header_line: Vec<String> = headers
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| pad_right(h, *w))
        .collect();
    lines.push(header_line.join(COLUMN_GAP).trim_end().to_string());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    lines.push(rule.join(COLUMN_GAP));

    for row in &rows {
        // Numeric columns are right-aligned.
        let cells = [
            pad_right(&row[0], widths[0]),
            pad_left(&row[1], widths[1]),
            pad_left(&row[2], widths[2]),
            row[3].clone(),
        ];
        lines.push(cells.join(COLUMN_GAP));
    }

    lines.push(String::new());
    lines.push(format!("Book length:  {}", format_location(series.book_length)));
    lines.push(format!(
        "Annotations:  {} ({} highlights, {} bookmarks, {} notes)",
        summary.total(),
        summary.highlights,
        summary.bookmarks,
        summary.notes
    ));
    lines.push(format!(
        "Furthest:     {}",
        format_fraction(summary.furthest_fraction, 1)
    ));
    if let (Some(first), Some(last)) = (summary.first_annotation, summary.last_annotation) {
        lines.push(format!(
            "Span:         {} ({} to {})",
            format_days(summary.span_days),
            format_timestamp(&first),
            format_timestamp(&last)
        ));
    }
    if let Some(pace) = ProgressCalculator::daily_pace(series) {
        lines.push(format!("Pace:         {} per day", format_fraction(pace, 2)));
    }
    join_lines(&lines)
}
