//! Tabular view of a book's progress points.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per annotation
//! plus a highlighted summary row at the bottom.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use progress_core::formatting;
use progress_core::models::{ProgressSeries, ProgressSummary};

use crate::themes::Theme;

/// Render every point of `series` into `area`.
pub fn render_table_view(
    frame: &mut Frame,
    area: Rect,
    series: &ProgressSeries,
    summary: &ProgressSummary,
    theme: &Theme,
) {
    let header_cells = ["Time", "Location", "Progress", "Type"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(formatting::format_timestamp(&point.timestamp)),
                Cell::from(formatting::format_location(point.location)),
                Cell::from(formatting::format_fraction(point.fraction, 1)),
                Cell::from(point.location_type.label())
                    .style(theme.location_type_style(point.location_type)),
            ])
            .style(style)
        })
        .collect();

    let summary_row = Row::new(vec![
        Cell::from(format!("{} points", series.len())),
        Cell::from(formatting::format_location(series.book_length)),
        Cell::from(formatting::format_fraction(summary.furthest_fraction, 1)),
        Cell::from(formatting::format_days(summary.span_days)),
    ])
    .style(theme.value);

    let mut all_rows = data_rows;
    all_rows.push(summary_row);

    let widths = [
        Constraint::Length(18),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", series.book_title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Placeholder shown when a book has no points to tabulate.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No annotations found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Reading Progress "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
