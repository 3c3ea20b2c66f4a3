//! Chart view: reading progress over time plus annotation density curves.
//!
//! Each chart is assembled independently in [`BookCharts::build`]; a chart
//! that cannot be built is logged and drawn as a placeholder while the others
//! still render.

use chrono::NaiveDateTime;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols::Marker,
    text::{Line, Span, Text},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use tracing::warn;

use progress_core::density::{type_densities, DensityConfig, DensityCurve};
use progress_core::error::{ProgressError, Result};
use progress_core::models::{LocationType, ProgressSeries, ProgressSummary};

use crate::components::header::Header;
use crate::components::progress_bar::{AnnotationMixBar, ReadingProgressBar};
use crate::themes::Theme;

/// Padding applied to a degenerate time axis, in seconds.
const SINGLE_INSTANT_PADDING_SECS: f64 = 3600.0;

// ── ProgressChart ─────────────────────────────────────────────────────────────

/// Plot-ready coordinates for the progress-over-time chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressChart {
    /// `(unix seconds, fraction)` for every point, fraction clamped to `[0, 1]`.
    pub line: Vec<(f64, f64)>,
    /// The same points split by annotation type.
    pub by_type: Vec<(LocationType, Vec<(f64, f64)>)>,
    pub x_bounds: [f64; 2],
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ProgressChart {
    pub fn build(series: &ProgressSeries) -> Result<Self> {
        let (first, last) = match (series.points.first(), series.points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(ProgressError::Chart(format!(
                    "no progress points for {}",
                    series.book_title
                )))
            }
        };

        let coord = |timestamp: &NaiveDateTime, fraction: f64| {
            (
                timestamp.and_utc().timestamp() as f64,
                fraction.clamp(0.0, 1.0),
            )
        };

        let line: Vec<(f64, f64)> = series
            .points
            .iter()
            .map(|p| coord(&p.timestamp, p.fraction))
            .collect();

        let by_type = LocationType::ALL
            .iter()
            .map(|&location_type| {
                let points: Vec<(f64, f64)> = series
                    .points
                    .iter()
                    .filter(|p| p.location_type == location_type)
                    .map(|p| coord(&p.timestamp, p.fraction))
                    .collect();
                (location_type, points)
            })
            .filter(|(_, points)| !points.is_empty())
            .collect();

        let mut x_bounds = [line[0].0, line[line.len() - 1].0];
        if x_bounds[0] == x_bounds[1] {
            x_bounds[0] -= SINGLE_INSTANT_PADDING_SECS;
            x_bounds[1] += SINGLE_INSTANT_PADDING_SECS;
        }

        Ok(Self {
            line,
            by_type,
            x_bounds,
            start: first.timestamp,
            end: last.timestamp,
        })
    }
}

// ── BookCharts ────────────────────────────────────────────────────────────────

/// The three charts of the chart view, each carrying its own outcome.
#[derive(Debug)]
pub struct BookCharts {
    pub progress: Result<ProgressChart>,
    pub density: Result<DensityCurve>,
    /// Curves for every annotation type that could be estimated.
    pub type_density: Result<Vec<(LocationType, DensityCurve)>>,
}

impl BookCharts {
    pub fn build(series: &ProgressSeries, config: &DensityConfig) -> Self {
        let progress = ProgressChart::build(series).inspect_err(|e| {
            warn!("Progress chart for {} failed: {}", series.book_title, e);
        });

        let density = DensityCurve::estimate(&series.fractions(), config).inspect_err(|e| {
            warn!("Density chart for {} failed: {}", series.book_title, e);
        });

        let type_density = build_type_density(series, config).inspect_err(|e| {
            warn!("Per-type density chart for {} failed: {}", series.book_title, e);
        });

        Self {
            progress,
            density,
            type_density,
        }
    }

    /// Number of charts that built successfully.
    pub fn available(&self) -> usize {
        [
            self.progress.is_ok(),
            self.density.is_ok(),
            self.type_density.is_ok(),
        ]
        .iter()
        .filter(|ok| **ok)
        .count()
    }
}

fn build_type_density(
    series: &ProgressSeries,
    config: &DensityConfig,
) -> Result<Vec<(LocationType, DensityCurve)>> {
    let mut curves = Vec::new();
    for (location_type, curve) in type_densities(series, config) {
        match curve {
            Ok(curve) => curves.push((location_type, curve)),
            Err(e) => warn!(
                "{} density for {} skipped: {}",
                location_type.label(),
                series.book_title,
                e
            ),
        }
    }
    if curves.is_empty() {
        return Err(ProgressError::Density(
            "no annotation type has enough distinct samples".to_string(),
        ));
    }
    Ok(curves)
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render the full chart view: header, progress bars and the three charts.
///
/// ```text
/// ┌ header ───────────────────────────────┐
/// │ progress │ overall density            │
/// │          ├────────────────────────────┤
/// │          │ density by type            │
/// └──────────┴────────────────────────────┘
/// ```
pub fn render_chart_view(
    frame: &mut Frame,
    area: Rect,
    series: &ProgressSeries,
    charts: &BookCharts,
    summary: &ProgressSummary,
    theme: &Theme,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let furthest_location = series.points.iter().map(|p| p.location).max().unwrap_or(0);
    let mut lines = Header::new(&series.book_title, summary, theme).to_lines();
    lines.pop();
    lines.push(ReadingProgressBar::new(furthest_location, series.book_length, theme).to_line());
    lines.push(AnnotationMixBar::new(summary, theme).to_line());
    frame.render_widget(Paragraph::new(Text::from(lines)), rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);

    match &charts.progress {
        Ok(chart) => render_progress_chart(frame, columns[0], chart, theme),
        Err(e) => render_chart_error(frame, columns[0], " Progress ", e, theme),
    }
    match &charts.density {
        Ok(curve) => render_density_chart(
            frame,
            right[0],
            " Annotation density ",
            &[(None, curve)],
            theme,
        ),
        Err(e) => render_chart_error(frame, right[0], " Annotation density ", e, theme),
    }
    match &charts.type_density {
        Ok(curves) => {
            let curves: Vec<(Option<LocationType>, &DensityCurve)> =
                curves.iter().map(|(t, c)| (Some(*t), c)).collect();
            render_density_chart(frame, right[1], " Density by type ", &curves, theme);
        }
        Err(e) => render_chart_error(frame, right[1], " Density by type ", e, theme),
    }
}

fn chart_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.chart_border)
        .title(title)
}

fn render_progress_chart(frame: &mut Frame, area: Rect, chart: &ProgressChart, theme: &Theme) {
    let mut datasets = vec![Dataset::default()
        .name("progress")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.progress_line)
        .data(&chart.line)];

    for (location_type, points) in &chart.by_type {
        datasets.push(
            Dataset::default()
                .name(location_type.label())
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(theme.location_type_style(*location_type))
                .data(points),
        );
    }

    let x_labels = vec![
        Span::styled(chart.start.format("%Y-%m-%d").to_string(), theme.chart_axis),
        Span::styled(chart.end.format("%Y-%m-%d").to_string(), theme.chart_axis),
    ];

    let widget = Chart::new(datasets)
        .block(chart_block(" Progress ", theme))
        .x_axis(
            Axis::default()
                .title("Time")
                .style(theme.chart_axis)
                .bounds(chart.x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Fraction")
                .style(theme.chart_axis)
                .bounds([0.0, 1.0])
                .labels(["0%", "50%", "100%"]),
        );
    frame.render_widget(widget, area);
}

/// Draw one or more density curves sharing a `[0, 1]` location axis.
///
/// Curves tagged with `None` use the overall density colour.
fn render_density_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    curves: &[(Option<LocationType>, &DensityCurve)],
    theme: &Theme,
) {
    let y_max = curves
        .iter()
        .map(|(_, c)| c.max_density())
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON)
        * 1.1;

    let datasets: Vec<Dataset> = curves
        .iter()
        .map(|(location_type, curve)| {
            let (name, style) = match location_type {
                Some(t) => (t.label(), theme.location_type_style(*t)),
                None => ("all", theme.density_line),
            };
            Dataset::default()
                .name(name)
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(style)
                .data(&curve.points)
        })
        .collect();

    let widget = Chart::new(datasets)
        .block(chart_block(title, theme))
        .x_axis(
            Axis::default()
                .title("Location")
                .style(theme.chart_axis)
                .bounds([0.0, 1.0])
                .labels(["0", "0.5", "1"]),
        )
        .y_axis(
            Axis::default()
                .style(theme.chart_axis)
                .bounds([0.0, y_max])
                .labels(["0".to_string(), format!("{:.1}", y_max)]),
        );
    frame.render_widget(widget, area);
}

/// Placeholder drawn where a chart could not be built.
fn render_chart_error(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    error: &ProgressError,
    theme: &Theme,
) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Chart unavailable", theme.error)),
        Line::from(Span::styled(error.to_string(), theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(chart_block(title, theme)),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
