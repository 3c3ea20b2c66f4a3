use crate::models::{LocationType, ProgressSeries, ProgressSummary};

/// Stateless collection of reading-progress calculations.
pub struct ProgressCalculator;

impl ProgressCalculator {
    /// Count annotations by type and measure the reading span of `series`.
    pub fn summarize(series: &ProgressSeries) -> ProgressSummary {
        let mut summary = ProgressSummary::default();

        for point in &series.points {
            match point.location_type {
                LocationType::Highlight => summary.highlights += 1,
                LocationType::Bookmark => summary.bookmarks += 1,
                LocationType::Note => summary.notes += 1,
            }
            if point.fraction > summary.furthest_fraction {
                summary.furthest_fraction = point.fraction;
            }
        }

        // Points are time-ordered.
        summary.first_annotation = series.points.first().map(|p| p.timestamp);
        summary.last_annotation = series.points.last().map(|p| p.timestamp);
        if let (Some(first), Some(last)) = (summary.first_annotation, summary.last_annotation) {
            summary.span_days = (last - first).num_days();
        }

        summary
    }

    /// Average fraction of the book advanced per day between the first and
    /// last annotation.
    ///
    /// Returns `None` for fewer than two points or a span shorter than a day.
    pub fn daily_pace(series: &ProgressSeries) -> Option<f64> {
        let first = series.points.first()?;
        let last = series.points.last()?;
        let days = (last.timestamp - first.timestamp).num_minutes() as f64 / (24.0 * 60.0);
        if series.len() < 2 || days < 1.0 {
            return None;
        }
        Some((last.fraction - first.fraction) / days)
    }
}
