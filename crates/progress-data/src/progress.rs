//! Progress extraction: one book's annotations as a time-ordered trajectory
//! of fractional locations.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDateTime;
use progress_core::error::{ProgressError, Result};
use progress_core::models::{ClippingRecord, LocationType, ProgressPoint, ProgressSeries};
use progress_core::timestamp::MonthTable;
use tracing::debug;

use crate::catalog::BookCatalog;
use crate::reader::open_records;

/// Annotations keyed by timestamp; a later record at the same minute replaces
/// the earlier one.
type Timeline = BTreeMap<NaiveDateTime, (u64, LocationType)>;

/// Extract the progress series of `book_title` from the clippings at `path`.
///
/// `book_length` defaults to the furthest annotated location. Fails with
/// [`ProgressError::BookNotFound`] when the title has no records and with
/// [`ProgressError::ZeroBookLength`] when the length resolves to zero.
pub fn get_progress(
    path: &Path,
    book_title: &str,
    book_length: Option<u64>,
) -> Result<ProgressSeries> {
    get_progress_with(path, book_title, book_length, MonthTable::Standard)
}

/// [`get_progress`] with an explicit month table.
pub fn get_progress_with(
    path: &Path,
    book_title: &str,
    book_length: Option<u64>,
    months: MonthTable,
) -> Result<ProgressSeries> {
    let catalog = BookCatalog::load(path, months)?;
    if !catalog.contains(book_title) {
        return Err(ProgressError::BookNotFound(book_title.to_string()));
    }

    let mut timeline = Timeline::new();
    let mut matched = 0usize;
    for record in open_records(path, months)? {
        let record = record?;
        if record.book_title == book_title {
            matched += 1;
            timeline.insert(record.timestamp, (record.location, record.location_type));
        }
    }
    debug!(
        "{}: {} records, {} distinct timestamps",
        book_title,
        matched,
        timeline.len()
    );

    build_series(book_title, timeline, book_length)
}

/// Build the series of `book_title` from already-parsed records.
///
/// Records for other books are ignored.
pub fn series_from_records<'a, I>(
    records: I,
    book_title: &str,
    book_length: Option<u64>,
) -> Result<ProgressSeries>
where
    I: IntoIterator<Item = &'a ClippingRecord>,
{
    let timeline: Timeline = records
        .into_iter()
        .filter(|r| r.book_title == book_title)
        .map(|r| (r.timestamp, (r.location, r.location_type)))
        .collect();

    if timeline.is_empty() {
        return Err(ProgressError::BookNotFound(book_title.to_string()));
    }
    build_series(book_title, timeline, book_length)
}

/// Normalise a timeline into a [`ProgressSeries`].
fn build_series(
    book_title: &str,
    timeline: Timeline,
    book_length: Option<u64>,
) -> Result<ProgressSeries> {
    let length = book_length
        .or_else(|| timeline.values().map(|&(location, _)| location).max())
        .unwrap_or(0);
    if length == 0 {
        return Err(ProgressError::ZeroBookLength(book_title.to_string()));
    }

    let points = timeline
        .into_iter()
        .map(|(timestamp, (location, location_type))| ProgressPoint {
            timestamp,
            location,
            fraction: location as f64 / length as f64,
            location_type,
        })
        .collect();

    Ok(ProgressSeries {
        book_title: book_title.to_string(),
        book_length: length,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    struct Clip<'a> {
        title: &'a str,
        kind: &'a str,
        location: u64,
        stamp: &'a str,
    }

    fn clip<'a>(title: &'a str, kind: &'a str, location: u64, stamp: &'a str) -> Clip<'a> {
        Clip {
            title,
            kind,
            location,
            stamp,
        }
    }

    fn write_clippings(dir: &Path, clips: &[Clip]) -> PathBuf {
        let path = dir.join("clippings.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        for c in clips {
            writeln!(file, "{} (Author Name)", c.title).unwrap();
            writeln!(
                file,
                "- Your {} on page 2 | Location {} | Added on Sunday, {}",
                c.kind, c.location, c.stamp
            )
            .unwrap();
            writeln!(file).unwrap();
            writeln!(file, "Some highlighted passage.").unwrap();
            writeln!(file, "==========").unwrap();
        }
        path
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn record(title: &str, location: u64, ts: NaiveDateTime, t: LocationType) -> ClippingRecord {
        ClippingRecord {
            book_title: title.to_string(),
            location_type: t,
            location,
            timestamp: ts,
        }
    }

    // ── get_progress ──────────────────────────────────────────────────────────

    #[test]
    fn test_three_blocks_normalise_against_max() {
        let dir = TempDir::new().unwrap();
        let path = write_clippings(
            dir.path(),
            &[
                clip("Dune", "Highlight", 10, "March 1, 2021, 9:00 AM"),
                clip("Dune", "Note", 50, "March 2, 2021, 9:00 AM"),
                clip("Dune", "Bookmark", 90, "March 3, 2021, 9:00 AM"),
            ],
        );

        let series = get_progress(&path, "Dune", None).unwrap();
        assert_eq!(series.book_length, 90);
        let fractions = series.fractions();
        assert_eq!(fractions.len(), 3);
        assert!((fractions[0] - 10.0 / 90.0).abs() < 1e-12);
        assert!((fractions[1] - 50.0 / 90.0).abs() < 1e-12);
        assert_eq!(fractions[2], 1.0);
        assert_eq!(
            series.types(),
            vec![
                LocationType::Highlight,
                LocationType::Note,
                LocationType::Bookmark
            ]
        );
    }

    #[test]
    fn test_series_sorted_by_time_not_file_order() {
        let dir = TempDir::new().unwrap();
        let path = write_clippings(
            dir.path(),
            &[
                clip("Dune", "Highlight", 80, "March 5, 2021, 9:00 PM"),
                clip("Emma", "Highlight", 5, "March 1, 2021, 9:00 AM"),
                clip("Dune", "Highlight", 20, "March 1, 2021, 9:00 PM"),
                clip("Dune", "Highlight", 40, "March 3, 2021, 12:30 AM"),
            ],
        );

        let series = get_progress(&path, "Dune", None).unwrap();
        let times = series.times();
        assert_eq!(times, vec![at(1, 21, 0), at(3, 0, 30), at(5, 21, 0)]);
        assert!(times.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(series.points[0].location, 20);
    }

    #[test]
    fn test_duplicate_timestamp_last_record_wins() {
        let dir = TempDir::new().unwrap();
        let path = write_clippings(
            dir.path(),
            &[
                clip("Dune", "Highlight", 30, "March 1, 2021, 9:00 AM"),
                clip("Dune", "Note", 60, "March 1, 2021, 9:00 AM"),
                clip("Dune", "Highlight", 100, "March 2, 2021, 9:00 AM"),
            ],
        );

        let series = get_progress(&path, "Dune", None).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.points[0].location, 60);
        assert_eq!(series.points[0].location_type, LocationType::Note);
    }

    #[test]
    fn test_explicit_book_length() {
        let dir = TempDir::new().unwrap();
        let path = write_clippings(
            dir.path(),
            &[
                clip("Dune", "Highlight", 50, "March 1, 2021, 9:00 AM"),
                clip("Dune", "Highlight", 150, "March 2, 2021, 9:00 AM"),
            ],
        );

        let series = get_progress(&path, "Dune", Some(200)).unwrap();
        assert_eq!(series.book_length, 200);
        assert_eq!(series.fractions(), vec![0.25, 0.75]);

        // A length shorter than the furthest location is allowed.
        let series = get_progress(&path, "Dune", Some(100)).unwrap();
        assert_eq!(series.fractions(), vec![0.5, 1.5]);
    }

    #[test]
    fn test_fractions_within_unit_interval_by_default() {
        let dir = TempDir::new().unwrap();
        let path = write_clippings(
            dir.path(),
            &[
                clip("Dune", "Highlight", 0, "March 1, 2021, 9:00 AM"),
                clip("Dune", "Highlight", 333, "March 2, 2021, 9:00 AM"),
                clip("Dune", "Highlight", 1234, "March 3, 2021, 9:00 AM"),
                clip("Dune", "Highlight", 77, "March 4, 2021, 9:00 AM"),
            ],
        );
        let series = get_progress(&path, "Dune", None).unwrap();
        assert!(series.fractions().iter().all(|f| (0.0..=1.0).contains(f)));
    }

    #[test]
    fn test_unknown_book_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = write_clippings(
            dir.path(),
            &[clip("Dune", "Highlight", 10, "March 1, 2021, 9:00 AM")],
        );
        let err = get_progress(&path, "Emma", None).unwrap_err();
        assert!(matches!(err, ProgressError::BookNotFound(ref t) if t == "Emma"));
    }

    #[test]
    fn test_all_zero_locations_is_domain_error() {
        let dir = TempDir::new().unwrap();
        let path = write_clippings(
            dir.path(),
            &[
                clip("Dune", "Bookmark", 0, "March 1, 2021, 9:00 AM"),
                clip("Dune", "Bookmark", 0, "March 2, 2021, 9:00 AM"),
            ],
        );
        let err = get_progress(&path, "Dune", None).unwrap_err();
        assert!(matches!(err, ProgressError::ZeroBookLength(_)));
    }

    #[test]
    fn test_explicit_zero_length_is_domain_error() {
        let dir = TempDir::new().unwrap();
        let path = write_clippings(
            dir.path(),
            &[clip("Dune", "Highlight", 10, "March 1, 2021, 9:00 AM")],
        );
        let err = get_progress(&path, "Dune", Some(0)).unwrap_err();
        assert!(matches!(err, ProgressError::ZeroBookLength(_)));
    }

    #[test]
    fn test_malformed_block_aborts_even_for_other_books() {
        let dir = TempDir::new().unwrap();
        let path = write_clippings(
            dir.path(),
            &[
                clip("Dune", "Highlight", 10, "March 1, 2021, 9:00 AM"),
                clip("Emma", "Highlight", 10, "Marchember 1, 2021, 9:00 AM"),
            ],
        );
        assert!(get_progress(&path, "Dune", None).is_err());
    }

    #[test]
    fn test_get_progress_is_repeatable() {
        let dir = TempDir::new().unwrap();
        let path = write_clippings(
            dir.path(),
            &[
                clip("Dune", "Highlight", 10, "March 1, 2021, 9:00 AM"),
                clip("Dune", "Note", 20, "March 2, 2021, 9:00 AM"),
            ],
        );
        let first = get_progress(&path, "Dune", None).unwrap();
        let second = get_progress(&path, "Dune", None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_get_progress_with_legacy_months() {
        let dir = TempDir::new().unwrap();
        let path = write_clippings(
            dir.path(),
            &[clip("Dune", "Highlight", 10, "July 4, 2020, 11:30 PM")],
        );
        let series = get_progress_with(&path, "Dune", None, MonthTable::Legacy).unwrap();
        assert_eq!(
            series.times()[0],
            NaiveDate::from_ymd_opt(2020, 5, 4)
                .unwrap()
                .and_hms_opt(23, 30, 0)
                .unwrap()
        );
    }

    // ── series_from_records ───────────────────────────────────────────────────

    #[test]
    fn test_series_from_records_filters_title() {
        let records = vec![
            record("Dune", 40, at(2, 8, 0), LocationType::Highlight),
            record("Emma", 999, at(1, 8, 0), LocationType::Highlight),
            record("Dune", 80, at(1, 8, 0), LocationType::Note),
        ];
        let series = series_from_records(&records, "Dune", None).unwrap();
        assert_eq!(series.book_length, 80);
        assert_eq!(series.fractions(), vec![1.0, 0.5]);
    }

    #[test]
    fn test_series_from_records_no_match() {
        let records = vec![record("Emma", 1, at(1, 8, 0), LocationType::Highlight)];
        let err = series_from_records(&records, "Dune", None).unwrap_err();
        assert!(matches!(err, ProgressError::BookNotFound(_)));
    }
}
