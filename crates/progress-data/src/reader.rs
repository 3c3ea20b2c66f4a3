//! Clippings file scanning for reading-progress.
//!
//! Walks an e-reader "My Clippings" export block by block and converts each
//! block into a [`ClippingRecord`]. The scan is lazy and strictly forward:
//! restarting means reopening the file.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDateTime;
use progress_core::error::{ProgressError, Result};
use progress_core::models::{ClippingRecord, LocationType};
use progress_core::timestamp::{parse_timestamp_with, MonthTable};
use tracing::debug;

/// Line separating two blocks.
pub const BLOCK_DELIMITER: &str = "==========";

const BOM: char = '\u{feff}';

// ── Public API ────────────────────────────────────────────────────────────────

/// Open `path` for a lazy record scan.
pub fn open_records(path: &Path, months: MonthTable) -> Result<RecordReader<BufReader<File>>> {
    let file = File::open(path).map_err(|source| ProgressError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Scanning clippings file {}", path.display());
    Ok(RecordReader::with_month_table(BufReader::new(file), months))
}

/// Parse every record in `path`, failing on the first malformed block.
pub fn read_records(path: &Path, months: MonthTable) -> Result<Vec<ClippingRecord>> {
    open_records(path, months)?.collect()
}

/// Lazily parse records from any buffered source using the standard month table.
pub fn parse_records<R: BufRead>(source: R) -> RecordReader<R> {
    RecordReader::new(source)
}

// ── RecordReader ──────────────────────────────────────────────────────────────

/// Where the scanner is within the current block.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    /// Next non-blank line is a title line.
    ReadingTitle,
    /// Title seen; the next line must be the metadata line.
    ReadingMetadata { title: String, title_line: usize },
    /// Skipping body text until the delimiter.
    AwaitingDelimiter,
}

/// Iterator over the records of a clippings export.
///
/// Yields records in file order. After the first error the iterator is
/// exhausted. Only title and metadata lines must be valid UTF-8; body text is
/// never decoded.
pub struct RecordReader<R> {
    source: R,
    buf: Vec<u8>,
    line_no: usize,
    state: ScanState,
    months: MonthTable,
    records_read: usize,
    finished: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(source: R) -> Self {
        Self::with_month_table(source, MonthTable::Standard)
    }

    pub fn with_month_table(source: R, months: MonthTable) -> Self {
        Self {
            source,
            buf: Vec::new(),
            line_no: 0,
            state: ScanState::ReadingTitle,
            months,
            records_read: 0,
            finished: false,
        }
    }

    /// Number of source lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_no
    }

    /// Read the next raw line into `buf` without its `\n` / `\r\n` ending.
    ///
    /// Returns `Ok(false)` at end of input.
    fn read_raw_line(&mut self) -> io::Result<bool> {
        self.buf.clear();
        if self.source.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(false);
        }
        if self.buf.ends_with(b"\n") {
            self.buf.pop();
            if self.buf.ends_with(b"\r") {
                self.buf.pop();
            }
        }
        Ok(true)
    }

    /// Decode the current line, which must be valid UTF-8.
    fn decode_line(&self, line_no: usize) -> Result<String> {
        std::str::from_utf8(&self.buf)
            .map(str::to_owned)
            .map_err(|_| ProgressError::parse(line_no, "line is not valid UTF-8"))
    }

    fn fail(&mut self, err: ProgressError) -> Option<Result<ClippingRecord>> {
        self.finished = true;
        Some(Err(err))
    }

    fn finish(&mut self) -> Option<Result<ClippingRecord>> {
        self.finished = true;
        if let ScanState::ReadingMetadata { title_line, .. } = self.state {
            return Some(Err(ProgressError::parse(
                title_line,
                "block ends after its title line",
            )));
        }
        debug!(
            "Scanned {} records from {} lines",
            self.records_read, self.line_no
        );
        None
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<ClippingRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.read_raw_line() {
                Ok(true) => {}
                Ok(false) => return self.finish(),
                Err(e) => return self.fail(ProgressError::Io(e)),
            }
            self.line_no += 1;
            let line_no = self.line_no;

            match std::mem::replace(&mut self.state, ScanState::AwaitingDelimiter) {
                ScanState::ReadingTitle => {
                    let line = match self.decode_line(line_no) {
                        Ok(line) => line,
                        Err(e) => return self.fail(e),
                    };
                    let trimmed = line.trim_start_matches(BOM).trim();
                    if trimmed.is_empty() || trimmed == BLOCK_DELIMITER {
                        self.state = ScanState::ReadingTitle;
                        continue;
                    }
                    match parse_title_line(&line, line_no) {
                        Ok(title) => {
                            self.state = ScanState::ReadingMetadata {
                                title,
                                title_line: line_no,
                            };
                        }
                        Err(e) => return self.fail(e),
                    }
                }
                ScanState::ReadingMetadata { title, .. } => {
                    let line = match self.decode_line(line_no) {
                        Ok(line) => line,
                        Err(e) => return self.fail(e),
                    };
                    if is_delimiter(&line) {
                        return self.fail(ProgressError::parse(
                            line_no,
                            "expected a metadata line, found the block delimiter",
                        ));
                    }
                    return match parse_metadata_line(&line, line_no, self.months) {
                        Ok(meta) => {
                            self.records_read += 1;
                            Some(Ok(ClippingRecord {
                                book_title: title,
                                location_type: meta.location_type,
                                location: meta.location,
                                timestamp: meta.timestamp,
                            }))
                        }
                        Err(e) => self.fail(e),
                    };
                }
                ScanState::AwaitingDelimiter => {
                    // Body text: compared lossily, never rejected.
                    if is_delimiter(&String::from_utf8_lossy(&self.buf)) {
                        self.state = ScanState::ReadingTitle;
                    }
                }
            }
        }
    }
}

// ── Line parsing ──────────────────────────────────────────────────────────────

/// Fields extracted from a block's metadata line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMetadata {
    pub location_type: LocationType,
    pub location: u64,
    pub timestamp: NaiveDateTime,
}

/// Returns `true` for the ten-`=` block delimiter (surrounding whitespace ignored).
pub fn is_delimiter(line: &str) -> bool {
    line.trim_start_matches(BOM).trim() == BLOCK_DELIMITER
}

/// Extract the book title: everything before the first `" ("`.
pub fn parse_title_line(line: &str, line_no: usize) -> Result<String> {
    let line = line.trim_start_matches(BOM);
    let (title, _) = line
        .split_once(" (")
        .ok_or_else(|| ProgressError::parse(line_no, "title line has no \" (\" author suffix"))?;
    let title = title.trim();
    if title.is_empty() {
        return Err(ProgressError::parse(line_no, "title line has an empty title"));
    }
    Ok(title.to_string())
}

/// Extract annotation type, location and timestamp from a metadata line such as
/// `- Your Highlight on page 3 | Location 45-46 | Added on Monday, May 3, 2021, 9:15 PM`.
pub fn parse_metadata_line(line: &str, line_no: usize, months: MonthTable) -> Result<BlockMetadata> {
    let body = line
        .trim()
        .strip_prefix("- ")
        .ok_or_else(|| ProgressError::parse(line_no, "metadata line does not start with \"- \""))?;

    let location_type = parse_type_word(body, line_no)?;

    let location = extract_location(body, line_no)?;

    let (_, last_segment) = body
        .rsplit_once(" | ")
        .ok_or_else(|| ProgressError::parse(line_no, "metadata line has no \" | \" separator"))?;
    // Drop the "Added on <Weekday>, " lead-in.
    let timestamp_text = last_segment
        .split_once(", ")
        .map(|(_, rest)| rest)
        .unwrap_or(last_segment);

    let timestamp = parse_timestamp_with(timestamp_text, months).inspect_err(|e| {
        debug!("Line {}: {}", line_no, e);
    })?;

    Ok(BlockMetadata {
        location_type,
        location,
        timestamp,
    })
}

/// First letter of the annotation-type word, skipping a leading `"Your"`.
fn parse_type_word(body: &str, line_no: usize) -> Result<LocationType> {
    let mut words = body.split_whitespace();
    let mut word = words.next().unwrap_or("");
    if word.eq_ignore_ascii_case("your") {
        word = words.next().unwrap_or("");
    }
    let letter = word
        .chars()
        .next()
        .ok_or_else(|| ProgressError::parse(line_no, "metadata line has no annotation type"))?;
    LocationType::from_letter(letter).ok_or_else(|| {
        ProgressError::parse(line_no, format!("unknown annotation type \"{}\"", word))
    })
}

/// The number after a `Location` / `Loc.` keyword, else the first integer on the line.
///
/// A keyword followed by a missing or overflowing number is an error rather
/// than a reason to fall back to another number on the line.
fn extract_location(body: &str, line_no: usize) -> Result<u64> {
    let tokens: Vec<&str> = body.split_whitespace().collect();
    let keyword = tokens.windows(2).find(|w| {
        w[0].eq_ignore_ascii_case("location")
            || w[0].eq_ignore_ascii_case("loc.")
            || w[0].eq_ignore_ascii_case("loc")
    });

    match keyword {
        Some(w) => leading_integer(w[1]).ok_or_else(|| {
            ProgressError::parse(
                line_no,
                format!("location number \"{}\" is missing or out of range", w[1]),
            )
        }),
        None => first_integer(body)
            .ok_or_else(|| ProgressError::parse(line_no, "metadata line has no location number")),
    }
}

fn leading_integer(token: &str) -> Option<u64> {
    let end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    token[..end].parse().ok()
}

fn first_integer(text: &str) -> Option<u64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    leading_integer(&text[start..])
}

// ── Tests ─────────────────────────────────────────────────────────────────────
