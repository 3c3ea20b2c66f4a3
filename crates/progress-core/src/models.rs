use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Kind of annotation a clipping records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LocationType {
    /// A saved highlight.
    #[serde(rename = "H")]
    Highlight,
    /// A bookmark.
    #[serde(rename = "B")]
    Bookmark,
    /// A free-text note.
    #[serde(rename = "N")]
    Note,
}

impl LocationType {
    /// All variants, in the order charts list them.
    pub const ALL: [LocationType; 3] = [
        LocationType::Highlight,
        LocationType::Bookmark,
        LocationType::Note,
    ];

    /// Resolve the single-letter tag (`H`, `B`, `N`), case-insensitively.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'H' => Some(LocationType::Highlight),
            'B' => Some(LocationType::Bookmark),
            'N' => Some(LocationType::Note),
            _ => None,
        }
    }

    /// The single-letter tag used in exports and JSON output.
    pub fn letter(self) -> char {
        match self {
            LocationType::Highlight => 'H',
            LocationType::Bookmark => 'B',
            LocationType::Note => 'N',
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            LocationType::Highlight => "Highlight",
            LocationType::Bookmark => "Bookmark",
            LocationType::Note => "Note",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One annotation block parsed from a clippings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClippingRecord {
    /// Title text preceding the ` (` on the block's first line.
    pub book_title: String,
    /// Highlight, bookmark or note.
    pub location_type: LocationType,
    /// Device-defined position within the book.
    pub location: u64,
    /// Local wall-clock time the annotation was added.
    pub timestamp: NaiveDateTime,
}

/// One point on a book's progress trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub timestamp: NaiveDateTime,
    /// Raw device location.
    pub location: u64,
    /// `location / book_length`.
    pub fraction: f64,
    pub location_type: LocationType,
}

/// Time-ordered progress trajectory for one book.
///
/// Points are strictly ascending by timestamp; each timestamp appears once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSeries {
    pub book_title: String,
    /// Length used for normalisation (explicit or the maximum raw location).
    pub book_length: u64,
    pub points: Vec<ProgressPoint>,
}

impl ProgressSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Timestamps, ascending.
    pub fn times(&self) -> Vec<NaiveDateTime> {
        self.points.iter().map(|p| p.timestamp).collect()
    }

    /// Fractional locations, parallel to [`ProgressSeries::times`].
    pub fn fractions(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.fraction).collect()
    }

    /// Annotation types, parallel to [`ProgressSeries::times`].
    pub fn types(&self) -> Vec<LocationType> {
        self.points.iter().map(|p| p.location_type).collect()
    }

    /// Fractions of the points carrying `location_type`, in time order.
    pub fn fractions_of(&self, location_type: LocationType) -> Vec<f64> {
        self.points
            .iter()
            .filter(|p| p.location_type == location_type)
            .map(|p| p.fraction)
            .collect()
    }

    /// The three parallel sequences handed to plotting collaborators.
    pub fn plot_data(&self) -> PlotData {
        PlotData {
            book_title: self.book_title.clone(),
            book_length: self.book_length,
            times: self.times(),
            fractions: self.fractions(),
            types: self.types(),
        }
    }
}

/// Column-oriented view of a [`ProgressSeries`], serialised for external plotters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    pub book_title: String,
    pub book_length: u64,
    pub times: Vec<NaiveDateTime>,
    pub fractions: Vec<f64>,
    pub types: Vec<LocationType>,
}

impl PlotData {
    /// Pretty-printed JSON object with the three parallel columns.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Headline figures about reading activity in one book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub highlights: usize,
    pub bookmarks: usize,
    pub notes: usize,
    pub first_annotation: Option<NaiveDateTime>,
    pub last_annotation: Option<NaiveDateTime>,
    /// Whole days between the first and last annotation.
    pub span_days: i64,
    /// Largest fraction reached.
    pub furthest_fraction: f64,
}

impl ProgressSummary {
    /// Total annotations across all types.
    pub fn total(&self) -> usize {
        self.highlights + self.bookmarks + self.notes
    }
}
