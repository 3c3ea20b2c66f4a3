//! Parsing of the `July 4, 2020, 11:30 PM` timestamps written by e-readers.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::error::{ProgressError, Result};

static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\S+) (\d+), (\d+), (\d+):(\d+) (\S+)").expect("regex is valid")
});

/// Month names in calendar order; index + 1 is the month number.
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// ── MonthTable ────────────────────────────────────────────────────────────────

/// Which month-name → number mapping to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthTable {
    /// Every month maps to its own number.
    #[default]
    Standard,
    /// Reproduces older exports' processing, where July was read as month 5.
    Legacy,
}

impl MonthTable {
    /// Month number (1–12) for `name`, or `None` when it is not a month.
    pub fn month_number(self, name: &str) -> Option<u32> {
        let idx = MONTH_NAMES
            .iter()
            .position(|m| m.eq_ignore_ascii_case(name))?;
        let number = idx as u32 + 1;
        match self {
            MonthTable::Legacy if number == 7 => Some(5),
            _ => Some(number),
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse a clippings timestamp using the standard month table.
///
/// The `<Month> <Day>, <Year>, <Hour>:<Minute> <AM|PM>` pattern may appear
/// anywhere in `raw`, so a leading `"Sunday, "` is accepted.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    parse_timestamp_with(raw, MonthTable::Standard)
}

/// Parse a clippings timestamp with an explicit month table.
pub fn parse_timestamp_with(raw: &str, months: MonthTable) -> Result<NaiveDateTime> {
    let invalid = || ProgressError::TimestampParse(raw.trim().to_string());

    let caps = TIMESTAMP_RE.captures(raw).ok_or_else(invalid)?;

    let month = months.month_number(&caps[1]).ok_or_else(invalid)?;
    let day: u32 = caps[2].parse().map_err(|_| invalid())?;
    let year: i32 = caps[3].parse().map_err(|_| invalid())?;
    let hour: u32 = caps[4].parse().map_err(|_| invalid())?;
    let minute: u32 = caps[5].parse().map_err(|_| invalid())?;
    let is_pm = match &caps[6] {
        "AM" => false,
        "PM" => true,
        _ => return Err(invalid()),
    };

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(to_24_hour(hour, is_pm), minute, 0))
        .ok_or_else(invalid)
}

/// Convert a 12-hour clock reading to 24-hour.
pub fn to_24_hour(hour: u32, is_pm: bool) -> u32 {
    match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
