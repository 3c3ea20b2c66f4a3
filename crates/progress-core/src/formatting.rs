use chrono::NaiveDateTime;

/// Format a raw device location with thousands separators.
///
/// # Examples
///
/// ```
/// use progress_core::formatting::format_location;
///
/// assert_eq!(format_location(7), "7");
/// assert_eq!(format_location(1234), "1,234");
/// assert_eq!(format_location(1234567), "1,234,567");
/// ```
pub fn format_location(location: u64) -> String {
    group_thousands(&location.to_string())
}

/// Format a fractional location as a percentage with `decimals` places.
///
/// Values above 1 are shown as-is (an explicit book length shorter than the
/// furthest location is allowed).
///
/// # Examples
///
/// ```
/// use progress_core::formatting::format_fraction;
///
/// assert_eq!(format_fraction(0.5, 1), "50.0%");
/// assert_eq!(format_fraction(1.0, 0), "100%");
/// assert_eq!(format_fraction(1.25, 0), "125%");
/// ```
pub fn format_fraction(fraction: f64, decimals: usize) -> String {
    format!("{:.prec$}%", fraction * 100.0, prec = decimals)
}

/// Format a clippings timestamp as `YYYY-MM-DD HH:MM`.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Format a day count, e.g. `"1 day"`, `"12 days"`.
///
/// # Examples
///
/// ```
/// use progress_core::formatting::format_days;
///
/// assert_eq!(format_days(0), "0 days");
/// assert_eq!(format_days(1), "1 day");
/// assert_eq!(format_days(12), "12 days");
/// ```
pub fn format_days(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let remainder = s.len() % 3;
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i != 0 && i % 3 == remainder {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
