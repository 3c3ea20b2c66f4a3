//! Reusable line-level widgets shared by the chart and table views.

pub mod header;
pub mod progress_bar;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shorten `text` to at most `max_width` terminal columns, ending in `…` when
/// anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
