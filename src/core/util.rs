//! Common utilities

use chrono::{Local, NaiveDate};

/// Truncate a string to at most `max_chars` characters, returning
/// (truncated_string, was_truncated). A trailing ellipsis marks the cut.
pub fn truncate_chars(s: &str, max_chars: usize) -> (String, bool) {
    if s.chars().count() <= max_chars {
        return (s.to_string(), false);
    }
    if max_chars == 0 {
        return (String::new(), true);
    }

    let mut out: String = s.chars().take(max_chars - 1).collect();
    out.push('…');
    (out, true)
}

/// Display width of a string in characters
pub fn char_width(s: &str) -> usize {
    s.chars().count()
}

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
