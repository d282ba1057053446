//! Utility functions for markup stripping, date math, and log formatting.

use chrono::{Datelike, Days, Local, NaiveDate};
use scraper::Html;

/// Strip HTML markup and decode entities from a string.
///
/// Parses the input as an HTML fragment and collects the rendered text nodes,
/// so nested and malformed tags are handled by a real parser instead of a
/// pattern match. Whitespace runs are collapsed to single spaces so the result
/// stays on one line in the week log's block format.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_html("<p>AT&amp;T  rises</p>"), "AT&T rises");
/// ```
pub fn clean_html(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    let text = fragment.root_element().text().collect::<String>();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Current ISO week number and ISO week-based year.
///
/// The week log is keyed on this pair, so articles fetched in the same ISO
/// week always land in the same file even across a calendar-year boundary.
pub fn week_year() -> (u32, i32) {
    let iso = Local::now().date_naive().iso_week();
    (iso.week(), iso.year())
}

/// Today's local date in `YYYY-MM-DD` format, used to key quiz CSV files.
pub fn today_str() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Yesterday's local date, used to build the news-analysis page URL.
pub fn yesterday() -> NaiveDate {
    Local::now().date_naive() - Days::new(1)
}

/// Local ingestion timestamp in `YYYY-MM-DD HH:MM:SS` format.
pub fn fetch_time_now() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes with an ellipsis and byte count
/// indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…(+{} bytes)", &s[..end], s.len() - end)
    }
}
