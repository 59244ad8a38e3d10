//! Pure text presentation helpers for result cards and suggestions.
//!
//! None of these functions fail. Input that cannot be processed (a pattern that
//! does not compile, a date that does not parse) degrades to the text itself.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::RegexBuilder;

/// A run of text, marked or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: false,
        }
    }

    #[must_use]
    pub fn marked(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: true,
        }
    }
}

/// Splits `text` into segments, marking every case-insensitive literal
/// occurrence of `query`.
///
/// The query is escaped before it becomes a pattern, so regex metacharacters
/// match themselves. An empty query, or a pattern that fails to build,
/// yields the whole text unmarked.
///
/// # Examples
///
/// ```
/// use findy::ui::present::{highlight, Segment};
///
/// assert_eq!(
///     highlight("OpenAI (GPT)", "(GPT)"),
///     vec![Segment::plain("OpenAI "), Segment::marked("(GPT)")]
/// );
/// ```
#[must_use]
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    let query = query.trim();
    if text.is_empty() {
        return vec![];
    }
    if query.is_empty() {
        return vec![Segment::plain(text)];
    }

    let pattern = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(e) => {
            tracing::debug!(error = %e, "highlight pattern rejected, leaving text unmarked");
            return vec![Segment::plain(text)];
        }
    };

    let mut segments = vec![];
    let mut cursor = 0;
    for found in pattern.find_iter(text) {
        if found.start() > cursor {
            segments.push(Segment::plain(&text[cursor..found.start()]));
        }
        segments.push(Segment::marked(found.as_str()));
        cursor = found.end();
    }
    if cursor < text.len() {
        segments.push(Segment::plain(&text[cursor..]));
    }
    segments
}

/// Shortens `text` to at most `max_chars` characters, appending `...` when cut.
///
/// Counts characters, not bytes, so Hangul is never split mid-syllable.
///
/// # Examples
///
/// ```
/// use findy::ui::present::truncate;
///
/// assert_eq!(truncate("hello world", 5), "hello...");
/// assert_eq!(truncate("hi", 5), "hi");
/// assert_eq!(truncate("경제 뉴스", 2), "경제...");
/// ```
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Renders an ISO-8601 date or date-time as a short Korean date.
///
/// Accepts RFC 3339 (`2025-01-22T09:30:00+09:00`), a naive date-time
/// (`2025-01-22T09:30:00`, fractional seconds allowed) or a bare date. Empty
/// input gives empty output; anything else unparseable is returned verbatim.
///
/// # Examples
///
/// ```
/// use findy::ui::present::format_date;
///
/// assert_eq!(format_date("2025-01-22"), "2025년 1월 22일");
/// assert_eq!(format_date(""), "");
/// assert_eq!(format_date("yesterday"), "yesterday");
/// ```
#[must_use]
pub fn format_date(iso: &str) -> String {
    let iso = iso.trim();
    if iso.is_empty() {
        return String::new();
    }

    let date = DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(iso, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%Y년 %-m월 %-d일").to_string(),
        Err(_) => {
            tracing::trace!(input = %iso, "unrecognized date format");
            iso.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_is_case_insensitive_and_marks_every_match() {
        assert_eq!(
            highlight("AI and ai", "Ai"),
            vec![
                Segment::marked("AI"),
                Segment::plain(" and "),
                Segment::marked("ai"),
            ]
        );
    }

    #[test]
    fn highlight_treats_metacharacters_literally() {
        assert_eq!(
            highlight("cost is $5.00 or 5x00", "5.00"),
            vec![
                Segment::plain("cost is $"),
                Segment::marked("5.00"),
                Segment::plain(" or 5x00"),
            ]
        );
        assert_eq!(highlight("a[b", "["), vec![Segment::plain("a"), Segment::marked("["), Segment::plain("b")]);
    }

    #[test]
    fn highlight_without_query_or_match_is_plain() {
        assert_eq!(highlight("news", ""), vec![Segment::plain("news")]);
        assert_eq!(highlight("news", "sports"), vec![Segment::plain("news")]);
        assert!(highlight("", "ai").is_empty());
    }

    #[test]
    fn highlight_handles_hangul() {
        assert_eq!(
            highlight("오늘의 경제 뉴스", "경제"),
            vec![
                Segment::plain("오늘의 "),
                Segment::marked("경제"),
                Segment::plain(" 뉴스"),
            ]
        );
    }

    #[test]
    fn truncate_at_exact_length_is_unchanged() {
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("", 5), "");
        assert_eq!(truncate("abc", 0), "...");
    }

    #[test]
    fn format_date_accepts_common_shapes() {
        assert_eq!(format_date("2025-01-22T09:30:00+09:00"), "2025년 1월 22일");
        assert_eq!(format_date("2025-01-22T09:30:00Z"), "2025년 1월 22일");
        assert_eq!(format_date("2025-01-22T09:30:00.123"), "2025년 1월 22일");
        assert_eq!(format_date("2025-12-05T00:00:00"), "2025년 12월 5일");
    }

    #[test]
    fn format_date_returns_garbage_verbatim() {
        assert_eq!(format_date("22/01/2025"), "22/01/2025");
    }
}
