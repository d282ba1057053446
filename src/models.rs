//! Data models for ingested articles and generated quiz rows.
//!
//! Two record types flow through the pipelines:
//! - [`Article`]: one RSS feed item, identified by its link, destined for the
//!   weekly text log
//! - [`QuizRow`]: one parsed multiple-choice question from an LLM reply,
//!   destined for the quiz CSV

/// A news article parsed from an RSS feed item.
///
/// Created once per feed item during ingestion and never updated. Identity is
/// the `link` field: two articles with identical text but different links are
/// distinct, and the week log never holds two blocks with the same link.
///
/// Missing feed fields degrade to the literal placeholders `"No title"`,
/// `"No link"`, and `"No date"` instead of failing the item.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// Article headline, markup-stripped.
    pub title: String,
    /// Source-provided publication date, passed through unnormalized.
    pub pub_date: String,
    /// The longer of the feed's description and `content:encoded` fields
    /// after markup stripping; ties favor the description.
    pub content: String,
    /// The article URL, used as the de-duplication key.
    pub link: String,
    /// Local ingestion timestamp in `YYYY-MM-DD HH:MM:SS` format.
    pub fetch_time: String,
}

/// One multiple-choice quiz question parsed from an LLM reply.
///
/// A reply line only becomes a `QuizRow` when it splits into exactly six
/// trimmed fields and its answer token is one of `A`..`D` (stored uppercased).
#[derive(Debug, Clone, PartialEq)]
pub struct QuizRow {
    pub question: String,
    /// Options A through D, in order.
    pub options: [String; 4],
    /// The correct option: `"A"`, `"B"`, `"C"`, or `"D"`.
    pub answer: String,
}

/// Outcome of one ingestion run against a week log.
///
/// `NoNewArticles` means the log file was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    Appended(usize),
    NoNewArticles,
}
