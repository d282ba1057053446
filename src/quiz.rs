//! Parsing LLM replies into bounded sequences of quiz rows.
//!
//! The model is asked for a delimited table: one question per line, six
//! comma-separated fields (`question, A, B, C, D, answer`), optionally led by
//! a header line. Replies in the wild also arrive wrapped in Markdown code
//! fences, quoted, or padded with commentary lines; everything that does not
//! split into exactly six fields is dropped rather than failing the run.

use crate::api::AskAsync;
use crate::error::Result;
use crate::models::QuizRow;
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, instrument};

/// Upper bound on rows retained from one reply, fixing the quiz length.
pub const MAX_ROWS: usize = 6;

/// First field of the header row; reappearing mid-stream it marks a stray
/// repeated header.
const HEADER_TOKEN: &str = "question";

/// Lines consisting only of a Markdown code fence, with or without a
/// language tag.
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*```[A-Za-z]*\s*$").unwrap());

/// Ask the model for quiz questions and parse its reply.
#[instrument(level = "info", skip_all)]
pub async fn generate_quiz<A: AskAsync>(
    client: &A,
    prompt: &str,
    expect_header: bool,
) -> Result<Vec<QuizRow>> {
    let reply = client.ask(prompt).await?;
    debug!(reply = %truncate_for_log(&reply, 300), "Model reply");

    let rows = parse_reply(&reply, expect_header);
    info!(count = rows.len(), "Parsed quiz rows");
    Ok(rows)
}

/// Parse a delimited-text reply into at most [`MAX_ROWS`] quiz rows.
///
/// Per line: quote characters are stripped, surrounding whitespace trimmed,
/// and the line split on commas. A line survives only when it yields exactly
/// six trimmed fields, its question field is not a repeated header token, and
/// its answer normalizes to one of `A`..`D`. Original order is preserved.
pub fn parse_reply(reply: &str, expect_header: bool) -> Vec<QuizRow> {
    let cleaned = CODE_FENCE.replace_all(reply, "");
    let mut lines = cleaned.trim().lines();
    if expect_header {
        // The per-variant contract puts a header on the first line.
        lines.next();
    }

    let mut rows = Vec::new();
    for line in lines {
        if rows.len() >= MAX_ROWS {
            break;
        }
        let line = line.replace('"', "");
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields = line.split(',').map(str::trim).collect::<Vec<_>>();
        if fields.len() != 6 {
            debug!(%line, count = fields.len(), "Skipping line with unexpected field count");
            continue;
        }
        if fields[0].eq_ignore_ascii_case(HEADER_TOKEN) {
            debug!("Dropping stray repeated header row");
            continue;
        }
        let answer = fields[5].to_ascii_uppercase();
        if !matches!(answer.as_str(), "A" | "B" | "C" | "D") {
            debug!(%line, "Skipping row with out-of-set answer");
            continue;
        }

        rows.push(QuizRow {
            question: fields[0].to_string(),
            options: [
                fields[1].to_string(),
                fields[2].to_string(),
                fields[3].to_string(),
                fields[4].to_string(),
            ],
            answer,
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct CannedAsk(std::result::Result<String, ()>);

    impl AskAsync for CannedAsk {
        async fn ask(&self, _prompt: &str) -> Result<String> {
            match &self.0 {
                Ok(reply) => Ok(reply.clone()),
                Err(()) => Err(Error::Api("canned failure".to_string())),
            }
        }
    }

    #[test]
    fn test_valid_and_invalid_lines_with_header() {
        let reply = "question,A,B,C,D,answer\nQ1?,x,y,z,w,B\nbadline\nQ2?,a,b,c,d,A";
        let rows = parse_reply(reply, true);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].question, "Q1?");
        assert_eq!(rows[0].options, ["x", "y", "z", "w"].map(String::from));
        assert_eq!(rows[0].answer, "B");
        assert_eq!(rows[1].question, "Q2?");
        assert_eq!(rows[1].answer, "A");
    }

    #[test]
    fn test_no_header_variant_keeps_first_line() {
        let rows = parse_reply("Q1?,a,b,c,d,C\nQ2?,e,f,g,h,D", false);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].question, "Q1?");
    }

    #[test]
    fn test_truncates_to_six_rows_preserving_order() {
        let reply = (1..=9)
            .map(|i| format!("Q{i}?,a,b,c,d,A"))
            .collect::<Vec<_>>()
            .join("\n");
        let rows = parse_reply(&reply, false);
        assert_eq!(rows.len(), MAX_ROWS);
        assert_eq!(rows[0].question, "Q1?");
        assert_eq!(rows[5].question, "Q6?");
    }

    #[test]
    fn test_stray_repeated_header_dropped_mid_stream() {
        let reply = "question,A,B,C,D,answer\nQ1?,a,b,c,d,A\nQuestion,A,B,C,D,Answer\nQ2?,e,f,g,h,B";
        let rows = parse_reply(reply, true);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| !r.question.eq_ignore_ascii_case("question")));
    }

    #[test]
    fn test_quotes_are_stripped() {
        let rows = parse_reply(r#""Q1?","a","b","c","d","A""#, false);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].question, "Q1?");
        assert_eq!(rows[0].options[0], "a");
    }

    #[test]
    fn test_out_of_set_answer_rejected() {
        let rows = parse_reply("Q1?,a,b,c,d,E\nQ2?,a,b,c,d,A and B\nQ3?,a,b,c,d,b", false);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].question, "Q3?");
        assert_eq!(rows[0].answer, "B");
    }

    #[test]
    fn test_code_fences_stripped() {
        let reply = "```csv\nquestion,A,B,C,D,answer\nQ1?,a,b,c,d,A\n```";
        let rows = parse_reply(reply, true);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].question, "Q1?");
    }

    #[test]
    fn test_blank_lines_skipped() {
        let rows = parse_reply("Q1?,a,b,c,d,A\n\n\nQ2?,e,f,g,h,B", false);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_empty_reply_yields_no_rows() {
        assert!(parse_reply("", true).is_empty());
        assert!(parse_reply("I cannot provide factual information.", false).is_empty());
    }

    #[tokio::test]
    async fn test_generate_quiz_with_canned_client() {
        let client = CannedAsk(Ok(
            "question,A,B,C,D,answer\nQ1?,x,y,z,w,B\nbadline\nQ2?,a,b,c,d,A".to_string(),
        ));
        let rows = generate_quiz(&client, "prompt", true).await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_generate_quiz_propagates_api_failure() {
        let client = CannedAsk(Err(()));
        assert!(generate_quiz(&client, "prompt", true).await.is_err());
    }
}
