//! Quiz CSV writer.
//!
//! One file per generation date: `data/<kind>_<YYYY-MM-DD>.csv`, a
//! `question,A,B,C,D,answer` header plus at most six data rows. Fields are
//! quoted only when needed, with `\` as the escape character instead of
//! quote doubling.

use crate::error::Result;
use crate::models::QuizRow;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Path of the quiz CSV for a given kind and generation date.
pub fn csv_path(data_dir: &str, kind: &str, date: &str) -> PathBuf {
    Path::new(data_dir).join(format!("{kind}_{date}.csv"))
}

/// Write a complete batch of quiz rows to its dated CSV file.
///
/// Called only once a full batch exists; there are no partial writes.
/// Creates `data_dir` as needed and returns the written path.
#[instrument(level = "info", skip_all, fields(%data_dir, %kind, %date))]
pub async fn write_quiz_csv(
    rows: &[QuizRow],
    data_dir: &str,
    kind: &str,
    date: &str,
) -> Result<PathBuf> {
    fs::create_dir_all(data_dir).await?;
    let path = csv_path(data_dir, kind, date);

    let mut writer = csv::WriterBuilder::new()
        .double_quote(false)
        .escape(b'\\')
        .from_path(&path)?;
    writer.write_record(["question", "A", "B", "C", "D", "answer"])?;
    for row in rows {
        writer.write_record([
            row.question.as_str(),
            row.options[0].as_str(),
            row.options[1].as_str(),
            row.options[2].as_str(),
            row.options[3].as_str(),
            row.answer.as_str(),
        ])?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = rows.len(), "Wrote quiz CSV");
    Ok(path)
}
