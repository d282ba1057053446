//! Weekly article log: link de-duplication and block append.
//!
//! Each ISO week gets one plain-text archive at
//! `data/<year>/week_<week>_<year>.txt`. A log holds one five-field block per
//! article, blocks separated by a blank line:
//!
//! ```text
//! Title: ...
//! Publication Date: ...
//! Content: ...
//! Link: ...
//! Fetch Time: ...
//! ```
//!
//! The log is append-only and no two blocks ever share a `Link:` value.
//! De-duplication is by link membership alone; full-record equality is never
//! consulted.

use crate::error::Result;
use crate::models::{Article, IngestOutcome};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

/// Marker preceding the de-duplication key inside a block.
const LINK_MARKER: &str = "Link:";

/// Path of the log for a given ISO week and week-based year.
pub fn log_path(data_dir: &str, week: u32, year: i32) -> PathBuf {
    Path::new(data_dir)
        .join(year.to_string())
        .join(format!("week_{week}_{year}.txt"))
}

/// Collect the set of links already present in a log file.
///
/// A missing file is not an error; it means no prior links. Each
/// blank-line-separated block contributes the value following its `Link:`
/// marker, up to the end of that line.
pub async fn existing_links(path: &Path) -> Result<HashSet<String>> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashSet::new()),
        Err(e) => return Err(e.into()),
    };

    let mut links = HashSet::new();
    for block in content.split("\n\n") {
        if let Some(pos) = block.find(LINK_MARKER) {
            let rest = &block[pos + LINK_MARKER.len()..];
            let link = rest.lines().next().unwrap_or("").trim();
            if !link.is_empty() {
                links.insert(link.to_string());
            }
        }
    }
    debug!(count = links.len(), "Collected existing links");
    Ok(links)
}

/// Render one article as its five-field log block, trailing blank line
/// included.
pub fn format_block(article: &Article) -> String {
    format!(
        "Title: {}\nPublication Date: {}\nContent: {}\nLink: {}\nFetch Time: {}\n\n",
        article.title, article.pub_date, article.content, article.link, article.fetch_time
    )
}

/// Filter fetched articles against existing links and append the new ones.
///
/// All new articles are written in a single file-open session, in arrival
/// order. When nothing is new the file is left untouched and
/// [`IngestOutcome::NoNewArticles`] is returned.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ingest(path: &Path, articles: Vec<Article>) -> Result<IngestOutcome> {
    let seen = existing_links(path).await?;
    let new_articles = articles
        .into_iter()
        .filter(|a| !seen.contains(&a.link))
        .collect::<Vec<_>>();

    if new_articles.is_empty() {
        return Ok(IngestOutcome::NoNewArticles);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    for article in &new_articles {
        file.write_all(format_block(article).as_bytes()).await?;
        info!(title = %article.title, link = %article.link, "Added article");
    }
    file.flush().await?;

    Ok(IngestOutcome::Appended(new_articles.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(link: &str, title: &str) -> Article {
        Article {
            title: title.to_string(),
            pub_date: "Mon, 06 Jan 2025 10:00:00 +0530".to_string(),
            content: "Body text".to_string(),
            link: link.to_string(),
            fetch_time: "2025-01-06 10:30:00".to_string(),
        }
    }

    #[test]
    fn test_log_path_layout() {
        let path = log_path("data", 2, 2025);
        assert_eq!(path, Path::new("data/2025/week_2_2025.txt"));
    }

    #[test]
    fn test_format_block_five_fields() {
        let block = format_block(&article("https://a", "Headline"));
        assert!(block.starts_with("Title: Headline\n"));
        assert!(block.contains("Publication Date: "));
        assert!(block.contains("Content: Body text\n"));
        assert!(block.contains("Link: https://a\n"));
        assert!(block.contains("Fetch Time: "));
        assert!(block.ends_with("\n\n"));
    }

    #[tokio::test]
    async fn test_missing_file_means_no_prior_links() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("week_1_2025.txt");
        let links = existing_links(&path).await.unwrap();
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn test_existing_links_reads_each_block() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("week_1_2025.txt");
        let body = format_block(&article("https://a", "One"))
            + &format_block(&article("https://b", "Two"));
        fs::write(&path, body).await.unwrap();

        let links = existing_links(&path).await.unwrap();
        assert_eq!(links.len(), 2);
        assert!(links.contains("https://a"));
        assert!(links.contains("https://b"));
    }

    #[tokio::test]
    async fn test_ingest_writes_everything_when_log_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2025").join("week_1_2025.txt");
        let outcome = ingest(&path, vec![article("https://a", "One"), article("https://b", "Two")])
            .await
            .unwrap();
        assert_eq!(outcome, IngestOutcome::Appended(2));

        let links = existing_links(&path).await.unwrap();
        assert_eq!(links.len(), 2);
    }

    #[tokio::test]
    async fn test_ingest_skips_already_logged_links() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("week_1_2025.txt");
        fs::write(&path, format_block(&article("https://a", "One")))
            .await
            .unwrap();

        // Feed contains one seen and one unseen item.
        let outcome = ingest(&path, vec![article("https://a", "One"), article("https://b", "Two")])
            .await
            .unwrap();
        assert_eq!(outcome, IngestOutcome::Appended(1));

        let content = fs::read_to_string(&path).await.unwrap();
        assert_eq!(content.matches("Link: https://a").count(), 1);
        assert_eq!(content.matches("Link: https://b").count(), 1);
    }

    #[tokio::test]
    async fn test_ingest_reruns_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("week_1_2025.txt");
        let items = vec![article("https://a", "One")];

        assert_eq!(
            ingest(&path, items.clone()).await.unwrap(),
            IngestOutcome::Appended(1)
        );
        assert_eq!(
            ingest(&path, items).await.unwrap(),
            IngestOutcome::NoNewArticles
        );

        let content = fs::read_to_string(&path).await.unwrap();
        assert_eq!(content.matches("Link: https://a").count(), 1);
    }

    #[tokio::test]
    async fn test_no_new_articles_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("week_1_2025.txt");
        let original = format_block(&article("https://a", "One"));
        fs::write(&path, &original).await.unwrap();

        let outcome = ingest(&path, vec![article("https://a", "Renamed")]).await.unwrap();
        assert_eq!(outcome, IngestOutcome::NoNewArticles);
        assert_eq!(fs::read_to_string(&path).await.unwrap(), original);
    }

    #[tokio::test]
    async fn test_same_content_different_links_both_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("week_1_2025.txt");
        let outcome = ingest(
            &path,
            vec![article("https://a", "Same"), article("https://b", "Same")],
        )
        .await
        .unwrap();
        assert_eq!(outcome, IngestOutcome::Appended(2));
    }
}
