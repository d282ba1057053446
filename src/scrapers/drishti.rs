//! Drishti IAS news-analysis page scraper.
//!
//! The site publishes one news-analysis page per day at a dated URL
//! (`.../news-analysis/06-01-2025`). The page body lives inside an
//! `<article>` element within the `.list-category` container; everything
//! outside it is navigation chrome.

use crate::error::Result;
use scraper::{Html, Selector};
use chrono::NaiveDate;
use tracing::{info, instrument, warn};

const BASE_URL: &str =
    "https://www.drishtiias.com/current-affairs-news-analysis-editorials/news-analysis";

/// URL of the news-analysis page for a given date.
///
/// The site keys pages by `dd-mm-yyyy`.
pub fn page_url_for(date: NaiveDate) -> String {
    format!("{}/{}", BASE_URL, date.format("%d-%m-%Y"))
}

/// Fetch a news-analysis page and extract its article text.
///
/// Returns `Ok(None)` when the page loads but carries no usable article
/// text; the caller decides whether that is fatal.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_analysis_text(url: &str) -> Result<Option<String>> {
    let html = reqwest::get(url).await?.error_for_status()?.text().await?;
    Ok(extract_analysis_text(&html))
}

/// Pull the article text out of a news-analysis page.
///
/// Locates the `.list-category` container, then the `<article>` element
/// inside it, and collects its whitespace-normalized text. The two missing
/// cases are logged distinctly.
pub fn extract_analysis_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let container_selector = Selector::parse(".list-category").unwrap();
    let article_selector = Selector::parse("article").unwrap();

    let Some(container) = document.select(&container_selector).next() else {
        warn!("No list-category container found in the page");
        return None;
    };
    let Some(article) = container.select(&article_selector).next() else {
        warn!("No article element found in the list-category container");
        return None;
    };

    let text = article.text().collect::<Vec<_>>().join(" ");
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        warn!("Article element contained no text");
        return None;
    }

    info!(bytes = text.len(), "Extracted analysis text");
    Some(text)
}
