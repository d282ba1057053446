//! RSS feed fetching and parsing.
//!
//! Fetches an RSS document over HTTP and parses its `<item>` elements into
//! [`Article`] records. The parser walks `quick-xml` events directly rather
//! than deserializing, because feeds in the wild mix plain text, entities,
//! and CDATA inside the same fields.
//!
//! # Content selection
//!
//! Each item carries a `<description>` and, in feeds that publish full bodies,
//! a namespaced `<content:encoded>` element. Both are markup-stripped and the
//! strictly longer rendering wins; ties keep the description.

use crate::error::{Error, Result};
use crate::models::Article;
use crate::utils::{clean_html, fetch_time_now};
use itertools::Itertools;
use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, info, instrument};
use url::Url;

/// Fetch and parse an RSS feed into articles.
///
/// The response body is decoded as UTF-8 (a leading BOM is tolerated) before
/// XML parsing. Transport, decode, and XML failures map to distinct
/// [`Error`] variants so the caller can report them separately.
#[instrument(level = "info", skip_all, fields(%feed_url))]
pub async fn fetch_feed(feed_url: &str) -> Result<Vec<Article>> {
    let url =
        Url::parse(feed_url).map_err(|_| Error::InvalidUrl(feed_url.to_string()))?;

    let response = reqwest::get(url).await?.error_for_status()?;
    let bytes = response.bytes().await?;
    let body = String::from_utf8(bytes.to_vec())?;
    let body = body.trim_start_matches('\u{feff}').trim();

    let articles = parse_feed(body)?;
    info!(count = articles.len(), "Parsed feed items");
    Ok(articles)
}

/// Parse RSS XML into articles, applying the content-selection and
/// placeholder policies.
///
/// Items that repeat a link already seen earlier in the same document are
/// dropped; the first occurrence wins.
pub fn parse_feed(xml: &str) -> Result<Vec<Article>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut articles = Vec::new();
    let mut in_item = false;
    let mut current_tag = String::new();
    let mut title = String::new();
    let mut link = String::new();
    let mut pub_date = String::new();
    let mut description = String::new();
    let mut encoded = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if name == "item" {
                    in_item = true;
                    title.clear();
                    link.clear();
                    pub_date.clear();
                    description.clear();
                    encoded.clear();
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"item" && in_item {
                    in_item = false;
                    articles.push(build_article(
                        &title,
                        &link,
                        &pub_date,
                        &description,
                        &encoded,
                    ));
                }
                current_tag.clear();
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.xml_content().unwrap_or_default();
                    append_field(
                        &current_tag,
                        &text,
                        &mut title,
                        &mut link,
                        &mut pub_date,
                        &mut description,
                        &mut encoded,
                    );
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    append_field(
                        &current_tag,
                        &text,
                        &mut title,
                        &mut link,
                        &mut pub_date,
                        &mut description,
                        &mut encoded,
                    );
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
    }

    // First occurrence of a link wins within a single document.
    let articles = articles
        .into_iter()
        .unique_by(|a| a.link.clone())
        .collect::<Vec<_>>();

    debug!(count = articles.len(), "Feed items after in-batch de-duplication");
    Ok(articles)
}

fn append_field(
    tag: &str,
    text: &str,
    title: &mut String,
    link: &mut String,
    pub_date: &mut String,
    description: &mut String,
    encoded: &mut String,
) {
    match tag {
        "title" => title.push_str(text),
        "link" => link.push_str(text),
        "pubDate" => pub_date.push_str(text),
        "description" => description.push_str(text),
        "content:encoded" => encoded.push_str(text),
        _ => {}
    }
}

fn build_article(
    title: &str,
    link: &str,
    pub_date: &str,
    description: &str,
    encoded: &str,
) -> Article {
    let description_text = clean_html(description);
    let encoded_text = clean_html(encoded);

    // Strictly longer full-content rendering wins; ties keep the description.
    let content = if encoded_text.len() > description_text.len() {
        encoded_text
    } else {
        description_text
    };

    let title = clean_html(title);
    let title = if title.is_empty() {
        "No title".to_string()
    } else {
        title
    };
    let link = link.trim();
    let link = if link.is_empty() {
        "No link".to_string()
    } else {
        link.to_string()
    };
    let pub_date = pub_date.trim();
    let pub_date = if pub_date.is_empty() {
        "No date".to_string()
    } else {
        pub_date.to_string()
    };

    Article {
        title,
        pub_date,
        content,
        link,
        fetch_time: fetch_time_now(),
    }
}
