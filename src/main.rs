//! # newsquiz
//!
//! News ingestion and quiz generation pipelines: fetch news content via RSS
//! or HTML scraping, archive de-duplicated articles into weekly text logs,
//! and turn source text into multiple-choice quiz CSVs through an
//! OpenAI-compatible LLM API.
//!
//! ## Subcommands
//!
//! - `ingest`: RSS feed → de-duplicate by link → append to the ISO-week log
//! - `quiz`: dated news-analysis page → LLM → `question,A,B,C,D,answer` CSV
//! - `daily`: date-referencing prompt (no source fetch) → same CSV shape
//!
//! ## Execution model
//!
//! Each invocation runs one pipeline sequentially, with no retries and no
//! partial writes. Failures are logged with context and the run exits
//! cleanly without output; the one fatal case is a quiz run that finds no
//! usable source text at all.
//!
//! ## Usage
//!
//! ```sh
//! newsquiz ingest
//! LLM_API_KEY=... newsquiz quiz
//! LLM_API_KEY=... newsquiz daily
//! ```

use clap::Parser;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod error;
mod feed;
mod models;
mod outputs;
mod prompts;
mod quiz;
mod scrapers;
mod utils;
mod weeklog;

use api::ChatClient;
use cli::{Cli, Command, LlmArgs};
use error::Error;
use models::IngestOutcome;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("newsquiz starting up");

    let Cli { data_dir, command } = Cli::parse();
    debug!(%data_dir, "Parsed CLI arguments");

    match command {
        Command::Ingest { feed_url } => run_ingest(&data_dir, &feed_url).await?,
        Command::Quiz {
            page_url,
            kind,
            llm,
        } => run_quiz(&data_dir, page_url, &kind, &llm).await?,
        Command::Daily { kind, llm } => run_daily(&data_dir, &kind, &llm).await?,
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

/// Feed-ingestion pipeline: fetch, de-duplicate, append to the week log.
///
/// Network, XML, and decode failures are reported distinctly and produce no
/// output; none of them fail the process.
#[instrument(level = "info", skip_all, fields(%feed_url))]
async fn run_ingest(data_dir: &str, feed_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (week, year) = utils::week_year();
    let path = weeklog::log_path(data_dir, week, year);
    info!(week, year, path = %path.display(), "Ingesting feed into week log");

    let articles = match feed::fetch_feed(feed_url).await {
        Ok(articles) => articles,
        Err(e @ Error::Http(_)) => {
            error!(error = %e, "Error fetching the RSS feed");
            return Ok(());
        }
        Err(e @ Error::Xml(_)) => {
            error!(error = %e, "Error parsing the feed XML");
            return Ok(());
        }
        Err(e @ Error::Decode(_)) => {
            error!(error = %e, "Error decoding the feed body");
            return Ok(());
        }
        Err(e) => {
            error!(error = %e, "Feed ingestion failed");
            return Ok(());
        }
    };
    info!(count = articles.len(), "Fetched feed items");

    match weeklog::ingest(&path, articles).await {
        Ok(IngestOutcome::Appended(count)) => {
            info!(count, path = %path.display(), "Added new articles to week log");
        }
        Ok(IngestOutcome::NoNewArticles) => {
            info!("No new articles to add");
        }
        Err(e) => {
            error!(error = %e, path = %path.display(), "Failed writing the week log");
        }
    }
    Ok(())
}

/// Grounded quiz pipeline: scrape the news-analysis page, generate, write.
///
/// Total absence of usable source text is the one fatal case and exits
/// non-zero.
#[instrument(level = "info", skip_all)]
async fn run_quiz(
    data_dir: &str,
    page_url: Option<String>,
    kind: &str,
    llm: &LlmArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = page_url.unwrap_or_else(|| scrapers::drishti::page_url_for(utils::yesterday()));

    let text = match scrapers::drishti::fetch_analysis_text(&url).await {
        Ok(Some(text)) => text,
        Ok(None) => {
            error!(%url, "No article content found");
            return Err(Box::new(Error::NoSourceText(url)));
        }
        Err(e) => {
            error!(error = %e, %url, "Error fetching the page");
            return Err(Box::new(Error::NoSourceText(url)));
        }
    };

    let prompt = prompts::grounded_prompt(&text);
    generate_and_write(llm, &prompt, true, data_dir, kind).await
}

/// Date-only quiz pipeline: no source fetch, prompt references today's date.
#[instrument(level = "info", skip_all)]
async fn run_daily(
    data_dir: &str,
    kind: &str,
    llm: &LlmArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let prompt = prompts::daily_prompt(&utils::today_str());
    generate_and_write(llm, &prompt, false, data_dir, kind).await
}

/// Shared tail of both quiz pipelines: one LLM call, parse, write the CSV.
///
/// API failures and empty parses are logged and exit cleanly with no file
/// written.
async fn generate_and_write(
    llm: &LlmArgs,
    prompt: &str,
    expect_header: bool,
    data_dir: &str,
    kind: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = ChatClient::new(&llm.base_url, &llm.api_key, &llm.model);

    let rows = match quiz::generate_quiz(&client, prompt, expect_header).await {
        Ok(rows) => rows,
        Err(e) => {
            error!(error = %e, "Chat completion failed; no quiz written");
            return Ok(());
        }
    };
    if rows.is_empty() {
        warn!("No valid quiz questions generated");
        return Ok(());
    }

    let date = utils::today_str();
    match outputs::quiz_csv::write_quiz_csv(&rows, data_dir, kind, &date).await {
        Ok(path) => info!(path = %path.display(), "Successfully saved quiz questions"),
        Err(e) => error!(error = %e, "Failed writing the quiz CSV"),
    }
    Ok(())
}
