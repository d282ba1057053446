//! Command-line interface definitions for newsquiz.
//!
//! One subcommand per pipeline. API credentials arrive here (flag or
//! environment variable) and are handed to the chat client at startup;
//! no other configuration surface exists.

use clap::{Args, Parser, Subcommand};

/// Command-line arguments for the newsquiz application.
///
/// # Examples
///
/// ```sh
/// # Archive new feed items into this week's log
/// newsquiz ingest
///
/// # Quiz from yesterday's news-analysis page
/// LLM_API_KEY=... newsquiz quiz
///
/// # Date-only quiz against a local OpenAI-compatible server
/// newsquiz daily --api-key k --base-url http://localhost:8080/v1 --model qwen2.5
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Base directory for week logs and quiz CSV files
    #[arg(short, long, default_value = "data")]
    pub data_dir: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch an RSS feed and append unseen articles to the weekly log
    Ingest {
        /// RSS feed URL to ingest
        #[arg(
            long,
            default_value = "https://ddnews.gov.in/en/category/top-stories/feed/"
        )]
        feed_url: String,
    },
    /// Scrape a current-affairs page and generate a quiz CSV from its text
    Quiz {
        /// Page URL; defaults to yesterday's news-analysis page
        #[arg(long)]
        page_url: Option<String>,

        /// Output file prefix, producing `<data_dir>/<kind>_<date>.csv`
        #[arg(long, default_value = "quiz_questions")]
        kind: String,

        #[command(flatten)]
        llm: LlmArgs,
    },
    /// Generate a date-keyed quiz CSV without fetching any source text
    Daily {
        /// Output file prefix, producing `<data_dir>/<kind>_<date>.csv`
        #[arg(long, default_value = "upsc_quiz_questions")]
        kind: String,

        #[command(flatten)]
        llm: LlmArgs,
    },
}

/// Chat-completion endpoint configuration, shared by the quiz subcommands.
#[derive(Args, Debug)]
pub struct LlmArgs {
    /// API key for the chat-completion endpoint
    #[arg(long, env = "LLM_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "LLM_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub base_url: String,

    /// Model name to request
    #[arg(long, env = "LLM_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,
}
