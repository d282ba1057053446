//! HTML scrapers for quiz source pages.
//!
//! Each submodule knows one site's layout: how to build the page URL for a
//! date and which container holds the article text. Scrapers return the
//! extracted plain text; prompt construction and LLM calls live elsewhere.
//!
//! Extraction is split from fetching so the selector logic is testable on
//! inline HTML.

pub mod drishti;
