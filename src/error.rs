//! Error types for the fetch, parse, and output pipelines.
//!
//! Each failure class the pipelines can hit gets its own variant so callers
//! can log transport, document, and decoding failures distinctly. Only
//! [`Error::NoSourceText`] is fatal to the process; everything else is logged
//! at the point of occurrence and the run exits cleanly without output.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid UTF-8 in response body: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error("invalid URL `{0}`")]
    InvalidUrl(String),

    #[error("chat API error: {0}")]
    Api(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The one fatal case: the quiz pipeline found no usable source text.
    #[error("no usable source text at {0}")]
    NoSourceText(String),
}

pub type Result<T> = std::result::Result<T, Error>;
