use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to retrieve a page. Fatal to the current run.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchError {
    /// The resolved page URL could not be parsed
    #[error("invalid URL {url}: {cause}")]
    InvalidUrl { url: String, cause: String },

    /// The server answered with a non-2xx status
    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    /// The request did not complete within the configured timeout
    #[error("timed out fetching {url}: {cause}")]
    Timeout { url: String, cause: String },

    /// Connection, TLS, body decoding or any other transport failure
    #[error("failed to fetch {url}: {cause}")]
    Transport { url: String, cause: String },
}

impl FetchError {
    /// URL of the page that failed
    pub fn url(&self) -> &str {
        match self {
            FetchError::InvalidUrl { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Timeout { url, .. }
            | FetchError::Transport { url, .. } => url,
        }
    }
}

/// Invalid regular expression handed to the result store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid pattern: {0}")]
pub struct PatternError(pub String);

impl From<regex::Error> for PatternError {
    fn from(err: regex::Error) -> Self {
        PatternError(err.to_string())
    }
}

/// Invalid CSS selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid selector '{selector}': {cause}")]
pub struct SelectorError {
    pub selector: String,
    pub cause: String,
}

/// Errors from the filter and regex operations over collected items.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("no data: scrape data first before filtering")]
    NoData,

    #[error("please enter a keyword to filter")]
    EmptyKeyword,

    #[error("please enter a regex pattern")]
    EmptyPattern,

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Errors from writing or reading exported tables.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no data: scrape data first before exporting")]
    NoData,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything that can stop a scrape before or while it runs.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}
