use crate::error::FetchError;
use serde::{Deserialize, Serialize};

/// A single extracted value: text content, href or src
pub type ScrapedItem = String;

/// What to pull out of each matched element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractMode {
    /// Trimmed text content
    #[default]
    Text,
    /// The `href` attribute
    #[serde(alias = "links")]
    Link,
    /// The `src` attribute of `img` elements
    #[serde(alias = "images")]
    Image,
}

/// Parameters of one scrape. Not modified once a run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    /// URL, optionally containing the `{page}` placeholder
    pub url_template: String,

    /// CSS selector
    pub selector: String,

    /// Extraction mode
    #[serde(default)]
    pub mode: ExtractMode,
}

impl ScrapeRequest {
    pub fn new(url_template: impl Into<String>, selector: impl Into<String>, mode: ExtractMode) -> Self {
        Self {
            url_template: url_template.into(),
            selector: selector.into(),
            mode,
        }
    }
}

/// Values extracted from one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// 1-based page number
    pub page_index: u32,

    /// Extracted values in document order
    pub items: Vec<ScrapedItem>,
}

impl PageResult {
    pub fn new(page_index: u32, items: Vec<ScrapedItem>) -> Self {
        Self { page_index, items }
    }

    /// An empty page ends the pagination
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Why a completed session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A page yielded no items
    EmptyPage,
    /// The page cap was reached
    PageLimit,
    /// The progress callback asked to stop
    Cancelled,
}

/// Lifecycle of a scrape session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum SessionStatus {
    Running,
    Completed(StopReason),
    Failed(FetchError),
}

/// Aggregate result of one pagination run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeSession {
    /// Items in page order, then document order within a page
    pub items: Vec<ScrapedItem>,

    /// Pages fetched successfully, including the terminating empty page
    pub pages_visited: u32,

    /// Current status
    pub status: SessionStatus,
}

impl ScrapeSession {
    /// A fresh running session with no items
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            pages_visited: 0,
            status: SessionStatus::Running,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, SessionStatus::Completed(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, SessionStatus::Failed(_))
    }

    /// The fetch error that ended the run, if any
    pub fn error(&self) -> Option<&FetchError> {
        match &self.status {
            SessionStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// The stop reason of a completed run
    pub fn stop_reason(&self) -> Option<StopReason> {
        match self.status {
            SessionStatus::Completed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Converts the session into its items, or the error that ended it.
    /// Items collected before a failure are lost; use `items` directly to keep them.
    pub fn into_result(self) -> Result<Vec<ScrapedItem>, FetchError> {
        match self.status {
            SessionStatus::Failed(err) => Err(err),
            _ => Ok(self.items),
        }
    }

    pub(crate) fn push_page(&mut self, page: PageResult) {
        self.items.extend(page.items);
    }
}

impl Default for ScrapeSession {
    fn default() -> Self {
        Self::new()
    }
}
