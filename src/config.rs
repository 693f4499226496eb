use crate::error::ConfigError;
use crate::results::{ExtractMode, ScrapeRequest};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for a paginated scrape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// URL template; `{page}` is replaced by the page number
    pub url_template: String,

    /// CSS selector applied to every page
    pub selector: String,

    /// What to extract from each match
    #[serde(default)]
    pub mode: ExtractMode,

    /// Upper bound on pages fetched in one run
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Default value for max_pages
pub fn default_max_pages() -> u32 {
    50
}

/// Default value for timeout_secs
fn default_timeout_secs() -> u64 {
    30
}

/// Default value for user_agent
fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

impl ScraperConfig {
    /// Create a new configuration with default values
    pub fn new(url_template: &str, selector: &str, mode: ExtractMode) -> Self {
        Self {
            url_template: url_template.to_string(),
            selector: selector.to_string(),
            mode,
            max_pages: default_max_pages(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Rejects configurations a run cannot start from
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url_template.trim().is_empty() {
            return Err(ConfigError::Invalid("URL is required".to_string()));
        }
        if self.selector.trim().is_empty() {
            return Err(ConfigError::Invalid("element selector is required".to_string()));
        }
        if self.max_pages == 0 {
            return Err(ConfigError::Invalid("max_pages must be at least 1".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }

    /// The request this configuration describes, with surrounding whitespace removed
    pub fn request(&self) -> ScrapeRequest {
        ScrapeRequest::new(self.url_template.trim(), self.selector.trim(), self.mode)
    }
}
