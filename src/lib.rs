// Re-export modules
pub mod config;
pub mod crawlers;
pub mod error;
pub mod export;
pub mod filter;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ScraperConfig;
pub use crawlers::{HttpFetcher, PageFetcher, ProgressEvent};
pub use error::{FetchError, FilterError, PatternError, ScrapeError};
pub use filter::{Outcome, extract_by_regex, filter_by_substring};
pub use results::{ExtractMode, ScrapeRequest, ScrapeSession, SessionStatus, StopReason};

use std::ops::ControlFlow;

/// Main builder for a paginated scrape
pub struct Scraper {
    config: ScraperConfig,
}

impl Scraper {
    /// Create a new Scraper for the given request with default settings
    pub fn new(request: ScrapeRequest) -> Self {
        Self {
            config: ScraperConfig::new(&request.url_template, &request.selector, request.mode),
        }
    }

    /// Create a Scraper from a complete configuration
    pub fn from_config(config: ScraperConfig) -> Self {
        Self { config }
    }

    /// Set the maximum number of pages to fetch
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.timeout_secs = timeout_seconds;
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ScraperConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(self, path: impl AsRef<std::path::Path>) -> Result<Self, ScrapeError> {
        let config = ScraperConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, ScrapeError> {
        let config = ScraperConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Run the scrape over HTTP
    pub async fn run<P>(&self, on_progress: P) -> Result<ScrapeSession, ScrapeError>
    where
        P: FnMut(ProgressEvent) -> ControlFlow<()>,
    {
        let fetcher = HttpFetcher::new(&self.config)?;
        self.run_with(&fetcher, on_progress).await
    }

    /// Validate the configuration and run the scrape with a caller-supplied fetcher
    pub async fn run_with<F, P>(&self, fetcher: &F, on_progress: P) -> Result<ScrapeSession, ScrapeError>
    where
        F: PageFetcher,
        P: FnMut(ProgressEvent) -> ControlFlow<()>,
    {
        self.config.validate()?;
        let request = self.config.request();
        let session = crawlers::run(fetcher, &request, self.config.max_pages, on_progress).await?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Serves the same body for every URL
    struct StaticFetcher(&'static str);

    impl PageFetcher for StaticFetcher {
        async fn fetch_page(&self, _url: &str) -> Result<String, FetchError> {
            Ok(self.0.to_string())
        }
    }

    fn continue_all(_: ProgressEvent) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    #[test]
    fn test_builder_overrides() {
        let scraper = Scraper::new(ScrapeRequest::new("http://x/{page}", "p", ExtractMode::Link))
            .with_max_pages(7)
            .with_timeout(5)
            .with_user_agent("test-agent/1.0");

        let config = scraper.config();
        assert_eq!(config.url_template, "http://x/{page}");
        assert_eq!(config.mode, ExtractMode::Link);
        assert_eq!(config.max_pages, 7);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert!(HttpFetcher::new(config).is_ok());
    }

    #[test]
    fn test_config_str_replaces_request() {
        let scraper = Scraper::new(ScrapeRequest::new("http://old", "a", ExtractMode::Text))
            .with_config_str(r#"{"url_template": "http://new/{page}", "selector": "img", "mode": "image"}"#)
            .unwrap();

        assert_eq!(scraper.config().url_template, "http://new/{page}");
        assert_eq!(scraper.config().mode, ExtractMode::Image);
        assert_eq!(scraper.config().max_pages, 50);

        assert!(matches!(
            Scraper::from_config(scraper.config().clone()).with_config_str("not json"),
            Err(ScrapeError::Config(_))
        ));
    }

    #[test]
    fn test_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"url_template": "http://f/{{page}}", "selector": "li", "max_pages": 2}}"#).unwrap();

        let scraper = Scraper::new(ScrapeRequest::new("http://old", "a", ExtractMode::Text))
            .with_config_file(file.path())
            .unwrap();
        assert_eq!(scraper.config().url_template, "http://f/{page}");
        assert_eq!(scraper.config().max_pages, 2);
    }

    #[tokio::test]
    async fn test_run_with_fetcher() {
        let config = ScraperConfig::new("http://x/list", "li", ExtractMode::Text);
        let scraper = Scraper::from_config(config).with_max_pages(2);

        let session = scraper
            .run_with(&StaticFetcher("<ul><li>a</li><li>b</li></ul>"), continue_all)
            .await
            .unwrap();

        assert!(session.is_completed());
        assert!(!session.is_failed());
        assert_eq!(session.items, vec!["a", "b", "a", "b"]);
    }

    #[tokio::test]
    async fn test_run_with_rejects_invalid_config() {
        let scraper = Scraper::new(ScrapeRequest::new("http://x/{page}", "  ", ExtractMode::Text));

        let result = scraper.run_with(&StaticFetcher("<li>a</li>"), continue_all).await;
        assert!(matches!(result, Err(ScrapeError::Config(_))));
    }
}
