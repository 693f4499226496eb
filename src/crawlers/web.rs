use crate::config::ScraperConfig;
use crate::crawlers::crawler::PageFetcher;
use crate::error::{FetchError, ScrapeError};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Fetches pages over HTTP with a single GET per call
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher with the timeout and user agent from `config`
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ScrapeError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            cause: e.to_string(),
        })?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            ::log::warn!("GET {} returned {}", url, status);
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| classify_error(url, e))
    }
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    ::log::error!("Failed to fetch {}: {}", url, error);
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
            cause: error.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            cause: error.to_string(),
        }
    }
}
