use clap::{Parser, ValueEnum};
use paged_scrape::export::{DEFAULT_COLUMN, ExportFormat};
use paged_scrape::filter::ItemPattern;
use paged_scrape::{ExtractMode, FilterError, ScraperConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "paged-scrape")]
#[command(about = "Scrape elements from paginated HTML pages and export them")]
#[command(version)]
pub struct Args {
    /// URL to scrape; `{page}` is replaced by the page number (1, 2, ...)
    pub url: Option<String>,

    /// CSS selector of the elements to extract
    #[arg(short, long)]
    pub selector: Option<String>,

    /// What to extract from each matched element
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Maximum number of pages to fetch [default: 50]
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Request timeout in seconds [default: 30]
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Custom user agent
    #[arg(long)]
    pub user_agent: Option<String>,

    /// JSON configuration file; command-line flags take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only show items containing this keyword (case-insensitive)
    #[arg(short, long, conflicts_with = "regex")]
    pub filter: Option<String>,

    /// Show every match of this regular expression instead of the items
    #[arg(short, long)]
    pub regex: Option<String>,

    /// Export the scraped items to this file (or directory)
    #[arg(short = 'o', long)]
    pub export: Option<PathBuf>,

    /// Export format; inferred from the file extension when omitted
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Column label of the exported table
    #[arg(long, default_value = DEFAULT_COLUMN)]
    pub column: String,

    /// Print the whole session as JSON instead of one item per line
    #[arg(long)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Text,
    #[value(alias = "link")]
    Links,
    #[value(alias = "image")]
    Images,
}

impl From<ModeArg> for ExtractMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Text => ExtractMode::Text,
            ModeArg::Links => ExtractMode::Link,
            ModeArg::Images => ExtractMode::Image,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Xlsx,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Xlsx => ExportFormat::Xlsx,
        }
    }
}

impl Args {
    /// Merge the config file (if any) with command-line overrides
    pub fn to_config(&self) -> Result<ScraperConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => ScraperConfig::from_file(path)?,
            None => ScraperConfig::new("", "", ExtractMode::Text),
        };

        if let Some(url) = &self.url {
            config.url_template = url.trim().to_string();
        }
        if let Some(selector) = &self.selector {
            config.selector = selector.trim().to_string();
        }
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Rejects a blank `--filter` keyword or an unusable `--regex` pattern
    pub fn check_filters(&self) -> Result<(), FilterError> {
        if let Some(keyword) = &self.filter {
            if keyword.trim().is_empty() {
                return Err(FilterError::EmptyKeyword);
            }
        }
        if let Some(pattern) = &self.regex {
            ItemPattern::new(pattern)?;
        }
        Ok(())
    }

    /// Export format from `--format`, else the file extension, else CSV
    pub fn export_format(&self) -> ExportFormat {
        self.format
            .map(ExportFormat::from)
            .or_else(|| self.export.as_deref().and_then(ExportFormat::from_path))
            .unwrap_or(ExportFormat::Csv)
    }
}
