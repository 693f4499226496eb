use crate::error::FetchError;
use crate::parsers::{self, Html};

/// Token in a URL template replaced by the 1-based page number
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Source of raw page bodies
pub trait PageFetcher {
    /// Retrieve the body of `url`. Non-success responses and transport
    /// failures are errors; the body is never returned alongside them.
    fn fetch_page(&self, url: &str) -> impl Future<Output = Result<String, FetchError>>;
}

/// Substitutes `page_index` for every placeholder in `template`.
/// A template without the placeholder resolves to itself for every page.
pub fn resolve_page_url(template: &str, page_index: u32) -> String {
    if template.contains(PAGE_PLACEHOLDER) {
        template.replace(PAGE_PLACEHOLDER, &page_index.to_string())
    } else {
        template.to_string()
    }
}

/// Returns true if the template varies with the page index
pub fn has_placeholder(template: &str) -> bool {
    template.contains(PAGE_PLACEHOLDER)
}

/// Resolves, fetches and parses page `page_index` of `template`
pub async fn fetch<F: PageFetcher>(
    fetcher: &F,
    template: &str,
    page_index: u32,
) -> Result<Html, FetchError> {
    let url = resolve_page_url(template, page_index);
    ::log::debug!("Fetching page {}: {}", page_index, url);

    let body = fetcher.fetch_page(&url).await?;
    ::log::trace!("Page {} returned {} bytes", page_index, body.len());

    Ok(parsers::parse_document(&body))
}
