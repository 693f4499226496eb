use crate::crawlers::crawler::{self, PageFetcher};
use crate::error::SelectorError;
use crate::parsers;
use crate::results::{ScrapeRequest, ScrapeSession, SessionStatus, StopReason};
use std::ops::ControlFlow;

/// Emitted after each non-empty page has been aggregated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Page just processed (1-based)
    pub page_index: u32,
    /// Page cap of the run
    pub max_pages: u32,
    /// Items collected so far
    pub item_count: usize,
}

impl ProgressEvent {
    /// Share of the page cap consumed, clamped to 100
    pub fn percent(&self) -> f64 {
        if self.max_pages == 0 {
            return 100.0;
        }
        (f64::from(self.page_index) / f64::from(self.max_pages) * 100.0).min(100.0)
    }
}

/// Walks `request.url_template` page by page until a page extracts nothing,
/// the page cap is exceeded, a fetch fails, or `on_progress` breaks.
///
/// Pages are fetched one at a time. A fetch error marks the session failed
/// and keeps everything collected before it. The only error returned directly
/// is an invalid selector, which is detected before any page is fetched.
pub async fn run<F, P>(
    fetcher: &F,
    request: &ScrapeRequest,
    max_pages: u32,
    mut on_progress: P,
) -> Result<ScrapeSession, SelectorError>
where
    F: PageFetcher,
    P: FnMut(ProgressEvent) -> ControlFlow<()>,
{
    let selector = parsers::compile_selector(&request.selector)?;
    let mut session = ScrapeSession::new();

    ::log::info!(
        "Starting scrape of {} (selector '{}', mode {:?}, max {} pages)",
        request.url_template,
        request.selector,
        request.mode,
        max_pages
    );
    if !crawler::has_placeholder(&request.url_template) {
        ::log::warn!(
            "URL template has no {} placeholder; every page fetches the same URL",
            crawler::PAGE_PLACEHOLDER
        );
    }

    let mut page_index = 1;
    let reason = loop {
        if page_index > max_pages {
            break StopReason::PageLimit;
        }

        let doc = match crawler::fetch(fetcher, &request.url_template, page_index).await {
            Ok(doc) => doc,
            Err(err) => {
                ::log::error!("Scrape failed on page {}: {}", page_index, err);
                session.status = SessionStatus::Failed(err);
                return Ok(session);
            }
        };
        session.pages_visited += 1;

        let page = parsers::extract_page(page_index, &doc, &selector, request.mode);
        if page.is_empty() {
            ::log::info!("Page {} yielded no items, stopping", page_index);
            break StopReason::EmptyPage;
        }

        ::log::info!("Scraping page {}: {} items", page_index, page.items.len());
        session.push_page(page);

        let event = ProgressEvent {
            page_index,
            max_pages,
            item_count: session.items.len(),
        };
        if on_progress(event).is_break() {
            ::log::info!("Scrape cancelled after page {}", page_index);
            break StopReason::Cancelled;
        }

        page_index += 1;
    };

    ::log::info!(
        "Done: {} items across {} pages ({:?})",
        session.items.len(),
        session.pages_visited,
        reason
    );
    session.status = SessionStatus::Completed(reason);
    Ok(session)
}
