use crate::error::SelectorError;
use crate::results::{ExtractMode, PageResult, ScrapedItem};
use scraper::{ElementRef, Html, Selector};

/// Parses an HTML document. Malformed markup is repaired, never rejected.
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Compiles a CSS selector
pub fn compile_selector(selector: &str) -> Result<Selector, SelectorError> {
    Selector::parse(selector).map_err(|e| SelectorError {
        selector: selector.to_string(),
        cause: e.to_string(),
    })
}

/// Applies `selector` to `doc` and extracts one value per matched element,
/// in document order. Elements that have nothing to offer for `mode` are skipped.
pub fn extract(doc: &Html, selector: &Selector, mode: ExtractMode) -> Vec<ScrapedItem> {
    let items = doc
        .select(selector)
        .filter_map(|element| extract_element(element, mode))
        .collect::<Vec<_>>();

    ::log::debug!("Selector matched {} {:?} values", items.len(), mode);
    if !items.is_empty() {
        ::log::trace!(
            "First few values: {:?}",
            items.iter().take(5).collect::<Vec<_>>()
        );
    }

    items
}

/// Extracts a whole page into a `PageResult`
pub fn extract_page(
    page_index: u32,
    doc: &Html,
    selector: &Selector,
    mode: ExtractMode,
) -> PageResult {
    PageResult::new(page_index, extract(doc, selector, mode))
}

fn extract_element(element: ElementRef<'_>, mode: ExtractMode) -> Option<ScrapedItem> {
    match mode {
        ExtractMode::Text => Some(element.text().collect::<String>().trim().to_string()),
        ExtractMode::Link => non_empty_attr(element, "href"),
        ExtractMode::Image => {
            if element.value().name() != "img" {
                return None;
            }
            non_empty_attr(element, "src")
        }
    }
}

fn non_empty_attr(element: ElementRef<'_>, name: &str) -> Option<ScrapedItem> {
    element
        .value()
        .attr(name)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
