pub mod html;


pub use html::{compile_selector, extract, extract_page, parse_document};
pub use scraper::{Html, Selector};
