pub mod crawler;
pub mod paginate;
pub mod web;

pub use crawler::{PAGE_PLACEHOLDER, PageFetcher, fetch, resolve_page_url};
pub use paginate::{ProgressEvent, run};
pub use web::HttpFetcher;
