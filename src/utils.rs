use crate::crawlers::PAGE_PLACEHOLDER;
use crate::export::ExportFormat;
use std::path::{Path, PathBuf};

/// Convert a URL to a sanitized filename
pub fn sanitize_filename(url: &str) -> String {
    // Remove protocol and replace invalid filename characters
    let mut name = url.replace("http://", "").replace("https://", "");
    name = name.replace(PAGE_PLACEHOLDER, "");
    name = name.replace(['/', ':', '?', '&', '=', '#', '%', '{', '}'], "_");
    let name = name.trim_matches('_');

    // Limit filename length
    let name: String = name.chars().take(100).collect();
    if name.is_empty() {
        "scrape".to_string()
    } else {
        name
    }
}

/// File inside `dir` named after the URL template, with the format's extension
pub fn default_export_path(dir: &Path, url_template: &str, format: ExportFormat) -> PathBuf {
    dir.join(format!(
        "{}.{}",
        sanitize_filename(url_template),
        format.extension()
    ))
}
