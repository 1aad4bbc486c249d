//! URL helper functions

use crate::calendar::Day;
use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/style.css") // -> "/blog/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/7") // -> "https://example.com/blog/7"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// The home page, where locked and missing days redirect to
pub fn home_path(config: &SiteConfig) -> String {
    url_for(config, "")
}

/// Path of a day's article
pub fn day_path(config: &SiteConfig, day: Day) -> String {
    url_for(config, &day.to_string())
}
