//! URL presentation helpers
//!
//! Stored urls are kept exactly as typed, so "example.com" is a valid entry.
//! Anything not starting with `http` gets the default scheme before it is
//! parsed or opened.

use url::Url;

/// Scheme assumed for urls typed without one
pub const DEFAULT_SCHEME: &str = "https";

/// The url to hand to a browser when a link is opened
pub fn browser_url(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("{}://{}", DEFAULT_SCHEME, url)
    }
}

/// Short host-only form of a url for display
///
/// Returns the raw string unchanged when it cannot be parsed as a url with
/// a host, even after adding the default scheme.
pub fn format_display_url(url: &str) -> String {
    Url::parse(&browser_url(url))
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_url() {
        assert_eq!(browser_url("example.com"), "https://example.com");
        assert_eq!(browser_url("https://example.com/a"), "https://example.com/a");
        assert_eq!(browser_url("http://example.com"), "http://example.com");
    }

    #[test]
    fn test_display_bare_host() {
        assert_eq!(format_display_url("example.com"), "example.com");
    }

    #[test]
    fn test_display_strips_scheme_path_and_port() {
        assert_eq!(
            format_display_url("https://www.rust-lang.org/learn?x=1#top"),
            "www.rust-lang.org"
        );
        assert_eq!(format_display_url("http://localhost:8080/admin"), "localhost");
        assert_eq!(format_display_url("docs.rs/serde/latest"), "docs.rs");
    }

    #[test]
    fn test_display_lowercases_host() {
        assert_eq!(format_display_url("https://Example.COM"), "example.com");
    }

    #[test]
    fn test_display_unparseable_returns_original() {
        assert_eq!(format_display_url("not a url###"), "not a url###");
        assert_eq!(format_display_url("http//missing-colon"), "http//missing-colon");
    }
}
