//! URL Normalizer
//!
//! Resolves the hrefs and image sources found in article containers against
//! the page URL. Root-relative paths resolve against the page *origin*
//! (scheme + host), everything else that is relative is joined onto the page
//! URL with a separating slash. Image normalization additionally rejects
//! `data:` URLs.

use url::Url;

use crate::patterns::URL_SCHEME;

/// Whether a string starts with a URL scheme (`https:`, `mailto:`, ...).
#[must_use]
pub fn has_scheme(s: &str) -> bool {
    URL_SCHEME.is_match(s.trim())
}

/// Schemes an image source may never carry.
const REJECTED_IMAGE_SCHEMES: &[&str] = &["data", "javascript"];

/// Get the origin (`scheme://host[:port]`) of a page URL.
///
/// Falls back to the first three `/`-separated segments when the URL does
/// not parse, so `"https://example.com/blog"` style strings still work.
#[must_use]
pub fn origin(page_url: &str) -> String {
    let page_url = page_url.trim();
    match Url::parse(page_url) {
        Ok(url) if url.host().is_some() => url.origin().ascii_serialization(),
        _ => page_url.split('/').take(3).collect::<Vec<_>>().join("/"),
    }
}

/// Join a relative reference onto a base with exactly one separating slash.
fn join_with_separator(base: &str, relative: &str) -> String {
    let base = base.trim_end_matches('/');
    let relative = relative.trim_start_matches("./").trim_start_matches('/');
    format!("{base}/{relative}")
}

/// Resolve an article link against the page URL.
///
/// - scheme present → unchanged
/// - `//host/path` → `https:` prefixed
/// - `/path` → page origin + path
/// - anything else → page URL + `/` + href
///
/// An empty href yields an empty string.
#[must_use]
pub fn resolve_link(href: &str, page_url: &str) -> String {
    let href = href.trim();

    if href.is_empty() {
        String::new()
    } else if has_scheme(href) {
        href.to_string()
    } else if href.starts_with("//") {
        format!("https:{href}")
    } else if href.starts_with('/') {
        format!("{}{href}", origin(page_url))
    } else {
        join_with_separator(page_url, href)
    }
}

/// Normalize an image source against the page URL.
///
/// Same rules as [`resolve_link`]: absolute sources come back unchanged,
/// whatever the case of their scheme. `data:` and `javascript:` sources
/// yield an empty string.
#[must_use]
pub fn normalize_image(src: &str, page_url: &str) -> String {
    let src = src.trim();

    if has_scheme(src) {
        return match Url::parse(src) {
            Ok(url) if !REJECTED_IMAGE_SCHEMES.contains(&url.scheme()) => src.to_string(),
            _ => String::new(),
        };
    }

    resolve_link(src, page_url)
}

/// Last URL of a `srcset` list (the largest candidate by convention).
#[must_use]
pub fn srcset_last(srcset: &str) -> Option<String> {
    srcset_urls(srcset).pop()
}

/// First URL of a `srcset` list.
#[must_use]
pub fn srcset_first(srcset: &str) -> Option<String> {
    srcset_urls(srcset).into_iter().next()
}

fn srcset_urls(srcset: &str) -> Vec<String> {
    srcset
        .split(',')
        .filter_map(|entry| entry.split_whitespace().next())
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://example.com/blog";

    #[test]
    fn test_origin_strips_path() {
        assert_eq!(origin("https://example.com/blog/page"), "https://example.com");
        assert_eq!(origin("http://example.com:8080/x"), "http://example.com:8080");
    }

    #[test]
    fn test_origin_of_unparseable_url_uses_segments() {
        assert_eq!(origin("not a url/at/all"), "not a url/at/all");
    }

    #[test]
    fn test_resolve_root_relative_uses_origin() {
        assert_eq!(resolve_link("/posts/42", PAGE), "https://example.com/posts/42");
    }

    #[test]
    fn test_resolve_relative_joins_page_url() {
        assert_eq!(resolve_link("posts/42", PAGE), "https://example.com/blog/posts/42");
        assert_eq!(resolve_link("posts/42", "https://example.com/blog/"), "https://example.com/blog/posts/42");
    }

    #[test]
    fn test_resolve_absolute_unchanged() {
        assert_eq!(resolve_link("https://other.org/a?b=1", PAGE), "https://other.org/a?b=1");
        assert_eq!(resolve_link("mailto:me@example.com", PAGE), "mailto:me@example.com");
    }

    #[test]
    fn test_resolve_protocol_relative() {
        assert_eq!(resolve_link("//cdn.example.com/a.jpg", PAGE), "https://cdn.example.com/a.jpg");
    }

    #[test]
    fn test_resolve_empty() {
        assert_eq!(resolve_link("   ", PAGE), "");
    }

    #[test]
    fn test_normalize_image_rejects_data_urls() {
        assert_eq!(normalize_image("data:image/png;base64,iVBORw0KGgo=", PAGE), "");
        assert_eq!(normalize_image("DATA:image/gif;base64,R0lGOD", PAGE), "");
        assert_eq!(normalize_image("javascript:void(0)", PAGE), "");
    }

    #[test]
    fn test_normalize_image_relative_forms() {
        assert_eq!(normalize_image("//cdn.x.com/i.jpg", PAGE), "https://cdn.x.com/i.jpg");
        assert_eq!(normalize_image("/img/a.jpg", PAGE), "https://example.com/img/a.jpg");
        assert_eq!(normalize_image("img/a.jpg", PAGE), "https://example.com/blog/img/a.jpg");
    }

    #[test]
    fn test_srcset_picks_first_and_last() {
        let srcset = "small.jpg 320w, medium.jpg 640w, large.jpg 1280w";
        assert_eq!(srcset_first(srcset), Some("small.jpg".to_string()));
        assert_eq!(srcset_last(srcset), Some("large.jpg".to_string()));
        assert_eq!(srcset_last("  "), None);
    }

    #[test]
    fn test_normalize_image_keeps_absolute_sources() {
        assert_eq!(normalize_image("HTTPS://cdn.example.com/a.jpg", PAGE), "HTTPS://cdn.example.com/a.jpg");
        assert_eq!(normalize_image("ftp://files.example.com/b.png", PAGE), "ftp://files.example.com/b.png");
        assert_eq!(normalize_image("JavaScript:alert(1)", PAGE), "");
    }
}
