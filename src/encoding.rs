//! Lenient decoding for the fallback parse path.
//!
//! Pages that are not valid UTF-8 usually declare a legacy charset in a meta
//! tag. The fallback path honours that declaration and decodes with
//! replacement characters instead of failing.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>;]+)"#).expect("valid regex")
});

/// Bytes inspected when looking for a charset declaration.
const SNIFF_LEN: usize = 2048;

/// Detect the declared character encoding of an HTML byte stream.
///
/// Covers both `<meta charset="...">` and the `http-equiv` form, since the
/// latter also ends in `charset=...` inside a meta tag. Falls back to UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);

    CHARSET_META_RE
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode HTML bytes leniently.
///
/// Invalid sequences become U+FFFD rather than errors. A leading BOM wins
/// over any meta declaration.
#[must_use]
pub fn decode_lossy(html: &[u8]) -> String {
    if let Some((bom_encoding, _)) = Encoding::for_bom(html) {
        let (decoded, _) = bom_encoding.decode_with_bom_removal(html);
        return decoded.into_owned();
    }

    let (decoded, _encoding_used, _had_errors) = detect_encoding(html).decode(html);
    decoded.into_owned()
}
