//! Publication date extraction.
//!
//! Strategies, in order:
//! 1. a `<time datetime="...">` attribute, cut before the time component
//! 2. the text of a `<time>` element
//! 3. the text of an element whose class signals a date
//!
//! Free text is normalized with [`normalize_text_date`]. By default only the
//! year survives (`YYYY-01-01`); see [`Options::precise_text_dates`].

use chrono::NaiveDate;
use dom_query::Selection;

use crate::dom;
use crate::options::Options;
use crate::patterns::{DATE_KEYWORDS, YEAR_TOKEN};

/// Formats tried when precise text dates are enabled.
const TEXT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y", // January 15, 2024
    "%b %d, %Y", // Jan 15, 2024
    "%d %B %Y",  // 15 January 2024
    "%d/%m/%Y",
];

/// Extract the publication date of a container as `YYYY-MM-DD`, or empty.
#[must_use]
pub fn extract(container: &Selection<'_>, opts: &Options) -> String {
    let times = dom::elements(container, "time");

    if let Some(time) = times.iter().find(|t| dom::has_value(t, "datetime")) {
        return date_portion(&dom::attr(time, "datetime"));
    }

    let from_time_text = times
        .iter()
        .map(dom::collapsed_text)
        .filter(|text| !text.is_empty())
        .map(|text| normalize_text_date(&text, opts.precise_text_dates))
        .find(|date| !date.is_empty());
    if let Some(date) = from_time_text {
        return date;
    }

    dom::elements(container, "[class]")
        .iter()
        .filter(|el| dom::class_signals(el, DATE_KEYWORDS))
        .map(dom::collapsed_text)
        .filter(|text| !text.is_empty())
        .map(|text| normalize_text_date(&text, opts.precise_text_dates))
        .find(|date| !date.is_empty())
        .unwrap_or_default()
}

/// Date part of a machine-readable datetime (`2024-05-01T10:00Z` → `2024-05-01`).
fn date_portion(datetime: &str) -> String {
    datetime
        .split(['T', ' '])
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Normalize a human-written date.
///
/// With `precise` set, common full-date formats are parsed first. Otherwise,
/// or when none match, a 2020s year token maps to `YYYY-01-01`. No signal
/// yields an empty string.
#[must_use]
pub fn normalize_text_date(text: &str, precise: bool) -> String {
    let text = text.trim();

    if precise {
        let parsed = TEXT_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok());
        if let Some(date) = parsed {
            return date.format("%Y-%m-%d").to_string();
        }
    }

    YEAR_TOKEN
        .find(text)
        .map(|year| format!("{}-01-01", year.as_str()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date_of(html: &str, opts: &Options) -> String {
        let doc = dom::parse(html);
        extract(&doc.select("div.card"), opts)
    }

    #[test]
    fn datetime_attribute_wins() {
        let html = r#"<div class="card"><span class="date">2021</span><time datetime="2024-03-09T08:00:00+01:00">March 9</time></div>"#;
        assert_eq!(date_of(html, &Options::default()), "2024-03-09");
    }

    #[test]
    fn time_text_is_lossy_by_default() {
        let html = r#"<div class="card"><time>March 9, 2024</time></div>"#;
        assert_eq!(date_of(html, &Options::default()), "2024-01-01");
    }

    #[test]
    fn precise_mode_keeps_month_and_day() {
        let opts = Options {
            precise_text_dates: true,
            ..Options::default()
        };
        let html = r#"<div class="card"><time>March 9, 2024</time></div>"#;
        assert_eq!(date_of(html, &opts), "2024-03-09");
        assert_eq!(normalize_text_date("Posted 2023", true), "2023-01-01");
    }

    #[test]
    fn date_class_fallback() {
        let html = r#"<div class="card"><span class="post-date">Updated in 2025</span></div>"#;
        assert_eq!(date_of(html, &Options::default()), "2025-01-01");
    }

    #[test]
    fn no_signal_is_empty() {
        let html = r#"<div class="card"><span class="published">yesterday</span></div>"#;
        assert_eq!(date_of(html, &Options::default()), "");
        assert_eq!(normalize_text_date("in 1999", false), "");
    }
}
