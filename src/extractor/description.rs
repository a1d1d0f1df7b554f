//! Description ("body") extraction.

use dom_query::Selection;

use crate::dom;
use crate::options::Options;
use crate::patterns::{self, EXCERPT_KEYWORDS};

/// Extract a short description, at most `opts.max_description_chars` chars.
///
/// An excerpt/summary/description-classed element wins. Otherwise the
/// container's non-empty lines are joined with spaces, dropping the first
/// line (usually the title) when there is more than one.
#[must_use]
pub fn extract(container: &Selection<'_>, opts: &Options) -> String {
    let excerpt = dom::find_first(container, "[class]", |el| dom::class_signals(el, EXCERPT_KEYWORDS))
        .map(|el| dom::collapsed_text(&el))
        .filter(|text| !text.is_empty());

    let text = excerpt.unwrap_or_else(|| body_text(container));
    patterns::truncate_chars(&text, opts.max_description_chars)
}

fn body_text(container: &Selection<'_>) -> String {
    let text = container.text();
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let body = if lines.len() > 1 { &lines[1..] } else { &lines[..] };
    patterns::collapse_whitespace(&body.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_element_wins() {
        let doc = dom::parse(
            r#"<div><h2>Title</h2><p class="entry-summary">  The   summary. </p><p>Other</p></div>"#,
        );
        assert_eq!(extract(&doc.select("div"), &Options::default()), "The summary.");
    }

    #[test]
    fn first_line_is_dropped() {
        let doc = dom::parse("<div>\n<h2>Title</h2>\n<p>Line one</p>\n\n<p>Line two</p>\n</div>");
        assert_eq!(extract(&doc.select("div"), &Options::default()), "Line one Line two");
    }

    #[test]
    fn single_line_is_kept() {
        let doc = dom::parse("<div><span>Only</span> <span>line</span></div>");
        assert_eq!(extract(&doc.select("div"), &Options::default()), "Only line");
    }

    #[test]
    fn truncates_by_characters() {
        let body = "é".repeat(500);
        let doc = dom::parse(&format!("<div><p class=\"excerpt\">{body}</p></div>"));
        let description = extract(&doc.select("div"), &Options::default());
        assert_eq!(description.chars().count(), 400);
    }
}
