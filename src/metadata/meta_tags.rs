//! HTML meta tag extraction.

use dom_query::Document;

use super::PageMetadata;
use crate::dom;

/// Fill the description from meta tags.
///
/// `<meta name="description">` wins over `og:description` regardless of
/// document order. Names are compared case-insensitively and blank content
/// is ignored.
#[must_use]
pub fn examine_meta(doc: &Document, original: PageMetadata) -> PageMetadata {
    let mut result = original;
    if result.description.is_some() {
        return result;
    }

    let mut named = None;
    let mut open_graph = None;

    for meta in dom::document_elements(doc, "meta") {
        let name = dom::get_attribute(&meta, "name")
            .or_else(|| dom::get_attribute(&meta, "property"))
            .unwrap_or_default()
            .to_lowercase();

        let content = dom::attr(&meta, "content");
        if name.is_empty() || content.is_empty() {
            continue;
        }

        match name.as_str() {
            "description" if named.is_none() => named = Some(content),
            "og:description" if open_graph.is_none() => open_graph = Some(content),
            _ => {}
        }
    }

    result.description = named.or(open_graph);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_description_wins() {
        let doc = dom::parse(
            r#"<head>
                <meta property="og:description" content="From Open Graph">
                <meta name="Description" content="From meta">
            </head>"#,
        );
        let metadata = examine_meta(&doc, PageMetadata::default());
        assert_eq!(metadata.description.as_deref(), Some("From meta"));
    }

    #[test]
    fn test_open_graph_fallback() {
        let doc = dom::parse(
            r#"<head><meta name="description" content="  "><meta property="og:description" content="OG only"></head>"#,
        );
        let metadata = examine_meta(&doc, PageMetadata::default());
        assert_eq!(metadata.description.as_deref(), Some("OG only"));
    }

    #[test]
    fn test_existing_description_kept() {
        let doc = dom::parse(r#"<head><meta name="description" content="New"></head>"#);
        let original = PageMetadata {
            description: Some("Existing".to_string()),
            ..PageMetadata::default()
        };
        assert_eq!(examine_meta(&doc, original).description.as_deref(), Some("Existing"));
    }
}
