//! Parsed XML element tree
//!
//! Tags and attribute names of namespaced items are stored in Clark notation
//! (`{urn:hl7-org:v3}patientRole`), so the namespace travels with the name
//! and no prefix map is needed once the document is parsed.

use indexmap::IndexMap;

/// A single XML element
///
/// Elements are built once by the document loader and never mutated
/// afterwards. The builder-style methods exist for constructing trees in
/// code (mostly tests).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Tag name, `{uri}local` when the element is namespaced
    pub tag: String,

    /// Character data before the first child element
    pub text: Option<String>,

    /// Attribute name to value
    pub attributes: IndexMap<String, String>,

    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Creates an element with no text, attributes or children
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Sets the text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Adds an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Appends a child element
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Tag name without its namespace
    pub fn local_name(&self) -> &str {
        local_tag(&self.tag)
    }

    /// Namespace URI of the tag, if it is in Clark notation
    pub fn namespace(&self) -> Option<&str> {
        let rest = self.tag.strip_prefix('{')?;
        rest.find('}').map(|end| &rest[..end])
    }

    /// Trimmed text content, or `None` when the text is absent or blank
    pub fn usable_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Iterates over all descendants in document order, excluding `self`
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }
}

/// Pre-order iterator over the descendants of an element
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

/// Strips any namespace qualifier from a tag or attribute name
///
/// Keeps the text after the last `}` (Clark notation) and then after the last
/// `:` (a raw prefix). Applying it twice gives the same result as once.
///
/// ```
/// use cdaflat::domain::element::local_tag;
///
/// assert_eq!(local_tag("{urn:hl7-org:v3}patientRole"), "patientRole");
/// assert_eq!(local_tag("cda:id"), "id");
/// assert_eq!(local_tag("addr"), "addr");
/// ```
pub fn local_tag(tag: &str) -> &str {
    let after_brace = tag.rsplit('}').next().unwrap_or(tag);
    after_brace.rsplit(':').next().unwrap_or(after_brace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_tag_clark_notation() {
        assert_eq!(local_tag("{urn:hl7-org:v3}patientRole"), "patientRole");
        assert_eq!(
            local_tag("{http://www.w3.org/2001/XMLSchema-instance}type"),
            "type"
        );
    }

    #[test]
    fn test_local_tag_is_idempotent() {
        for tag in ["{urn:hl7-org:v3}patientRole", "sdtc:raceCode", "id", ""] {
            let once = local_tag(tag);
            assert_eq!(local_tag(once), once);
        }
    }

    #[test]
    fn test_namespace() {
        let element = Element::new("{urn:hl7-org:v3}addr");
        assert_eq!(element.namespace(), Some("urn:hl7-org:v3"));
        assert_eq!(element.local_name(), "addr");
        assert_eq!(Element::new("addr").namespace(), None);
    }

    #[test]
    fn test_usable_text() {
        assert_eq!(Element::new("a").with_text("  5 \n").usable_text(), Some("5"));
        assert_eq!(Element::new("a").with_text(" \n\t ").usable_text(), None);
        assert_eq!(Element::new("a").usable_text(), None);
    }

    #[test]
    fn test_descendants_document_order() {
        let tree = Element::new("root")
            .with_child(
                Element::new("a")
                    .with_child(Element::new("a1"))
                    .with_child(Element::new("a2")),
            )
            .with_child(Element::new("b"));

        let tags: Vec<&str> = tree.descendants().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["a", "a1", "a2", "b"]);
    }
}
