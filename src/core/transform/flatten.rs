//! Element tree flattening
//!
//! This module converts a nested element tree into a single-level
//! [`FlatRecord`]:
//!
//! - `<addr>1 Main St</addr>` → `"addr": "1 Main St"`
//! - `<name><given>Ann</given></name>` → `"name/given": "Ann"`
//! - `<id extension="123"/>` → `"id/@extension": "123"`

use crate::core::select::Selector;
use crate::domain::{local_tag, Element, FlatRecord};

/// Marker placed between an element key and an attribute name
pub const ATTRIBUTE_MARKER: &str = "/@";

/// Flatten the children of `element` into a record
///
/// For each child, in document order:
///
/// 1. The key is `prefix` followed by the child's local tag name.
/// 2. A child with non-blank text contributes `key → trimmed text`.
/// 3. A child without usable text is flattened recursively with the prefix
///    `key/`.
/// 4. Every attribute of the child contributes `key/@name → value`,
///    whether or not the child had text.
///
/// When two paths produce the same key, the later one wins.
///
/// # Examples
///
/// ```
/// use cdaflat::core::transform::flatten::flatten;
/// use cdaflat::domain::Element;
///
/// let dose = Element::new("substanceAdministration").with_child(
///     Element::new("doseQuantity").with_text("5").with_attribute("unit", "mg"),
/// );
///
/// let record = flatten(&dose, "");
/// assert_eq!(record.get("doseQuantity"), Some("5"));
/// assert_eq!(record.get("doseQuantity/@unit"), Some("mg"));
/// ```
pub fn flatten(element: &Element, prefix: &str) -> FlatRecord {
    let mut record = FlatRecord::new();
    flatten_into(element, prefix, &mut record);
    record
}

/// Flatten an optional element, yielding an empty record for `None`
pub fn flatten_optional(element: Option<&Element>, prefix: &str) -> FlatRecord {
    element
        .map(|element| flatten(element, prefix))
        .unwrap_or_default()
}

/// Flatten the first element matched by `selector`
///
/// Returns an empty record when nothing matches.
pub fn find_and_flatten(root: &Element, selector: &Selector) -> FlatRecord {
    let found = selector.find_first(root);
    if found.is_none() {
        tracing::debug!(selector = %selector.expression(), "No element matched selector");
    }
    flatten_optional(found, "")
}

/// Build the key for an attribute of the element at `key`
pub fn attribute_key(key: &str, attribute: &str) -> String {
    format!("{key}{ATTRIBUTE_MARKER}{}", local_tag(attribute))
}

fn flatten_into(element: &Element, prefix: &str, record: &mut FlatRecord) {
    for child in &element.children {
        let key = format!("{prefix}{}", child.local_name());

        match child.usable_text() {
            Some(text) => {
                record.insert(key.as_str(), text);
            }
            None => flatten_into(child, &format!("{key}/"), record),
        }

        for (name, value) in &child.attributes {
            record.insert(attribute_key(&key, name), value.as_str());
        }
    }
}
