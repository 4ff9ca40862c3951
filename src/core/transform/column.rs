//! Column name derivation
//!
//! Turns a flattened key such as `patientRole/id/@extension` into a short
//! identifier (`IdExtension`) usable as a table column.

/// Substrings removed from the joined path segments
const STRIPPED: [&str; 5] = ["attr_", "{", "}", "-", "_"];

/// Derive a column name from a slash-delimited path
///
/// Only the last two path segments are kept, each without its namespace
/// prefix. They are concatenated, stripped of `attr_`, `{`, `}`, `-` and `_`,
/// titlecased, and finally the `@` attribute marker is dropped. Distinct
/// paths may map to the same column.
///
/// # Examples
///
/// ```
/// use cdaflat::core::transform::column::derive_column_name;
///
/// assert_eq!(derive_column_name("cda:patientRole/cda:id/@extension"), "IdExtension");
/// assert_eq!(derive_column_name("addr/streetAddressLine"), "Addrstreetaddressline");
/// assert_eq!(derive_column_name(""), "");
/// ```
pub fn derive_column_name(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    let tail = &segments[segments.len().saturating_sub(2)..];

    let mut joined: String = tail
        .iter()
        .map(|segment| segment.rsplit(':').next().unwrap_or(segment))
        .collect();

    for pattern in STRIPPED {
        joined = joined.replace(pattern, "");
    }

    titlecase(&joined).replace('@', "")
}

/// Uppercase letters that start a word, lowercase the rest
///
/// A word starts at the beginning of the string or after any non-alphabetic
/// character, so `id@extension` becomes `Id@Extension`.
fn titlecase(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut in_word = false;

    for ch in input.chars() {
        if ch.is_alphabetic() {
            if in_word {
                output.extend(ch.to_lowercase());
            } else {
                output.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            output.push(ch);
            in_word = false;
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced_attribute_path() {
        assert_eq!(
            derive_column_name("cda:patientRole/cda:id/@extension"),
            "IdExtension"
        );
    }

    #[test]
    fn test_keeps_last_two_segments() {
        assert_eq!(
            derive_column_name("patientRole/patient/name/given"),
            "Namegiven"
        );
        assert_eq!(derive_column_name("title"), "Title");
    }

    #[test]
    fn test_strips_separators_and_legacy_marker() {
        assert_eq!(derive_column_name("id_attr_root"), "Idroot");
        assert_eq!(derive_column_name("cda:code/code-system"), "Codecodesystem");
        assert_eq!(derive_column_name("{code}"), "Code");
    }

    #[test]
    fn test_titlecase_after_digits() {
        assert_eq!(titlecase("v3abc"), "V3Abc");
        assert_eq!(titlecase("ABC def"), "Abc Def");
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(derive_column_name(""), "");
        assert_eq!(derive_column_name("/"), "");
    }
}
