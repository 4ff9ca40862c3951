//! Property-style tests for flattening and column naming

use cdaflat::core::document::parse_document;
use cdaflat::core::select::{NamespaceMap, Selector};
use cdaflat::core::transform::{derive_column_name, find_and_flatten, flatten};
use cdaflat::domain::{local_tag, Element};
use test_case::test_case;

#[test_case(""; "empty prefix")]
#[test_case("document/"; "document prefix")]
#[test_case("a/b/c/"; "deep prefix")]
fn test_childless_element_flattens_to_empty(prefix: &str) {
    let leaf = Element::new("{urn:hl7-org:v3}id")
        .with_text("ignored")
        .with_attribute("extension", "123");
    assert!(flatten(&leaf, prefix).is_empty());
}

#[test_case("{urn:hl7-org:v3}patientRole", "patientRole"; "clark notation")]
#[test_case("cda:patientRole", "patientRole"; "prefixed")]
#[test_case("patientRole", "patientRole"; "plain")]
#[test_case("{urn:a}x:y", "y"; "clark then prefix")]
#[test_case("", ""; "empty")]
fn test_local_tag(tag: &str, expected: &str) {
    assert_eq!(local_tag(tag), expected);
    assert_eq!(local_tag(local_tag(tag)), expected);
}

#[test_case("cda:patientRole/cda:id/@extension", "IdExtension"; "namespaced attribute")]
#[test_case("id/@root", "IdRoot"; "attribute")]
#[test_case("addr", "Addr"; "single segment")]
#[test_case("patient/name/given", "Namegiven"; "last two segments")]
#[test_case("effectiveTime/@value", "EffectivetimeValue"; "camel case is flattened")]
#[test_case("code_attr_codeSystem", "Codecodesystem"; "legacy attribute marker")]
#[test_case("", ""; "empty path")]
fn test_derive_column_name(path: &str, expected: &str) {
    assert_eq!(derive_column_name(path), expected);
}

#[test]
fn test_text_children_map_to_trimmed_values() {
    let root = Element::new("root")
        .with_child(Element::new("{urn:hl7-org:v3}given").with_text("  Ann\n"))
        .with_child(Element::new("family").with_text("Smith"));

    let record = flatten(&root, "p/");

    let entries: Vec<_> = record.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    assert_eq!(entries, vec![("p/given", "Ann"), ("p/family", "Smith")]);
}

#[test]
fn test_text_and_attributes_both_contribute() {
    let root = Element::new("substanceAdministration").with_child(
        Element::new("doseQuantity")
            .with_text("5")
            .with_attribute("unit", "mg"),
    );

    let record = flatten(&root, "");

    assert_eq!(record.len(), 2);
    assert_eq!(record.get("doseQuantity"), Some("5"));
    assert_eq!(record.get("doseQuantity/@unit"), Some("mg"));
}

#[test]
fn test_colliding_keys_last_wins_in_first_position() {
    let root = Element::new("root")
        .with_child(Element::new("id").with_text("first"))
        .with_child(Element::new("code").with_text("c"))
        .with_child(Element::new("id").with_text("second"));

    let record = flatten(&root, "");

    assert_eq!(record.len(), 2);
    assert_eq!(record.get("id"), Some("second"));
    assert_eq!(record.keys().collect::<Vec<_>>(), vec!["id", "code"]);
}

#[test]
fn test_every_leaf_and_attribute_contributes_once() {
    let document = parse_document(
        r#"<ClinicalDocument xmlns="urn:hl7-org:v3">
             <code code="34133-9" codeSystem="2.16.840.1.113883.6.1"/>
             <title>Summary</title>
             <participant typeCode="IND">
               <time value="2024"/>
               <associatedEntity><name>Bob</name></associatedEntity>
             </participant>
           </ClinicalDocument>"#,
    )
    .unwrap();

    let record = flatten(document.root(), "");

    assert_eq!(record.len(), 6);
    assert_eq!(record.get("code/@code"), Some("34133-9"));
    assert_eq!(record.get("code/@codeSystem"), Some("2.16.840.1.113883.6.1"));
    assert_eq!(record.get("title"), Some("Summary"));
    assert_eq!(record.get("participant/@typeCode"), Some("IND"));
    assert_eq!(record.get("participant/time/@value"), Some("2024"));
    assert_eq!(record.get("participant/associatedEntity/name"), Some("Bob"));
}

#[test]
fn test_missing_guardian_yields_empty_record() {
    let document = parse_document(
        r#"<ClinicalDocument xmlns="urn:hl7-org:v3"><recordTarget><patientRole/></recordTarget></ClinicalDocument>"#,
    )
    .unwrap();

    let selector = Selector::parse(".//cda:guardian", &NamespaceMap::default()).unwrap();
    assert!(find_and_flatten(document.root(), &selector).is_empty());
}
