//! End-to-end tests over a sample CDA document
//!
//! These tests run the print and load paths against
//! `tests/fixtures/minimal_cda.xml`, writing SQL scripts into temporary
//! directories.

use cdaflat::adapters::database::TableSink;
use cdaflat::adapters::postgresql::statements::TableOptions;
use cdaflat::adapters::script::ScriptSink;
use cdaflat::cli::commands::load::LoadArgs;
use cdaflat::cli::commands::{EXIT_CONFIG_ERROR, EXIT_FAILURE, EXIT_SUCCESS};
use cdaflat::core::document::load_document;
use cdaflat::core::extract::{extract_section, extract_sections, ExtractOptions};
use cdaflat::core::frame::TableFrame;
use cdaflat::core::render::{render_frame, render_record, NO_DATA};
use cdaflat::core::select::{NamespaceMap, Selector};
use cdaflat::core::transform::find_and_flatten;
use cdaflat::domain::{LoadError, Section};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/minimal_cda.xml");

fn load_options() -> ExtractOptions {
    ExtractOptions::default().with_document_prefix("")
}

fn write_config(dir: &Path, script_path: &Path) -> String {
    let config_path = dir.join("cdaflat.toml");
    let contents = format!(
        "database_target = \"script\"\n\n[script]\npath = \"{}\"\n",
        script_path.display()
    );
    fs::write(&config_path, contents).unwrap();
    config_path.to_string_lossy().to_string()
}

#[test]
fn test_print_sections_from_fixture() {
    let document = load_document(FIXTURE).unwrap();
    let records = extract_sections(&document, &ExtractOptions::default());

    let names: Vec<_> = records.iter().map(|r| r.section).collect();
    assert_eq!(names, Section::ALL.to_vec());

    let document_record = &records[0].record;
    assert_eq!(
        document_record.get("document/title"),
        Some("Continuity of Care Document")
    );
    assert_eq!(
        document_record.get("document/recordTarget/patientRole/id/@extension"),
        Some("123")
    );
    assert!(document_record.keys().all(|key| key.starts_with("document/")));

    let patient = &records[1].record;
    let keys: Vec<_> = patient.keys().collect();
    assert_eq!(
        keys,
        vec![
            "id/@extension",
            "id/@root",
            "addr",
            "addr/@use",
            "patient/name/given",
            "patient/name/family",
            "patient/administrativeGenderCode/@code",
            "patient/administrativeGenderCode/@codeSystem",
        ]
    );
    assert_eq!(patient.get("patient/name/family"), Some("O'Brien"));

    assert!(records[2].record.is_empty());
    assert_eq!(
        records[3].record.get("assignedAuthor/id/@extension"),
        Some("AUTH-9")
    );
    assert_eq!(
        records[4]
            .record
            .get("assignedCustodian/representedCustodianOrganization/name"),
        Some("Good Health Clinic")
    );
    assert_eq!(
        records[5].record.get("encompassingEncounter/effectiveTime/@value"),
        Some("20240314")
    );
    assert_eq!(
        records[6]
            .record
            .get("structuredBody/component/section/text"),
        Some("No known allergies")
    );
}

#[test]
fn test_render_record_output() {
    let document = load_document(FIXTURE).unwrap();
    let options = ExtractOptions::default();

    let custodian = extract_section(&document, Section::Custodian, &options);
    assert_eq!(
        render_record(&Section::Custodian.title(), &custodian),
        "\nCustodian Information:\nassignedCustodian/representedCustodianOrganization/name: Good Health Clinic\n"
    );

    let guardian = extract_section(&document, Section::Guardian, &options);
    let rendered = render_record(&Section::Guardian.title(), &guardian);
    assert!(rendered.contains(NO_DATA));
}

#[test]
fn test_custom_selector_on_fixture() {
    let document = load_document(FIXTURE).unwrap();
    let selector = Selector::parse(".//cda:section", &NamespaceMap::default()).unwrap();

    let record = find_and_flatten(document.root(), &selector);

    assert_eq!(record.len(), 2);
    assert_eq!(record.get("title"), Some("Allergies"));
}

#[test]
fn test_patient_frame_columns() {
    let document = load_document(FIXTURE).unwrap();
    let patient = extract_section(&document, Section::Patient, &load_options());

    let frame = TableFrame::from_record(Section::Patient.table_name(), &patient);

    assert_eq!(frame.table_name(), "PatientTable");
    assert_eq!(
        frame.column_names().collect::<Vec<_>>(),
        vec![
            "IdExtension",
            "IdRoot",
            "Addr",
            "AddrUse",
            "Namegiven",
            "Namefamily",
            "AdministrativegendercodeCode",
            "AdministrativegendercodeCodesystem",
        ]
    );
    assert_eq!(frame.get("Namefamily"), Some("O'Brien"));

    let rendered = render_frame(&Section::Patient.title(), &frame);
    assert!(rendered.starts_with("\nPatient Information DataFrame:\n"));
    assert!(rendered.contains("O'Brien"));
}

#[test]
fn test_missing_document_is_not_found() {
    let result = load_document("/nonexistent/document.xml");
    assert!(matches!(result, Err(LoadError::FileNotFound(_))));
}

#[tokio::test]
async fn test_script_sink_writes_fixture_tables() {
    let dir = TempDir::new().unwrap();
    let script_path = dir.path().join("load.sql");

    let document = load_document(FIXTURE).unwrap();
    let frames: Vec<_> = extract_sections(&document, &load_options())
        .into_iter()
        .map(|extracted| TableFrame::from_record(extracted.section.table_name(), &extracted.record))
        .collect();

    let sink = ScriptSink::new(Some(script_path.clone()), TableOptions::default());
    sink.test_connection().await.unwrap();
    let summary = sink.load_frames(&frames, false).await.unwrap();

    assert_eq!(summary.tables_created, 7);
    assert_eq!(summary.rows_inserted, 6, "guardian frame has no row");
    assert_eq!(summary.statements, 13);

    let script = fs::read_to_string(&script_path).unwrap();
    assert!(script.starts_with("BEGIN;\n"));
    assert!(script.ends_with("COMMIT;\n"));
    assert!(script.contains("CREATE TABLE \"GuardianTable\" ();"));
    assert!(!script.contains("INSERT INTO \"GuardianTable\""));
    assert!(script.contains("'O''Brien'"));
    assert!(script.contains(
        "INSERT INTO \"CustodianTable\" (\"Representedcustodianorganizationname\") VALUES ('Good Health Clinic');"
    ));
}

#[tokio::test]
async fn test_load_command_writes_script() {
    let dir = TempDir::new().unwrap();
    let script_path = dir.path().join("out.sql");
    let config_path = write_config(dir.path(), &script_path);

    let args = LoadArgs {
        file: Some(FIXTURE.to_string()),
        dry_run: false,
    };
    let code = args.execute(&config_path).await.unwrap();

    assert_eq!(code, EXIT_SUCCESS);
    let script = fs::read_to_string(&script_path).unwrap();
    assert!(script.contains("CREATE TABLE \"PatientTable\""));
    assert!(script.contains("\"IdExtension\" TEXT"));
}

#[tokio::test]
async fn test_load_command_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let script_path = dir.path().join("out.sql");
    let config_path = write_config(dir.path(), &script_path);

    let args = LoadArgs {
        file: Some(FIXTURE.to_string()),
        dry_run: true,
    };
    let code = args.execute(&config_path).await.unwrap();

    assert_eq!(code, EXIT_SUCCESS);
    assert!(!script_path.exists());
}

#[tokio::test]
async fn test_load_command_exit_codes() {
    let dir = TempDir::new().unwrap();
    let script_path = dir.path().join("out.sql");
    let config_path = write_config(dir.path(), &script_path);

    let missing_document = LoadArgs {
        file: Some(dir.path().join("missing.xml").to_string_lossy().to_string()),
        dry_run: false,
    };
    assert_eq!(missing_document.execute(&config_path).await.unwrap(), EXIT_FAILURE);

    let malformed = dir.path().join("bad.xml");
    fs::write(&malformed, "<ClinicalDocument><title></ClinicalDocument>").unwrap();
    let malformed_document = LoadArgs {
        file: Some(malformed.to_string_lossy().to_string()),
        dry_run: false,
    };
    assert_eq!(malformed_document.execute(&config_path).await.unwrap(), EXIT_FAILURE);

    let no_input = LoadArgs {
        file: None,
        dry_run: false,
    };
    assert_eq!(no_input.execute(&config_path).await.unwrap(), EXIT_CONFIG_ERROR);

    let missing_config = dir.path().join("absent.toml");
    let args = LoadArgs {
        file: Some(FIXTURE.to_string()),
        dry_run: false,
    };
    assert_eq!(
        args.execute(&missing_config.to_string_lossy()).await.unwrap(),
        EXIT_CONFIG_ERROR
    );

    assert!(!script_path.exists());
}
