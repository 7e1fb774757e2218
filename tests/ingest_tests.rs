//! Integration tests for upload ingestion and artefact storage

mod common;

use common::*;
use court_list_ingest::config::{CONFIG_FILENAME, IngestConfig};
use court_list_ingest::convert::{ConversionError, ErrorMode};
use court_list_ingest::ingest::{IngestError, ListIngestor, Upload};
use court_list_ingest::list_types::{
    care_standards_tribunal, london_administrative_court, rcj_standard,
};
use court_list_ingest::registry::RegistryError;
use court_list_ingest::storage::FileSystemArtefactStore;
use serde_json::{Value, json};
use tempfile::tempdir;

fn ingestor() -> ListIngestor {
    ListIngestor::from_config(&IngestConfig::default()).unwrap()
}

#[test]
fn test_spreadsheet_upload_is_converted_and_checked() {
    let upload = Upload::new(
        rcj_standard::LIST_TYPE_ID,
        "cause-list.xlsx",
        single_sheet(&[RCJ_HEADERS, RCJ_ROW]),
    );

    let outcome = ingestor().ingest(&upload).unwrap();

    assert!(outcome.is_valid());
    assert_eq!(outcome.list_type_id, rcj_standard::LIST_TYPE_ID);
    assert_eq!(outcome.payload[0]["judge"], "Mr Justice Smith");
    assert!(outcome.artefact.is_none());
}

#[test]
fn test_spreadsheet_conversion_error_is_returned() {
    let row: &[&str] = &["02/01/2025", "", "1 day", "Final", "Remote", ""];
    let upload = Upload::new(
        care_standards_tribunal::LIST_TYPE_ID,
        "weekly.xlsx",
        single_sheet(&[TRIBUNAL_HEADERS, row]),
    );
    let err = ingestor().ingest(&upload).unwrap_err();
    assert!(matches!(
        err,
        IngestError::Registry(RegistryError::Conversion(ConversionError::RequiredField {
            row: 1,
            ..
        }))
    ));
}

#[test]
fn test_json_upload_invalid_is_not_an_error() {
    let payload = json!({ "mainHearings": [{ "venue": "Court 1" }] });
    let upload = Upload::new(
        london_administrative_court::LIST_TYPE_ID,
        "list.json",
        serde_json::to_vec(&payload).unwrap(),
    );

    let outcome = ingestor().ingest(&upload).unwrap();

    assert!(!outcome.is_valid());
    assert!(!outcome.validation.errors.is_empty());
    assert!(
        outcome
            .validation
            .errors
            .iter()
            .any(|e| e.starts_with("mainHearings.0.judge: "))
    );
    assert_eq!(outcome.payload, payload);
}

#[test]
fn test_upload_size_limit_from_config() {
    let mut config = IngestConfig::default();
    config.upload.max_upload_bytes = 10;
    let ingestor = ListIngestor::from_config(&config).unwrap();

    let upload = Upload::new(rcj_standard::LIST_TYPE_ID, "list.json", vec![b' '; 11]);
    assert!(matches!(
        ingestor.ingest(&upload),
        Err(IngestError::TooLarge { size: 11, max: 10 })
    ));
}

#[test]
fn test_error_mode_from_config() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILENAME),
        "[conversion]\nerror_mode = \"collect-all\"\n",
    )
    .unwrap();
    let config = IngestConfig::load(dir.path()).unwrap();
    assert_eq!(config.conversion.error_mode, ErrorMode::CollectAll);

    let bad_row: &[&str] = &["2025-01-02", "", "1 day", "Final", "Remote", ""];
    let upload = Upload::new(
        care_standards_tribunal::LIST_TYPE_ID,
        "weekly.xlsx",
        single_sheet(&[TRIBUNAL_HEADERS, bad_row]),
    );
    let err = ListIngestor::from_config(&config)
        .unwrap()
        .ingest(&upload)
        .unwrap_err();
    match err {
        IngestError::Registry(RegistryError::Conversion(ConversionError::Multiple(errors))) => {
            assert_eq!(errors.len(), 2)
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_ingest_and_store_writes_upload_and_json() {
    let dir = tempdir().unwrap();
    let store = FileSystemArtefactStore::new(dir.path().join("uploads"));
    let content = single_sheet(&[TRIBUNAL_HEADERS, TRIBUNAL_ROW]);
    let upload = Upload::new(
        care_standards_tribunal::LIST_TYPE_ID,
        "Weekly List.XLSX",
        content.clone(),
    );

    let outcome = ingestor().ingest_and_store(&upload, &store).unwrap();

    let artefact = outcome.artefact.expect("valid list is stored");
    let upload_artefact = outcome.upload_artefact.expect("upload is stored");
    let id = artefact.artefact_id;
    assert_eq!(upload_artefact.artefact_id, id);

    let stored_json: Value =
        serde_json::from_slice(&std::fs::read(&artefact.path).unwrap()).unwrap();
    assert_eq!(stored_json, outcome.payload);
    assert_eq!(
        upload_artefact.path,
        dir.path().join("uploads").join(format!("{id}.upload.xlsx"))
    );
    assert_eq!(std::fs::read(&upload_artefact.path).unwrap(), content);
}

#[test]
fn test_ingest_and_store_keeps_raw_json_upload() {
    let dir = tempdir().unwrap();
    let store = FileSystemArtefactStore::new(dir.path());
    let raw = serde_json::to_vec(&json!([{
        "venue": "Court 1",
        "judge": "Mr Justice Smith",
        "time": "10:30am",
        "caseNumber": "KB-1",
        "caseDetails": "A v B",
        "hearingType": "Trial"
    }]))
    .unwrap();
    let upload = Upload::new(rcj_standard::LIST_TYPE_ID, "list.json", raw.clone());

    let outcome = ingestor().ingest_and_store(&upload, &store).unwrap();

    let artefact = outcome.artefact.expect("valid list is stored");
    let upload_artefact = outcome.upload_artefact.expect("upload is stored");
    assert_ne!(artefact.path, upload_artefact.path);
    assert_eq!(std::fs::read(&upload_artefact.path).unwrap(), raw);
    assert_ne!(artefact.checksum, upload_artefact.checksum);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn test_invalid_list_is_not_stored() {
    let dir = tempdir().unwrap();
    let store = FileSystemArtefactStore::new(dir.path());
    let upload = Upload::new(rcj_standard::LIST_TYPE_ID, "list.json", b"[]".to_vec());

    let outcome = ingestor().ingest_and_store(&upload, &store).unwrap();

    assert!(!outcome.is_valid());
    assert!(outcome.artefact.is_none());
    assert!(outcome.upload_artefact.is_none());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
