//! Batch driver over a directory of layout files.

mod common;

use std::sync::Arc;

use common::*;
use tablift::{
    discover_documents, run_batch, BatchConfig, ExportFormat, LayoutRouter, OutcomeStatus,
    TableExtractor, Telemetry, Workbook,
};

/// Four readable documents (one without tables) and one corrupt file.
fn seed(dir: &std::path::Path) {
    write_layout(dir, "a_grid.json", &document(vec![bordered_page()]));
    write_layout(dir, "b_aligned.json", &document(vec![borderless_page()]));
    write_layout(dir, "c_mixed.json", &document(vec![mixed_page(), prose_page()]));
    write_layout(dir, "d_prose.json", &document(vec![prose_page()]));
    std::fs::write(dir.join("e_corrupt.json"), b"%PDF-1.7 not a layout").unwrap();
    std::fs::write(dir.join("readme.txt"), b"ignored").unwrap();
}

#[tokio::test]
async fn one_corrupt_document_does_not_abort_the_batch() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    seed(input.path());

    let router = Arc::new(LayoutRouter::new());
    let paths = discover_documents(input.path(), &router).unwrap();
    assert_eq!(paths.len(), 5);

    let telemetry = Telemetry::disabled();
    let config = BatchConfig {
        workers: 2,
        format: ExportFormat::Json,
    };
    let report = run_batch(
        paths,
        output.path(),
        &config,
        Arc::new(TableExtractor::default()),
        router,
        &telemetry,
    )
    .await
    .unwrap();

    assert_eq!(report.outcomes.len(), 5);
    assert_eq!(report.succeeded(), 4);
    assert_eq!(report.failed(), 1);

    let failed: Vec<_> = report.outcomes.iter().filter(|o| !o.is_success()).collect();
    assert!(failed[0].path.ends_with("e_corrupt.json"));
    assert!(!failed[0].message.is_empty());

    let prose = report
        .outcomes
        .iter()
        .find(|o| o.path.ends_with("d_prose.json"))
        .unwrap();
    assert_eq!(prose.status, OutcomeStatus::NoTables);
    assert!(!output.path().join("d_prose_tables.json").exists());

    let summary = telemetry.summary();
    assert_eq!(summary.documents, 5);
    assert_eq!(summary.failures, 1);
    assert_eq!(summary.tables, 4);
}

#[tokio::test]
async fn exported_artifacts_hold_one_sheet_per_table() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    seed(input.path());

    let router = Arc::new(LayoutRouter::new());
    let paths = discover_documents(input.path(), &router).unwrap();
    let report = run_batch(
        paths,
        output.path(),
        &BatchConfig::default(),
        Arc::new(TableExtractor::default()),
        router,
        &Telemetry::disabled(),
    )
    .await
    .unwrap();

    let mixed = report
        .outcomes
        .iter()
        .find(|o| o.path.ends_with("c_mixed.json"))
        .unwrap();
    let OutcomeStatus::Exported { tables, artifact } = &mixed.status else {
        panic!("expected export, got {:?}", mixed.status);
    };
    assert_eq!(*tables, 2);
    assert!(artifact.ends_with("c_mixed_tables.json"));

    let workbook: Workbook = serde_json::from_slice(&std::fs::read(artifact).unwrap()).unwrap();
    let titles: Vec<&str> = workbook.sheets.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Table_1_Page_1", "Table_2_Page_1"]);
    assert!(workbook.sheets[0].has_borders);
}

#[tokio::test]
async fn markdown_batch_writes_md_files() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_layout(input.path(), "grid.json", &document(vec![bordered_page()]));

    let router = Arc::new(LayoutRouter::new());
    let paths = discover_documents(input.path(), &router).unwrap();
    let nested = output.path().join("nested/out");
    let config = BatchConfig {
        workers: 1,
        format: ExportFormat::Markdown,
    };
    let report = run_batch(
        paths,
        &nested,
        &config,
        Arc::new(TableExtractor::default()),
        router,
        &Telemetry::disabled(),
    )
    .await
    .unwrap();

    assert_eq!(report.succeeded(), 1);
    let md = std::fs::read_to_string(nested.join("grid_tables.md")).unwrap();
    assert!(md.contains("## Table_1_Page_1"));
    assert!(md.contains("| Name | Qty | Price |"));
}
