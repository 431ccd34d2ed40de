//! Multi-document extraction over a bounded worker pool.
//!
//! Each document is one unit of work: load, extract, export. Units share
//! nothing but the read-only extractor and router; at most
//! [`BatchConfig::workers`] run at once, each on the blocking pool since
//! loading and inference are synchronous. A unit always yields a
//! [`DocumentOutcome`], so one failure never aborts its siblings.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::config::BatchConfig;
use crate::error::Result;
use crate::export::{output_path, ExportFormat};
use crate::layout::LayoutRouter;
use crate::table::TableExtractor;
use crate::telemetry::Telemetry;

/// How a document's unit of work ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Tables were found and written to `artifact`.
    Exported { tables: usize, artifact: PathBuf },
    /// The document was readable but held no tables.
    NoTables,
    Failed,
}

/// Per-document result reported by the batch driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: OutcomeStatus,
    pub message: String,
}

impl DocumentOutcome {
    fn failed(path: &Path, message: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            status: OutcomeStatus::Failed,
            message: message.into(),
        }
    }

    /// Exported and no-table documents both count as successes.
    pub fn is_success(&self) -> bool {
        !matches!(self.status, OutcomeStatus::Failed)
    }
}

/// Everything a batch run produced, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<DocumentOutcome>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Extract the tables of one document and export them to `output_dir`.
///
/// Never fails: load and export errors become a [`OutcomeStatus::Failed`]
/// outcome. Nothing is written when no table is found.
pub fn process_document(
    path: &Path,
    output_dir: &Path,
    extractor: &TableExtractor,
    router: &LayoutRouter,
    format: ExportFormat,
    telemetry: &Telemetry,
) -> DocumentOutcome {
    telemetry.record_document();
    let outcome = match extractor.extract_tables(path, router, telemetry) {
        Err(e) => DocumentOutcome::failed(path, e.to_string()),
        Ok(tables) if tables.is_empty() => DocumentOutcome {
            path: path.to_path_buf(),
            status: OutcomeStatus::NoTables,
            message: "no tables found".to_string(),
        },
        Ok(tables) => {
            let artifact = output_path(path, output_dir, format);
            match format.exporter().export(&tables, &artifact) {
                Ok(()) => DocumentOutcome {
                    path: path.to_path_buf(),
                    message: format!("{} tables -> {}", tables.len(), artifact.display()),
                    status: OutcomeStatus::Exported {
                        tables: tables.len(),
                        artifact,
                    },
                },
                Err(e) => DocumentOutcome::failed(path, e.to_string()),
            }
        }
    };

    telemetry.in_scope(|| match &outcome.status {
        OutcomeStatus::Failed => {
            telemetry.record_failure();
            error!("Failed {}: {}", path.display(), outcome.message);
        }
        OutcomeStatus::NoTables => info!("No tables in {}", path.display()),
        OutcomeStatus::Exported { .. } => info!("{}: {}", path.display(), outcome.message),
    });
    outcome
}

/// Files directly inside `dir` that `router` can load, sorted by path.
pub fn discover_documents(dir: &Path, router: &LayoutRouter) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && router.supports(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Process `paths` concurrently and collect every outcome.
///
/// # Errors
///
/// Fails only when `output_dir` cannot be created.
pub async fn run_batch(
    paths: Vec<PathBuf>,
    output_dir: &Path,
    config: &BatchConfig,
    extractor: Arc<TableExtractor>,
    router: Arc<LayoutRouter>,
    telemetry: &Telemetry,
) -> Result<BatchReport> {
    let start = Instant::now();
    tokio::fs::create_dir_all(output_dir).await?;

    let workers = config.workers.max(1);
    telemetry.in_scope(|| {
        info!(
            "Batch of {} documents (workers: {workers}, format: {})",
            paths.len(),
            config.format
        );
    });

    let semaphore = Arc::new(Semaphore::new(workers));
    let output_dir = Arc::new(output_dir.to_path_buf());
    let format = config.format;
    let mut handles = Vec::with_capacity(paths.len());

    for path in &paths {
        let sem = Arc::clone(&semaphore);
        let extractor = Arc::clone(&extractor);
        let router = Arc::clone(&router);
        let output_dir = Arc::clone(&output_dir);
        let telemetry = telemetry.clone();
        let path = path.clone();

        handles.push(tokio::spawn(async move {
            let Ok(_permit) = sem.acquire_owned().await else {
                return DocumentOutcome::failed(&path, "worker pool closed");
            };
            let unit_path = path.clone();
            let unit_telemetry = telemetry.clone();
            let unit = tokio::task::spawn_blocking(move || {
                process_document(
                    &unit_path,
                    &output_dir,
                    &extractor,
                    &router,
                    format,
                    &unit_telemetry,
                )
            });
            match unit.await {
                Ok(outcome) => outcome,
                Err(e) => lost_unit(&path, format!("worker panicked: {e}"), &telemetry),
            }
        }));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for (path, joined) in paths.iter().zip(futures::future::join_all(handles).await) {
        outcomes.push(
            joined.unwrap_or_else(|e| lost_unit(path, format!("task failed: {e}"), telemetry)),
        );
    }

    let report = BatchReport {
        outcomes,
        elapsed: start.elapsed(),
    };
    telemetry.in_scope(|| {
        if report.failed() > 0 {
            warn!(
                "Batch complete: {}/{} succeeded",
                report.succeeded(),
                report.outcomes.len()
            );
        } else {
            info!("Batch complete: {} documents", report.outcomes.len());
        }
    });
    Ok(report)
}

/// Outcome for a unit that died before `process_document` could report.
fn lost_unit(path: &Path, reason: String, telemetry: &Telemetry) -> DocumentOutcome {
    telemetry.record_failure();
    telemetry.in_scope(|| error!("Failed {}: {reason}", path.display()));
    DocumentOutcome::failed(path, reason)
}
