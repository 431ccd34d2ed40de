use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use tablift::{
    discover_documents, run_batch, AppConfig, LayoutRouter, OutcomeStatus, TableExtractor,
    Telemetry,
};

pub async fn cmd_batch(
    input_dir: &Path,
    output_dir: &Path,
    config: &AppConfig,
    telemetry: &Telemetry,
) -> Result<()> {
    if !input_dir.is_dir() {
        anyhow::bail!("Input is not a directory: {}", input_dir.display());
    }

    let router = Arc::new(LayoutRouter::new());
    let paths = discover_documents(input_dir, &router)
        .with_context(|| format!("Failed to list {}", input_dir.display()))?;
    if paths.is_empty() {
        eprintln!("ℹ️  No supported documents in {}", input_dir.display());
        return Ok(());
    }

    eprintln!(
        "📦 Batch extracting {} documents (concurrency: {})",
        paths.len(),
        config.batch.workers.max(1)
    );

    let extractor = Arc::new(TableExtractor::new(config.extractor.clone()));
    let report = run_batch(paths, output_dir, &config.batch, extractor, router, telemetry)
        .await
        .with_context(|| format!("Failed to prepare {}", output_dir.display()))?;

    for outcome in &report.outcomes {
        let marker = match outcome.status {
            OutcomeStatus::Exported { .. } => "✅",
            OutcomeStatus::NoTables => "ℹ️ ",
            OutcomeStatus::Failed => "❌",
        };
        println!("{marker} {} - {}", outcome.path.display(), outcome.message);
    }

    let summary = telemetry.summary();
    eprintln!(
        "\n📦 Batch complete: {}/{} succeeded, {} tables, {:.0}ms",
        report.succeeded(),
        report.outcomes.len(),
        summary.tables,
        report.elapsed.as_secs_f64() * 1000.0
    );

    Ok(())
}
