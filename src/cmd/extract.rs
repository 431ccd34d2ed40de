use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use tablift::export::output_path;
use tablift::{ExportFormat, ExtractorConfig, LayoutRouter, TableExtractor, Telemetry};

pub async fn cmd_extract(
    input: &Path,
    output_dir: &Path,
    config: &ExtractorConfig,
    format: ExportFormat,
    telemetry: &Telemetry,
) -> Result<()> {
    eprintln!("📄 Extracting: {}", input.display());

    let extractor = Arc::new(TableExtractor::new(config.clone()));
    let router = Arc::new(LayoutRouter::new());
    let path = input.to_path_buf();
    let worker_telemetry = telemetry.clone();

    // Loading and inference are synchronous; keep them off the runtime threads
    let tables = tokio::task::spawn_blocking(move || {
        extractor.extract_tables(&path, &router, &worker_telemetry)
    })
    .await
    .context("Extraction task failed")?
    .with_context(|| format!("Failed to extract tables from {}", input.display()))?;

    if tables.is_empty() {
        eprintln!("ℹ️  No tables found");
        return Ok(());
    }

    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let artifact = output_path(input, output_dir, format);
    format
        .exporter()
        .export(&tables, &artifact)
        .with_context(|| format!("Failed to write {}", artifact.display()))?;

    let bordered = tables.iter().filter(|t| t.has_borders).count();
    eprintln!(
        "✅ {} tables ({} bordered, {} borderless)",
        tables.len(),
        bordered,
        tables.len() - bordered
    );
    println!("💾 Saved {}", artifact.display());

    Ok(())
}
