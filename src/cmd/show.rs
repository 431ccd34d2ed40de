use std::path::Path;

use anyhow::{Context, Result};

use tablift::{ExtractorConfig, LayoutRouter, MarkdownExporter, TableExtractor, Telemetry};

pub fn cmd_show(input: &Path, config: &ExtractorConfig, telemetry: &Telemetry) -> Result<()> {
    let tables = TableExtractor::new(config.clone())
        .extract_tables(input, &LayoutRouter::new(), telemetry)
        .with_context(|| format!("Failed to extract tables from {}", input.display()))?;

    if tables.is_empty() {
        eprintln!("ℹ️  No tables found in {}", input.display());
        return Ok(());
    }

    print!("{}", MarkdownExporter::render(&tables));
    for (i, table) in tables.iter().enumerate() {
        eprintln!(
            "   Table {}: page {}, {}x{}, {} (confidence {:.1})",
            i + 1,
            table.page + 1,
            table.row_count(),
            table.column_count(),
            if table.has_borders { "bordered" } else { "borderless" },
            table.confidence_score
        );
    }
    Ok(())
}
