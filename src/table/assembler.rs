//! Page- and document-level table assembly.
//!
//! [`TableAssembler`] drives the inference passes over one page:
//! bordered regions first, in discovery order, then a single borderless
//! candidate over every block no region claimed. [`TableExtractor`] runs it
//! over each page of a document and reports through a [`Telemetry`] handle.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use super::{
    BorderedRegionDetector, Cell, CellAssigner, ColumnInferer, LineClassifier, RowClusterer,
    Table, TextBlock, TextBlockAssembler,
};
use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::geometry::Rect;
use crate::layout::{DocumentLayout, LayoutRouter, PageLayout};
use crate::telemetry::Telemetry;

/// Rows and their column boundaries, ready for cell assignment.
struct Grid<'a> {
    rows: Vec<Vec<&'a TextBlock>>,
    boundaries: Vec<f64>,
}

/// Runs the inference passes over a single page.
#[derive(Debug, Clone, Default)]
pub struct TableAssembler {
    config: ExtractorConfig,
}

impl TableAssembler {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Tables on one page: bordered tables in region order, then at most one
    /// borderless table.
    ///
    /// Logs to whatever subscriber is current; callers going through
    /// [`TableExtractor`] get the [`Telemetry`] scope set up for them.
    pub fn assemble_page(&self, page_index: usize, page: &PageLayout) -> Vec<Table> {
        let cfg = &self.config;
        let lines = LineClassifier::new(cfg.line_margin).classify(&page.lines);
        let blocks = TextBlockAssembler::new(cfg.line_margin, cfg.adjacency).assemble(
            page_index,
            &page.blocks,
            &lines,
        );
        let regions = BorderedRegionDetector::new(cfg.tolerance).detect(&lines);
        debug!(
            "Page {}: {} horizontal lines, {} vertical lines, {} text blocks, {} regions",
            page_index + 1,
            lines.horizontal.len(),
            lines.vertical.len(),
            blocks.len(),
            regions.len()
        );

        let mut tables = Vec::new();
        for (region_idx, region) in regions.iter().enumerate() {
            let members: Vec<&TextBlock> = blocks
                .iter()
                .filter(|block| self.in_region(region, block))
                .collect();
            if members.len() < cfg.min_rows.saturating_mul(cfg.min_cols) {
                debug!(
                    "Page {}: region {region_idx} holds {} blocks, skipping",
                    page_index + 1,
                    members.len()
                );
                continue;
            }
            let Some(grid) = self.grid(members) else {
                debug!(
                    "Page {}: region {region_idx} below {}x{} threshold",
                    page_index + 1,
                    cfg.min_rows,
                    cfg.min_cols
                );
                continue;
            };
            tables.push(Table::bordered(self.cells(&grid), *region, page_index));
        }

        let remaining: Vec<&TextBlock> = blocks
            .iter()
            .filter(|block| !regions.iter().any(|region| self.in_region(region, block)))
            .collect();
        if !remaining.is_empty() {
            let borderless = self
                .grid(remaining)
                .and_then(|grid| Table::borderless(self.cells(&grid), page_index));
            match borderless {
                Some(table) => tables.push(table),
                None => debug!("Page {}: no borderless table", page_index + 1),
            }
        }

        tables
    }

    fn in_region(&self, region: &Rect, block: &TextBlock) -> bool {
        self.config
            .containment
            .contains(region, &block.bbox, self.config.tolerance)
    }

    /// Cluster rows and infer columns, `None` below the size thresholds.
    fn grid<'a>(&self, blocks: Vec<&'a TextBlock>) -> Option<Grid<'a>> {
        let cfg = &self.config;
        let rows = RowClusterer::new(cfg.tolerance).cluster(blocks);
        if rows.len() < cfg.min_rows {
            return None;
        }
        let boundaries = ColumnInferer::new(cfg.tolerance).infer(&rows);
        if boundaries.len() < cfg.min_cols {
            return None;
        }
        Some(Grid { rows, boundaries })
    }

    fn cells(&self, grid: &Grid<'_>) -> Vec<Vec<Cell>> {
        let assigner = CellAssigner::new(self.config.tolerance);
        grid.rows
            .iter()
            .map(|row| assigner.assign(row, &grid.boundaries))
            .collect()
    }
}

/// Document-level entry point.
///
/// # Example
///
/// ```rust
/// use tablift::layout::DocumentLayout;
/// use tablift::{TableExtractor, Telemetry};
///
/// let extractor = TableExtractor::default();
/// let tables = extractor.extract(&DocumentLayout::default(), &Telemetry::disabled());
/// assert!(tables.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableExtractor {
    assembler: TableAssembler,
}

impl TableExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            assembler: TableAssembler::new(config),
        }
    }

    pub fn config(&self) -> &ExtractorConfig {
        self.assembler.config()
    }

    /// Tables of every page, in page order.
    pub fn extract(&self, document: &DocumentLayout, telemetry: &Telemetry) -> Vec<Table> {
        telemetry.in_scope(|| {
            let mut tables = Vec::new();
            for (page_index, page) in document.pages.iter().enumerate() {
                let page_tables = self.assembler.assemble_page(page_index, page);
                telemetry.record_page();
                telemetry.record_tables(page_tables.len());
                tables.extend(page_tables);
            }
            tables
        })
    }

    /// Load `path` through `router` and extract its tables.
    ///
    /// # Errors
    ///
    /// Fails when the document cannot be opened or has no loader.
    pub fn extract_tables(
        &self,
        path: &Path,
        router: &LayoutRouter,
        telemetry: &Telemetry,
    ) -> Result<Vec<Table>> {
        let start = Instant::now();
        telemetry.in_scope(|| info!("Processing {}", path.display()));
        let document = router.load(path)?;
        let tables = self.extract(&document, telemetry);
        telemetry.in_scope(|| {
            info!(
                "Found {} tables in {} ({} pages, {:.1}ms)",
                tables.len(),
                path.display(),
                document.page_count(),
                start.elapsed().as_secs_f64() * 1000.0
            );
        });
        Ok(tables)
    }
}
