//! `tablift` - table structure inference for positioned page content
//!
//! Takes the text spans and vector ruling lines a document parser reports
//! for each page and reconstructs the tables on it: grids framed by drawn
//! lines, and column-aligned text with no lines at all.
//!
//! # Features
//!
//! - **Bordered tables**: regions framed by horizontal and vertical rules
//! - **Borderless tables**: rows by vertical position, columns by edge histogram
//! - **Layout loaders**: JSON layout files, PDF via pdfium (`pdf` feature)
//! - **Export**: workbook model as JSON, or Markdown tables
//! - **Batch**: bounded-concurrency processing of whole directories
//!
//! # Example
//!
//! ```rust
//! use tablift::layout::{DocumentLayout, PageLayout, RawBlock, RawSpan};
//! use tablift::{Rect, TableExtractor, Telemetry};
//!
//! let cell = |text: &str, x0: f64, y0: f64, x1: f64| {
//!     let bbox = Rect::new(x0, y0, x1, y0 + 10.0);
//!     RawBlock::from_spans(vec![RawSpan::new(text, bbox, 10.0, "Helvetica")])
//! };
//! let page = PageLayout {
//!     blocks: vec![
//!         cell("Region", 92.0, 200.0, 122.0),
//!         cell("Units", 180.0, 200.0, 200.0),
//!         cell("Revenue", 289.0, 200.0, 329.0),
//!         cell("North", 82.0, 216.0, 142.0),
//!         cell("120", 180.0, 216.0, 230.0),
//!         cell("4,200", 289.0, 216.0, 319.0),
//!         cell("South", 82.0, 232.0, 152.0),
//!         cell("95", 180.0, 232.0, 215.0),
//!         cell("3,150", 289.0, 232.0, 324.0),
//!     ],
//!     ..PageLayout::default()
//! };
//! let document = DocumentLayout { source: None, pages: vec![page] };
//!
//! let tables = TableExtractor::default().extract(&document, &Telemetry::disabled());
//! assert_eq!(tables.len(), 1);
//! assert_eq!(tables[0].rows[1][0].content, "North");
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod layout;
pub mod table;
pub mod telemetry;

pub use batch::{
    discover_documents, process_document, run_batch, BatchReport, DocumentOutcome, OutcomeStatus,
};
pub use config::{AdjacencyPolicy, AppConfig, BatchConfig, ContainmentPolicy, ExtractorConfig};
pub use error::{ExtractError, Result};
pub use export::{
    to_workbook, ExportFormat, JsonExporter, MarkdownExporter, TableExporter, Workbook,
};
pub use geometry::Rect;
pub use layout::{DocumentLayout, LayoutLoader, LayoutRouter};
pub use table::{Cell, Table, TableExtractor, TextBlock};
pub use telemetry::{Telemetry, TelemetrySummary};

/// Version of tablift
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
