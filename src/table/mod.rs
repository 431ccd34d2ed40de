//! Table-structure inference from positioned text and ruling lines.
//!
//! Per page the passes run leaf-first:
//!
//! 1. [`LineClassifier`] splits vector strokes into horizontal and vertical sets
//! 2. [`TextBlockAssembler`] merges raw spans into [`TextBlock`]s
//! 3. [`BorderedRegionDetector`] finds rectangles framed by those lines
//! 4. [`RowClusterer`] groups a region's blocks into top-to-bottom rows
//! 5. [`ColumnInferer`] derives column boundaries from block edges
//! 6. [`CellAssigner`] maps each row onto the columns
//! 7. [`TableAssembler`] drives 4-6 per bordered region and once more over
//!    the leftover blocks as a borderless candidate
//!
//! [`TableExtractor`] repeats this for every page of a document.

pub mod assembler;
pub mod blocks;
pub mod cells;
pub mod columns;
pub mod lines;
pub mod regions;
pub mod rows;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

pub use assembler::{TableAssembler, TableExtractor};
pub use blocks::TextBlockAssembler;
pub use cells::CellAssigner;
pub use columns::{ColumnInferer, Histogram};
pub use lines::{LineClassifier, LineSegment, LineSet, Orientation};
pub use regions::BorderedRegionDetector;
pub use rows::RowClusterer;

/// A page-local run of text with a single bounding box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub bbox: Rect,
    /// Space-joined text of the block's non-empty spans. Never empty.
    pub text: String,
    /// Index of the parser block this was assembled from.
    pub block_no: usize,
    /// Page index (0-based).
    pub page: usize,
    /// Mean span font size. Always positive.
    pub font_size: f64,
    pub font_names: BTreeSet<String>,
    /// Some edge of the block sits on a ruling line. Informational.
    pub border_adjacent: bool,
}

/// One cell of an inferred table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Line-break-joined text of the blocks assigned to the cell; may be empty.
    pub content: String,
    pub row_span: usize,
    pub col_span: usize,
    pub bbox: Rect,
}

impl Cell {
    pub fn new(content: impl Into<String>, bbox: Rect) -> Self {
        Self {
            content: content.into(),
            row_span: 1,
            col_span: 1,
            bbox,
        }
    }

    /// A cell no block was assigned to.
    pub fn empty() -> Self {
        Self::new(String::new(), Rect::default())
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A detected table.
///
/// Every row holds exactly one cell per inferred column. Rows run top to
/// bottom and cells left to right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<Cell>>,
    pub bbox: Rect,
    /// Page index (0-based).
    pub page: usize,
    pub confidence_score: f64,
    pub has_borders: bool,
    /// Contents of row 0, verbatim.
    pub header_row: Option<Vec<String>>,
}

impl Table {
    /// Confidence assigned to tables framed by ruling lines.
    pub const BORDERED_CONFIDENCE: f64 = 0.8;
    /// Confidence assigned to tables inferred from alignment alone.
    pub const BORDERLESS_CONFIDENCE: f64 = 0.6;

    /// A table inside a bordered region; the region is its bounding box.
    pub fn bordered(rows: Vec<Vec<Cell>>, region: Rect, page: usize) -> Self {
        Self::build(rows, region, page, true)
    }

    /// A table inferred without borders, bounded by the union of its
    /// non-empty cells. `None` when every cell is empty.
    pub fn borderless(rows: Vec<Vec<Cell>>, page: usize) -> Option<Self> {
        let bbox = crate::geometry::union_all(
            rows.iter()
                .flatten()
                .filter(|cell| !cell.is_empty())
                .map(|cell| &cell.bbox),
        )?;
        Some(Self::build(rows, bbox, page, false))
    }

    fn build(rows: Vec<Vec<Cell>>, bbox: Rect, page: usize, has_borders: bool) -> Self {
        let header_row = rows
            .first()
            .map(|row| row.iter().map(|cell| cell.content.clone()).collect());
        Self {
            rows,
            bbox,
            page,
            confidence_score: if has_borders {
                Self::BORDERED_CONFIDENCE
            } else {
                Self::BORDERLESS_CONFIDENCE
            },
            has_borders,
            header_row,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Render this table as a GitHub-flavored markdown table.
    ///
    /// Multi-line cell content is joined with `<br>`; pipes are escaped.
    pub fn to_markdown(&self) -> String {
        let col_count = self.column_count();
        if self.rows.is_empty() || col_count == 0 {
            return String::new();
        }

        let render_row = |row: &[Cell]| {
            let mut line = String::from("|");
            for col in 0..col_count {
                let cell = row.get(col).map_or("", |c| c.content.as_str());
                let escaped = cell.replace('|', "\\|").replace('\n', "<br>");
                line.push_str(&format!(" {escaped} |"));
            }
            line.push('\n');
            line
        };

        let mut md = render_row(&self.rows[0]);

        // Separator row
        md.push('|');
        for _ in 0..col_count {
            md.push_str(" --- |");
        }
        md.push('\n');

        for row in self.rows.iter().skip(1) {
            md.push_str(&render_row(row));
        }

        md
    }
}
