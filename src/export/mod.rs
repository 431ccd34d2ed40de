//! Export of detected tables.
//!
//! Tables are first laid out as a [`Workbook`], one [`Sheet`] per table,
//! carrying everything a spreadsheet writer needs: the sheet title, an
//! emphasized header row, merged ranges for spanning cells, column widths
//! and the cell styling (thin borders, centred content). A
//! [`TableExporter`] then writes that model to disk.
//!
//! | Format | Exporter | Extension |
//! |--------|----------|-----------|
//! | [`ExportFormat::Json`] | [`JsonExporter`] | `.json` |
//! | [`ExportFormat::Markdown`] | [`MarkdownExporter`] | `.md` |

pub mod json;
pub mod markdown;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};
use crate::table::Table;

pub use json::JsonExporter;
pub use markdown::MarkdownExporter;

/// Character-count to column-width factor.
const WIDTH_FACTOR: f64 = 1.2;
/// Padding added to the widest value of a column, in characters.
const WIDTH_PADDING: usize = 2;

/// A cell range merged into one, 1-based and inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRange {
    pub first_row: usize,
    pub first_col: usize,
    pub last_row: usize,
    pub last_col: usize,
}

/// One table laid out as a worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub title: String,
    pub page: usize,
    pub has_borders: bool,
    pub confidence_score: f64,
    /// Rendered with emphasis; also the first entry of `rows`.
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
    pub merges: Vec<MergeRange>,
    pub column_widths: Vec<f64>,
    /// Thin border on all four sides of every cell.
    pub cell_borders: bool,
    /// Cell content centred both ways.
    pub centered: bool,
}

impl Sheet {
    #[allow(clippy::cast_precision_loss)]
    fn from_table(index: usize, table: &Table) -> Self {
        let rows: Vec<Vec<String>> = table
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.content.clone()).collect())
            .collect();

        let mut merges = Vec::new();
        for (r, row) in table.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.row_span > 1 || cell.col_span > 1 {
                    merges.push(MergeRange {
                        first_row: r + 1,
                        first_col: c + 1,
                        last_row: r + cell.row_span.max(1),
                        last_col: c + cell.col_span.max(1),
                    });
                }
            }
        }

        let column_widths = (0..table.column_count())
            .map(|col| {
                let widest = rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|value| value.chars().count())
                    .max()
                    .unwrap_or(0);
                (widest + WIDTH_PADDING) as f64 * WIDTH_FACTOR
            })
            .collect();

        Self {
            title: format!("Table_{}_Page_{}", index + 1, table.page + 1),
            page: table.page,
            has_borders: table.has_borders,
            confidence_score: table.confidence_score,
            header: table.header_row.clone(),
            rows,
            merges,
            column_widths,
            cell_borders: true,
            centered: true,
        }
    }
}

/// Spreadsheet-like export model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

/// Lay `tables` out as a workbook, one sheet per table in order.
pub fn to_workbook(tables: &[Table]) -> Workbook {
    Workbook {
        sheets: tables
            .iter()
            .enumerate()
            .map(|(i, table)| Sheet::from_table(i, table))
            .collect(),
    }
}

/// Writes tables to a destination file.
pub trait TableExporter: Send + Sync {
    /// File extension of the artifact, without the dot.
    fn extension(&self) -> &str;

    /// Write `tables` to `path`, replacing any existing file.
    fn export(&self, tables: &[Table], path: &Path) -> Result<()>;
}

/// Artifact format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }

    pub fn exporter(self) -> Box<dyn TableExporter> {
        match self {
            Self::Json => Box::new(JsonExporter),
            Self::Markdown => Box::new(MarkdownExporter),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Markdown => "markdown",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(ExtractError::UnsupportedFormat(format!(
                "unknown export format '{other}' (expected json or markdown)"
            ))),
        }
    }
}

/// `<output_dir>/<input stem>_tables.<ext>`.
pub fn output_path(input: &Path, output_dir: &Path, format: ExportFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "document".into(), |s| s.to_string_lossy());
    output_dir.join(format!("{stem}_tables.{}", format.extension()))
}
