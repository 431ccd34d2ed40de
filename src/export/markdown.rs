//! Markdown export: one heading and GitHub table per sheet.

use std::path::Path;

use super::{to_workbook, TableExporter};
use crate::error::{ExtractError, Result};
use crate::table::Table;

pub struct MarkdownExporter;

impl MarkdownExporter {
    /// Render `tables` as a markdown document.
    pub fn render(tables: &[Table]) -> String {
        let workbook = to_workbook(tables);
        let mut md = String::new();
        for (sheet, table) in workbook.sheets.iter().zip(tables) {
            if !md.is_empty() {
                md.push('\n');
            }
            md.push_str(&format!("## {}\n\n", sheet.title));
            md.push_str(&table.to_markdown());
        }
        md
    }
}

impl TableExporter for MarkdownExporter {
    fn extension(&self) -> &str {
        "md"
    }

    fn export(&self, tables: &[Table], path: &Path) -> Result<()> {
        std::fs::write(path, Self::render(tables)).map_err(|e| {
            ExtractError::Export(format!("failed to write {}: {e}", path.display()))
        })
    }
}
