//! Workbook export as pretty-printed JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{to_workbook, TableExporter};
use crate::error::{ExtractError, Result};
use crate::table::Table;

pub struct JsonExporter;

impl TableExporter for JsonExporter {
    fn extension(&self) -> &str {
        "json"
    }

    fn export(&self, tables: &[Table], path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| {
            ExtractError::Export(format!("failed to create {}: {e}", path.display()))
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &to_workbook(tables))?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
