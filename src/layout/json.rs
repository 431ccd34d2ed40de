//! Pre-extracted layout files.
//!
//! A JSON layout is a serialized [`DocumentLayout`]:
//!
//! ```json
//! {
//!   "pages": [{
//!     "width": 612, "height": 792,
//!     "lines": [{"x0": 50, "y0": 100, "x1": 350, "y1": 100}],
//!     "blocks": [{"lines": [{"spans": [{
//!       "text": "Name", "size": 10, "font": "Helvetica",
//!       "bbox": {"x0": 66, "y0": 104, "x1": 96, "y1": 114}
//!     }]}]}]
//!   }]
//! }
//! ```

use std::path::Path;

use super::{DocumentLayout, LayoutLoader};
use crate::error::{ExtractError, Result};

/// Reads `.json` layout files.
pub struct JsonLayoutLoader;

impl JsonLayoutLoader {
    /// Parse a layout document from bytes.
    pub fn parse(bytes: &[u8]) -> Result<DocumentLayout> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl LayoutLoader for JsonLayoutLoader {
    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn load(&self, path: &Path) -> Result<DocumentLayout> {
        let bytes = std::fs::read(path).map_err(|e| ExtractError::open(path, e))?;
        let mut doc = Self::parse(&bytes).map_err(|e| ExtractError::open(path, e))?;
        if doc.source.is_none() {
            doc.source = Some(path.display().to_string());
        }
        Ok(doc)
    }
}
