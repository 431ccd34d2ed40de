//! PDF layout extraction via `pdfium-render`.
//!
//! Walks each page's object list: path objects become line primitives,
//! text objects become single-span blocks carrying their font name and
//! scaled font size. pdfium reports bottom-up coordinates, so every
//! rectangle is flipped against the page height into top-left page space.
//!
//! # Pipeline
//!
//! ```text
//! PDF file → pdfium page objects → (lines, blocks) per page → DocumentLayout
//! ```

use std::path::Path;

use pdfium_render::prelude::*;
use tracing::debug;

use super::{DocumentLayout, LayoutLoader, PageLayout, RawBlock, RawSpan};
use crate::error::{ExtractError, Result};
use crate::geometry::Rect;

/// Reads `.pdf` files through a dynamically bound pdfium library.
pub struct PdfLayoutLoader;

impl PdfLayoutLoader {
    pub fn new() -> Self {
        Self
    }

    fn bind(path: &Path) -> Result<Pdfium> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| ExtractError::open(path, format!("failed to bind pdfium library: {e}")))?;
        Ok(Pdfium::new(bindings))
    }

    /// Convert one page's objects into lines and raw blocks.
    fn read_page(page: &PdfPage) -> PageLayout {
        let width = page.width().value;
        let height = page.height().value;
        let flip = |left: f32, top: f32, right: f32, bottom: f32| {
            Rect::new(
                f64::from(left),
                f64::from(height - top),
                f64::from(right),
                f64::from(height - bottom),
            )
        };

        let mut layout = PageLayout {
            width: f64::from(width),
            height: f64::from(height),
            ..PageLayout::default()
        };

        for object in page.objects().iter() {
            let Ok(bounds) = object.bounds() else {
                continue;
            };
            let rect = flip(
                bounds.left().value,
                bounds.top().value,
                bounds.right().value,
                bounds.bottom().value,
            );

            match object.object_type() {
                PdfPageObjectType::Path => layout.lines.push(rect),
                PdfPageObjectType::Text => {
                    if let Some(text_object) = object.as_text_object() {
                        let text = text_object.text();
                        if text.trim().is_empty() {
                            continue;
                        }
                        let size = f64::from(text_object.scaled_font_size().value);
                        let font = text_object.font().name();
                        layout
                            .blocks
                            .push(RawBlock::from_spans(vec![RawSpan::new(text, rect, size, font)]));
                    }
                }
                _ => {}
            }
        }

        layout
    }
}

impl Default for PdfLayoutLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutLoader for PdfLayoutLoader {
    fn extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn load(&self, path: &Path) -> Result<DocumentLayout> {
        let pdfium = Self::bind(path)?;
        let doc = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| ExtractError::open(path, e))?;

        let pages: Vec<PageLayout> = doc
            .pages()
            .iter()
            .enumerate()
            .map(|(page_idx, page)| {
                let layout = Self::read_page(&page);
                debug!(
                    "Page {}: {} line primitives, {} text objects",
                    page_idx + 1,
                    layout.lines.len(),
                    layout.blocks.len()
                );
                layout
            })
            .collect();

        Ok(DocumentLayout {
            source: Some(path.display().to_string()),
            pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_extension_is_pdf() {
        let loader = PdfLayoutLoader::new();
        assert_eq!(loader.extensions(), &["pdf"]);
    }
}
