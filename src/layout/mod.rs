//! Positioned page content consumed by the inference engine.
//!
//! A document parser supplies, per page, the drawn vector line primitives
//! (as rectangles) and the raw text blocks, each a list of lines of spans
//! carrying text, bounding box, font size and font name. This module holds
//! those types and routes a file on disk to the [`LayoutLoader`] that can
//! read it.
//!
//! # Supported Formats
//!
//! | Extension | Loader | Feature Flag |
//! |-----------|--------|-------------|
//! | `.json` | [`JsonLayoutLoader`] | always |
//! | `.pdf` | [`PdfLayoutLoader`](pdf::PdfLayoutLoader) | `pdf` |
//!
//! # Example
//!
//! ```rust
//! use tablift::layout::LayoutRouter;
//! use std::path::Path;
//!
//! let router = LayoutRouter::new();
//! assert!(router.supports(Path::new("scan.JSON")));
//! assert!(!router.supports(Path::new("notes.txt")));
//! ```

pub mod json;
#[cfg(feature = "pdf")]
pub mod pdf;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};
use crate::geometry::Rect;

pub use json::JsonLayoutLoader;

/// A run of text in a single font, as reported by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSpan {
    pub text: String,
    pub bbox: Rect,
    /// Font size in points.
    #[serde(default)]
    pub size: f64,
    /// Font name, e.g. `Helvetica-Bold`.
    #[serde(default)]
    pub font: String,
}

impl RawSpan {
    pub fn new(text: impl Into<String>, bbox: Rect, size: f64, font: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bbox,
            size,
            font: font.into(),
        }
    }
}

/// A line of spans inside a raw block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLine {
    #[serde(default)]
    pub spans: Vec<RawSpan>,
}

/// A parser-level block. Image blocks come through with no lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    #[serde(default)]
    pub lines: Vec<RawLine>,
}

impl RawBlock {
    /// A block holding a single line made of `spans`.
    pub fn from_spans(spans: Vec<RawSpan>) -> Self {
        Self {
            lines: vec![RawLine { spans }],
        }
    }

    /// Iterate every span of every line in source order.
    pub fn spans(&self) -> impl Iterator<Item = &RawSpan> {
        self.lines.iter().flat_map(|line| line.spans.iter())
    }
}

/// Everything the engine needs from one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Vector line primitives, one rectangle per stroke.
    #[serde(default)]
    pub lines: Vec<Rect>,
    #[serde(default)]
    pub blocks: Vec<RawBlock>,
}

/// A parsed document: pages in ascending index order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentLayout {
    /// Where the layout came from, for log messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Reads a document from disk into a [`DocumentLayout`].
///
/// Implementations are stateless and synchronous; batch drivers run them
/// inside `tokio::task::spawn_blocking`.
pub trait LayoutLoader: Send + Sync {
    /// Lowercase file extensions this loader reads (e.g., `["json"]`).
    fn extensions(&self) -> &[&str];

    /// Load the document at `path`.
    ///
    /// Unreadable or corrupt documents fail with [`ExtractError::Open`].
    fn load(&self, path: &Path) -> Result<DocumentLayout>;
}

/// Routes a document path to the [`LayoutLoader`] registered for its
/// extension.
pub struct LayoutRouter {
    loaders: Vec<Box<dyn LayoutLoader>>,
}

impl LayoutRouter {
    /// Create a router with all available loaders.
    ///
    /// The PDF loader is included only when the `pdf` feature flag is enabled.
    pub fn new() -> Self {
        #[cfg(feature = "pdf")]
        let loaders: Vec<Box<dyn LayoutLoader>> = vec![
            Box::new(pdf::PdfLayoutLoader::new()),
            Box::new(JsonLayoutLoader),
        ];

        #[cfg(not(feature = "pdf"))]
        let loaders: Vec<Box<dyn LayoutLoader>> = vec![Box::new(JsonLayoutLoader)];

        Self { loaders }
    }

    /// Router with an explicit loader set.
    pub fn with_loaders(loaders: Vec<Box<dyn LayoutLoader>>) -> Self {
        Self { loaders }
    }

    fn find(&self, path: &Path) -> Option<&dyn LayoutLoader> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        self.loaders
            .iter()
            .find(|loader| loader.extensions().iter().any(|e| *e == ext))
            .map(|loader| &**loader)
    }

    pub fn supports(&self, path: &Path) -> bool {
        self.find(path).is_some()
    }

    /// Load `path` through the loader registered for its extension.
    pub fn load(&self, path: &Path) -> Result<DocumentLayout> {
        match self.find(path) {
            Some(loader) => loader.load(path),
            None => Err(ExtractError::UnsupportedFormat(format!(
                "no layout loader for {}",
                path.display()
            ))),
        }
    }
}

impl Default for LayoutRouter {
    fn default() -> Self {
        Self::new()
    }
}
