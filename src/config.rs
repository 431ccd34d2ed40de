//! Extraction and batch configuration, loaded from
//! `~/.config/tablift/config.toml`.
//!
//! ```toml
//! [extractor]
//! tolerance = 3.0
//! min_rows = 2
//! min_cols = 2
//! line_margin = 2.0
//! adjacency = "any-edge"
//! containment = "top-left"
//!
//! [batch]
//! workers = 4
//! format = "json"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};
use crate::export::ExportFormat;
use crate::geometry::Rect;

/// How many bounding-box edges of a text block must sit on a ruling line
/// before the block is flagged as border-adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdjacencyPolicy {
    /// Any one of the four edges lies within `line_margin` of a line.
    #[default]
    AnyEdge,
    /// Each of the four edges lies within `line_margin` of some line.
    AllEdges,
}

/// Which part of a text block must fall inside a bordered region for the
/// block to belong to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainmentPolicy {
    /// Only the top-left corner is tested.
    #[default]
    TopLeft,
    /// Both the top-left and bottom-right corners are tested.
    FullBox,
}

impl ContainmentPolicy {
    /// Whether `block` lies in `region` grown by `tolerance`.
    pub fn contains(self, region: &Rect, block: &Rect, tolerance: f64) -> bool {
        let top_left = region.contains_point(block.x0, block.y0, tolerance);
        match self {
            Self::TopLeft => top_left,
            Self::FullBox => top_left && region.contains_point(block.x1, block.y1, tolerance),
        }
    }
}

/// Tunables of the table-structure inference engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Slack (points) for row and column clustering.
    pub tolerance: f64,
    /// Minimum rows for a candidate to become a table.
    pub min_rows: usize,
    /// Minimum inferred columns for a candidate to become a table.
    pub min_cols: usize,
    /// Maximum height of a single-line cell. Reserved; not used by inference.
    pub max_cell_height: f64,
    /// Slack (points) for classifying vector strokes as horizontal/vertical.
    pub line_margin: f64,
    pub adjacency: AdjacencyPolicy,
    pub containment: ContainmentPolicy,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            tolerance: 3.0,
            min_rows: 2,
            min_cols: 2,
            max_cell_height: 50.0,
            line_margin: 2.0,
            adjacency: AdjacencyPolicy::default(),
            containment: ContainmentPolicy::default(),
        }
    }
}

impl ExtractorConfig {
    /// Reject values the inference passes cannot work with.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("tolerance", self.tolerance),
            ("line_margin", self.line_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ExtractError::Config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if !self.max_cell_height.is_finite() || self.max_cell_height <= 0.0 {
            return Err(ExtractError::Config(format!(
                "max_cell_height must be positive, got {}",
                self.max_cell_height
            )));
        }
        if self.min_rows == 0 || self.min_cols == 0 {
            return Err(ExtractError::Config(
                "min_rows and min_cols must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for multi-document runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum number of documents processed concurrently.
    pub workers: usize,
    /// Output format for each document's artifact.
    pub format: ExportFormat,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            format: ExportFormat::Json,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub extractor: ExtractorConfig,
    pub batch: BatchConfig,
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ExtractError::Config(e.to_string()))?;
        config.extractor.validate()?;
        Ok(config)
    }

    /// Load from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ExtractError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            ExtractError::Config(msg) => {
                ExtractError::Config(format!("invalid config {}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Load the explicit `path` if given, else the user config file if it
    /// exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }
        let default_path = config_path();
        if !default_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&default_path)
    }
}

/// Return the path to the user configuration file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tablift")
        .join("config.toml")
}
