//! Column boundary inference from block edge positions.
//!
//! Every left and right edge of every block in a candidate goes into one
//! pool. The pool is binned into an equal-width histogram, interior bins
//! that beat both neighbours are peaks, and peaks closer than `tolerance`
//! collapse onto the leftmost.

use super::TextBlock;

/// Upper bound on histogram bins.
const MAX_BINS: usize = 50;

/// An equal-width histogram over `[edges[0], edges[n]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub counts: Vec<usize>,
    /// `counts.len() + 1` ascending bin edges.
    pub edges: Vec<f64>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning their range.
    ///
    /// A degenerate range is widened by half a point each way. Returns
    /// `None` for an empty pool or zero bins.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn build(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 {
            return None;
        }
        let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !lo.is_finite() || !hi.is_finite() {
            return None;
        }
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let n = bins;
        let step = (hi - lo) / n as f64;
        let mut edges: Vec<f64> = (0..n).map(|i| lo + i as f64 * step).collect();
        edges.push(hi);

        let mut counts = vec![0usize; n];
        for &v in values {
            let mut k = (((v - lo) / (hi - lo)) * n as f64) as usize;
            k = k.min(n - 1);
            // Float rounding can put an edge value one bin off.
            if k > 0 && v < edges[k] {
                k -= 1;
            } else if k + 1 < n && v >= edges[k + 1] {
                k += 1;
            }
            counts[k] += 1;
        }

        Some(Self { counts, edges })
    }

    /// Left edges of interior bins whose count is strictly greater than
    /// both neighbours. The first and last bins are never peaks.
    pub fn peaks(&self) -> Vec<f64> {
        let n = self.counts.len();
        if n < 3 {
            return Vec::new();
        }
        (1..n - 1)
            .filter(|&i| self.counts[i] > self.counts[i - 1] && self.counts[i] > self.counts[i + 1])
            .map(|i| self.edges[i])
            .collect()
    }
}

/// Derives ascending column boundaries for a set of rows.
#[derive(Debug, Clone, Copy)]
pub struct ColumnInferer {
    pub tolerance: f64,
}

impl ColumnInferer {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Column left boundaries, strictly ascending and more than `tolerance`
    /// apart. Empty input yields no columns.
    pub fn infer(&self, rows: &[Vec<&TextBlock>]) -> Vec<f64> {
        let pool: Vec<f64> = rows
            .iter()
            .flatten()
            .flat_map(|block| [block.bbox.x0, block.bbox.x1])
            .collect();
        let Some(histogram) = Histogram::build(&pool, pool.len().min(MAX_BINS)) else {
            return Vec::new();
        };

        self.merge_close(histogram.peaks())
    }

    /// Drop each peak within `tolerance` of the last one kept.
    fn merge_close(&self, peaks: Vec<f64>) -> Vec<f64> {
        let mut boundaries: Vec<f64> = Vec::with_capacity(peaks.len());
        for peak in peaks {
            match boundaries.last() {
                Some(&last) if (peak - last).abs() <= self.tolerance => {}
                _ => boundaries.push(peak),
            }
        }
        boundaries
    }
}
