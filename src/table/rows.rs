//! Row clustering by vertical position.

use super::TextBlock;

/// Header and other oversized text is allowed this much more vertical slack.
const LARGE_FONT_SLACK: f64 = 1.5;

/// Groups blocks whose top edges agree within `tolerance` into rows.
#[derive(Debug, Clone, Copy)]
pub struct RowClusterer {
    pub tolerance: f64,
}

impl RowClusterer {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Cluster `blocks` into rows, top to bottom, each sorted left to right.
    ///
    /// A row is anchored at the `y0` of the block that opened it. Blocks set
    /// in a font larger than the median size get 1.5x the tolerance.
    pub fn cluster<'a>(&self, mut blocks: Vec<&'a TextBlock>) -> Vec<Vec<&'a TextBlock>> {
        if blocks.is_empty() {
            return Vec::new();
        }
        blocks.sort_by(|a, b| a.bbox.y0.total_cmp(&b.bbox.y0));

        let common_size = median(blocks.iter().map(|b| b.font_size).collect());
        let mut rows: Vec<Vec<&TextBlock>> = Vec::new();
        let mut current: Vec<&TextBlock> = Vec::new();
        let mut anchor = blocks[0].bbox.y0;

        for block in blocks {
            let slack = if block.font_size > common_size {
                self.tolerance * LARGE_FONT_SLACK
            } else {
                self.tolerance
            };
            if !current.is_empty() && (block.bbox.y0 - anchor).abs() > slack {
                rows.push(std::mem::take(&mut current));
                anchor = block.bbox.y0;
            }
            current.push(block);
        }
        rows.push(current);

        for row in &mut rows {
            row.sort_by(|a, b| a.bbox.x0.total_cmp(&b.bbox.x0));
        }
        rows
    }
}

/// Median of `values`; the mean of the middle pair when the count is even.
fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}
