//! Assignment of a row's blocks onto column boundaries.

use super::{Cell, TextBlock};
use crate::geometry;

/// Maps each block of a row to the first column whose range holds its
/// horizontal centre.
#[derive(Debug, Clone, Copy)]
pub struct CellAssigner {
    pub tolerance: f64,
}

impl CellAssigner {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// One cell per boundary, left to right.
    ///
    /// Column `i` covers `[b[i] - tolerance, b[i+1] + tolerance]`; the last
    /// column is open to the right. A block claimed by one column is not
    /// offered to the next. Blocks left of every column are dropped.
    pub fn assign(&self, row: &[&TextBlock], boundaries: &[f64]) -> Vec<Cell> {
        let mut claimed = vec![false; row.len()];

        boundaries
            .iter()
            .enumerate()
            .map(|(col, &start)| {
                let end = boundaries.get(col + 1).copied().unwrap_or(f64::INFINITY);
                let lo = start - self.tolerance;
                let hi = end + self.tolerance;

                let mut members: Vec<&TextBlock> = Vec::new();
                for (idx, block) in row.iter().enumerate() {
                    if claimed[idx] {
                        continue;
                    }
                    let centre = block.bbox.center_x();
                    if lo <= centre && centre <= hi {
                        claimed[idx] = true;
                        members.push(block);
                    }
                }
                cell_from(members)
            })
            .collect()
    }
}

fn cell_from(mut members: Vec<&TextBlock>) -> Cell {
    if members.is_empty() {
        return Cell::empty();
    }
    members.sort_by(|a, b| a.bbox.y0.total_cmp(&b.bbox.y0));
    let content = members
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let bbox = geometry::union_all(members.iter().map(|b| &b.bbox)).unwrap_or_default();
    Cell::new(content, bbox)
}
