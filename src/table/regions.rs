//! Bordered region detection.

use super::LineSet;
use crate::geometry::Rect;

/// Finds rectangles framed above and below by a pair of horizontal lines
/// and spanned by at least two vertical lines.
#[derive(Debug, Clone, Copy)]
pub struct BorderedRegionDetector {
    pub tolerance: f64,
}

impl BorderedRegionDetector {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Candidate regions in discovery order.
    ///
    /// Each unordered pair of horizontal lines whose left ends agree within
    /// `tolerance` is tested once. Regions may overlap or nest; a grid with
    /// inner rules yields one region per qualifying pair.
    pub fn detect(&self, lines: &LineSet) -> Vec<Rect> {
        let tol = self.tolerance;
        let horizontal = &lines.horizontal;
        let mut regions = Vec::new();

        for (i, first) in horizontal.iter().enumerate() {
            for second in &horizontal[i + 1..] {
                let (a, b) = (first.rect, second.rect);
                if a == b || (a.x0 - b.x0).abs() > tol {
                    continue;
                }
                let top = a.y0.min(b.y0);
                let bottom = a.y0.max(b.y0);

                let mut spanning = lines
                    .vertical
                    .iter()
                    .map(|v| v.rect)
                    .filter(|v| v.y0 <= top + tol && v.y1 >= bottom - tol);

                let Some(first_vertical) = spanning.next() else {
                    continue;
                };
                let mut count = 1;
                let (mut left, mut right) = (first_vertical.x0, first_vertical.x0);
                for v in spanning {
                    count += 1;
                    left = left.min(v.x0);
                    right = right.max(v.x0);
                }
                if count >= 2 {
                    regions.push(Rect::new(left, top, right, bottom));
                }
            }
        }

        regions
    }
}
