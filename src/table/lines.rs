//! Horizontal/vertical classification of vector line primitives.

use serde::Serialize;

use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A classified stroke, stored as a normalized rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineSegment {
    pub orientation: Orientation,
    pub rect: Rect,
}

/// A page's ruling lines split by orientation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineSet {
    pub horizontal: Vec<LineSegment>,
    pub vertical: Vec<LineSegment>,
}

impl LineSet {
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }

    /// Every line, horizontal first.
    pub fn iter(&self) -> impl Iterator<Item = &LineSegment> {
        self.horizontal.iter().chain(self.vertical.iter())
    }
}

/// Classifies strokes whose extent along one axis is within `line_margin`.
#[derive(Debug, Clone, Copy)]
pub struct LineClassifier {
    pub line_margin: f64,
}

impl LineClassifier {
    pub fn new(line_margin: f64) -> Self {
        Self { line_margin }
    }

    /// Split `primitives` into horizontal and vertical lines.
    ///
    /// A stroke flat within the margin on both axes (a dot) counts as
    /// horizontal. Diagonal and curved strokes are dropped.
    pub fn classify(&self, primitives: &[Rect]) -> LineSet {
        let mut set = LineSet::default();
        for rect in primitives
            .iter()
            .filter(|r| r.is_finite())
            .map(|r| r.normalized())
        {
            if rect.height() <= self.line_margin {
                set.horizontal.push(LineSegment {
                    orientation: Orientation::Horizontal,
                    rect,
                });
            } else if rect.width() <= self.line_margin {
                set.vertical.push(LineSegment {
                    orientation: Orientation::Vertical,
                    rect,
                });
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extent() {
        let classifier = LineClassifier::new(2.0);
        let set = classifier.classify(&[
            Rect::new(50.0, 100.0, 350.0, 101.0),
            Rect::new(150.0, 160.0, 150.5, 100.0),
            Rect::new(0.0, 0.0, 40.0, 40.0),
        ]);
        assert_eq!(set.horizontal.len(), 1);
        assert_eq!(set.vertical.len(), 1);
        assert_eq!(set.vertical[0].rect, Rect::new(150.0, 100.0, 150.5, 160.0));
        assert_eq!(set.iter().count(), 2);
    }

    #[test]
    fn reversed_strokes_are_normalized() {
        let set = LineClassifier::new(2.0).classify(&[Rect::new(350.0, 100.0, 50.0, 100.0)]);
        assert_eq!(set.horizontal[0].rect, Rect::new(50.0, 100.0, 350.0, 100.0));
    }

    #[test]
    fn empty_input_yields_empty_sets() {
        let set = LineClassifier::new(2.0).classify(&[]);
        assert!(set.is_empty());
    }

    #[test]
    fn non_finite_strokes_are_dropped() {
        let set = LineClassifier::new(2.0).classify(&[Rect::new(0.0, f64::NAN, 10.0, 0.0)]);
        assert!(set.is_empty());
    }
}
