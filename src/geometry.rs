//! Axis-aligned rectangles in page space.
//!
//! Page space is top-left origin with y growing downward, in PDF points.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle `(x0, y0)`-`(x1, y1)`.
///
/// Values deserialized from layout files may arrive with corners in any
/// order; call [`Rect::normalized`] before relying on `x0 <= x1`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Reorder corners so that `x0 <= x1` and `y0 <= y1`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            x0: self.x0.min(self.x1),
            y0: self.y0.min(self.y1),
            x1: self.x0.max(self.x1),
            y1: self.y0.max(self.y1),
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn center_x(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }

    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }

    /// Smallest rectangle covering both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Whether the point lies inside the rectangle grown by `tolerance`
    /// on every side.
    pub fn contains_point(&self, x: f64, y: f64, tolerance: f64) -> bool {
        self.x0 - tolerance <= x
            && x <= self.x1 + tolerance
            && self.y0 - tolerance <= y
            && y <= self.y1 + tolerance
    }
}

/// Union of every rectangle in the iterator, `None` when it is empty.
pub fn union_all<'a, I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = &'a Rect>,
{
    rects
        .into_iter()
        .fold(None, |acc: Option<Rect>, r| Some(acc.map_or(*r, |a| a.union(r))))
}
