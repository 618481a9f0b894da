//! Rect - Axis-aligned bounding boxes
//!
//! Boxes of straight strokes are often degenerate (zero width or zero
//! height), so containment and intersection are inclusive on every edge.

use crate::point::Point;

/// An axis-aligned rectangle given by its two corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left x coordinate
    pub x0: f64,
    /// Top y coordinate
    pub y0: f64,
    /// Right x coordinate
    pub x1: f64,
    /// Bottom y coordinate
    pub y1: f64,
}

impl Rect {
    /// Create a rect from two corner points in any order
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Zero-sized rect at a single point
    pub fn from_point(p: Point) -> Self {
        Self {
            x0: p.x,
            y0: p.y,
            x1: p.x,
            y1: p.y,
        }
    }

    /// Width of the rect
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the rect
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Center x coordinate
    #[inline]
    pub fn center_x(&self) -> f64 {
        (self.x0 + self.x1) * 0.5
    }

    /// Center y coordinate
    #[inline]
    pub fn center_y(&self) -> f64 {
        (self.y0 + self.y1) * 0.5
    }

    /// Larger of width and height
    #[inline]
    pub fn max_dimension(&self) -> f64 {
        self.width().max(self.height())
    }

    /// Check if a point is inside the rect (edges included)
    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x0 && p.x <= self.x1 && p.y >= self.y0 && p.y <= self.y1
    }

    /// Check if this rect touches or overlaps another
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1 && self.y0 <= other.y1 && other.y0 <= self.y1
    }

    /// Compute the union (bounding box) of two rects
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Grow the rect to include a point
    pub fn union_point(&self, p: Point) -> Rect {
        Rect {
            x0: self.x0.min(p.x),
            y0: self.y0.min(p.y),
            x1: self.x1.max(p.x),
            y1: self.y1.max(p.y),
        }
    }
}

/// Bounding box of a set of rects, or `None` if there are none.
pub fn union_all<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
    rects
        .into_iter()
        .fold(None, |acc: Option<Rect>, r| match acc {
            Some(a) => Some(a.union(r)),
            None => Some(*r),
        })
}
