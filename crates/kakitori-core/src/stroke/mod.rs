//! Stroke - One continuous pen motion
//!
//! A stroke is an ordered point sequence with geometry derived as points
//! are appended:
//!
//! - **Segments**: the gap between point `i` and `i + 1`, with its length,
//!   direction in `[0, 2π)` and the id of the section it belongs to.
//! - **Sections**: maximal runs of segments whose direction changes by at
//!   most [`SECTION_TURN_LIMIT`] from one segment to the next. Ids are
//!   assigned as points arrive and never change afterwards.
//! - **Aggregates**: total length, overall direction and bounding box.
//!
//! Geometry queries on empty strokes and out-of-range segment or section
//! indices are programmer errors; they are caught by debug assertions.

mod compare;
mod normalize;
mod serial;

pub use compare::compare;
pub use normalize::{dissect, simplify, split_points, split_polyline};
pub use serial::FIXED_POINT_SCALE;

use std::f64::consts::FRAC_PI_2;
use std::ops::Range;

use crate::point::{Point, angle_diff};
use crate::rect::Rect;

/// Largest direction change between consecutive segments of one section
pub const SECTION_TURN_LIMIT: f64 = 0.8 * FRAC_PI_2;

/// Derived data of the gap between two consecutive points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Segment length
    pub length: f64,
    /// Segment direction in `[0, 2π)`
    pub angle: f64,
    /// Id of the section containing this segment
    pub section: usize,
}

/// A run of segments without a sharp direction change
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Index of the first segment
    pub first: usize,
    /// Number of segments
    pub count: usize,
    /// Summed segment length
    pub length: f64,
}

impl Section {
    /// Segment indices covered by the section
    #[inline]
    pub fn segments(&self) -> Range<usize> {
        self.first..self.first + self.count
    }
}

/// An ordered point sequence with incrementally derived geometry.
#[derive(Debug, Clone, Default)]
pub struct Stroke {
    points: Vec<Point>,
    segments: Vec<Segment>,
    sections: Vec<Section>,
    length: f64,
    bounds: Rect,
}

impl Stroke {
    /// Create a new empty stroke.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stroke from points, dropping consecutive duplicates.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut stroke = Self::new();
        for p in points {
            stroke.push(p);
        }
        stroke
    }

    /// Append a point.
    ///
    /// A point equal to the current last point is ignored.
    pub fn push(&mut self, p: Point) {
        let Some(&last) = self.points.last() else {
            self.bounds = Rect::from_point(p);
            self.points.push(p);
            return;
        };
        if last == p {
            return;
        }

        let length = last.distance(p);
        let angle = last.angle_to(p);
        let section = match self.segments.last() {
            Some(prev) if angle_diff(prev.angle, angle) <= SECTION_TURN_LIMIT => prev.section,
            Some(prev) => prev.section + 1,
            None => 0,
        };
        if section == self.sections.len() {
            self.sections.push(Section {
                first: self.segments.len(),
                count: 0,
                length: 0.0,
            });
        }
        let s = &mut self.sections[section];
        s.count += 1;
        s.length += length;

        self.segments.push(Segment {
            length,
            angle,
            section,
        });
        self.length += length;
        self.bounds = self.bounds.union_point(p);
        self.points.push(p);
    }

    /// Remove all points.
    pub fn clear(&mut self) {
        self.points.clear();
        self.segments.clear();
        self.sections.clear();
        self.length = 0.0;
        self.bounds = Rect::default();
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get a point by index.
    #[inline]
    pub fn point(&self, index: usize) -> Point {
        debug_assert!(index < self.points.len(), "point index out of range");
        self.points[index]
    }

    /// Get all points as a slice.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Get the number of segments (one less than the point count).
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Get a segment by index.
    #[inline]
    pub fn segment(&self, index: usize) -> &Segment {
        debug_assert!(index < self.segments.len(), "segment index out of range");
        &self.segments[index]
    }

    /// Get all segments as a slice.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Length of a segment
    #[inline]
    pub fn segment_length(&self, index: usize) -> f64 {
        self.segment(index).length
    }

    /// Direction of a segment in `[0, 2π)`
    #[inline]
    pub fn segment_angle(&self, index: usize) -> f64 {
        self.segment(index).angle
    }

    /// Section id of a segment
    #[inline]
    pub fn segment_section(&self, index: usize) -> usize {
        self.segment(index).section
    }

    /// Get the number of sections.
    #[inline]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Get a section by id.
    #[inline]
    pub fn section(&self, id: usize) -> &Section {
        debug_assert!(id < self.sections.len(), "section id out of range");
        &self.sections[id]
    }

    /// Summed length of the segments of a section
    #[inline]
    pub fn section_length(&self, id: usize) -> f64 {
        self.section(id).length
    }

    /// Total stroke length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Direction from the first to the last point, in `[0, 2π)`.
    pub fn direction(&self) -> f64 {
        debug_assert!(!self.points.is_empty(), "direction of an empty stroke");
        self.points[0].angle_to(self.points[self.points.len() - 1])
    }

    /// Axis-aligned bounding box of all points.
    pub fn bounds(&self) -> Rect {
        debug_assert!(!self.points.is_empty(), "bounds of an empty stroke");
        self.bounds
    }
}

impl PartialEq for Stroke {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl FromIterator<Point> for Stroke {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        Self::from_points(iter)
    }
}
