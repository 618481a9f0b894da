//! Drawn strokes awaiting recognition
//!
//! A [`StrokeCollection`] holds the strokes of one drawing session. All the
//! work that depends on a single stroke happens when it is added:
//!
//! 1. the raw points are scaled from the canvas into the unit square, then
//!    simplified and dissected,
//! 2. the dissected stroke is compared to every model stroke of the library,
//! 3. its position relative to each earlier stroke is encoded.
//!
//! Candidate searches then only combine these precomputed values. Erasing
//! the last strokes with [`StrokeCollection::truncate`] keeps the entries of
//! the remaining ones untouched.

use kakitori_core::{
    BitVector, Point, Rect, Stroke, UNIT_CANVAS, compare, compute_position_bits, dissect,
    simplify, union_all,
};
use tracing::debug;

use crate::error::{RecogError, RecogResult};
use crate::library::ReferenceLibrary;

/// Options for stroke collections
#[derive(Debug, Clone)]
pub struct CollectionOptions {
    /// Size of the drawing canvas in input units.
    ///
    /// Input points are divided by it, so strokes are stored and compared
    /// in the unit square whatever the canvas.
    pub canvas: f64,
}

impl Default for CollectionOptions {
    fn default() -> Self {
        Self { canvas: 1.0 }
    }
}

impl CollectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas size
    pub fn with_canvas(mut self, canvas: f64) -> Self {
        self.canvas = canvas;
        self
    }

    /// Validate options
    pub fn validate(&self) -> RecogResult<()> {
        if !(self.canvas.is_finite() && self.canvas > 0.0) {
            return Err(RecogError::InvalidParameter(format!(
                "canvas must be positive, got {}",
                self.canvas
            )));
        }
        Ok(())
    }
}

/// Distance from a drawn stroke to one model stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelComparison {
    /// Model stroke index
    pub model: usize,
    /// Comparison distance
    pub distance: f64,
}

/// A drawn stroke with everything derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedStroke {
    simplified: Stroke,
    dissected: Stroke,
    comparisons: Vec<ModelComparison>,
    positions: Vec<BitVector>,
}

impl CollectedStroke {
    pub fn simplified(&self) -> &Stroke {
        &self.simplified
    }

    pub fn dissected(&self) -> &Stroke {
        &self.dissected
    }

    /// One comparison per library model, in model order
    pub fn comparisons(&self) -> &[ModelComparison] {
        &self.comparisons
    }

    /// Comparison distance to a model stroke
    #[inline]
    pub fn model_distance(&self, model: usize) -> f64 {
        debug_assert!(model < self.comparisons.len(), "model index out of range");
        self.comparisons[model].distance
    }

    /// Position of this stroke relative to each earlier stroke
    pub fn positions(&self) -> &[BitVector] {
        &self.positions
    }
}

/// Strokes of one drawing session, bound to a reference library.
#[derive(Debug)]
pub struct StrokeCollection<'a> {
    library: &'a ReferenceLibrary,
    options: CollectionOptions,
    strokes: Vec<CollectedStroke>,
}

impl<'a> StrokeCollection<'a> {
    /// Create an empty collection on the unit canvas.
    pub fn new(library: &'a ReferenceLibrary) -> Self {
        Self {
            library,
            options: CollectionOptions::default(),
            strokes: Vec::new(),
        }
    }

    /// Create an empty collection with custom options.
    pub fn with_options(
        library: &'a ReferenceLibrary,
        options: CollectionOptions,
    ) -> RecogResult<Self> {
        options.validate()?;
        Ok(Self {
            library,
            options,
            strokes: Vec::new(),
        })
    }

    /// Library the collection compares against
    pub fn library(&self) -> &'a ReferenceLibrary {
        self.library
    }

    /// Canvas size in input units
    pub fn canvas(&self) -> f64 {
        self.options.canvas
    }

    /// Add a finished stroke.
    ///
    /// `freehand` selects the coarser simplification used for pointer
    /// input. An empty point list is ignored.
    pub fn add(&mut self, points: &[Point], freehand: bool) {
        if points.is_empty() {
            debug!("ignoring empty stroke");
            return;
        }

        let canvas = self.options.canvas;
        let unit: Vec<Point> = points
            .iter()
            .map(|p| Point::new(p.x / canvas, p.y / canvas))
            .collect();
        let simplified = simplify(&unit, freehand);
        let dissected = dissect(&simplified);
        let comparisons = self
            .library
            .models()
            .iter()
            .enumerate()
            .map(|(model, m)| ModelComparison {
                model,
                distance: compare(&dissected, m),
            })
            .collect();
        let bounds = simplified.bounds();
        let positions = self
            .strokes
            .iter()
            .map(|earlier| {
                compute_position_bits(&earlier.simplified.bounds(), &bounds, UNIT_CANVAS)
            })
            .collect();

        debug!(
            index = self.strokes.len(),
            points = points.len(),
            simplified = simplified.len(),
            dissected = dissected.len(),
            "added stroke"
        );
        self.strokes.push(CollectedStroke {
            simplified,
            dissected,
            comparisons,
            positions,
        });
    }

    /// Keep only the first `len` strokes.
    pub fn truncate(&mut self, len: usize) {
        if len < self.strokes.len() {
            debug!(from = self.strokes.len(), to = len, "truncated strokes");
            self.strokes.truncate(len);
        }
    }

    /// Remove all strokes.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Number of strokes (same as [`len`](Self::len))
    #[inline]
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Get a stroke by index
    pub fn get(&self, index: usize) -> Option<&CollectedStroke> {
        self.strokes.get(index)
    }

    /// All strokes in drawing order
    pub fn strokes(&self) -> &[CollectedStroke] {
        &self.strokes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CollectedStroke> {
        self.strokes.iter()
    }

    /// Bounding box of all simplified strokes, in the unit square
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds_of_first(self.strokes.len())
    }

    /// Bounding box of the first `n` simplified strokes
    pub fn bounds_of_first(&self, n: usize) -> Option<Rect> {
        let n = n.min(self.strokes.len());
        let boxes: Vec<Rect> = self.strokes[..n]
            .iter()
            .map(|s| s.simplified.bounds())
            .collect();
        union_all(&boxes)
    }

    /// Position of stroke `later` relative to the earlier stroke `earlier`
    #[inline]
    pub fn position_bits(&self, later: usize, earlier: usize) -> &BitVector {
        debug_assert!(earlier < later, "position bits are stored for earlier strokes only");
        &self.strokes[later].positions[earlier]
    }
}

impl<'c, 'a> IntoIterator for &'c StrokeCollection<'a> {
    type Item = &'c CollectedStroke;
    type IntoIter = std::slice::Iter<'c, CollectedStroke>;

    fn into_iter(self) -> Self::IntoIter {
        self.strokes.iter()
    }
}
