//! Kakitori - Handwritten character stroke recognition
//!
//! # Overview
//!
//! Kakitori ranks candidate characters for a sequence of freehand pen
//! strokes by comparing them with a library of recorded reference strokes:
//!
//! - Stroke normalization (simplification and corner-to-corner dissection)
//! - Edit-distance comparison of stroke directions with hook tolerance
//! - Compass and distance encoding of relative stroke positions
//! - Pruned best-match search with stroke-order tolerance
//!
//! # Example
//!
//! ```
//! use kakitori::{CharOwner, Element, MatchOptions, Point, ReferenceLibrary, Stroke};
//! use kakitori::{StrokeCollection, dissect, simplify};
//!
//! let horizontal = [Point::new(0.1, 0.5), Point::new(0.9, 0.5)];
//! let vertical = [Point::new(0.5, 0.1), Point::new(0.5, 0.9)];
//!
//! let models = vec![
//!     dissect(&simplify(&horizontal, false)),
//!     dissect(&simplify(&vertical, false)),
//! ];
//! let cross = Element::new(
//!     CharOwner::CodePoint('十'),
//!     vec![Stroke::from_points(horizontal), Stroke::from_points(vertical)],
//! );
//! let library = ReferenceLibrary::new(models, vec![cross]).unwrap();
//!
//! let mut strokes = StrokeCollection::new(&library);
//! strokes.add(&horizontal, true);
//! strokes.add(&vertical, true);
//!
//! let found = kakitori::find_candidates(&library, &strokes, &MatchOptions::default()).unwrap();
//! assert_eq!(found, vec![0]);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use kakitori_core::*;

// Re-export the recognizer as a module and its main entry points at the root
pub use kakitori_recog as recog;
pub use kakitori_recog::{
    Candidate, CharClass, CharClassFilter, CharOwner, CollectionOptions, Element, MatchOptions,
    RecogError, RecogResult, ReferenceLibrary, StrokeCollection, find_candidates,
    rank_candidates,
};
