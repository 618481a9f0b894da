//! kakitori-recog - Handwritten character recognition
//!
//! This crate turns drawn strokes into ranked character candidates:
//!
//! - **Reference library**: characters, their strokes and the model strokes
//!   they are compared against, loaded from a binary asset
//! - **Stroke collection**: the strokes of one drawing session, normalized
//!   and compared to the models as they are added
//! - **Matcher**: pruned best-match search over the library
//!
//! # Quick Start
//!
//! ```no_run
//! use kakitori_core::Point;
//! use kakitori_recog::{MatchOptions, ReferenceLibrary, StrokeCollection, find_candidates};
//!
//! let library = ReferenceLibrary::read_from_file("strokes.kktr").unwrap();
//! let mut strokes = StrokeCollection::new(&library);
//! strokes.add(&[Point::new(0.1, 0.5), Point::new(0.9, 0.5)], true);
//! strokes.add(&[Point::new(0.5, 0.1), Point::new(0.5, 0.9)], true);
//!
//! for index in find_candidates(&library, &strokes, &MatchOptions::default()).unwrap() {
//!     println!("{:?}", library.character(index));
//! }
//! ```
//!
//! # Modules
//!
//! - [`library`]: Reference library and its asset format
//! - [`collection`]: Drawn stroke collection
//! - [`matcher`]: Candidate search

pub mod collection;
mod error;
pub mod library;
pub mod matcher;

pub use error::{RecogError, RecogResult};

// Re-export commonly used types
pub use collection::{CollectedStroke, CollectionOptions, ModelComparison, StrokeCollection};
pub use library::{CharClass, CharOwner, Element, ReferenceLibrary, StrokeRecData};
pub use matcher::{Candidate, CharClassFilter, MatchOptions, find_candidates, rank_candidates};

// Re-export core for convenience
pub use kakitori_core;
