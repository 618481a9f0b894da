//! Kakitori Core - Stroke geometry for handwriting recognition
//!
//! This crate provides the building blocks shared by the recognizer and
//! the reference library:
//!
//! - [`Point`] / [`Rect`] - Coordinates and bounding boxes
//! - [`Stroke`] - Point sequence with segments, sections and aggregates
//! - [`simplify`] / [`dissect`] / [`split_points`] - Stroke normalization
//! - [`compare`] - Distance between two dissected strokes
//! - [`BitVector`] - Packed bit arrays
//! - [`compute_position_bits`] / [`pos_diff`] - Relative stroke positions
//! - [`binary`] - Little-endian encoding primitives
//!
//! Coordinates are `f64` with y growing downward. Library elements live in
//! the unit square; drawn input may use any canvas size.

pub mod binary;
pub mod bitvec;
pub mod error;
pub mod point;
pub mod position;
pub mod rect;
pub mod stroke;

pub use bitvec::BitVector;
pub use error::{Error, Result};
pub use point::{Point, angle_diff, normalize_angle, signed_turn};
pub use position::{
    Direction, POSITION_BITS, Ring, UNIT_CANVAS, compute_position_bits, pos_diff, position_bit,
};
pub use rect::{Rect, union_all};
pub use stroke::{
    FIXED_POINT_SCALE, SECTION_TURN_LIMIT, Section, Segment, Stroke, compare, dissect, simplify,
    split_points, split_polyline,
};
