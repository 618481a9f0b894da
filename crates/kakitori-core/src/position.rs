//! Relative stroke positions
//!
//! Where one stroke lies relative to another is encoded as a 16-bit
//! compass and distance fingerprint: four rings of increasing distance
//! times four directions.
//!
//! ```text
//!          far up
//!          mid up
//!          near up
//!          imm up
//! far mid near imm [origin] imm near mid far
//!          imm down
//!          near down
//!          mid down
//!          far down
//! ```
//!
//! Each ring is a rectangle next to the origin's bounding box. Its depth
//! is a fraction of the reach `(canvas + origin extent) / 2` along the
//! axis, and laterally it covers the origin's span widened by the ring's
//! inner offset. The immediate ring also reaches back to the origin's
//! centre, so overlapping strokes register in every direction they
//! extend into. A bit is set when the other stroke's bounding box touches
//! the ring rectangle.

use crate::bitvec::BitVector;
use crate::rect::Rect;

/// Number of bits in a position vector
pub const POSITION_BITS: usize = 16;

/// Canvas size of the normalized element frame
pub const UNIT_CANVAS: f64 = 1.0;

/// Ring boundaries as fractions of the reach
const RING_OFFSETS: [f64; 5] = [0.0, 0.1, 0.3, 0.6, 4.0];

/// Slot of an empty axis, halfway between the two immediate rings
const EMPTY_AXIS_SLOT: f64 = 3.5;

/// Direction from the origin stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up = 0,
    Left = 1,
    Right = 2,
    Down = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::Down,
    ];
}

/// Distance band from the origin stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ring {
    Immediate = 0,
    Near = 1,
    Mid = 2,
    Far = 3,
}

impl Ring {
    pub const ALL: [Ring; 4] = [Ring::Immediate, Ring::Near, Ring::Mid, Ring::Far];
}

/// Bit index of a ring and direction
#[inline]
pub fn position_bit(ring: Ring, direction: Direction) -> usize {
    ring as usize * 4 + direction as usize
}

fn ring_rect(origin: &Rect, canvas: f64, ring: Ring, direction: Direction) -> Rect {
    let inner = RING_OFFSETS[ring as usize];
    let outer = RING_OFFSETS[ring as usize + 1];
    let reach_x = (canvas + origin.width()) * 0.5;
    let reach_y = (canvas + origin.height()) * 0.5;
    let immediate = ring == Ring::Immediate;

    // Lateral spans
    let span_x = (origin.x0 - inner * reach_x, origin.x1 + inner * reach_x);
    let span_y = (origin.y0 - inner * reach_y, origin.y1 + inner * reach_y);

    match direction {
        Direction::Up => {
            let near = if immediate {
                origin.center_y()
            } else {
                origin.y0 - inner * reach_y
            };
            Rect::from_corners(span_x.0, origin.y0 - outer * reach_y, span_x.1, near)
        }
        Direction::Down => {
            let near = if immediate {
                origin.center_y()
            } else {
                origin.y1 + inner * reach_y
            };
            Rect::from_corners(span_x.0, near, span_x.1, origin.y1 + outer * reach_y)
        }
        Direction::Left => {
            let near = if immediate {
                origin.center_x()
            } else {
                origin.x0 - inner * reach_x
            };
            Rect::from_corners(origin.x0 - outer * reach_x, span_y.0, near, span_y.1)
        }
        Direction::Right => {
            let near = if immediate {
                origin.center_x()
            } else {
                origin.x1 + inner * reach_x
            };
            Rect::from_corners(near, span_y.0, origin.x1 + outer * reach_x, span_y.1)
        }
    }
}

/// Encode where `other` lies relative to `origin`.
///
/// Both arguments are bounding boxes in the same frame; `canvas` is the
/// size of that frame ([`UNIT_CANVAS`] for library elements).
pub fn compute_position_bits(origin: &Rect, other: &Rect, canvas: f64) -> BitVector {
    let mut bits = BitVector::new(POSITION_BITS);
    for ring in Ring::ALL {
        for direction in Direction::ALL {
            if other.intersects(&ring_rect(origin, canvas, ring, direction)) {
                bits.set(position_bit(ring, direction), true);
            }
        }
    }
    bits
}

/// Lowest and highest occupied slot along one axis.
///
/// Slots run from the far ring on the `before` side (0) through both
/// immediate rings (3 and 4) to the far ring on the `after` side (7).
fn axis_extent(bits: &BitVector, before: Direction, after: Direction) -> (f64, f64) {
    let mut slots = Ring::ALL.iter().flat_map(|&ring| {
        let r = ring as usize;
        [
            bits.get(position_bit(ring, before)).then_some(3 - r),
            bits.get(position_bit(ring, after)).then_some(4 + r),
        ]
        .into_iter()
        .flatten()
    });
    let Some(first) = slots.next() else {
        return (EMPTY_AXIS_SLOT, EMPTY_AXIS_SLOT);
    };
    let (lo, hi) = slots.fold((first, first), |(lo, hi), s| (lo.min(s), hi.max(s)));
    (lo as f64, hi as f64)
}

/// Difference between two position vectors.
///
/// Sum of squared differences of the occupied slot extents on the
/// vertical and horizontal axes. Zero for identical vectors.
pub fn pos_diff(p1: &BitVector, p2: &BitVector) -> f64 {
    debug_assert!(
        p1.len() == POSITION_BITS && p2.len() == POSITION_BITS,
        "position vectors must have {POSITION_BITS} bits"
    );
    let mut sum = 0.0;
    for (before, after) in [
        (Direction::Up, Direction::Down),
        (Direction::Left, Direction::Right),
    ] {
        let (lo1, hi1) = axis_extent(p1, before, after);
        let (lo2, hi2) = axis_extent(p2, before, after);
        sum += (lo1 - lo2).powi(2) + (hi1 - hi2).powi(2);
    }
    sum
}
