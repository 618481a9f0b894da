//! Stroke comparison distance
//!
//! Two dissected strokes are compared with an edit-distance style dynamic
//! program over their segment directions.
//!
//! # Algorithm Overview
//!
//! 1. **Hook detection**: a short end section next to a long one may be an
//!    accidental hook. When only one of the strokes has it and a small
//!    alignment of the hook's own segments against the end section of the
//!    other stroke comes out close, the hook's segments leave the alignment
//!    window and a penalty proportional to the hook's share of the stroke
//!    length is added instead.
//! 2. **Alignment**: an `n × m` cost matrix over the remaining segments,
//!    where a cell costs the angular difference of the two segments (halved
//!    when both lie in short sections of similar size), accumulated with the
//!    usual min of diagonal, up and left.
//! 3. **Backtracking**: the optimal path is walked back from the last cell
//!    to count its length; the distance is the average cell cost scaled by
//!    [`DISTANCE_SCALE`], plus the hook penalty.
//!
//! The result has no absolute meaning; only the ordering of distances is
//! used. `compare(a, a)` is zero. Swapping the arguments transposes the
//! matrix, so the result only differs when backtracking meets a tie between
//! the up and left moves and the two paths have different lengths.

use std::f64::consts::PI;
use std::ops::Range;

use super::Stroke;
use crate::point::angle_diff;

/// Maps an angular difference in `[0, π]` to a cell cost in `[0, 100]`
const ANGLE_COST_SCALE: f64 = 100.0 / PI;

/// Sections shorter than this share of the stroke count as short
const SHORT_SECTION_RATIO: f64 = 0.25;

/// Largest length ratio between two short sections considered similar
const SIMILAR_SECTION_RATIO: f64 = 1.5;

/// Cost multiplier for segments in short similar sections
const SHORT_SECTION_DISCOUNT: f64 = 0.5;

/// Absolute length limit of a hook
const HOOK_MAX_LENGTH: f64 = 0.2;

/// Length limit of a hook relative to its stroke
const HOOK_LENGTH_RATIO: f64 = 0.18;

/// Smallest share of the stroke the section next to a hook must have
const HOOK_NEIGHBOUR_RATIO: f64 = 0.3;

/// Hook alignment distance below which a hook is stripped
const HOOK_MATCH_LIMIT: f64 = 150.0;

/// Scale applied to the average cell cost of the best path
const DISTANCE_SCALE: f64 = 10.0;

/// Scale applied to the summed hook share of stripped hooks
const HOOK_PENALTY_SCALE: f64 = 1000.0;

#[derive(Debug, Clone, Copy)]
enum StrokeEnd {
    Start,
    Finish,
}

/// Comparison distance between two dissected strokes.
///
/// Lower is more similar. Both strokes must have at least one segment.
pub fn compare(a: &Stroke, b: &Stroke) -> f64 {
    debug_assert!(
        a.segment_count() > 0 && b.segment_count() > 0,
        "compare needs strokes with at least one segment"
    );

    let mut wa = 0..a.segment_count();
    let mut wb = 0..b.segment_count();
    let mut hook_penalty = 0.0;
    for end in [StrokeEnd::Start, StrokeEnd::Finish] {
        if let Some((count, share)) = strip_hook(a, b, end) {
            if shrink(&mut wa, end, count) {
                hook_penalty += share;
            }
        }
        if let Some((count, share)) = strip_hook(b, a, end) {
            if shrink(&mut wb, end, count) {
                hook_penalty += share;
            }
        }
    }

    let (sum, steps) = align(a, wa, b, wb);
    sum / steps as f64 * DISTANCE_SCALE + hook_penalty * HOOK_PENALTY_SCALE
}

fn shrink(window: &mut Range<usize>, end: StrokeEnd, count: usize) -> bool {
    if window.len() <= count {
        return false;
    }
    match end {
        StrokeEnd::Start => window.start += count,
        StrokeEnd::Finish => window.end -= count,
    }
    true
}

/// Section id of the hook at `end`, if `s` has one.
fn hook_section(s: &Stroke, end: StrokeEnd) -> Option<usize> {
    let n = s.section_count();
    if n < 2 {
        return None;
    }
    let (hook, neighbour) = match end {
        StrokeEnd::Start => (0, 1),
        StrokeEnd::Finish => (n - 1, n - 2),
    };
    let length = s.length();
    let is_hook = s.section_length(hook) < HOOK_MAX_LENGTH.min(HOOK_LENGTH_RATIO * length)
        && s.section_length(neighbour) >= HOOK_NEIGHBOUR_RATIO * length;
    is_hook.then_some(hook)
}

/// Segment count and length share of a strippable hook of `s` at `end`.
fn strip_hook(s: &Stroke, other: &Stroke, end: StrokeEnd) -> Option<(usize, f64)> {
    let hook = hook_section(s, end)?;
    if hook_section(other, end).is_some() {
        return None;
    }

    let other_end = match end {
        StrokeEnd::Start => 0,
        StrokeEnd::Finish => other.section_count() - 1,
    };
    let (sum, steps) = align(
        s,
        s.section(hook).segments(),
        other,
        other.section(other_end).segments(),
    );
    let distance = sum / steps as f64 * DISTANCE_SCALE;
    (distance < HOOK_MATCH_LIMIT)
        .then(|| (s.section(hook).count, s.section_length(hook) / s.length()))
}

fn section_share(s: &Stroke, segment: usize) -> f64 {
    s.section_length(s.segment_section(segment)) / s.length()
}

fn cell_cost(a: &Stroke, i: usize, b: &Stroke, j: usize) -> f64 {
    let cost = angle_diff(a.segment_angle(i), b.segment_angle(j)) * ANGLE_COST_SCALE;
    let ra = section_share(a, i);
    let rb = section_share(b, j);
    if ra < SHORT_SECTION_RATIO
        && rb < SHORT_SECTION_RATIO
        && ra.max(rb) <= SIMILAR_SECTION_RATIO * ra.min(rb)
    {
        cost * SHORT_SECTION_DISCOUNT
    } else {
        cost
    }
}

/// Accumulated cost of the best path and the number of cells on it.
fn align(a: &Stroke, ra: Range<usize>, b: &Stroke, rb: Range<usize>) -> (f64, usize) {
    let n = ra.len();
    let m = rb.len();
    debug_assert!(n > 0 && m > 0, "alignment window is empty");

    let mut d = vec![0.0_f64; n * m];
    for i in 0..n {
        for j in 0..m {
            let prev = match (i, j) {
                (0, 0) => 0.0,
                (0, _) => d[j - 1],
                (_, 0) => d[(i - 1) * m],
                _ => d[(i - 1) * m + j - 1]
                    .min(d[(i - 1) * m + j])
                    .min(d[i * m + j - 1]),
            };
            d[i * m + j] = prev + cell_cost(a, ra.start + i, b, rb.start + j);
        }
    }

    let (mut i, mut j) = (n - 1, m - 1);
    let mut steps = 1;
    while i > 0 || j > 0 {
        if i == 0 {
            j -= 1;
        } else if j == 0 {
            i -= 1;
        } else {
            let diag = d[(i - 1) * m + j - 1];
            let up = d[(i - 1) * m + j];
            let left = d[i * m + j - 1];
            if diag <= up && diag <= left {
                i -= 1;
                j -= 1;
            } else if up <= left {
                i -= 1;
            } else {
                j -= 1;
            }
        }
        steps += 1;
    }

    (d[n * m - 1], steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;
    use crate::stroke::{dissect, simplify};

    fn dissected(points: &[(f64, f64)]) -> Stroke {
        let raw: Vec<Point> = points.iter().map(|&p| Point::from(p)).collect();
        dissect(&simplify(&raw, false))
    }

    #[test]
    fn test_compare_identical_is_zero() {
        let s = dissected(&[(0.2, 0.2), (0.8, 0.2), (0.5, 0.9)]);
        assert_eq!(compare(&s, &s), 0.0);
    }

    #[test]
    fn test_compare_deterministic() {
        let a = dissected(&[(0.2, 0.2), (0.8, 0.25), (0.5, 0.9)]);
        let b = dissected(&[(0.1, 0.5), (0.9, 0.45)]);
        let first = compare(&a, &b);
        for _ in 0..5 {
            assert_eq!(compare(&a, &b), first);
        }
    }

    #[test]
    fn test_compare_perpendicular_lines() {
        let h = dissected(&[(0.1, 0.5), (0.9, 0.5)]);
        let v = dissected(&[(0.5, 0.1), (0.5, 0.9)]);
        let d = compare(&h, &v);
        assert!((d - 500.0).abs() < 1e-6);
        assert_eq!(compare(&v, &h), d);
    }

    #[test]
    fn test_compare_orders_by_similarity() {
        let h = dissected(&[(0.1, 0.5), (0.9, 0.5)]);
        let slight = dissected(&[(0.1, 0.5), (0.9, 0.6)]);
        let steep = dissected(&[(0.1, 0.2), (0.9, 0.8)]);
        assert!(compare(&h, &slight) < compare(&h, &steep));
    }

    #[test]
    fn test_compare_hook_detection() {
        let hooked = dissected(&[(0.5, 0.1), (0.5, 0.9), (0.43, 0.9)]);
        assert_eq!(hooked.section_count(), 2);
        assert_eq!(hook_section(&hooked, StrokeEnd::Finish), Some(1));
        assert_eq!(hook_section(&hooked, StrokeEnd::Start), None);

        // A long final section is no hook
        let corner = dissected(&[(0.5, 0.1), (0.5, 0.6), (0.1, 0.6)]);
        assert_eq!(hook_section(&corner, StrokeEnd::Finish), None);
    }

    #[test]
    fn test_compare_strips_hook_matching_other_end() {
        // Down, then a short run to the left
        let hooked = dissected(&[(0.5, 0.1), (0.5, 0.9), (0.43, 0.9)]);
        // Down, then a long run to the left
        let corner = dissected(&[(0.5, 0.1), (0.5, 0.6), (0.1, 0.6)]);

        // The hook lines up with the corner's last section and is stripped:
        // the remaining downward run against the whole corner costs 4 cells
        // of 50 over an 8-cell path, plus the hook's share of the stroke
        let share = 0.07 / 0.87;
        let d = compare(&hooked, &corner);
        assert!((d - (250.0 + share * HOOK_PENALTY_SCALE)).abs() < 1e-6);
    }

    #[test]
    fn test_compare_keeps_hook_unlike_other_end() {
        let hooked = dissected(&[(0.5, 0.1), (0.5, 0.9), (0.43, 0.9)]);
        let straight = dissected(&[(0.5, 0.1), (0.5, 0.9)]);

        // Left against down does not line up, so the hook is aligned as
        // usual: 4 cells of 50 over an 8-cell path and no penalty
        let d = compare(&hooked, &straight);
        assert!((d - 250.0).abs() < 1e-6);

        // Hooks at the same end on both strokes are compared normally
        assert_eq!(compare(&hooked, &hooked), 0.0);
    }
}
