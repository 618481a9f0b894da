//! Stroke normalization
//!
//! Two pure transformations prepare a drawn stroke for comparison:
//!
//! 1. [`simplify`] removes redundant points: near-duplicate points are merged
//!    and near-collinear points dropped, until neither pass finds anything.
//!    The result is a fixed point of both passes, so simplifying twice gives
//!    the same stroke.
//! 2. [`dissect`] resamples a simplified stroke into corner-to-corner pieces
//!    of equal sub-steps. Points end up dense near direction changes and
//!    sparse along straight runs, independent of drawing speed.

use std::f64::consts::{FRAC_PI_8, PI};

use super::Stroke;
use crate::point::{Point, angle_diff, signed_turn};

/// Shortest segment kept while simplifying freehand pointer input
const MERGE_LIMIT_FREEHAND: f64 = 0.02;

/// Shortest segment kept while simplifying programmatic input
const MERGE_LIMIT_EXACT: f64 = 0.004;

/// Largest deviation of a removable point from its neighbours' segment
const COLLINEAR_LIMIT: f64 = 0.01;

/// Neighbour span above which the collinear limit shrinks
const COLLINEAR_SPAN: f64 = 0.25;

/// Offset of the synthesized second point of a collapsed stroke
const DEGENERATE_OFFSET: f64 = 0.001;

/// Approximate number of samples walked by [`dissect`]
const DISSECT_SAMPLES: usize = 180;

/// Sub-steps each dissected piece is split into
const DISSECT_PIECE_STEPS: usize = 4;

/// Accumulated turn that breaks off a piece, for a stroke of reference length
const DISSECT_TURN_LIMIT: f64 = FRAC_PI_8;

/// Stroke length at which [`DISSECT_TURN_LIMIT`] applies unscaled
const DISSECT_REFERENCE_LENGTH: f64 = 0.5;

/// Remove redundant points from a raw stroke.
///
/// `freehand` selects the larger merge distance used for pointer input.
/// Empty input gives an empty stroke; input that collapses to a single point
/// gets a second point at a tiny offset so it stays comparable.
pub fn simplify(points: &[Point], freehand: bool) -> Stroke {
    let mut pts: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if pts.last() != Some(&p) {
            pts.push(p);
        }
    }
    if pts.is_empty() {
        return Stroke::new();
    }

    let limit = if freehand {
        MERGE_LIMIT_FREEHAND
    } else {
        MERGE_LIMIT_EXACT
    };
    loop {
        let merged = merge_close_points(&mut pts, limit);
        let dropped = drop_collinear_points(&mut pts);
        if !merged && !dropped {
            break;
        }
    }

    let mut stroke = Stroke::from_points(pts);
    if stroke.len() == 1 {
        let p = stroke.point(0);
        stroke.push(Point::new(p.x + DEGENERATE_OFFSET, p.y + DEGENERATE_OFFSET));
    }
    stroke
}

/// Direction change at point `i`; stroke ends count as a full reversal.
fn turn_at(points: &[Point], i: usize) -> f64 {
    if i == 0 || i + 1 >= points.len() {
        return PI;
    }
    angle_diff(
        points[i - 1].angle_to(points[i]),
        points[i].angle_to(points[i + 1]),
    )
}

fn merge_close_points(points: &mut Vec<Point>, limit: f64) -> bool {
    let mut changed = false;
    while points.len() > 2 {
        let (k, len) = points
            .windows(2)
            .enumerate()
            .map(|(i, w)| (i, w[0].distance(w[1])))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap_or((0, f64::INFINITY));
        if len >= limit {
            break;
        }

        // Lean toward the endpoint with the sharper turn; it is more
        // likely to be a real corner.
        let wk = turn_at(points, k);
        let wn = turn_at(points, k + 1);
        let t = if wk + wn > 0.0 { wk / (wk + wn) } else { 0.5 };
        points[k] = points[k + 1].lerp(points[k], t);
        points.remove(k + 1);
        changed = true;
    }
    changed
}

fn drop_collinear_points(points: &mut Vec<Point>) -> bool {
    let mut changed = false;
    loop {
        let mut best: Option<(usize, f64)> = None;
        for i in 1..points.len().saturating_sub(1) {
            let (a, b, c) = (points[i - 1], points[i], points[i + 1]);
            let span = a.distance(b) + b.distance(c);
            let limit = COLLINEAR_LIMIT * COLLINEAR_SPAN / span.max(COLLINEAR_SPAN);
            let ratio = b.distance_to_segment(a, c) / limit;
            if ratio < 1.0 && best.is_none_or(|(_, r)| ratio < r) {
                best = Some((i, ratio));
            }
        }
        match best {
            Some((i, _)) => {
                points.remove(i);
                changed = true;
            }
            None => return changed,
        }
    }
}

/// Resample a simplified stroke into corner-to-corner pieces.
///
/// The stroke is split into roughly equally spaced samples that keep every
/// vertex, then walked while the signed direction change accumulates.
/// Whenever it exceeds a limit scaled by the stroke length, the walked range
/// becomes a piece. Every piece is split into equal sub-steps, so the output
/// always has at least 5 points.
pub fn dissect(stroke: &Stroke) -> Stroke {
    debug_assert!(!stroke.is_empty(), "dissect of an empty stroke");
    if stroke.len() < 2 {
        let p = stroke.point(0);
        return simplify(&[p], false);
    }

    let samples = resample_keeping_vertices(stroke.points(), DISSECT_SAMPLES);
    let limit = DISSECT_TURN_LIMIT * (DISSECT_REFERENCE_LENGTH / stroke.length()).clamp(0.5, 2.0);

    let mut out = Stroke::new();
    out.push(samples[0]);
    let mut start = 0;
    let mut acc = 0.0;
    for j in 1..samples.len() - 1 {
        let before = samples[j - 1].angle_to(samples[j]);
        let after = samples[j].angle_to(samples[j + 1]);
        acc += signed_turn(before, after);
        if acc.abs() > limit {
            push_piece(&mut out, &samples[start..=j]);
            start = j;
            acc = 0.0;
        }
    }
    push_piece(&mut out, &samples[start..]);
    out
}

/// About `n` samples with every input vertex kept, so corners of the
/// simplified stroke are never cut by the resampling.
fn resample_keeping_vertices(points: &[Point], n: usize) -> Vec<Point> {
    let total: f64 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
    let mut out = Vec::with_capacity(n + points.len());
    out.push(points[0]);
    for w in points.windows(2) {
        let steps = ((w[0].distance(w[1]) / total) * (n - 1) as f64)
            .round()
            .max(1.0) as usize;
        for k in 1..=steps {
            out.push(w[0].lerp(w[1], k as f64 / steps as f64));
        }
    }
    out
}

fn push_piece(out: &mut Stroke, piece: &[Point]) {
    for p in split_polyline(piece, DISSECT_PIECE_STEPS + 1).into_iter().skip(1) {
        out.push(p);
    }
}

/// `n` points at equal arc-length spacing along a stroke.
///
/// The first and last points are the stroke's endpoints.
pub fn split_points(stroke: &Stroke, n: usize) -> Vec<Point> {
    split_polyline(stroke.points(), n)
}

/// `n` points at equal arc-length spacing along a polyline.
pub fn split_polyline(points: &[Point], n: usize) -> Vec<Point> {
    let mut out = Vec::with_capacity(n);
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return out;
    };
    if n == 0 {
        return out;
    }
    if points.len() == 1 {
        out.resize(n, first);
        return out;
    }
    out.push(first);
    if n == 1 {
        return out;
    }

    let total: f64 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
    let step = total / (n - 1) as f64;
    let mut seg = 0;
    let mut seg_start = 0.0;
    for k in 1..n - 1 {
        let target = step * k as f64;
        let mut seg_len = points[seg].distance(points[seg + 1]);
        while seg + 2 < points.len() && seg_start + seg_len < target {
            seg_start += seg_len;
            seg += 1;
            seg_len = points[seg].distance(points[seg + 1]);
        }
        let t = if seg_len > 0.0 {
            ((target - seg_start) / seg_len).clamp(0.0, 1.0)
        } else {
            0.0
        };
        out.push(points[seg].lerp(points[seg + 1], t));
    }
    out.push(last);
    out
}
