//! Stroke and library fixtures for integration tests
//!
//! Coordinates are in the unit square with y growing downward. Freehand
//! input is imitated by densely sampled polylines with a small
//! deterministic wobble, so test results never depend on a random seed.

use std::path::PathBuf;

use kakitori_core::{Point, Stroke, dissect, simplify};
use kakitori_recog::{CharOwner, Element, ReferenceLibrary};

use crate::error::TestResult;

/// Horizontal bar across the middle
pub const HORIZONTAL: &[(f64, f64)] = &[(0.1, 0.5), (0.9, 0.5)];

/// Vertical bar down the middle
pub const VERTICAL: &[(f64, f64)] = &[(0.5, 0.1), (0.5, 0.9)];

/// Index of "十" in [`cross_library`]
pub const CROSS: usize = 0;

/// Index of the five-stroke "目" in [`cross_library`]
pub const EYE: usize = 1;

/// Index of the kana "ナ" in [`cross_library`]
pub const KANA_NA: usize = 2;

/// Index of "二" in [`cross_library`]
pub const TWO: usize = 3;

/// Index of the owner-less composite in [`cross_library`]
pub const COMPOSITE: usize = 4;

fn to_points(vertices: &[(f64, f64)]) -> Vec<Point> {
    vertices.iter().map(|&p| Point::from(p)).collect()
}

/// `n` evenly spaced points from `from` to `to`, both included.
pub fn line(from: (f64, f64), to: (f64, f64), n: usize) -> Vec<Point> {
    let a = Point::from(from);
    let b = Point::from(to);
    let steps = n.max(2) - 1;
    (0..=steps)
        .map(|i| {
            if i == steps {
                b
            } else {
                a.lerp(b, i as f64 / steps as f64)
            }
        })
        .collect()
}

/// A polyline through `vertices`, each leg sampled with `per_leg` steps.
pub fn polyline(vertices: &[(f64, f64)], per_leg: usize) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::new();
    for leg in vertices.windows(2) {
        let pts = line(leg[0], leg[1], per_leg + 1);
        let skip = usize::from(!out.is_empty());
        out.extend(pts.into_iter().skip(skip));
    }
    if out.is_empty() {
        out.extend(to_points(vertices));
    }
    out
}

/// A right-angle corner: right along the top, then down.
pub fn corner(per_leg: usize) -> Vec<Point> {
    polyline(&[(0.2, 0.2), (0.8, 0.2), (0.8, 0.8)], per_leg)
}

/// A vertical bar ending in a short hook to the lower left.
pub fn hooked_vertical(per_leg: usize) -> Vec<Point> {
    polyline(&[(0.5, 0.1), (0.5, 0.9), (0.44, 0.86)], per_leg)
}

/// Offset every point by a small deterministic wobble.
///
/// Different `seed` values give different, repeatable wobbles.
pub fn jitter(points: &[Point], amplitude: f64, seed: u32) -> Vec<Point> {
    let s = f64::from(seed);
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let t = i as f64;
            Point::new(
                p.x + amplitude * (s * 12.9898 + t * 78.233).sin(),
                p.y + amplitude * (s * 4.1414 + t * 39.346).cos(),
            )
        })
        .collect()
}

/// Freehand imitation of a polyline
pub fn freehand(vertices: &[(f64, f64)], seed: u32) -> Vec<Point> {
    jitter(&polyline(vertices, 20), 0.001, seed)
}

/// A stroke through `vertices` as they are
pub fn stroke(vertices: &[(f64, f64)]) -> Stroke {
    Stroke::from_points(to_points(vertices))
}

/// A model stroke: the dissected form of `vertices`
pub fn model(vertices: &[(f64, f64)]) -> Stroke {
    dissect(&simplify(&to_points(vertices), false))
}

type Vertices = &'static [(f64, f64)];

static CROSS_STROKES: [Vertices; 2] = [HORIZONTAL, VERTICAL];

static EYE_STROKES: [Vertices; 5] = [
    &[(0.25, 0.1), (0.25, 0.9)],
    &[(0.25, 0.1), (0.75, 0.1), (0.75, 0.9)],
    &[(0.25, 0.37), (0.75, 0.37)],
    &[(0.25, 0.63), (0.75, 0.63)],
    &[(0.25, 0.9), (0.75, 0.9)],
];

static NA_STROKES: [Vertices; 2] = [
    &[(0.15, 0.4), (0.85, 0.4)],
    &[(0.55, 0.15), (0.5, 0.5), (0.25, 0.9)],
];

static TWO_STROKES: [Vertices; 2] = [&[(0.2, 0.3), (0.8, 0.3)], &[(0.1, 0.75), (0.9, 0.75)]];

/// Owners and strokes of the elements in [`cross_library`], in element order
fn element_strokes() -> [(CharOwner, &'static [Vertices]); 4] {
    [
        (CharOwner::CodePoint('十'), &CROSS_STROKES[..]),
        (CharOwner::CodePoint('目'), &EYE_STROKES[..]),
        (CharOwner::CodePoint('ナ'), &NA_STROKES[..]),
        (CharOwner::Kanji(2), &TWO_STROKES[..]),
    ]
}

/// A small library around "十".
///
/// Elements, in order: "十", the unrelated five-stroke "目", the kana
/// "ナ", kanji table entry 2 ("二") and an owner-less composite of the
/// first and fourth. Every element stroke also serves as a model stroke.
pub fn cross_library() -> TestResult<ReferenceLibrary> {
    let mut models = Vec::new();
    let mut elements = Vec::new();
    for (owner, strokes) in element_strokes() {
        models.extend(strokes.iter().map(|s| model(s)));
        elements.push(Element::new(owner, strokes.iter().map(|s| stroke(s)).collect()));
    }
    elements.push(
        Element::new(CharOwner::None, Vec::new())
            .with_pattern(1)
            .with_parts(vec![CROSS as u32, TWO as u32]),
    );
    Ok(ReferenceLibrary::new(models, elements)?)
}

/// A fresh path in the test scratch directory.
pub fn scratch_path(name: &str) -> TestResult<PathBuf> {
    let dir = std::env::temp_dir().join("kakitori-test");
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join(format!("{}-{}", std::process::id(), name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_and_polyline() {
        let l = line((0.0, 0.0), (1.0, 0.0), 5);
        assert_eq!(l.len(), 5);
        assert_eq!(l[4], Point::new(1.0, 0.0));

        let c = corner(4);
        assert_eq!(c.len(), 9);
        assert_eq!(c[4], Point::new(0.8, 0.2));
    }

    #[test]
    fn test_jitter_is_deterministic() {
        let base = line((0.1, 0.5), (0.9, 0.5), 10);
        let a = jitter(&base, 0.01, 7);
        assert_eq!(a, jitter(&base, 0.01, 7));
        assert_ne!(a, jitter(&base, 0.01, 8));
        assert!(a.iter().zip(&base).all(|(p, q)| p.distance(*q) <= 0.01 * 2f64.sqrt()));
    }

    #[test]
    fn test_cross_library_layout() {
        let lib = cross_library().unwrap();
        assert_eq!(lib.len(), 5);
        assert_eq!(lib.model_count(), 11);
        assert_eq!(lib.character(CROSS), Some(CharOwner::CodePoint('十')));
        assert_eq!(lib.element(EYE).unwrap().stroke_count(), 5);
        assert!(lib.element(KANA_NA).unwrap().recdata().is_some());
        assert!(lib.element(COMPOSITE).unwrap().recdata().is_none());
    }
}
