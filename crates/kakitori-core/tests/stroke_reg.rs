//! Stroke normalization and comparison regression test
//!
//! Freehand-like input is simplified and dissected; the results are
//! checked for the properties later stages rely on: idempotent
//! simplification, minimum point counts, bounding boxes that hold every
//! point, and comparison distances that order similar shapes first.

use kakitori_core::{Point, Stroke, compare, dissect, simplify, split_points};
use kakitori_test::RegParams;
use kakitori_test::fixtures::{self, HORIZONTAL, VERTICAL};

fn normalized(points: &[Point], freehand: bool) -> Stroke {
    dissect(&simplify(points, freehand))
}

#[test]
fn stroke_reg() {
    let mut rp = RegParams::new("stroke");

    let inputs = [
        fixtures::freehand(HORIZONTAL, 1),
        fixtures::freehand(VERTICAL, 2),
        fixtures::jitter(&fixtures::corner(25), 0.001, 3),
        fixtures::jitter(&fixtures::hooked_vertical(10), 0.001, 4),
        fixtures::line((0.3, 0.3), (0.3005, 0.3), 4),
        vec![Point::new(0.6, 0.6)],
    ];

    // --- Test 1: simplify is idempotent and never collapses below 2 points ---
    for raw in &inputs {
        for freehand in [true, false] {
            let once = simplify(raw, freehand);
            let twice = simplify(once.points(), freehand);
            rp.check(once == twice, "simplify is idempotent");
            rp.check(once.len() >= 2, "simplified stroke has at least 2 points");
        }
    }

    // --- Test 2: dissect output shape ---
    for raw in &inputs {
        let d = normalized(raw, true);
        rp.check(d.len() >= 5, "dissected stroke has at least 5 points");
        rp.compare_values(0.0, ((d.len() - 1) % 4) as f64, 0.0);
    }

    // --- Test 3: a straight freehand line simplifies to its endpoints ---
    let h = simplify(&inputs[0], true);
    rp.compare_values(2.0, h.len() as f64, 0.0);
    rp.compare_values(0.8, h.length(), 0.01);
    rp.compare_values(1.0, h.section_count() as f64, 0.0);

    // --- Test 4: corners survive simplification and split sections ---
    let c = simplify(&inputs[2], true);
    rp.compare_values(3.0, c.len() as f64, 0.0);
    rp.compare_values(2.0, c.section_count() as f64, 0.0);
    rp.compare_values(0.8, c.point(1).x, 0.01);
    rp.compare_values(0.2, c.point(1).y, 0.01);

    // --- Test 5: bounding box holds every point ---
    let mut growing = Stroke::new();
    for &p in &inputs[3] {
        growing.push(p);
        let b = growing.bounds();
        rp.check(
            growing.points().iter().all(|&q| b.contains_point(q)),
            "bounds contain all points",
        );
    }

    // --- Test 6: split points ---
    let split = split_points(&c, 7);
    rp.compare_values(7.0, split.len() as f64, 0.0);
    rp.compare_values(0.0, split[0].distance(c.point(0)), 1e-12);
    rp.compare_values(0.0, split[6].distance(c.point(c.len() - 1)), 1e-12);
    let gaps: Vec<f64> = split.windows(2).map(|w| w[0].distance(w[1])).collect();
    // Straight gaps are equal; the one spanning the corner is shorter
    rp.compare_values(gaps[0], gaps[1], 1e-9);
    rp.check(gaps.iter().all(|&g| g <= gaps[0] + 1e-9), "no gap exceeds the step");

    // --- Test 7: comparison ---
    let nh = normalized(&inputs[0], true);
    let nv = normalized(&inputs[1], true);
    let nc = normalized(&inputs[2], true);
    let nk = normalized(&inputs[3], true);

    rp.compare_values(0.0, compare(&nh, &nh), 0.0);
    rp.compare_values(compare(&nh, &nv), compare(&nh, &nv), 0.0);
    rp.compare_values(500.0, compare(&nh, &nv), 20.0);
    rp.compare_values(compare(&nh, &nv), compare(&nv, &nh), 20.0);
    // The hooked vertical stays closest to the plain vertical
    let to_vertical = compare(&nk, &nv);
    rp.check(
        to_vertical < compare(&nk, &nh),
        "hook is closer to vertical than horizontal",
    );
    rp.check(to_vertical < compare(&nk, &nc), "hook is closer to vertical than corner");
    // A corner shares its first leg with the horizontal
    rp.check(
        compare(&nc, &nh) < compare(&nv, &nh),
        "corner is closer to horizontal than vertical is",
    );

    assert!(rp.cleanup(), "stroke regression test failed");
}
