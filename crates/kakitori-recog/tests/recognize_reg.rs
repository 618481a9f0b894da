//! Candidate search regression test
//!
//! Freehand strokes are collected against a small library and the
//! ranked candidates are checked: the drawn character comes first, a
//! swapped stroke order is tolerated, the canvas size does not matter,
//! and the class filter, stroke limit and truncation behave as the
//! recognizer promises.

use kakitori_core::Point;
use kakitori_recog::{
    CharClassFilter, CharOwner, CollectionOptions, MatchOptions, ReferenceLibrary,
    StrokeCollection, find_candidates, rank_candidates,
};
use kakitori_test::RegParams;
use kakitori_test::fixtures::{self, CROSS, EYE, HORIZONTAL, KANA_NA, VERTICAL};

fn cross_drawn<'a>(
    library: &'a ReferenceLibrary,
    order: [&[(f64, f64)]; 2],
) -> StrokeCollection<'a> {
    let mut strokes = StrokeCollection::new(library);
    for (seed, vertices) in order.into_iter().enumerate() {
        strokes.add(&fixtures::freehand(vertices, seed as u32 + 1), true);
    }
    strokes
}

#[test]
fn recognize_reg() {
    let mut rp = RegParams::new("recognize");
    let library = fixtures::cross_library().unwrap();
    let options = MatchOptions::default();

    // --- Test 1: "十" drawn in order ranks first ---
    let strokes = cross_drawn(&library, [HORIZONTAL, VERTICAL]);
    let ranked = rank_candidates(&library, &strokes, &options).unwrap();
    rp.check(!ranked.is_empty(), "candidates found");
    rp.compare_values(CROSS as f64, ranked[0].element as f64, 0.0);
    rp.check(
        library.character(ranked[0].element) == Some(CharOwner::CodePoint('十')),
        "best candidate is 十",
    );
    rp.check(
        ranked.windows(2).all(|w| w[0].distance <= w[1].distance),
        "candidates sorted by distance",
    );
    let eye = ranked.iter().find(|c| c.element == EYE);
    rp.check(eye.is_some(), "five-stroke character stays within the cutoff");
    rp.check(
        eye.is_some_and(|e| e.distance > ranked[0].distance),
        "five-stroke character scores worse than 十",
    );
    let found = find_candidates(&library, &strokes, &options).unwrap();
    rp.check(
        found.iter().copied().eq(ranked.iter().map(|c| c.element)),
        "find_candidates matches rank_candidates",
    );

    // --- Test 2: swapped stroke order is tolerated but costs something ---
    let swapped = cross_drawn(&library, [VERTICAL, HORIZONTAL]);
    let ranked_swapped = rank_candidates(&library, &swapped, &options).unwrap();
    rp.compare_values(CROSS as f64, ranked_swapped[0].element as f64, 0.0);
    rp.check(
        ranked_swapped[0].distance > ranked[0].distance,
        "swapped order scores worse than drawn order",
    );

    // --- Test 3: class filter ---
    let kana = MatchOptions::new().with_classes(CharClassFilter::KANA);
    let found_kana = find_candidates(&library, &strokes, &kana).unwrap();
    rp.check(found_kana == vec![KANA_NA], "only the kana remains");
    let none = MatchOptions::new().with_classes(CharClassFilter::empty());
    rp.check(
        find_candidates(&library, &strokes, &none).unwrap().is_empty(),
        "empty filter finds nothing",
    );

    // --- Test 4: extra strokes, stroke limit and truncation ---
    let mut longer = cross_drawn(&library, [HORIZONTAL, VERTICAL]);
    longer.add(&fixtures::freehand(&[(0.2, 0.8), (0.8, 0.8)], 3), true);
    rp.compare_values(3.0, longer.len() as f64, 0.0);
    let first = longer.get(0).cloned();
    let limited = rank_candidates(&library, &longer, &MatchOptions::new().with_stroke_limit(2))
        .unwrap();
    rp.check(limited == ranked, "stroke limit ignores later strokes");
    longer.truncate(2);
    let truncated = rank_candidates(&library, &longer, &options).unwrap();
    rp.check(truncated == ranked, "truncation restores the earlier ranking");
    longer.truncate(1);
    rp.compare_values(1.0, longer.len() as f64, 0.0);
    rp.check(longer.get(0).cloned() == first, "first stroke unchanged by truncation");

    let top = find_candidates(&library, &strokes, &MatchOptions::new().with_max_results(1))
        .unwrap();
    rp.check(top == vec![CROSS], "max results keeps the best");

    // --- Test 5: a larger canvas gives the same ranking ---
    let options_300 = CollectionOptions::new().with_canvas(300.0);
    let mut large = StrokeCollection::with_options(&library, options_300).unwrap();
    for (seed, vertices) in [HORIZONTAL, VERTICAL].into_iter().enumerate() {
        let points: Vec<Point> = fixtures::freehand(vertices, seed as u32 + 1)
            .iter()
            .map(|p| Point::new(p.x * 300.0, p.y * 300.0))
            .collect();
        large.add(&points, true);
    }
    let ranked_large = rank_candidates(&library, &large, &options).unwrap();
    rp.compare_values(ranked.len() as f64, ranked_large.len() as f64, 0.0);
    for (u, l) in ranked.iter().zip(&ranked_large) {
        rp.compare_values(u.element as f64, l.element as f64, 0.0);
        rp.compare_values(u.distance, l.distance, 1e-6);
    }

    // --- Test 6: empty input ---
    let mut empty = StrokeCollection::new(&library);
    empty.add(&[], true);
    rp.check(empty.is_empty(), "empty stroke ignored");
    rp.check(
        find_candidates(&library, &empty, &options).unwrap().is_empty(),
        "no strokes, no candidates",
    );
    longer.clear();
    rp.check(
        find_candidates(&library, &longer, &options).unwrap().is_empty(),
        "cleared collection finds nothing",
    );

    assert!(rp.cleanup(), "recognize regression test failed");
}
