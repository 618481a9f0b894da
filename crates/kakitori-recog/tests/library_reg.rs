//! Reference library asset regression test
//!
//! A library is written to bytes and to a file, read back, and checked
//! for identical content and identical recognition results.

use kakitori_recog::{
    CharOwner, MatchOptions, RecogError, ReferenceLibrary, StrokeCollection, find_candidates,
};
use kakitori_test::RegParams;
use kakitori_test::fixtures::{self, COMPOSITE, CROSS, HORIZONTAL, TWO, VERTICAL};

fn search(library: &ReferenceLibrary) -> Vec<usize> {
    let mut strokes = StrokeCollection::new(library);
    strokes.add(&fixtures::freehand(HORIZONTAL, 1), true);
    strokes.add(&fixtures::freehand(VERTICAL, 2), true);
    find_candidates(library, &strokes, &MatchOptions::default()).unwrap()
}

#[test]
fn library_reg() {
    let mut rp = RegParams::new("library");
    let library = fixtures::cross_library().unwrap();

    // --- Test 1: byte round trip ---
    let bytes = library.write_to_bytes().unwrap();
    let back = ReferenceLibrary::read_from_bytes(&bytes).unwrap();
    rp.compare_values(library.len() as f64, back.len() as f64, 0.0);
    rp.compare_values(library.model_count() as f64, back.model_count() as f64, 0.0);
    for index in 0..library.len() {
        rp.check(
            library.character(index) == back.character(index),
            "owner survives",
        );
    }
    let composite = back.element(COMPOSITE).unwrap();
    rp.check(composite.owner == CharOwner::None, "composite has no owner");
    rp.check(
        composite.parts == vec![CROSS as u32, TWO as u32],
        "composite parts survive",
    );
    rp.compare_values(1.0, composite.pattern as f64, 0.0);
    rp.compare_strings(&bytes, &back.write_to_bytes().unwrap());

    // --- Test 2: file round trip ---
    let path = fixtures::scratch_path("cross.kktr").unwrap();
    library.write_to_file(&path).unwrap();
    let from_file = ReferenceLibrary::read_from_file(&path).unwrap();
    rp.compare_strings(&bytes, &from_file.write_to_bytes().unwrap());
    std::fs::remove_file(&path).unwrap();

    // --- Test 3: the reloaded library recognizes the same way ---
    let expected = search(&library);
    let reloaded = search(&from_file);
    rp.compare_values(CROSS as f64, reloaded[0] as f64, 0.0);
    rp.compare_values(expected[0] as f64, reloaded[0] as f64, 0.0);

    // --- Test 4: damaged assets ---
    let mut damaged = bytes.clone();
    damaged[..4].copy_from_slice(b"KKTX");
    rp.check(
        matches!(
            ReferenceLibrary::read_from_bytes(&damaged),
            Err(RecogError::BadMagic { .. })
        ),
        "bad magic rejected",
    );
    let mut old = bytes.clone();
    old[4..6].copy_from_slice(&1u16.to_le_bytes());
    rp.check(
        matches!(
            ReferenceLibrary::read_from_bytes(&old),
            Err(RecogError::UnsupportedVersion { version: 1, .. })
        ),
        "old version rejected",
    );
    // Position bits of "十" stroke 0 relative to stroke 1: header, owner,
    // pattern, part count, two 2-point strokes, recdata flag, best model
    // and distance, then the empty own slot
    let offset = 10 + 5 + 1 + 1 + 2 + 2 * (2 + 2 * 4) + 1 + 4 + 4 + 4;
    rp.compare_strings(&bytes[offset..offset + 4], &16u32.to_le_bytes());
    let mut short_bits = bytes.clone();
    short_bits[offset..offset + 4].copy_from_slice(&9u32.to_le_bytes());
    rp.check(
        matches!(
            ReferenceLibrary::read_from_bytes(&short_bits),
            Err(RecogError::InvalidAsset(_))
        ),
        "position bits of the wrong size rejected",
    );
    rp.check(
        ReferenceLibrary::read_from_bytes(&bytes[..bytes.len() / 2]).is_err(),
        "truncated asset rejected",
    );
    rp.check(
        matches!(
            ReferenceLibrary::read_from_file(fixtures::scratch_path("missing.kktr").unwrap()),
            Err(RecogError::Io(_))
        ),
        "missing file reported as I/O error",
    );

    assert!(rp.cleanup(), "library regression test failed");
}
