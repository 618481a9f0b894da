//! Reference library of characters and model strokes
//!
//! The library holds two tables:
//!
//! - **Model strokes**: dissected reference strokes that drawn strokes are
//!   compared against. Each drawn stroke is compared to every model once,
//!   when it is added to a collection.
//! - **Elements**: characters and character parts, each with its strokes in
//!   a unit square frame. Elements that name a character carry `recdata`,
//!   one [`StrokeRecData`] per stroke linking it to its closest model and
//!   recording where it lies relative to the element's other strokes.
//!
//! A library is immutable after construction and can be shared between any
//! number of collections.

mod serial;

use kakitori_core::{
    BitVector, POSITION_BITS, Rect, Stroke, UNIT_CANVAS, compare, compute_position_bits, dissect,
    simplify, union_all,
};
use tracing::debug;

use crate::error::{RecogError, RecogResult};

/// Maximum number of sub-element references per element
pub const MAX_PARTS: usize = 4;

/// Character an element stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharOwner {
    /// Composite part without a character of its own
    #[default]
    None,
    /// Index into an external kanji table
    Kanji(u32),
    /// Unicode character
    CodePoint(char),
}

impl CharOwner {
    /// Check if the element stands for a character
    pub fn is_some(&self) -> bool {
        !matches!(self, CharOwner::None)
    }

    /// Character class used by candidate filtering
    pub fn class(&self) -> Option<CharClass> {
        match *self {
            CharOwner::None => None,
            CharOwner::Kanji(_) => Some(CharClass::Kanji),
            CharOwner::CodePoint(c) if ('\u{3040}'..='\u{30ff}').contains(&c) => {
                Some(CharClass::Kana)
            }
            CharOwner::CodePoint(_) => Some(CharClass::Other),
        }
    }
}

/// Broad character class of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Entry of the kanji table
    Kanji,
    /// Hiragana or katakana
    Kana,
    /// Any other character
    Other,
}

/// Recognition data of one element stroke
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeRecData {
    /// Index of the closest model stroke
    pub best_model: usize,
    /// Comparison distance to that model
    pub best_distance: f64,
    /// Position of this stroke relative to each stroke of the element.
    ///
    /// The slot of the stroke itself is an empty vector.
    pub positions: Vec<BitVector>,
}

/// Library entry: a character or a character part
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Character this element stands for
    pub owner: CharOwner,
    /// Composition pattern, kept opaque
    pub pattern: u8,
    /// Indices of sub-elements
    pub parts: Vec<u32>,
    /// Strokes in the unit square frame
    pub strokes: Vec<Stroke>,
    recdata: Option<Vec<StrokeRecData>>,
}

impl Element {
    /// Create an element; recognition data is computed by the library.
    pub fn new(owner: CharOwner, strokes: Vec<Stroke>) -> Self {
        Self {
            owner,
            strokes,
            ..Self::default()
        }
    }

    /// Set the composition pattern
    pub fn with_pattern(mut self, pattern: u8) -> Self {
        self.pattern = pattern;
        self
    }

    /// Set the sub-element indices
    pub fn with_parts(mut self, parts: Vec<u32>) -> Self {
        self.parts = parts;
        self
    }

    /// Attach precomputed recognition data
    pub fn with_recdata(mut self, recdata: Vec<StrokeRecData>) -> Self {
        self.recdata = Some(recdata);
        self
    }

    #[inline]
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Recognition data, present exactly for elements that stand for a
    /// character and have strokes
    pub fn recdata(&self) -> Option<&[StrokeRecData]> {
        self.recdata.as_deref()
    }

    /// Character class, if the element stands for a character
    pub fn class(&self) -> Option<CharClass> {
        self.owner.class()
    }

    /// Bounding box of all strokes
    pub fn bounds(&self) -> Option<Rect> {
        let boxes: Vec<Rect> = self.strokes.iter().map(Stroke::bounds).collect();
        union_all(&boxes)
    }

    fn needs_recdata(&self) -> bool {
        self.owner.is_some() && !self.strokes.is_empty()
    }
}

/// Immutable collection of elements and model strokes.
#[derive(Debug, Clone, Default)]
pub struct ReferenceLibrary {
    models: Vec<Stroke>,
    elements: Vec<Element>,
}

impl ReferenceLibrary {
    /// Build a library, computing recognition data where it is missing.
    ///
    /// Stored recognition data is checked against the element and the
    /// model table. Computing it requires at least one model stroke.
    pub fn new(models: Vec<Stroke>, mut elements: Vec<Element>) -> RecogResult<Self> {
        if let Some(i) = models.iter().position(|m| m.segment_count() == 0) {
            return Err(RecogError::InvalidAsset(format!(
                "model stroke {i} has no segments"
            )));
        }

        let mut computed = 0;
        for (index, element) in elements.iter_mut().enumerate() {
            validate_element(index, element, models.len())?;
            if element.needs_recdata() && element.recdata.is_none() {
                if models.is_empty() {
                    return Err(RecogError::InvalidParameter(format!(
                        "element {index} needs recognition data but the library has no model strokes"
                    )));
                }
                element.recdata = Some(compute_recdata(&element.strokes, &models));
                computed += 1;
            }
        }

        debug!(
            elements = elements.len(),
            models = models.len(),
            computed,
            "built reference library"
        );
        Ok(Self { models, elements })
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get an element by index
    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of model strokes
    #[inline]
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Get a model stroke by index
    pub fn model(&self, index: usize) -> Option<&Stroke> {
        self.models.get(index)
    }

    pub fn models(&self) -> &[Stroke] {
        &self.models
    }

    /// Character of an element, for displaying candidates
    pub fn character(&self, index: usize) -> Option<CharOwner> {
        self.elements.get(index).map(|e| e.owner)
    }
}

fn validate_element(index: usize, element: &Element, model_count: usize) -> RecogResult<()> {
    if element.parts.len() > MAX_PARTS {
        return Err(RecogError::InvalidParameter(format!(
            "element {index} has {} parts, at most {MAX_PARTS} allowed",
            element.parts.len()
        )));
    }
    if element.strokes.iter().any(Stroke::is_empty) {
        return Err(RecogError::InvalidAsset(format!(
            "element {index} has an empty stroke"
        )));
    }

    let Some(recdata) = &element.recdata else {
        return Ok(());
    };
    if !element.needs_recdata() {
        return Err(RecogError::InvalidAsset(format!(
            "element {index} has recognition data but no character or strokes"
        )));
    }
    let n = element.strokes.len();
    if recdata.len() != n {
        return Err(RecogError::InvalidAsset(format!(
            "element {index} has {} recognition entries for {n} strokes",
            recdata.len()
        )));
    }
    for (i, rd) in recdata.iter().enumerate() {
        if rd.best_model >= model_count {
            return Err(RecogError::InvalidAsset(format!(
                "element {index} stroke {i} refers to model {} of {model_count}",
                rd.best_model
            )));
        }
        if rd.positions.len() != n {
            return Err(RecogError::InvalidAsset(format!(
                "element {index} stroke {i} has {} position entries for {n} strokes",
                rd.positions.len()
            )));
        }
        for (j, bits) in rd.positions.iter().enumerate() {
            let expected = if i == j { 0 } else { POSITION_BITS };
            if bits.len() != expected {
                return Err(RecogError::InvalidAsset(format!(
                    "element {index} stroke {i} position {j} has {} bits, expected {expected}",
                    bits.len()
                )));
            }
        }
    }
    Ok(())
}

/// Closest model and relative positions for every stroke of an element.
fn compute_recdata(strokes: &[Stroke], models: &[Stroke]) -> Vec<StrokeRecData> {
    let simplified: Vec<Stroke> = strokes
        .iter()
        .map(|s| simplify(s.points(), false))
        .collect();
    let dissected: Vec<Stroke> = simplified.iter().map(dissect).collect();

    (0..strokes.len())
        .map(|i| {
            let (best_model, best_distance) = models
                .iter()
                .enumerate()
                .map(|(m, model)| (m, compare(&dissected[i], model)))
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .unwrap_or((0, f64::INFINITY));
            let positions = (0..strokes.len())
                .map(|j| {
                    if i == j {
                        BitVector::new(0)
                    } else {
                        compute_position_bits(
                            &simplified[j].bounds(),
                            &simplified[i].bounds(),
                            UNIT_CANVAS,
                        )
                    }
                })
                .collect();
            StrokeRecData {
                best_model,
                best_distance,
                positions,
            }
        })
        .collect()
}
