//! Candidate search over the reference library
//!
//! Every element with recognition data is scored against the drawn strokes
//! of a [`StrokeCollection`]; lower distances are better.
//!
//! # Algorithm Overview
//!
//! 1. **Eligibility**: elements with far more or far fewer strokes than
//!    the query, or of a filtered class, are skipped.
//! 2. **Stroke assignment**: each reference stroke greedily takes the best
//!    unused drawn stroke within the swap tolerance of its position. The
//!    cost is the precomputed distance between the drawn stroke and the
//!    reference stroke's closest model, plus a penalty for the order
//!    offset. Elements that fall too far behind the best so far are
//!    abandoned early.
//! 3. **Layout**: the relative positions of assigned strokes that are close
//!    in the reference order are compared with [`pos_diff`].
//! 4. **Size and stroke count**: the overall size classes of query and
//!    element scale the distance, and missing drawn strokes add a penalty.
//!
//! Results are sorted ascending and cut off relative to the best distance.

use bitflags::bitflags;
use kakitori_core::{Rect, pos_diff};
use tracing::{debug, trace};

use crate::collection::StrokeCollection;
use crate::error::{RecogError, RecogResult};
use crate::library::{CharClass, Element, ReferenceLibrary, StrokeRecData};

/// Largest allowed swap tolerance
pub const MAX_SWAP_TOLERANCE: usize = 4;

/// Reference strokes beyond the query count that still make an element eligible
const MAX_EXTRA_STROKES: usize = 4;

/// Query strokes beyond the reference count that still make an element eligible
const MAX_MISSING_STROKES: usize = 2;

/// Penalty per drawn stroke the element does not have
const SURPLUS_STROKE_PENALTY: f64 = 40000.0;

/// Penalty per position of order offset between drawn and reference stroke
const ORDER_OFFSET_PENALTY: f64 = 40.0;

/// Share of each assignment score added to the distance
const ASSIGNMENT_WEIGHT: f64 = 0.5;

/// Cut-off relative to the best distance found
const PRUNE_FACTOR: f64 = 1.5;

/// Lower bound of the reference distance used for cut-offs
const PRUNE_FLOOR: f64 = 10000.0;

/// Farthest reference order gap whose layout is compared
const MAX_LAYOUT_GAP: usize = 2;

/// Layout cost scale, relative to the distance so far
const LAYOUT_WEIGHT: f64 = 0.02;

/// Lower bound of the distance used to scale the layout cost
const LAYOUT_FLOOR: f64 = 100.0;

/// Size class boundaries in the unit square
const SIZE_SMALL: f64 = 0.35;
const SIZE_LARGE: f64 = 0.7;

/// Multipliers for size classes 0, 1 and 2 steps apart
const SIZE_FACTORS: [f64; 3] = [0.95, 1.15, 1.35];

/// Penalty per reference stroke not yet drawn
const MISSING_STROKE_PENALTY: f64 = 1500.0;

bitflags! {
    /// Character classes admitted by a search.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CharClassFilter: u8 {
        /// Kanji table entries
        const KANJI = 0b0000_0001;
        /// Hiragana and katakana
        const KANA  = 0b0000_0010;
        /// Any other character
        const OTHER = 0b0000_0100;
    }
}

impl Default for CharClassFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl CharClassFilter {
    /// Check if a class passes the filter
    pub fn allows(&self, class: CharClass) -> bool {
        let flag = match class {
            CharClass::Kanji => Self::KANJI,
            CharClass::Kana => Self::KANA,
            CharClass::Other => Self::OTHER,
        };
        self.contains(flag)
    }
}

/// Options for candidate searches
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Use only the first this many drawn strokes (None = all)
    pub stroke_limit: Option<usize>,
    /// Admitted character classes
    pub classes: CharClassFilter,
    /// How far drawn stroke order may deviate from reference order
    pub swap_tolerance: usize,
    /// Maximum number of results (None = no limit)
    pub max_results: Option<usize>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            stroke_limit: None,
            classes: CharClassFilter::all(),
            swap_tolerance: 1,
            max_results: None,
        }
    }
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of drawn strokes to use
    pub fn with_stroke_limit(mut self, limit: usize) -> Self {
        self.stroke_limit = Some(limit);
        self
    }

    /// Set the admitted character classes
    pub fn with_classes(mut self, classes: CharClassFilter) -> Self {
        self.classes = classes;
        self
    }

    /// Set the swap tolerance
    pub fn with_swap_tolerance(mut self, tolerance: usize) -> Self {
        self.swap_tolerance = tolerance;
        self
    }

    /// Set the maximum number of results
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Validate options
    pub fn validate(&self) -> RecogResult<()> {
        if self.swap_tolerance > MAX_SWAP_TOLERANCE {
            return Err(RecogError::InvalidParameter(format!(
                "swap tolerance must be at most {MAX_SWAP_TOLERANCE}, got {}",
                self.swap_tolerance
            )));
        }
        if self.max_results == Some(0) {
            return Err(RecogError::InvalidParameter(
                "max_results must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// A scored library element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Element index in the library
    pub element: usize,
    /// Match distance (lower is better)
    pub distance: f64,
}

/// Element indices of the best candidates, best first.
pub fn find_candidates(
    library: &ReferenceLibrary,
    collection: &StrokeCollection<'_>,
    options: &MatchOptions,
) -> RecogResult<Vec<usize>> {
    Ok(rank_candidates(library, collection, options)?
        .into_iter()
        .map(|c| c.element)
        .collect())
}

/// The best candidates with their distances, best first.
///
/// `collection` must have been built on `library`.
pub fn rank_candidates(
    library: &ReferenceLibrary,
    collection: &StrokeCollection<'_>,
    options: &MatchOptions,
) -> RecogResult<Vec<Candidate>> {
    options.validate()?;
    if !std::ptr::eq(library, collection.library()) {
        return Err(RecogError::InvalidParameter(
            "stroke collection belongs to a different library".to_string(),
        ));
    }

    let q = options
        .stroke_limit
        .map_or(collection.len(), |limit| limit.min(collection.len()));
    let Some(query_bounds) = collection.bounds_of_first(q) else {
        return Ok(Vec::new());
    };
    let query = Query {
        collection,
        count: q,
        size_class: size_class(&query_bounds),
        swap: options.swap_tolerance,
    };

    let mut lowest = f64::INFINITY;
    let mut candidates = Vec::new();
    let mut evaluated = 0usize;
    let mut pruned = 0usize;
    for (index, element) in library.elements().iter().enumerate() {
        let Some(recdata) = element.recdata() else {
            continue;
        };
        let n = element.stroke_count();
        if n > q + MAX_EXTRA_STROKES || n + MAX_MISSING_STROKES < q {
            continue;
        }
        if !element.class().is_some_and(|c| options.classes.allows(c)) {
            continue;
        }

        evaluated += 1;
        match query.score(element, recdata, lowest) {
            Some(distance) => {
                lowest = lowest.min(distance);
                candidates.push(Candidate {
                    element: index,
                    distance,
                });
            }
            None => {
                trace!(element = index, "pruned candidate");
                pruned += 1;
            }
        }
    }

    candidates.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then(a.element.cmp(&b.element))
    });
    let limit = prune_limit(lowest);
    let mut keep = candidates
        .iter()
        .take_while(|c| c.distance < limit)
        .count();
    if let Some(max) = options.max_results {
        keep = keep.min(max);
    }
    candidates.truncate(keep);

    debug!(
        strokes = q,
        evaluated,
        pruned,
        returned = candidates.len(),
        lowest,
        "ranked candidates"
    );
    Ok(candidates)
}

fn prune_limit(lowest: f64) -> f64 {
    PRUNE_FACTOR * lowest.max(PRUNE_FLOOR)
}

/// Size class 0 (small), 1 (medium) or 2 (large) of a unit-frame box
fn size_class(bounds: &Rect) -> usize {
    let size = bounds.max_dimension();
    if size < SIZE_SMALL {
        0
    } else if size < SIZE_LARGE {
        1
    } else {
        2
    }
}

struct Query<'c, 'a> {
    collection: &'c StrokeCollection<'a>,
    count: usize,
    size_class: usize,
    swap: usize,
}

impl Query<'_, '_> {
    /// Distance of one element, or `None` if it fell behind `lowest`.
    fn score(&self, element: &Element, recdata: &[StrokeRecData], lowest: f64) -> Option<f64> {
        let q = self.count;
        let n = element.stroke_count();
        let limit = prune_limit(lowest);

        let mut distance = q.saturating_sub(n) as f64 * SURPLUS_STROKE_PENALTY;

        // (reference stroke, drawn stroke) pairs
        let mut assigned: Vec<(usize, usize)> = Vec::with_capacity(n.min(q));
        let mut consumed = vec![false; q];
        for (i, rd) in recdata.iter().enumerate().take(n.min(q + self.swap)) {
            let lo = i.saturating_sub(self.swap);
            let hi = (i + self.swap).min(q - 1);
            let best = (lo..=hi)
                .filter(|&c| !consumed[c])
                .map(|c| {
                    let cost = self.collection.strokes()[c].model_distance(rd.best_model)
                        + c.abs_diff(i) as f64 * ORDER_OFFSET_PENALTY;
                    (c, cost)
                })
                .min_by(|a, b| a.1.total_cmp(&b.1));
            if let Some((c, cost)) = best {
                consumed[c] = true;
                assigned.push((i, c));
                distance += cost * ASSIGNMENT_WEIGHT;
            }
            if distance > limit {
                return None;
            }
        }

        let layout = self.layout_cost(recdata, &assigned);
        distance += layout * LAYOUT_WEIGHT * distance.max(LAYOUT_FLOOR);

        let element_class = element
            .bounds()
            .map_or(self.size_class, |b| size_class(&b));
        distance *= SIZE_FACTORS[element_class.abs_diff(self.size_class)];

        if n > q {
            distance += (n - q).min(MAX_EXTRA_STROKES) as f64 * MISSING_STROKE_PENALTY;
        }
        Some(distance)
    }

    /// Summed layout difference of assigned strokes close in reference order
    fn layout_cost(&self, recdata: &[StrokeRecData], assigned: &[(usize, usize)]) -> f64 {
        let mut sum = 0.0;
        for &(i, c) in assigned {
            for &(j, d) in assigned {
                let gap = i.abs_diff(j);
                if gap == 0 || gap > MAX_LAYOUT_GAP {
                    continue;
                }
                // Drawn positions are stored for the later stroke only
                let (reference, drawn) = if c > d {
                    (&recdata[i].positions[j], self.collection.position_bits(c, d))
                } else {
                    (&recdata[j].positions[i], self.collection.position_bits(d, c))
                };
                sum += pos_diff(reference, drawn) / gap as f64;
            }
        }
        sum
    }
}
