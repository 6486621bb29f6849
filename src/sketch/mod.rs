//! MinHash sketching — the approximate half of the pipeline
//!
//! A sketch is a fixed-width signature of a document's token set: one slot
//! per independent hash permutation, each slot holding the minimum hash
//! value any token produced under that permutation. Two sketches of equal
//! width estimate the Jaccard similarity of the underlying token sets by
//! the fraction of slots on which they agree.
//!
//! The estimate is probabilistic (hash-collision variance, standard error
//! ≈ 1/√width) but exactly reproducible: seeds are derived from the slot
//! index alone, so the same text always produces the same sketch.

use crate::{MimesisError, MimesisResult};
use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Default sketch width (number of hash permutations).
pub const DEFAULT_PERMUTATIONS: usize = 128;

/// Slot value meaning "no token observed under this permutation".
const SENTINEL: u64 = u64::MAX;

// ─── Sketch Builder ────────────────────────────────────────────────

/// Derives one independent hash permutation per slot and applies them to
/// token sequences.
///
/// Reusable: one builder sketches any number of documents, and all of its
/// sketches are mutually comparable. Two builders of equal width are
/// interchangeable — seeds depend only on the slot index.
#[derive(Debug, Clone)]
pub struct SketchBuilder {
    seeds: Vec<u64>,
}

impl SketchBuilder {
    /// Creates a builder with `permutations` independent hash slots.
    ///
    /// # Errors
    /// `InvalidArgument` when `permutations` is zero. Width is fixed by
    /// configuration, and a zero-width sketch can estimate nothing.
    pub fn new(permutations: usize) -> MimesisResult<Self> {
        if permutations == 0 {
            return Err(MimesisError::InvalidArgument(
                "permutation count must be at least 1".into(),
            ));
        }
        let seeds = (0..permutations as u64).map(splitmix64).collect();
        Ok(Self { seeds })
    }

    /// Sketch width this builder produces.
    pub fn width(&self) -> usize {
        self.seeds.len()
    }

    /// Builds the sketch of one token sequence.
    ///
    /// Pure function of (tokens, width): slot p holds the minimum seeded
    /// XXH3 hash of any token's bytes under permutation p. An empty
    /// sequence yields the sentinel sketch — every slot `u64::MAX`, "no
    /// minimum observed". That is deliberately not an error and not
    /// special-cased here or in [`Sketch::agreement`]: two empty documents
    /// produce slot-identical sketches, and it is the engine's
    /// empty-candidate guard that turns that into a 0.0 final score.
    pub fn build<S: AsRef<str>>(&self, tokens: &[S]) -> Sketch {
        let mut slots = vec![SENTINEL; self.seeds.len()];
        for token in tokens {
            let bytes = token.as_ref().as_bytes();
            for (slot, &seed) in slots.iter_mut().zip(&self.seeds) {
                let hashed = xxh3_64_with_seed(bytes, seed);
                if hashed < *slot {
                    *slot = hashed;
                }
            }
        }
        Sketch { slots }
    }
}

// ─── Sketch + Comparator ───────────────────────────────────────────

/// A fixed-width MinHash signature of one document's token set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sketch {
    slots: Vec<u64>,
}

impl Sketch {
    /// Number of slots (= permutations) in this sketch.
    pub fn width(&self) -> usize {
        self.slots.len()
    }

    /// Read-only view of the slot values.
    pub fn slots(&self) -> &[u64] {
        &self.slots
    }

    /// Estimates the Jaccard similarity of the two underlying token sets:
    /// the fraction of slots holding literally equal values, in [0.0, 1.0].
    ///
    /// # Errors
    /// `InvalidArgument` when the widths differ. Width is fixed by
    /// configuration, never inferred from data, so a mismatch is a
    /// programming error upstream.
    pub fn agreement(&self, other: &Sketch) -> MimesisResult<f64> {
        if self.width() != other.width() {
            return Err(MimesisError::InvalidArgument(format!(
                "cannot compare sketches of width {} and {}",
                self.width(),
                other.width()
            )));
        }
        let agreeing = self
            .slots
            .iter()
            .zip(&other.slots)
            .filter(|(a, b)| a == b)
            .count();
        Ok(agreeing as f64 / self.slots.len() as f64)
    }
}

/// SplitMix64 mix, used to turn slot indices into independent seeds.
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

// ─── Tests ─────────────────────────────────────────────────────────
