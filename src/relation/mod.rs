//! Binary relation: a set of (object, label) pairs with ordered range
//! queries.
//!
//! # Structure
//!
//! Pairs are sorted by object, then label, and deduplicated. Two succinct
//! structures answer every query:
//!
//! - the **label sequence** (the labels in sorted-pair order) in a
//!   [`WaveletTree`] over `max(1, ceil_log2(num_labels))` bits;
//! - the **object-boundary bitmap**: for each object in ascending order, one
//!   0 per pair of that object, then one 1. Its length is `len + num_objects`
//!   and `select1(x + 1)` marks the end of object `x`, so the wavelet-tree
//!   positions of object `x` are `[select1(x) - x + 1, select1(x + 1) - x)`
//!   (with `select1(0)` read as just before the sequence).
//!
//! Label-restricted counting reduces to rank descents on the wavelet tree;
//! object restriction reduces to boundary-bitmap selects. Every query is
//! O(log sigma) wavelet-tree descents, each descent O(bits-per-label).

use core::ops::RangeInclusive;

use crate::bits::{BitVec, Bitmap, IntVec};
use crate::util::ceil_log2;
use crate::wavelet::{self, WaveletTree};

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One (object, label) pair of a [`BinaryRelation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pair {
    /// The object coordinate.
    pub object: usize,
    /// The label coordinate.
    pub label: u64,
}

/// An immutable set of (object, label) pairs supporting rank, ordered
/// nth-element and select queries over both coordinates.
///
/// Objects range over `0..num_objects`, labels over `0..num_labels`, both
/// derived from the constructor input as max + 1. Queries taking objects or
/// labels outside those ranges are contract violations.
///
/// *Object-major* order compares pairs by object first, then label;
/// *label-major* is the transpose.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinaryRelation {
    /// Wavelet tree over the label sequence in sorted-pair order.
    wtree: WaveletTree,
    /// Object-boundary bitmap, `len + num_objects` bits.
    boundaries: Bitmap,
    /// Exact label alphabet size (the tree alone only knows `2^w`).
    num_labels: u64,
}

impl BinaryRelation {
    /// Build a relation from `pairs`.
    ///
    /// The input does not need to be sorted; duplicates are discarded.
    pub fn new(pairs: &[Pair]) -> Self {
        if pairs.is_empty() {
            return Self::default();
        }

        let mut sorted = pairs.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let num_objects = sorted.last().map_or(0, |p| p.object) + 1;
        let num_labels = sorted.iter().map(|p| p.label).max().unwrap_or(0) + 1;

        let mut labels = IntVec::new(sorted.len(), ceil_log2(num_labels).max(1))
            .expect("label width is below the block size");
        for (i, pair) in sorted.iter().enumerate() {
            labels.set(i, pair.label);
        }

        let mut boundaries = BitVec::with_len(sorted.len() + num_objects);
        let mut next = 0;
        for object in 0..num_objects {
            while next < sorted.len() && sorted[next].object == object {
                next += 1;
            }
            boundaries.set(next + object, true);
        }

        debug!(
            "binary relation: {} pairs, {} objects, {} labels",
            sorted.len(),
            num_objects,
            num_labels
        );

        Self {
            wtree: WaveletTree::new(&labels),
            boundaries: Bitmap::new(boundaries),
            num_labels,
        }
    }

    /// Number of pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.wtree.len()
    }

    /// Check whether the relation has no pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.wtree.is_empty()
    }

    /// Size of the object alphabet (max object + 1).
    #[inline]
    pub fn num_objects(&self) -> usize {
        self.boundaries.len() - self.wtree.len()
    }

    /// Size of the label alphabet (max label + 1).
    #[inline]
    pub fn num_labels(&self) -> u64 {
        self.num_labels
    }

    /// Returns the heap memory usage in bytes.
    pub fn heap_size(&self) -> usize {
        self.wtree.heap_size() + self.boundaries.heap_size()
    }

    // ------------------------------------------------------------------
    // Relation view
    // ------------------------------------------------------------------

    /// Count the pairs with object `<= max_object` and label `<= max_label`.
    pub fn rank(&self, max_object: usize, max_label: u64) -> usize {
        if self.is_empty() {
            return 0;
        }
        debug_assert!(max_object < self.num_objects());
        wavelet::rank_le_exclusive(&self.wtree, max_label, self.upper_bound(max_object))
    }

    /// Count the pairs with object in `objects` and label `<= max_label`.
    pub fn rank_objects(&self, objects: RangeInclusive<usize>, max_label: u64) -> usize {
        let (x, y) = objects.into_inner();
        if x > y {
            return 0;
        }
        let below = match x.checked_sub(1) {
            Some(prev) => self.rank(prev, max_label),
            None => 0,
        };
        self.rank(y, max_label) - below
    }

    /// Count the pairs with object `<= max_object` and label in `labels`.
    pub fn rank_labels(&self, max_object: usize, labels: RangeInclusive<u64>) -> usize {
        let (alpha, beta) = labels.into_inner();
        if alpha > beta {
            return 0;
        }
        let below = match alpha.checked_sub(1) {
            Some(prev) => self.rank(max_object, prev),
            None => 0,
        };
        self.rank(max_object, beta) - below
    }

    /// The `nth` pair (1-indexed) in object-major order among pairs with
    /// object `>= min_object` and label in `labels`, or `None`.
    ///
    /// The sorted-pair order of the label sequence *is* object-major order,
    /// so the pair is located by a binary search over the object axis (the
    /// cumulative band count per object is monotone), then resolved inside
    /// the owning object, where labels are sorted, by one `select_first`.
    pub fn nth_element_object_major(
        &self,
        min_object: usize,
        labels: RangeInclusive<u64>,
        nth: usize,
    ) -> Option<Pair> {
        let (alpha, beta) = labels.into_inner();
        if nth == 0 || alpha > beta || self.is_empty() || min_object >= self.num_objects() {
            return None;
        }

        let band = alpha..=beta;
        let start = self.lower_bound(min_object);
        let before = self.band_count_below(band.clone(), start);

        // Smallest object whose cumulative band count reaches nth.
        let mut first = min_object;
        let mut last = self.num_objects();
        while first < last {
            let mid = first + (last - first) / 2;
            let count = self.band_count_below(band.clone(), self.upper_bound(mid)) - before;
            if count < nth {
                first = mid + 1;
            } else {
                last = mid;
            }
        }
        if first == self.num_objects() {
            return None;
        }

        let object = first;
        let in_prior_objects =
            self.band_count_below(band.clone(), self.lower_bound(object)) - before;
        let nth_within = nth - in_prior_objects;

        let first_pos = wavelet::select_first(&self.wtree, self.lower_bound(object), band)?;
        // Labels are sorted within one object, so band members are adjacent.
        let pos = first_pos + (nth_within - 1);
        Some(Pair {
            object,
            label: self.wtree.access(pos),
        })
    }

    /// The `nth` pair (1-indexed) in label-major order among pairs with
    /// object in `objects` and label `>= min_label`, or `None`.
    ///
    /// Binary search over the label axis: the count of band pairs inside the
    /// mapped object range is monotone in the band's upper end. The owning
    /// label found, the pair is the k-th occurrence of that label past the
    /// range start, recovered with one wavelet select.
    pub fn nth_element_label_major(
        &self,
        objects: RangeInclusive<usize>,
        min_label: u64,
        nth: usize,
    ) -> Option<Pair> {
        let (x, y) = objects.into_inner();
        if nth == 0 || x > y || self.is_empty() || x >= self.num_objects() {
            return None;
        }
        debug_assert!(y < self.num_objects());

        let lo = self.lower_bound(x);
        let hi = self.upper_bound(y);
        let count_le = |label| wavelet::count_symbols_in(&self.wtree, lo..hi, min_label..=label);

        if count_le(self.wtree.max_symbol()) < nth {
            return None;
        }

        // Smallest label whose cumulative count reaches nth.
        let mut first = min_label;
        let mut last = self.wtree.max_symbol();
        while first < last {
            let mid = first + (last - first) / 2;
            if count_le(mid) < nth {
                first = mid + 1;
            } else {
                last = mid;
            }
        }

        let label = first;
        let in_lower_labels = match first.checked_sub(1) {
            Some(prev) if prev >= min_label => count_le(prev),
            _ => 0,
        };
        let nth_within = nth - in_lower_labels;

        let skip = self.wtree.rank_exclusive(label, lo);
        let pos = self.wtree.select(label, skip + nth_within)?;
        Some(Pair {
            object: self.associated_object(pos),
            label,
        })
    }

    /// The first pair `>= start` in object-major order whose label lies in
    /// `labels`, or `None`.
    pub fn lower_bound_object_major(
        &self,
        labels: RangeInclusive<u64>,
        start: Pair,
    ) -> Option<Pair> {
        let (alpha, beta) = labels.into_inner();
        if alpha > beta || self.is_empty() || start.object >= self.num_objects() {
            return None;
        }

        // Map `start` to the first wavelet-tree position not below it: skip
        // the pairs of start.object with a smaller label (labels are sorted
        // within the object).
        let lo = self.lower_bound(start.object);
        let skipped = match start.label.checked_sub(1) {
            Some(prev) => {
                let hi = self.upper_bound(start.object);
                wavelet::count_symbols_in(&self.wtree, lo..hi, 0..=prev)
            }
            None => 0,
        };

        let pos = wavelet::select_first(&self.wtree, lo + skipped, alpha..=beta)?;
        Some(Pair {
            object: self.associated_object(pos),
            label: self.wtree.access(pos),
        })
    }

    // ------------------------------------------------------------------
    // Object view
    // ------------------------------------------------------------------

    /// Number of objects `<= x` associated with `fixed_label`.
    pub fn obj_rank(&self, x: usize, fixed_label: u64) -> usize {
        self.rank_labels(x, fixed_label..=fixed_label)
    }

    /// Number of objects `< x` associated with `fixed_label`.
    pub fn obj_exclusive_rank(&self, x: usize, fixed_label: u64) -> usize {
        match x.checked_sub(1) {
            Some(prev) => self.obj_rank(prev, fixed_label),
            None => 0,
        }
    }

    /// The `nth` object `>= object_start` (1-indexed) associated with
    /// `fixed_label`, or `None`.
    pub fn obj_select(&self, object_start: usize, fixed_label: u64, nth: usize) -> Option<usize> {
        if nth == 0 || self.is_empty() {
            return None;
        }
        let skip = self.obj_exclusive_rank(object_start, fixed_label);
        let pos = self.wtree.select(fixed_label, skip + nth)?;
        Some(self.associated_object(pos))
    }

    // ------------------------------------------------------------------
    // Label view
    // ------------------------------------------------------------------

    /// Number of distinct labels in `labels` held by at least one object in
    /// `objects`.
    pub fn count_distinct_labels(
        &self,
        objects: RangeInclusive<usize>,
        labels: RangeInclusive<u64>,
    ) -> usize {
        let (x, y) = objects.into_inner();
        if x > y || self.is_empty() || x >= self.num_objects() {
            return 0;
        }
        debug_assert!(y < self.num_objects());
        let range = self.lower_bound(x)..self.upper_bound(y);
        wavelet::count_distinct_symbols(&self.wtree, range, labels)
    }

    // ------------------------------------------------------------------
    // Boundary-bitmap accessors
    // ------------------------------------------------------------------

    /// Position of the `x`-th separator bit, `1 <= x <= num_objects`.
    fn boundary(&self, x: usize) -> usize {
        self.boundaries
            .select1(x)
            .expect("every object has a separator bit")
    }

    /// First label-sequence position belonging to object `x`,
    /// `x <= num_objects`.
    fn lower_bound(&self, x: usize) -> usize {
        if x == 0 {
            0
        } else {
            self.boundary(x) + 1 - x
        }
    }

    /// One past the last label-sequence position of object `x`.
    fn upper_bound(&self, x: usize) -> usize {
        self.boundary(x + 1) - x
    }

    /// The object owning the label-sequence position `pos`.
    fn associated_object(&self, pos: usize) -> usize {
        let zero = self
            .boundaries
            .select0(pos + 1)
            .expect("every pair has a boundary-bitmap zero");
        self.boundaries.rank1(zero)
    }

    /// Count of pairs with label in `labels` among the first `end` positions
    /// of the label sequence.
    fn band_count_below(&self, labels: RangeInclusive<u64>, end: usize) -> usize {
        wavelet::count_symbols_in(&self.wtree, 0..end, labels)
    }
}
