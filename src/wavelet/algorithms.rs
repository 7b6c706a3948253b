//! Range algorithms over an immutable wavelet tree.
//!
//! Index ranges are half-open `Range<usize>` over positions of the original
//! sequence; symbol bands are `RangeBounds<u64>` resolved to an inclusive
//! `[min, max]` interval (so `..=3`, `2..=5` and `..` all work). An empty
//! band makes every query trivially absent/zero.
//!
//! All algorithms descend through [`NodeProxy`] views and cost one or two
//! bitmap operations per visited node; none of them allocates.

use core::ops::{Bound, Range, RangeBounds};

use crate::wavelet::{NodeProxy, WaveletTree};

/// Resolve a symbol band to inclusive bounds, clamped to the tree's alphabet.
/// `None` means the band is empty.
fn resolve_band(wt: &WaveletTree, symbols: &impl RangeBounds<u64>) -> Option<(u64, u64)> {
    let min = match symbols.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(&v) => v,
        Bound::Excluded(&v) => v.checked_add(1)?,
    };
    let max = match symbols.end_bound() {
        Bound::Unbounded => wt.max_symbol(),
        Bound::Included(&v) => v,
        Bound::Excluded(&v) => v.checked_sub(1)?,
    };
    let max = max.min(wt.max_symbol());
    (min <= max).then_some((min, max))
}

/// Count the symbols `<= max_symbol` in positions `[0, pos]`.
///
/// O(bits-per-symbol): a single descent along `max_symbol`'s path, adding the
/// size of every left subtree that is passed on the right.
#[inline]
pub fn rank_le(wt: &WaveletTree, max_symbol: u64, pos: usize) -> usize {
    debug_assert!(pos < wt.len());
    rank_le_exclusive(wt, max_symbol, pos + 1)
}

/// Count the symbols `<= max_symbol` in positions `[0, end)`. `end` may equal
/// `wt.len()`.
pub fn rank_le_exclusive(wt: &WaveletTree, max_symbol: u64, end: usize) -> usize {
    debug_assert!(end <= wt.len());
    if max_symbol >= wt.max_symbol() {
        return end;
    }

    let mut node = wt.make_root();
    let mut count = end;
    let mut acc = 0;
    loop {
        if count == 0 {
            return acc;
        }
        let zeros = node.rank0_below(count);
        if node.is_lhs_symbol(max_symbol) {
            count = zeros;
            if node.is_leaf() {
                return acc + count;
            }
            node = node.make_lhs();
        } else {
            // Every symbol routed left here is strictly below max_symbol.
            acc += zeros;
            count -= zeros;
            if node.is_leaf() {
                return acc + count;
            }
            node = node.make_rhs();
        }
    }
}

/// Count the positions in `range` whose symbol lies in the `symbols` band.
pub fn count_symbols_in(
    wt: &WaveletTree,
    range: Range<usize>,
    symbols: impl RangeBounds<u64>,
) -> usize {
    debug_assert!(range.start <= range.end && range.end <= wt.len());
    let Some((min, max)) = resolve_band(wt, &symbols) else {
        return 0;
    };
    let le = |bound: u64, end: usize| rank_le_exclusive(wt, bound, end);

    let below_max = le(max, range.end) - le(max, range.start);
    let below_min = match min.checked_sub(1) {
        Some(m) => le(m, range.end) - le(m, range.start),
        None => 0,
    };
    below_max - below_min
}

/// Count the distinct symbols occurring in `range`, restricted to the
/// `symbols` band.
///
/// Worst case O(sigma), usually far less: subtrees with an empty mapped range
/// or a band-disjoint symbol interval are pruned.
pub fn count_distinct_symbols(
    wt: &WaveletTree,
    range: Range<usize>,
    symbols: impl RangeBounds<u64>,
) -> usize {
    debug_assert!(range.end <= wt.len());
    let Some((min, max)) = resolve_band(wt, &symbols) else {
        return 0;
    };
    if range.start >= range.end {
        return 0;
    }
    if wt.bits_per_symbol() == 0 {
        // The only symbol is 0 and the resolved band contains it.
        return 1;
    }
    distinct_in_node(wt.make_root(), range.start, range.end, 0, min, max)
}

fn distinct_in_node(
    node: NodeProxy<'_>,
    lo: usize,
    hi: usize,
    prefix: u64,
    min: u64,
    max: u64,
) -> usize {
    if lo >= hi {
        return 0;
    }
    let mask = node.level_mask();
    // The node covers symbols [prefix, prefix + 2 * mask).
    if prefix + (mask << 1) - 1 < min || prefix > max {
        return 0;
    }

    let zl = node.rank0_below(lo);
    let zh = node.rank0_below(hi);

    if node.is_leaf() {
        let mut count = 0;
        if zh > zl && (min..=max).contains(&prefix) {
            count += 1;
        }
        if (hi - zh) > (lo - zl) && (min..=max).contains(&(prefix + 1)) {
            count += 1;
        }
        return count;
    }

    let (lhs, rhs) = node.make_lhs_and_rhs();
    distinct_in_node(lhs, zl, zh, prefix, min, max)
        + distinct_in_node(rhs, lo - zl, hi - zh, prefix | mask, min, max)
}

/// The `nth` smallest symbol in `range` (1-indexed, ties in sequence order)
/// together with its position in the original sequence.
///
/// Returns `None` when the range holds fewer than `nth` symbols.
/// O(bits-per-symbol).
pub fn nth_element(wt: &WaveletTree, range: Range<usize>, nth: usize) -> Option<(u64, usize)> {
    debug_assert!(range.end <= wt.len());
    if nth == 0 || range.start >= range.end || nth > range.end - range.start {
        return None;
    }
    if wt.bits_per_symbol() == 0 {
        // All symbols are zero, so order coincides with position.
        return Some((0, range.start + nth - 1));
    }
    nth_in_node(wt.make_root(), range.start, range.end, nth)
}

fn nth_in_node(node: NodeProxy<'_>, lo: usize, hi: usize, nth: usize) -> Option<(u64, usize)> {
    let zl = node.rank0_below(lo);
    let zh = node.rank0_below(hi);
    let zeros = zh - zl;

    if nth <= zeros {
        if node.is_leaf() {
            return node.select0(zl + nth).map(|pos| (0, pos));
        }
        let (symbol, pos) = nth_in_node(node.make_lhs(), zl, zh, nth)?;
        node.select0(pos + 1).map(|pos| (symbol, pos))
    } else {
        let mask = node.level_mask();
        let nth = nth - zeros;
        if node.is_leaf() {
            return node.select1((lo - zl) + nth).map(|pos| (mask, pos));
        }
        let (symbol, pos) = nth_in_node(node.make_rhs(), lo - zl, hi - zh, nth)?;
        node.select1(pos + 1).map(|pos| (symbol | mask, pos))
    }
}

/// The smallest position `>= start` whose symbol lies in the `symbols` band,
/// or `None`.
///
/// DFS over the nodes whose symbol interval intersects the band; a node whose
/// interval is contained in the band answers immediately with its first
/// mapped position, and candidates are translated upward with node-local
/// selects.
pub fn select_first(
    wt: &WaveletTree,
    start: usize,
    symbols: impl RangeBounds<u64>,
) -> Option<usize> {
    let (min, max) = resolve_band(wt, &symbols)?;
    if start >= wt.len() {
        return None;
    }
    if wt.bits_per_symbol() == 0 {
        // The resolved band contains the zero symbol, which is everywhere.
        return Some(start);
    }
    first_in_node(wt.make_root(), start, 0, min, max)
}

fn first_in_node(
    node: NodeProxy<'_>,
    start: usize,
    prefix: u64,
    min: u64,
    max: u64,
) -> Option<usize> {
    if start >= node.len() {
        return None;
    }
    let mask = node.level_mask();
    let node_max = prefix + (mask << 1) - 1;
    if node_max < min || prefix > max {
        return None;
    }
    if min <= prefix && node_max <= max {
        // Every symbol below this node qualifies.
        return Some(start);
    }

    if node.is_leaf() {
        // The interval is {prefix, prefix + 1} and exactly one of the two is
        // in the band (containment returned above, disjointness before).
        return if (min..=max).contains(&prefix) {
            node.select0(node.rank0_below(start) + 1)
        } else {
            node.select1(node.rank1_below(start) + 1)
        };
    }

    let (lhs, rhs) = node.make_lhs_and_rhs();
    let zeros = node.rank0_below(start);

    let left = first_in_node(lhs, zeros, prefix, min, max).and_then(|pos| node.select0(pos + 1));
    let right = first_in_node(rhs, start - zeros, prefix | mask, min, max)
        .and_then(|pos| node.select1(pos + 1));

    match (left, right) {
        (Some(l), Some(r)) => Some(l.min(r)),
        (left, None) => left,
        (None, right) => right,
    }
}
