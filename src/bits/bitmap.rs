//! Rank/select directory over an immutable bit sequence.
//!
//! # Structure
//!
//! - **Super-blocks**: absolute cumulative popcount every 640 bits, stored in
//!   an [`IntVec`] with `ceil_log2(n)` bits per entry. Entry `i` counts the
//!   ones in `[0, (i + 1) * 640)`; there are `ceil(n / 640) - 1` entries (the
//!   final, partial super-block is never stored).
//! - **Blocks**: the 64-bit storage blocks of the sequence itself, popcounted
//!   on the fly. A rank touches at most 640 / 64 = 10 of them.
//!
//! # Query
//!
//! `rank1(i)` = super-block lookup + whole-block popcounts + one chunk
//! popcount. `select1(nth)` binary-searches the super-blocks, scans whole
//! blocks, then finishes with a broadword in-word select.

use crate::bits::{BitVec, IntVec};
use crate::util::{ceil_log2, select_in_word};

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bits covered by one super-block entry. A multiple of the block width.
const BITS_PER_SUPER_BLOCK: usize = 640;

/// Bits per storage block.
const BITS_PER_BLOCK: usize = BitVec::BITS_PER_BLOCK;

/// An immutable bit sequence with constant-time rank and near-constant-time
/// select.
///
/// Rank is inclusive (`rank1(i)` counts positions `[0, i]`) and select is
/// 1-indexed (`select1(k)` is the position of the k-th set bit, or `None`).
/// The underlying sequence is frozen at construction.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bitmap {
    sequence: BitVec,
    /// Cumulative ones at each super-block boundary.
    super_blocks: IntVec,
}

impl Bitmap {
    /// Build the rank directory for `sequence`.
    pub fn new(sequence: BitVec) -> Self {
        let n = sequence.len();
        let num_super_blocks = n.div_ceil(BITS_PER_SUPER_BLOCK).saturating_sub(1);

        let mut super_blocks = IntVec::new(num_super_blocks, ceil_log2(n as u64).max(1))
            .expect("a cumulative count always fits in a block");

        let mut sum = 0usize;
        for i in 0..num_super_blocks {
            let base = i * BITS_PER_SUPER_BLOCK;
            for offset in (0..BITS_PER_SUPER_BLOCK).step_by(BITS_PER_BLOCK) {
                let block = sequence.get_block((base + offset) / BITS_PER_BLOCK);
                sum += block.count_ones() as usize;
            }
            super_blocks.set(i, sum as u64);
        }

        debug!(
            "bitmap: {} bits, {} super-block entries of {} bits",
            n,
            num_super_blocks,
            super_blocks.bits_per_element()
        );

        Self {
            sequence,
            super_blocks,
        }
    }

    /// Number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Check whether the bitmap has no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Total number of set bits.
    #[inline]
    pub fn count_ones(&self) -> usize {
        self.sequence.count_ones()
    }

    /// Returns the heap memory usage in bytes.
    pub fn heap_size(&self) -> usize {
        self.sequence.heap_size() + self.super_blocks.heap_size()
    }

    /// The underlying bit sequence.
    #[inline]
    pub fn sequence(&self) -> &BitVec {
        &self.sequence
    }

    /// Return bit `pos`.
    #[inline]
    pub fn access(&self, pos: usize) -> bool {
        self.sequence.get(pos)
    }

    /// Count the set bits in positions `[0, pos]`.
    pub fn rank1(&self, pos: usize) -> usize {
        debug_assert!(pos < self.len());

        let mut sum = match (pos / BITS_PER_SUPER_BLOCK).checked_sub(1) {
            Some(i) => self.super_blocks.get(i) as usize,
            None => 0,
        };

        let mut current = pos - pos % BITS_PER_SUPER_BLOCK;
        while current + BITS_PER_BLOCK <= pos {
            let block = self.sequence.get_block(current / BITS_PER_BLOCK);
            sum += block.count_ones() as usize;
            current += BITS_PER_BLOCK;
        }

        sum + self
            .sequence
            .get_chunk(current, pos - current + 1)
            .count_ones() as usize
    }

    /// Count the clear bits in positions `[0, pos]`.
    #[inline]
    pub fn rank0(&self, pos: usize) -> usize {
        pos + 1 - self.rank1(pos)
    }

    /// Count the set bits in positions `[0, pos)`. `pos` may equal `len`.
    #[inline]
    pub fn rank1_exclusive(&self, pos: usize) -> usize {
        debug_assert!(pos <= self.len());
        match pos.checked_sub(1) {
            Some(p) => self.rank1(p),
            None => 0,
        }
    }

    /// Count the clear bits in positions `[0, pos)`. `pos` may equal `len`.
    #[inline]
    pub fn rank0_exclusive(&self, pos: usize) -> usize {
        pos - self.rank1_exclusive(pos)
    }

    /// Position of the `nth` set bit (1-indexed), or `None` if fewer than
    /// `nth` bits are set.
    pub fn select1(&self, nth: usize) -> Option<usize> {
        if nth == 0 {
            return None;
        }
        let n = self.len();

        // (a) Binary search for the last super-block with fewer than `nth`
        // ones before its end, so the answer lies beyond it.
        let mut idx = 0;
        let mut count = 0;
        {
            let mut first = 0;
            let mut last = self.super_blocks.len();
            while first < last {
                let mid = first + (last - first) / 2;
                if (self.super_blocks.get(mid) as usize) < nth {
                    first = mid + 1;
                } else {
                    last = mid;
                }
            }
            if first > 0 {
                idx = first * BITS_PER_SUPER_BLOCK;
                count = self.super_blocks.get(first - 1) as usize;
            }
        }

        // (b) Sequential popcount of whole blocks (at most 10) until the
        // block holding the answer.
        let last = (idx + BITS_PER_SUPER_BLOCK).min(n);
        while idx + BITS_PER_BLOCK <= last {
            let ones = self.sequence.get_block(idx / BITS_PER_BLOCK).count_ones() as usize;
            if count + ones >= nth {
                break;
            }
            count += ones;
            idx += BITS_PER_BLOCK;
        }
        if idx >= n {
            return None;
        }

        // (c) Broadword select inside the final chunk.
        let width = (n - idx).min(BITS_PER_BLOCK);
        let word = self.sequence.get_chunk(idx, width);
        let pos = select_in_word(word, nth - count - 1) as usize;
        if pos >= width {
            return None;
        }
        Some(idx + pos)
    }

    /// Position of the `nth` clear bit (1-indexed), or `None` if fewer than
    /// `nth` bits are clear.
    ///
    /// The zero side keeps no auxiliary index; this is a plain binary search
    /// over [`rank0`](Bitmap::rank0).
    pub fn select0(&self, nth: usize) -> Option<usize> {
        let n = self.len();
        if nth == 0 || n == 0 || self.rank0(n - 1) < nth {
            return None;
        }

        // Smallest pos with rank0(pos) >= nth; that position holds the nth
        // clear bit.
        let mut first = 0;
        let mut last = n - 1;
        while first < last {
            let mid = first + (last - first) / 2;
            if self.rank0(mid) < nth {
                first = mid + 1;
            } else {
                last = mid;
            }
        }
        Some(first)
    }
}
