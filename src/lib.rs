//! # Waverel
//!
//! Succinct (pointer-free) data structures for indexed sequence problems.
//!
//! The crate is a small stack of structures, each layer built on the one
//! below:
//!
//! - [`BitVec`] - a packed bit sequence with block and chunk access
//! - [`IntVec`] - fixed-width unsigned integers packed into a [`BitVec`]
//! - [`Bitmap`] - an immutable bit sequence with O(1) rank and near-O(1)
//!   select via a two-level popcount directory
//! - [`WaveletTree`] - a symbol sequence encoded as a single level-interleaved
//!   bitmap; access/rank/select in O(bits-per-symbol)
//! - [`BinaryRelation`] - a set of (object, label) pairs answering ordered
//!   range queries in O(log sigma)
//!
//! All structures are build-once/query-many: construction allocates, queries
//! never do (wavelet-tree nodes are borrowed views). Since every query takes
//! `&self`, instances can be shared freely across reader threads.
//!
//! ## Module Organization
//!
//! - [`bits`] - bit sequence, packed integers, rank/select bitmap
//! - [`wavelet`] - wavelet tree, node navigation, range algorithms
//! - [`relation`] - binary relation over the wavelet tree
//!
//! ## Quick Start
//!
//! ```
//! use waverel::{BitVec, Bitmap};
//!
//! // Bits are written right-to-left: s[0] is the most significant character.
//! let bm = Bitmap::new(BitVec::from_bit_str("10100110101111"));
//!
//! // rank1(i) counts 1-bits in positions [0, i].
//! assert_eq!(bm.rank1(13), 9);
//!
//! // select1(k) finds the position of the k-th 1-bit (1-indexed).
//! assert_eq!(bm.select1(5), Some(5));
//! assert_eq!(bm.select0(3), Some(9));
//! ```
//!
//! ## Conventions
//!
//! - `rank` is inclusive: `rank1(i)` counts positions `[0, i]`, so
//!   `rank0(i) + rank1(i) == i + 1`.
//! - `select` is 1-indexed and returns `Option<usize>`; `None` means the
//!   occurrence does not exist. Pair-returning queries return `Option<Pair>`.
//! - Out-of-range indices and over-wide symbols are contract violations:
//!   checked by `debug_assert!`, not surfaced as runtime errors.
//!
//! ## Features
//!
//! - `std` (default) - std library; disable for `no_std` + `alloc`
//! - `serde` - serialization/deserialization of the data-carrying types

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

use thiserror::Error;

// =============================================================================
// Core modules (organized by category)
// =============================================================================

/// Bit sequences, packed integer vectors and the rank/select bitmap.
pub mod bits;

/// Wavelet tree, node navigation and range algorithms.
pub mod wavelet;

/// Binary relation queries over a wavelet tree.
pub mod relation;

/// Internal broadword utilities (not part of the public API).
pub(crate) mod util;

// =============================================================================
// Public re-exports (convenience)
// =============================================================================

pub use bits::{BitVec, Bitmap, IntVec};
pub use relation::{BinaryRelation, Pair};
pub use util::select_in_word;
pub use wavelet::WaveletTree;

// =============================================================================
// Errors
// =============================================================================

/// Errors reported by fallible constructors.
///
/// Everything else in the crate is either a contract violation (a programmer
/// bug, checked by `debug_assert!`) or an absent result (`None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// An [`IntVec`] was requested with a bit width that does not fit in a
    /// storage block.
    #[error("int vector width of {requested} bits does not fit a {max}-bit block")]
    IntWidthTooLarge {
        /// The requested bits-per-element.
        requested: u32,
        /// The widest supported element, one bit less than a block.
        max: u32,
    },
}
