//! Bit-level storage: packed bit sequences, fixed-width integer vectors and
//! the rank/select bitmap.
//!
//! [`BitVec`] is the storage primitive everything else is packed into.
//! [`IntVec`] reads and writes fixed-width integers as (possibly straddling)
//! chunks of a [`BitVec`]. [`Bitmap`] freezes a [`BitVec`] and adds a
//! two-level popcount directory for rank and select.

mod bit_vec;
mod bitmap;
mod int_vec;

pub use bit_vec::BitVec;
pub use bitmap::Bitmap;
pub use int_vec::IntVec;
