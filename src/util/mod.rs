//! Internal utilities for bit manipulation.
//!
//! This module contains low-level broadword helpers used by the succinct data
//! structures. Most users should not need to use these directly.

pub(crate) mod broadword;

pub use broadword::select_in_word;
pub(crate) use broadword::{ceil_log2, lsb_mask, used_bits};
