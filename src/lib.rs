//! Position-wise comparison of two equal-length nucleotide or amino-acid
//! sequences. [`comparator::compare`] is the pure entry point;
//! [`binding::invoke`] validates host-supplied arguments before calling it.

pub mod binding;
pub mod cli;
pub mod commands;
pub mod comparator;
pub mod utils;
