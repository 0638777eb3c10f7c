use crate::utils::AlphabetMode;
use itertools::Itertools;
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use std::fmt;

/// Per-position match flags produced by [`compare`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchVector(Vec<bool>);

impl MatchVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, bool> {
        self.0.iter()
    }

    pub fn count_matches(&self) -> usize {
        self.0.iter().filter(|&&m| m).count()
    }

    pub fn into_inner(self) -> Vec<bool> {
        self.0
    }
}

impl From<Vec<bool>> for MatchVector {
    fn from(matches: Vec<bool>) -> Self {
        Self(matches)
    }
}

impl fmt::Display for MatchVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.iter().map(|&m| if m { '1' } else { '0' }).join(" ");
        write!(f, "{}", digits)
    }
}

/// Compares two sequences position by position under the wildcard rules of `mode`.
///
/// Both sequences are expected to have the same length; callers that cannot
/// guarantee this should go through [`crate::binding::invoke`]. Given unequal
/// lengths only the common prefix is compared.
pub fn compare(seq_a: &[u8], seq_b: &[u8], mode: AlphabetMode) -> MatchVector {
    seq_a
        .iter()
        .zip(seq_b)
        .map(|(&a, &b)| mode.matches(a, b))
        .collect::<Vec<_>>()
        .into()
}

/// Same result as [`compare`], computed on the current rayon pool with at
/// least `chunk_size` positions per task.
pub fn compare_par(
    seq_a: &[u8],
    seq_b: &[u8],
    mode: AlphabetMode,
    chunk_size: usize,
) -> MatchVector {
    seq_a
        .par_iter()
        .zip(seq_b.par_iter())
        .with_min_len(chunk_size.max(1))
        .map(|(&a, &b)| mode.matches(a, b))
        .collect::<Vec<_>>()
        .into()
}
