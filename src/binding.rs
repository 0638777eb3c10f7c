//! Argument validation layer between a host environment and [`compare`].
//!
//! A host hands over its arguments as [`HostValue`]s together with the number
//! of results it expects back. Every check runs before any comparison, so a
//! call either yields a complete [`MatchVector`] or a [`BindingError`].

use crate::comparator::{compare, MatchVector};
use crate::utils::AlphabetMode;
use std::fmt;

/// An argument as received from the host, before validation.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// Character matrix stored row by row
    Chars(Vec<Vec<u8>>),
    Numeric(Vec<f64>),
}

impl HostValue {
    /// Wraps a single-row character array.
    pub fn row(chars: impl Into<Vec<u8>>) -> Self {
        HostValue::Chars(vec![chars.into()])
    }

    fn type_name(&self) -> &'static str {
        match self {
            HostValue::Chars(_) => "char",
            HostValue::Numeric(_) => "numeric",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// Wrong number of inputs or outputs
    Arity { id: &'static str, message: String },
    /// An input is not a character array
    Type { id: &'static str, message: String },
    /// An input has more than one row or the lengths differ
    Shape { id: &'static str, message: String },
}

impl BindingError {
    fn arity(id: &'static str, message: impl Into<String>) -> Self {
        BindingError::Arity {
            id,
            message: message.into(),
        }
    }

    fn type_error(message: impl Into<String>) -> Self {
        BindingError::Type {
            id: "prhs",
            message: message.into(),
        }
    }

    fn shape(message: impl Into<String>) -> Self {
        BindingError::Shape {
            id: "prhs",
            message: message.into(),
        }
    }
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::Arity { id, message }
            | BindingError::Type { id, message }
            | BindingError::Shape { id, message } => write!(f, "cmprSeq:{}: {}", id, message),
        }
    }
}

impl std::error::Error for BindingError {}

/// Validates host arguments and runs the comparison.
///
/// Inputs are `[seq_a, seq_b, alphabet]` with the alphabet selector optional;
/// anything past the third input is ignored. Exactly one output must be requested.
pub fn invoke(inputs: &[HostValue], num_outputs: usize) -> Result<MatchVector, BindingError> {
    invoke_with(inputs, num_outputs, compare)
}

/// Like [`invoke`], with the comparison delegated to `comparator` once all
/// arguments have been validated.
pub fn invoke_with<F>(
    inputs: &[HostValue],
    num_outputs: usize,
    comparator: F,
) -> Result<MatchVector, BindingError>
where
    F: FnOnce(&[u8], &[u8], AlphabetMode) -> MatchVector,
{
    if inputs.len() < 2 {
        return Err(BindingError::arity("nrhs", "Need >= 2 inputs."));
    }

    let seq_a = single_row(&inputs[0], "SeqA")?;

    if num_outputs != 1 {
        return Err(BindingError::arity("nlhs", "Need 1 output."));
    }

    let seq_b = single_row(&inputs[1], "SeqB")?;
    if seq_a.len() != seq_b.len() {
        return Err(BindingError::shape(format!(
            "SeqA and SeqB must be same size. Got {} and {}.",
            seq_a.len(),
            seq_b.len()
        )));
    }

    let mode = match inputs.get(2) {
        Some(selector) => parse_selector(selector)?,
        None => AlphabetMode::default(),
    };
    log::debug!("Comparing {} positions in {:?} mode", seq_a.len(), mode);

    Ok(comparator(seq_a, seq_b, mode))
}

/// Returns the characters of a 1xN (or empty) character array.
fn single_row<'a>(value: &'a HostValue, name: &str) -> Result<&'a [u8], BindingError> {
    let rows = match value {
        HostValue::Chars(rows) => rows,
        other => {
            return Err(BindingError::type_error(format!(
                "{} must be a char array, got {}.",
                name,
                other.type_name()
            )))
        }
    };
    match rows.as_slice() {
        [] => Ok(&[] as &[u8]),
        [row] => Ok(row.as_slice()),
        _ => Err(BindingError::shape(format!(
            "{} must be a 1xN vector, got {} rows.",
            name,
            rows.len()
        ))),
    }
}

fn parse_selector(value: &HostValue) -> Result<AlphabetMode, BindingError> {
    match value {
        HostValue::Chars(rows) => Ok(rows
            .iter()
            .flatten()
            .next()
            .map_or_else(AlphabetMode::default, |&c| AlphabetMode::from_selector(c))),
        other => Err(BindingError::type_error(format!(
            "Alphabet must be a char, got {}.",
            other.type_name()
        ))),
    }
}
