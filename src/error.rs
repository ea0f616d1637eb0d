//! Failures of schema inference.
//!
//! Both kinds mean the caller grouped samples that do not describe the same
//! entity. They abort the `reduce`/`upgrade` call that raised them and carry
//! enough context to report which sample was at fault.
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Object,
    Array,
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Object => f.write_str("object"),
            Container::Array => f.write_str("array"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MergeError {
    #[error("cannot merge {kind} `{left}` with {kind} `{right}`{sample}")]
    NameMismatch {
        kind: Container,
        left: String,
        right: String,
        sample: SampleIndex,
    },
    #[error("no merge rule for {left} with {right}{sample}")]
    UnsupportedMerge {
        left: &'static str,
        right: &'static str,
        sample: SampleIndex,
    },
}

/// Index of the sample being folded in when the failure happened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleIndex(pub Option<usize>);

impl fmt::Display for SampleIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(i) => write!(f, " (sample #{i})"),
            None => Ok(()),
        }
    }
}

impl MergeError {
    pub fn name_mismatch(kind: Container, left: &str, right: &str) -> Self {
        MergeError::NameMismatch {
            kind,
            left: left.to_string(),
            right: right.to_string(),
            sample: SampleIndex::default(),
        }
    }

    pub fn unsupported(left: &'static str, right: &'static str) -> Self {
        MergeError::UnsupportedMerge { left, right, sample: SampleIndex::default() }
    }

    /// Attach the index of the offending sample unless one is already set.
    pub fn at(mut self, index: usize) -> Self {
        match &mut self {
            MergeError::NameMismatch { sample, .. }
            | MergeError::UnsupportedMerge { sample, .. } => {
                sample.0.get_or_insert(index);
            }
        }
        self
    }

    pub fn sample(&self) -> Option<usize> {
        match self {
            MergeError::NameMismatch { sample, .. }
            | MergeError::UnsupportedMerge { sample, .. } => sample.0,
        }
    }
}
