//! Crate error type.
//!
//! Only caller contract violations are reported here, and always before any
//! partial computation has been performed. Degenerate analysis outcomes
//! (a feature with zero entropy, no partition clearing the threshold) are
//! ordinary result values, not errors.

use std::fmt;

/// Contract violations reported by the analysis entry points.
//
// NOTE: this type is implemented by hand rather than via `thiserror` because
// the `LengthMismatch::source` field name (fixed by the spec) collides with
// `thiserror`'s convention of treating any field named `source` as the error's
// underlying cause, which requires `usize: std::error::Error`. The `Display`
// strings below are identical to the former `#[error(...)]` attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Source and feature series must pair one record per time step.
    LengthMismatch { source: usize, features: usize },

    /// Normalization mode string was neither "feature" nor "source".
    UnknownNormalization(String),

    /// Feature range does not address a valid slice of the feature record.
    InvalidFeatureRange {
        first: usize,
        last: usize,
        width: usize,
    },

    /// The widest tuple this analysis would encode cannot be held
    /// collision-free in a 64-bit state key.
    KeyCapacityExceeded { width: usize, base: u64 },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::LengthMismatch { source, features } => write!(
                f,
                "source series has {source} samples but feature series has {features}"
            ),
            AnalysisError::UnknownNormalization(mode) => write!(
                f,
                "unknown normalization mode {mode:?} (expected \"feature\" or \"source\")"
            ),
            AnalysisError::InvalidFeatureRange { first, last, width } => write!(
                f,
                "feature range [{first}, {last}] does not fit a record of width {width}"
            ),
            AnalysisError::KeyCapacityExceeded { width, base } => write!(
                f,
                "a width-{width} tuple at base {base} exceeds the 64-bit state key capacity"
            ),
        }
    }
}

impl std::error::Error for AnalysisError {}
