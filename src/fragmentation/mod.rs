//! Fragmentation Module: Threshold Search and Map Builder
//!
//! The two analysis entry points over paired (source, feature) time series.
//!
//! ## Data Contract
//!
//! Both series are `Array2<u32>` with rows as samples: row t of the source
//! series and row t of the feature series are one paired observation. The
//! series must have the same number of rows; each `FeatureRange` must fit
//! the feature record. Violations are rejected before any computation.
//!
//! ## Reference Entropies
//!
//! Both entry points anchor their measures to the same ceiling: with F the
//! feature slice and S the full source record,
//!
//!   maxSharedEntropy = H(F) + H(S) - H(F, S)
//!
//! is everything the source as a whole knows about the feature. The search
//! reports max shared entropy as a fraction of H(F); the map offers it as
//! one of two normalization denominators and appends both H(F) and
//! maxSharedEntropy as raw diagnostics per row.
//!
//! ## Cost Model
//!
//! Each (feature, partition) cell requires one fresh pass over all samples
//! to build two frequency tables, and the number of partitions grows as
//! 2ⁿ - 1 in the source width. `max_partition_size` is the only cost
//! control; wide sources should bound it to singletons and pairs.

mod map;
mod search;
mod series;

pub use map::{fragmentation_map, FragmentationMap, Normalization};
pub use search::{
    calc_fragmentation, fragmentation_set, FragmentationResult, ThresholdReference,
};
pub use series::{indices_to_values, FeatureRange};

use ndarray::Array2;

use crate::encoding::StateEncoder;
use crate::error::AnalysisError;

/// Source and feature series must pair one record per time step.
pub(crate) fn check_sample_counts(
    source: &Array2<u32>,
    features: &Array2<u32>,
) -> Result<(), AnalysisError> {
    if source.nrows() != features.nrows() {
        return Err(AnalysisError::LengthMismatch {
            source: source.nrows(),
            features: features.nrows(),
        });
    }
    Ok(())
}

/// The widest tuple an analysis will encode must fit a 64-bit key.
pub(crate) fn check_key_capacity(
    encoder: &StateEncoder,
    width: usize,
) -> Result<(), AnalysisError> {
    if width > encoder.max_encodable_width() {
        return Err(AnalysisError::KeyCapacityExceeded {
            width,
            base: encoder.base(),
        });
    }
    Ok(())
}
