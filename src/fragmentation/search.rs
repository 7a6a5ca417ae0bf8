//! Threshold search for the smallest informative source partition.

use log::debug;
use ndarray::Array2;

use super::series::{indices_to_values, FeatureRange};
use super::{check_key_capacity, check_sample_counts};
use crate::encoding::StateEncoder;
use crate::error::AnalysisError;
use crate::information::{shared_entropy, FrequencyTable};
use crate::partitions::PartitionCatalog;

/// Reference entropy that the threshold fraction is taken against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdReference {
    /// Fraction of the feature's own entropy.
    Feature,
    /// Fraction of the shared entropy between the feature and the whole
    /// source. With a nonzero feature entropy this reference always admits
    /// the full source record itself.
    MaxShared,
}

/// Outcome of the threshold search for one feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentationResult {
    /// Size of the smallest satisfying partition. `None` when no partition
    /// up to the size bound clears the threshold, or when the feature
    /// carries no entropy at all (the ratio distinguishes the two).
    pub partition_size: Option<usize>,
    /// Shared entropy between the feature and the full source record, as a
    /// fraction of the feature entropy. Zero for a degenerate feature.
    pub max_entropy_ratio: f64,
}

/// Find the smallest source partition whose shared entropy with the feature
/// at `feature_range` reaches `threshold` times the reference entropy.
///
/// Partitions are taken from `catalog` in ascending-size order, so the
/// first hit is a smallest satisfying partition. A feature with zero
/// entropy short-circuits to `(None, 0.0)` without searching.
///
/// `max_partition_size`: `None`, or any bound at least the source width,
/// means the full width is searched.
#[allow(clippy::too_many_arguments)]
pub fn calc_fragmentation(
    source: &Array2<u32>,
    features: &Array2<u32>,
    feature_range: FeatureRange,
    threshold: f64,
    reference: ThresholdReference,
    max_partition_size: Option<usize>,
    catalog: &mut PartitionCatalog,
) -> Result<FragmentationResult, AnalysisError> {
    check_sample_counts(source, features)?;
    feature_range.validate(features.ncols())?;

    let source_width = source.ncols();
    let encoder = StateEncoder::for_series(source, features);
    check_key_capacity(&encoder, feature_range.width() + source_width)?;

    let n_samples = source.nrows();
    let sample_weight = 1.0 / n_samples as f64;

    // Reference entropies over the full series: the feature slice alone,
    // the whole source record, and their joint observation.
    let mut feature_counts = FrequencyTable::new();
    let mut whole_source_counts = FrequencyTable::new();
    let mut max_joint_counts = FrequencyTable::new();
    for sample in 0..n_samples {
        let feature_row = features.row(sample);
        let source_row = source.row(sample);
        feature_counts.record(encoder.encode(feature_range.indices().map(|i| feature_row[i])));
        whole_source_counts.record(encoder.encode(source_row.iter().copied()));
        max_joint_counts.record(encoder.encode_joint(
            feature_range.indices().map(|i| feature_row[i]),
            source_row.iter().copied(),
        ));
    }

    let feature_entropy = feature_counts.entropy(sample_weight);
    let whole_source_entropy = whole_source_counts.entropy(sample_weight);
    let max_joint_entropy = max_joint_counts.entropy(sample_weight);
    let max_shared_entropy =
        shared_entropy(feature_entropy, whole_source_entropy, max_joint_entropy);

    if feature_entropy <= 0.0 {
        // A constant feature admits no prediction; nothing to search for.
        return Ok(FragmentationResult {
            partition_size: None,
            max_entropy_ratio: 0.0,
        });
    }
    let max_entropy_ratio = max_shared_entropy / feature_entropy;

    let size_bound = match max_partition_size {
        Some(bound) if bound < source_width => bound,
        _ => source_width,
    };

    let reference_entropy = match reference {
        ThresholdReference::Feature => feature_entropy,
        ThresholdReference::MaxShared => max_shared_entropy,
    };

    debug!(
        "fragmentation search [{},{}]: H(feature)={:.4}, max shared={:.4}, size bound {}",
        feature_range.first, feature_range.last, feature_entropy, max_shared_entropy, size_bound
    );

    for partition in catalog.partitions(source_width) {
        if partition.len() > size_bound {
            // Catalog is size-sorted; no smaller partition follows.
            break;
        }

        let mut partition_counts = FrequencyTable::new();
        let mut joint_counts = FrequencyTable::new();
        for sample in 0..n_samples {
            let source_row = source.row(sample);
            let feature_row = features.row(sample);
            let projected = indices_to_values(source_row, partition);
            partition_counts.record(encoder.encode(projected.iter().copied()));
            // Feature digits first, then the projected partition digits.
            joint_counts.record(encoder.encode_joint(
                feature_range.indices().map(|i| feature_row[i]),
                projected.iter().copied(),
            ));
        }

        let partition_entropy = partition_counts.entropy(sample_weight);
        let joint_entropy = joint_counts.entropy(sample_weight);
        let shared = shared_entropy(partition_entropy, feature_entropy, joint_entropy);

        if shared >= threshold * reference_entropy {
            return Ok(FragmentationResult {
                partition_size: Some(partition.len()),
                max_entropy_ratio,
            });
        }
    }

    Ok(FragmentationResult {
        partition_size: None,
        max_entropy_ratio,
    })
}

/// Apply [`calc_fragmentation`] independently to each feature range, in
/// order, against the same pair of series.
pub fn fragmentation_set(
    source: &Array2<u32>,
    features: &Array2<u32>,
    feature_ranges: &[FeatureRange],
    threshold: f64,
    reference: ThresholdReference,
    max_partition_size: Option<usize>,
    catalog: &mut PartitionCatalog,
) -> Result<Vec<FragmentationResult>, AnalysisError> {
    feature_ranges
        .iter()
        .map(|&range| {
            calc_fragmentation(
                source,
                features,
                range,
                threshold,
                reference,
                max_partition_size,
                catalog,
            )
        })
        .collect()
}
