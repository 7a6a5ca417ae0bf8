//! Full (features x partitions) fragmentation map.

use std::fmt;
use std::str::FromStr;

use log::debug;
use ndarray::Array2;
use rayon::prelude::*;

use super::series::{indices_to_values, FeatureRange};
use super::{check_key_capacity, check_sample_counts};
use crate::encoding::StateEncoder;
use crate::error::AnalysisError;
use crate::information::{shared_entropy, FrequencyTable};
use crate::partitions::PartitionCatalog;

/// Denominator for the map's shared-entropy cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Divide by the feature's own entropy.
    Feature,
    /// Divide by the shared entropy between the feature and the whole
    /// source (what the source as a whole knows about the feature).
    Source,
}

impl FromStr for Normalization {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, AnalysisError> {
        match s {
            "feature" => Ok(Self::Feature),
            "source" => Ok(Self::Source),
            other => Err(AnalysisError::UnknownNormalization(other.to_string())),
        }
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feature => write!(f, "feature"),
            Self::Source => write!(f, "source"),
        }
    }
}

/// Normalized shared-entropy matrix over (features x partitions).
///
/// `values` has one row per feature range, in input order. The first
/// `partitions.len()` columns correspond to `partitions` in catalog order;
/// the two trailing columns are raw diagnostics: the feature entropy and
/// the max shared entropy between that feature and the whole source.
#[derive(Debug, Clone)]
pub struct FragmentationMap {
    pub partitions: Vec<Vec<usize>>,
    pub values: Array2<f64>,
}

impl FragmentationMap {
    pub fn n_features(&self) -> usize {
        self.values.nrows()
    }

    /// Normalized shared entropy for one (feature, partition) cell.
    pub fn cell(&self, feature: usize, partition: usize) -> f64 {
        self.values[[feature, partition]]
    }

    /// Raw feature entropy diagnostic for a row.
    pub fn feature_entropy(&self, feature: usize) -> f64 {
        self.values[[feature, self.partitions.len()]]
    }

    /// Raw max shared entropy diagnostic for a row.
    pub fn max_shared_entropy(&self, feature: usize) -> f64 {
        self.values[[feature, self.partitions.len() + 1]]
    }
}

/// Build the full fragmentation map: for every feature range and every
/// source partition up to `max_partition_size`, the shared entropy between
/// the projected partition and the feature, normalized per `normalization`.
///
/// Rows are independent and are computed on the rayon worker pool, merged
/// in input order; the partition catalog prefix is materialized before the
/// fan-out so workers share it read-only.
pub fn fragmentation_map(
    features: &Array2<u32>,
    source: &Array2<u32>,
    feature_ranges: &[FeatureRange],
    max_partition_size: Option<usize>,
    normalization: Normalization,
    catalog: &mut PartitionCatalog,
) -> Result<FragmentationMap, AnalysisError> {
    check_sample_counts(source, features)?;
    for range in feature_ranges {
        range.validate(features.ncols())?;
    }

    let source_width = source.ncols();
    let encoder = StateEncoder::for_series(source, features);
    let widest_range = feature_ranges.iter().map(|r| r.width()).max().unwrap_or(0);
    check_key_capacity(&encoder, widest_range + source_width)?;

    let n_samples = source.nrows();
    let sample_weight = 1.0 / n_samples as f64;

    let size_bound = match max_partition_size {
        Some(bound) if bound < source_width => bound,
        _ => source_width,
    };
    let retained: Vec<Vec<usize>> = catalog
        .partitions(source_width)
        .iter()
        .take_while(|p| p.len() <= size_bound)
        .cloned()
        .collect();

    debug!(
        "building fragmentation map: {} features x {} partitions over {} samples",
        feature_ranges.len(),
        retained.len(),
        n_samples
    );

    // The whole-source entropy is shared by every row.
    let mut whole_source_counts = FrequencyTable::new();
    for sample in 0..n_samples {
        whole_source_counts.record(encoder.encode(source.row(sample).iter().copied()));
    }
    let whole_source_entropy = whole_source_counts.entropy(sample_weight);

    let rows: Vec<Vec<f64>> = feature_ranges
        .par_iter()
        .map(|&range| {
            feature_row(
                features,
                source,
                range,
                &retained,
                normalization,
                &encoder,
                whole_source_entropy,
                sample_weight,
            )
        })
        .collect();

    let mut values = Array2::zeros((feature_ranges.len(), retained.len() + 2));
    for (i, row) in rows.into_iter().enumerate() {
        for (j, v) in row.into_iter().enumerate() {
            values[[i, j]] = v;
        }
    }

    Ok(FragmentationMap {
        partitions: retained,
        values,
    })
}

/// One matrix row: every retained partition scored against one feature,
/// plus the two trailing diagnostics.
#[allow(clippy::too_many_arguments)]
fn feature_row(
    features: &Array2<u32>,
    source: &Array2<u32>,
    range: FeatureRange,
    partitions: &[Vec<usize>],
    normalization: Normalization,
    encoder: &StateEncoder,
    whole_source_entropy: f64,
    sample_weight: f64,
) -> Vec<f64> {
    let n_samples = features.nrows();

    let mut feature_counts = FrequencyTable::new();
    let mut max_joint_counts = FrequencyTable::new();
    for sample in 0..n_samples {
        let feature_record = features.row(sample);
        let source_record = source.row(sample);
        feature_counts.record(encoder.encode(range.indices().map(|i| feature_record[i])));
        max_joint_counts.record(encoder.encode_joint(
            range.indices().map(|i| feature_record[i]),
            source_record.iter().copied(),
        ));
    }
    let feature_entropy = feature_counts.entropy(sample_weight);
    let max_joint_entropy = max_joint_counts.entropy(sample_weight);
    let max_shared_entropy =
        shared_entropy(feature_entropy, whole_source_entropy, max_joint_entropy);

    debug!(
        "  feature [{},{}]: H(feature)={:.4}, max shared={:.4}",
        range.first, range.last, feature_entropy, max_shared_entropy
    );

    let denominator = match normalization {
        Normalization::Feature => feature_entropy,
        Normalization::Source => max_shared_entropy,
    };

    let mut row = Vec::with_capacity(partitions.len() + 2);
    for partition in partitions {
        let mut partition_counts = FrequencyTable::new();
        let mut joint_counts = FrequencyTable::new();
        for sample in 0..n_samples {
            let source_record = source.row(sample);
            let feature_record = features.row(sample);
            let projected = indices_to_values(source_record, partition);
            partition_counts.record(encoder.encode(projected.iter().copied()));
            // Feature digits first, then the projected partition digits.
            joint_counts.record(encoder.encode_joint(
                range.indices().map(|i| feature_record[i]),
                projected.iter().copied(),
            ));
        }
        let partition_entropy = partition_counts.entropy(sample_weight);
        let joint_entropy = joint_counts.entropy(sample_weight);
        let shared = shared_entropy(partition_entropy, feature_entropy, joint_entropy);

        row.push(if denominator > 0.0 {
            shared / denominator
        } else {
            0.0
        });
    }

    row.push(feature_entropy);
    row.push(max_shared_entropy);
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Width-3 binary source spanning all 8 joint values twice.
    fn full_binary_source() -> Array2<u32> {
        Array2::from_shape_fn((16, 3), |(sample, var)| ((sample >> var) & 1) as u32)
    }

    /// Feature record per sample: [b0, b0 XOR b1, constant].
    fn feature_series(source: &Array2<u32>) -> Array2<u32> {
        Array2::from_shape_fn((source.nrows(), 3), |(sample, var)| {
            let b0 = source[[sample, 0]];
            let b1 = source[[sample, 1]];
            match var {
                0 => b0,
                1 => b0 ^ b1,
                _ => 0,
            }
        })
    }

    fn ranges() -> Vec<FeatureRange> {
        vec![
            FeatureRange::single(0),
            FeatureRange::single(1),
            FeatureRange::single(2),
        ]
    }

    #[test]
    fn test_normalization_parsing() {
        assert_eq!("feature".parse::<Normalization>(), Ok(Normalization::Feature));
        assert_eq!("source".parse::<Normalization>(), Ok(Normalization::Source));
        assert_eq!(
            "shared".parse::<Normalization>(),
            Err(AnalysisError::UnknownNormalization("shared".to_string()))
        );
        assert_eq!(Normalization::Feature.to_string(), "feature");
        assert_eq!(Normalization::Source.to_string(), "source");
    }

    #[test]
    fn test_map_shape_and_partition_order() {
        let source = full_binary_source();
        let features = feature_series(&source);
        let mut catalog = PartitionCatalog::new();

        let map = fragmentation_map(
            &features,
            &source,
            &ranges(),
            None,
            Normalization::Feature,
            &mut catalog,
        )
        .unwrap();

        assert_eq!(map.n_features(), 3);
        assert_eq!(map.partitions.len(), 7);
        assert_eq!(map.values.ncols(), map.partitions.len() + 2);
        // Catalog order: singletons, pairs, then the full set.
        assert_eq!(map.partitions[0], vec![0]);
        assert_eq!(map.partitions[3], vec![0, 1]);
        assert_eq!(map.partitions[6], vec![0, 1, 2]);
    }

    #[test]
    fn test_truncation_to_size_bound() {
        let source = full_binary_source();
        let features = feature_series(&source);
        let mut catalog = PartitionCatalog::new();

        let map = fragmentation_map(
            &features,
            &source,
            &ranges(),
            Some(2),
            Normalization::Feature,
            &mut catalog,
        )
        .unwrap();

        // 3 singletons + 3 pairs, full triple dropped
        assert_eq!(map.partitions.len(), 6);
        assert!(map.partitions.iter().all(|p| p.len() <= 2));
        assert_eq!(map.values.ncols(), 8);
    }

    #[test]
    fn test_feature_normalized_values() {
        let source = full_binary_source();
        let features = feature_series(&source);
        let mut catalog = PartitionCatalog::new();

        let map = fragmentation_map(
            &features,
            &source,
            &ranges(),
            None,
            Normalization::Feature,
            &mut catalog,
        )
        .unwrap();

        // Row 0 (feature = b0): singleton {0} carries it all.
        assert_abs_diff_eq!(map.cell(0, 0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(map.cell(0, 1), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(map.feature_entropy(0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(map.max_shared_entropy(0), 1.0, epsilon = 1e-12);

        // Row 1 (feature = b0 XOR b1): no singleton sees it, the pair
        // {0, 1} and every superset does.
        for singleton in 0..3 {
            assert_abs_diff_eq!(map.cell(1, singleton), 0.0, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(map.cell(1, 3), 1.0, epsilon = 1e-12); // {0, 1}
        assert_abs_diff_eq!(map.cell(1, 6), 1.0, epsilon = 1e-12); // {0, 1, 2}
        assert_abs_diff_eq!(map.cell(1, 4), 0.0, epsilon = 1e-12); // {0, 2}
    }

    #[test]
    fn test_degenerate_feature_row_is_zero() {
        let source = full_binary_source();
        let features = feature_series(&source);
        let mut catalog = PartitionCatalog::new();

        for normalization in [Normalization::Source, Normalization::Feature] {
            let map = fragmentation_map(
                &features,
                &source,
                &ranges(),
                None,
                normalization,
                &mut catalog,
            )
            .unwrap();

            // Row 2 is the constant feature: all cells and both
            // diagnostics are exactly zero.
            for col in 0..map.values.ncols() {
                assert_eq!(map.values[[2, col]], 0.0);
            }
            assert_eq!(map.feature_entropy(2), 0.0);
            assert_eq!(map.max_shared_entropy(2), 0.0);
        }
    }

    #[test]
    fn test_source_normalization_scales_by_visibility() {
        // Source sees b0 but not b2; feature = (b0, b2). Under "source"
        // normalization the visible half counts as the whole.
        let n = 32;
        let source =
            Array2::from_shape_fn((n, 2), |(sample, var)| ((sample >> var) & 1) as u32);
        let features =
            Array2::from_shape_fn((n, 2), |(sample, var)| ((sample >> (var * 2)) & 1) as u32);
        let mut catalog = PartitionCatalog::new();

        let map = fragmentation_map(
            &features,
            &source,
            &[FeatureRange::new(0, 1)],
            None,
            Normalization::Source,
            &mut catalog,
        )
        .unwrap();

        assert_abs_diff_eq!(map.feature_entropy(0), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(map.max_shared_entropy(0), 1.0, epsilon = 1e-12);
        // Partition {0} = b0 realizes all of what the source can know.
        assert_abs_diff_eq!(map.cell(0, 0), 1.0, epsilon = 1e-12);
        // Partition {1} = b1 is independent of the feature.
        assert_abs_diff_eq!(map.cell(0, 1), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let source = full_binary_source();
        let features = Array2::zeros((4, 1));
        let mut catalog = PartitionCatalog::new();

        let err = fragmentation_map(
            &features,
            &source,
            &[FeatureRange::single(0)],
            None,
            Normalization::Feature,
            &mut catalog,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::LengthMismatch { .. }));
    }

    #[test]
    fn test_capacity_bound_rejected() {
        // 70 binary source columns push the joint tuple past a u64 key.
        let source = Array2::from_elem((4, 70), 1u32);
        let features = Array2::from_shape_fn((4, 1), |(sample, _)| (sample % 2) as u32);
        let mut catalog = PartitionCatalog::new();

        let err = fragmentation_map(
            &features,
            &source,
            &[FeatureRange::single(0)],
            Some(1),
            Normalization::Feature,
            &mut catalog,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::KeyCapacityExceeded { .. }));
    }
}
