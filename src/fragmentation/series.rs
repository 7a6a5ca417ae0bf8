//! Shared time-series data model for the analysis entry points.

use ndarray::ArrayView1;

use crate::error::AnalysisError;

/// Inclusive index range [first, last] designating which positions of a
/// feature record jointly form one named feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureRange {
    pub first: usize,
    pub last: usize,
}

impl FeatureRange {
    pub fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }

    /// A single record position as a feature.
    pub fn single(index: usize) -> Self {
        Self {
            first: index,
            last: index,
        }
    }

    /// Number of record positions covered.
    pub fn width(&self) -> usize {
        self.last + 1 - self.first
    }

    /// The covered positions, in order.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        self.first..=self.last
    }

    pub(crate) fn validate(&self, record_width: usize) -> Result<(), AnalysisError> {
        if self.first > self.last || self.last >= record_width {
            return Err(AnalysisError::InvalidFeatureRange {
                first: self.first,
                last: self.last,
                width: record_width,
            });
        }
        Ok(())
    }
}

impl From<(usize, usize)> for FeatureRange {
    fn from((first, last): (usize, usize)) -> Self {
        Self { first, last }
    }
}

/// Values of `record` at `indices`, in index-set order.
///
/// The ordering of `indices` is preserved, not sorted: the projection feeds
/// the state encoder, so the same partition must always project to the same
/// digit sequence.
pub fn indices_to_values(record: ArrayView1<'_, u32>, indices: &[usize]) -> Vec<u32> {
    indices.iter().map(|&i| record[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_range_width_and_indices() {
        let range = FeatureRange::new(2, 4);
        assert_eq!(range.width(), 3);
        assert_eq!(range.indices().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(FeatureRange::single(1), FeatureRange::new(1, 1));
        assert_eq!(FeatureRange::from((0, 2)), FeatureRange::new(0, 2));
    }

    #[test]
    fn test_range_validation() {
        assert!(FeatureRange::new(0, 2).validate(3).is_ok());
        assert!(FeatureRange::new(0, 3).validate(3).is_err());
        assert!(FeatureRange::new(2, 1).validate(3).is_err());
    }

    #[test]
    fn test_projection_preserves_index_order() {
        let record = array![10u32, 11, 12, 13];
        assert_eq!(indices_to_values(record.view(), &[2, 0]), vec![12, 10]);
        assert_eq!(indices_to_values(record.view(), &[1, 3]), vec![11, 13]);
    }
}
