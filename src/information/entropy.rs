//! Frequency tables and entropy evaluation.

use std::collections::HashMap;

/// Occurrence counts over composite state keys.
///
/// Built fresh for each (partition, feature) pairing from all samples of a
/// series, read once for its entropy, then discarded.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<u64, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    /// Count one observation of the state identified by `key`.
    pub fn record(&mut self, key: u64) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Number of distinct states observed.
    pub fn n_states(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Shannon entropy in bits under a uniform per-sample weight.
    ///
    /// `sample_weight` must be 1/N where N is the number of recorded
    /// observations, so that bucket probabilities sum to one.
    pub fn entropy(&self, sample_weight: f64) -> f64 {
        self.counts
            .values()
            .map(|&count| {
                let p = count as f64 * sample_weight;
                -(p * p.log2())
            })
            .sum()
    }
}

/// The shared-entropy identity: H(A) + H(B) - H(A, B).
pub fn shared_entropy(h_a: f64, h_b: f64, h_joint: f64) -> f64 {
    h_a + h_b - h_joint
}
