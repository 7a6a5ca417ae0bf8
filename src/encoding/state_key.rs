//! Mixed-radix composite key encoder.

use ndarray::Array2;

/// Folds bounded-integer tuples into collision-free `u64` keys.
///
/// For a fixed base b >= 2 and tuple width w, keys of width-w tuples lie in
/// [bʷ, 2·bʷ - 1]. Distinct same-width tuples differ positionally, and the
/// ranges for different widths are disjoint, so the encoding is injective
/// over all tuples whose digits are below the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateEncoder {
    base: u64,
}

impl StateEncoder {
    /// Create an encoder with the given base. Bases below 2 cannot shift
    /// the accumulator and are clamped to 2.
    pub fn new(base: u64) -> Self {
        Self { base: base.max(2) }
    }

    /// Derive the one consistent base for an analysis over two series:
    /// one more than the largest digit appearing in either.
    pub fn for_series(a: &Array2<u32>, b: &Array2<u32>) -> Self {
        let max_digit = a.iter().chain(b.iter()).copied().max().unwrap_or(0);
        Self::new(u64::from(max_digit) + 1)
    }

    /// The base digits are folded through.
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Encode one tuple.
    pub fn encode<I>(&self, digits: I) -> u64
    where
        I: IntoIterator<Item = u32>,
    {
        self.fold(1, digits)
    }

    /// Encode the concatenation of two tuples as one key, representing a
    /// jointly observed state. Equivalent to encoding the flattened pair;
    /// the digit order of both tuples is significant.
    pub fn encode_joint<I, J>(&self, first: I, second: J) -> u64
    where
        I: IntoIterator<Item = u32>,
        J: IntoIterator<Item = u32>,
    {
        let key = self.fold(1, first);
        self.fold(key, second)
    }

    fn fold<I>(&self, seed: u64, digits: I) -> u64
    where
        I: IntoIterator<Item = u32>,
    {
        digits
            .into_iter()
            .fold(seed, |key, digit| key * self.base + u64::from(digit))
    }

    /// Largest tuple width whose keys are guaranteed collision-free in a
    /// `u64` at this base (the width-w key ceiling 2·bʷ - 1 must fit).
    pub fn max_encodable_width(&self) -> usize {
        let limit: u128 = 1 << 63;
        let base = u128::from(self.base);
        let mut width = 0;
        let mut ceiling: u128 = 1;
        while ceiling * base <= limit {
            ceiling *= base;
            width += 1;
        }
        width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::collections::HashSet;

    #[test]
    fn test_distinct_tuples_distinct_keys() {
        // Exhaustive over all tuples of width <= 3 at base 3
        let encoder = StateEncoder::new(3);
        let mut seen = HashSet::new();

        for w in 1..=3usize {
            for mut v in 0..3u32.pow(w as u32) {
                let mut tuple = Vec::with_capacity(w);
                for _ in 0..w {
                    tuple.push(v % 3);
                    v /= 3;
                }
                assert!(
                    seen.insert(encoder.encode(tuple.iter().copied())),
                    "collision for tuple {:?}",
                    tuple
                );
            }
        }
    }

    #[test]
    fn test_leading_zeros_disambiguated() {
        let encoder = StateEncoder::new(2);
        assert_ne!(
            encoder.encode([0, 1]),
            encoder.encode([1]),
            "seed must shift leading zeros"
        );
        assert_ne!(encoder.encode([0]), encoder.encode([0, 0]));
    }

    #[test]
    fn test_joint_matches_flat_concatenation() {
        let encoder = StateEncoder::new(4);
        let flat = encoder.encode([3, 0, 1, 2, 2]);
        let joint = encoder.encode_joint([3, 0], [1, 2, 2]);
        assert_eq!(flat, joint);
    }

    #[test]
    fn test_digit_order_matters() {
        let encoder = StateEncoder::new(3);
        assert_ne!(encoder.encode([1, 2]), encoder.encode([2, 1]));
    }

    #[test]
    fn test_base_from_series() {
        let a = array![[0u32, 3], [1, 2]];
        let b = array![[1u32], [0]];
        assert_eq!(StateEncoder::for_series(&a, &b).base(), 4);

        // All-zero data still gets a shifting base
        let z = array![[0u32, 0]];
        assert_eq!(StateEncoder::for_series(&z, &z).base(), 2);
    }

    #[test]
    fn test_max_encodable_width() {
        // 2 * 2^63 - 1 is the largest width-63 key at base 2
        assert_eq!(StateEncoder::new(2).max_encodable_width(), 63);
        // base 4: 2 * 4^31 = 2^63 fits, 4^32 does not
        assert_eq!(StateEncoder::new(4).max_encodable_width(), 31);
    }
}
