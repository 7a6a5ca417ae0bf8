//! # Frag-Info-Dynamics
//!
//! Information Fragmentation Analysis: Quantifying the Distribution of
//! Feature Information across Partitions of a Carrier Signal
//!
//! ## Theoretical Framework
//!
//! This crate implements a batch analysis that measures how knowledge about
//! an external signal (a "feature") is spread across the components of an
//! observed carrier signal (the "source"). Given parallel time series of
//! discretized source and feature records, it answers two questions:
//!
//! 1. What is the *smallest* subset of source variables whose shared
//!    entropy with a feature reaches a given fraction of a reference
//!    entropy? (threshold search)
//!
//! 2. How much does *every* subset of source variables, up to a size
//!    bound, share with every feature? (fragmentation map)
//!
//! A feature that can be read from a single source variable is
//! *concentrated*; one that only becomes visible through large joint
//! observations is *fragmented* (smeared) across the carrier.
//!
//! ## Methodology
//!
//! 1. **Composite state keys**: each record projection is folded into a
//!    single collision-free integer key (mixed-radix encoding), which
//!    serves as a histogram bucket id.
//!
//! 2. **Partition catalog**: the power set of source variable indices,
//!    enumerated once per source width, size-sorted, and memoized.
//!
//! 3. **Shannon entropies**: every measure reduces to the shared-entropy
//!    identity
//!
//!    shared(A, B) = H(A) + H(B) - H(A, B)
//!
//!    evaluated over frequency tables of composite keys.
//!
//! ## Key Quantities
//!
//! For a feature F and the full source record S:
//!
//!   maxSharedEntropy = H(F) + H(S) - H(F, S)
//!
//! is everything the carrier knows about the feature; partition-level
//! shared entropies are reported either relative to H(F) or relative to
//! this ceiling.
//!
//! ## References
//!
//! - Shannon, "A Mathematical Theory of Communication" (1948)
//! - Cover & Thomas, "Elements of Information Theory" (2006)
//! - Marstaller, Hintze & Adami, "The Evolution of Representation in
//!   Simple Cognitive Networks" (2013) - the R measure
//! - Hintze et al., "Markov Brains: A Technical Introduction" (2017)

pub mod encoding;
pub mod error;
pub mod fragmentation;
pub mod information;
pub mod partitions;

// Re-exports from encoding
pub use encoding::StateEncoder;

// Re-exports from partitions
pub use partitions::PartitionCatalog;

// Re-exports from information
pub use information::{shared_entropy, FrequencyTable};

// Re-exports from fragmentation
pub use fragmentation::{
    // Threshold search
    calc_fragmentation,
    fragmentation_set,
    FragmentationResult,
    ThresholdReference,
    // Map builder
    fragmentation_map,
    FragmentationMap,
    Normalization,
    // Shared data model
    indices_to_values,
    FeatureRange,
};

// Error type
pub use error::AnalysisError;
