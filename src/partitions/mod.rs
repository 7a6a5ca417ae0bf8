//! Partitions Module: Memoized Power-Set Catalog
//!
//! A *partition* is a non-empty subset of source record positions, treated
//! as one composite variable. The threshold search and the map builder both
//! walk the full power set of `{0..n-1}` (empty set excluded), so the
//! catalog is built once per source width and memoized for the lifetime of
//! the catalog object.
//!
//! ## Ordering
//!
//! Entries are sorted by cardinality ascending, then by the canonical key
//! obtained by folding the subset's elements through base n. The threshold
//! search exploits this: the first catalog entry that clears the threshold
//! is a smallest satisfying partition, and iteration can stop as soon as
//! sizes exceed the caller's bound.
//!
//! ## Cost
//!
//! A width-n catalog holds 2ⁿ - 1 subsets; rebuilding it per call would
//! dominate every repeated analysis, hence the memoization. The catalog is
//! an explicit object owned by whoever orchestrates a batch of analyses,
//! so tests get isolation and parallel callers can pre-populate it before
//! fanning out.

mod catalog;

pub use catalog::PartitionCatalog;
