//! Information Module: Shannon Entropy over Discrete State Histograms
//!
//! All fragmentation measures reduce to Shannon entropies of frequency
//! tables built over composite state keys.
//!
//! ## Core Concepts
//!
//! ### Shannon Entropy
//!
//! For observed counts cᵢ over N samples, with uniform per-sample weight
//! w = 1/N:
//!
//!   H = -Σᵢ (cᵢ·w) log₂(cᵢ·w)
//!
//! measured in bits. A constant signal (one bucket holding everything) has
//! H = 0, as does an empty table.
//!
//! ### Shared (Mutual) Entropy
//!
//! For two jointly observed variables A and B:
//!
//!   shared(A, B) = H(A) + H(B) - H(A, B)
//!
//! the information common to both. This single identity, instantiated with
//! different choices of A and B, is the basis of every measure in the
//! fragmentation layer: 0 <= shared(A, B) <= min(H(A), H(B)).

mod entropy;

pub use entropy::{shared_entropy, FrequencyTable};
