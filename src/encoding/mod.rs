//! Encoding Module: Composite State Keys
//!
//! Frequency tables over joint observations need a bucket id per observed
//! state. This module folds a bounded-integer tuple (or the concatenation
//! of two tuples) into a single integer key such that two tuples map to the
//! same key exactly when they are element-wise identical.
//!
//! ## Mixed-Radix Encoding
//!
//! With base b and digits d₀, d₁, ..., the key is the left-to-right fold
//!
//!   key = (((1·b + d₀)·b + d₁)·b + d₂) ...
//!
//! seeded at 1 rather than 0 so that leading zero digits still shift the
//! key ([0, 1] and [1] must not collide).
//!
//! ## Base Discipline
//!
//! Every key that is counted in the same table, and every key across the
//! tables of one analysis, must be produced with the same base, and the
//! base must exceed every digit value. The encoder does not check digits
//! per call; the analysis layers derive one base from the data up front
//! (`StateEncoder::for_series`) and verify the widest tuple they will
//! encode against `max_encodable_width` once.

mod state_key;

pub use state_key::StateEncoder;
