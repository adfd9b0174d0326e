// netscrub-core/src/engines/mod.rs
//! Concrete `PseudonymStrategy` implementations.
//!
//! * `codeword_engine`: keyed SHA-256 pseudonyms, reproducible for a given codeword.
//! * `random_engine`: memoized random pseudonyms with collision avoidance.

pub mod codeword_engine;
pub mod random_engine;
