//! Identifier detection for netscrub.
//!
//! `compiler` owns the regular expressions: two fixed patterns (private IPv4
//! literals and dotted domain-shaped tokens) compiled once per process, and a
//! case-insensitive alternation built from the operator's registered hostnames.
//! `detector` runs those patterns over a text blob and reports the spans it
//! finds without modifying anything.

pub mod compiler;
pub mod detector;
