// netscrub-core/src/engines/random_engine.rs
//! A `PseudonymStrategy` that draws pseudonyms from a pseudorandom source.
//!
//! Within one run a given original always maps to the same pseudonym and no
//! two originals share one: draws are retried until they miss the issued set.
//! Nothing is persisted, so separate runs are unrelated. Domain labels are not
//! randomized by this strategy.
//!
//! License: MIT OR APACHE 2.0

use std::collections::{HashMap, HashSet};

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::PseudonymStrategy;
use crate::validators::{classify_private_ipv4, PrivateRange};

/// Fixed prefix of random hostname pseudonyms.
pub const HOSTNAME_PREFIX: &str = "host";

/// Draws one class-preserving address for `range`.
fn draw_ip<R: Rng>(rng: &mut R, range: PrivateRange) -> String {
    match range {
        PrivateRange::TenSlash8 => format!(
            "10.{}.{}.{}",
            rng.random_range(0..=255u8),
            rng.random_range(0..=255u8),
            rng.random_range(0..255u8)
        ),
        PrivateRange::OneSevenTwoSlash12 => format!(
            "172.{}.{}.{}",
            rng.random_range(0..32u8),
            rng.random_range(0..=255u8),
            rng.random_range(0..255u8)
        ),
        PrivateRange::OneNineTwoSlash16 => format!(
            "192.168.{}.{}",
            rng.random_range(0..=255u8),
            rng.random_range(0..255u8)
        ),
    }
}

fn draw_hostname<R: Rng>(rng: &mut R) -> String {
    format!("{}{:06}", HOSTNAME_PREFIX, rng.random_range(0..1_000_000u32))
}

/// Random strategy state: the generator plus the two memo tables.
#[derive(Debug)]
pub struct RandomEngine {
    rng: StdRng,
    /// original -> issued pseudonym
    issued_for: HashMap<String, String>,
    /// every pseudonym handed out so far
    issued: HashSet<String>,
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomEngine {
    /// Seeds the generator from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Fixed seed, for tests and reproducible demos.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            issued_for: HashMap::new(),
            issued: HashSet::new(),
        }
    }

    /// Number of distinct originals mapped so far.
    pub fn mapped_count(&self) -> usize {
        self.issued_for.len()
    }

    fn memoized<F>(&mut self, original: &str, mut draw: F) -> String
    where
        F: FnMut(&mut StdRng) -> String,
    {
        if let Some(existing) = self.issued_for.get(original) {
            return existing.clone();
        }
        loop {
            let candidate = draw(&mut self.rng);
            if self.issued.insert(candidate.clone()) {
                self.issued_for.insert(original.to_string(), candidate.clone());
                return candidate;
            }
            debug!("Pseudonym collision, drawing again.");
        }
    }
}

impl PseudonymStrategy for RandomEngine {
    fn name(&self) -> &'static str {
        "random"
    }

    fn ip(&mut self, original: &str) -> Option<String> {
        let (_, range) = classify_private_ipv4(original)?;
        Some(self.memoized(original, |rng| draw_ip(rng, range)))
    }

    fn hostname(&mut self, original: &str) -> String {
        self.memoized(original, draw_hostname::<StdRng>)
    }

    fn domain_label(&mut self, _label: &str) -> Option<String> {
        None
    }
}
