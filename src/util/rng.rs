// Copyright (c) 2024 Mike Tsao

//! A small seeded random-number generator, used by random-choice nodes and by
//! tests that need arbitrary (but always legal) field values.

use byteorder::{BigEndian, ByteOrder};
use core::ops::RangeInclusive;
use delegate::delegate;

/// A pseudorandom number generator (PRNG). Not cryptographically secure, and
/// doesn't need to be.
#[derive(Clone, Debug)]
pub struct Rng(oorandom::Rand64);
impl Default for Rng {
    fn default() -> Self {
        Self::new_with_seed(Self::generate_seed().unwrap())
    }
}
#[allow(missing_docs)]
impl Rng {
    /// The same seed always produces the same stream.
    pub fn new_with_seed(seed: u128) -> Self {
        Self(oorandom::Rand64::new(seed))
    }

    /// Creates a seed from OS entropy.
    pub fn generate_seed() -> anyhow::Result<u128> {
        let mut bytes = [0u8; 16];

        getrandom::getrandom(&mut bytes)?;
        Ok(BigEndian::read_u128(&bytes))
    }

    delegate! {
        to self.0 {
            pub fn rand_u64(&mut self) -> u64;
            pub fn rand_range(&mut self, range: core::ops::Range<u64>) -> u64;
        }
    }

    /// Returns an index in `0..len`. `len` must be nonzero.
    pub fn rand_index(&mut self, len: usize) -> usize {
        self.rand_range(0..len as u64) as usize
    }

    /// Returns a value in the given inclusive range.
    pub fn rand_in(&mut self, range: RangeInclusive<i32>) -> i32 {
        let span = (*range.end() as i64 - *range.start() as i64 + 1) as u64;
        (*range.start() as i64 + self.rand_range(0..span) as i64) as i32
    }
}
