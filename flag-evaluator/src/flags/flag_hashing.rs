use std::io::Cursor;

use murmur3::murmur3_32;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Number of buckets a key can land in. Partition percentages address buckets `1..=100`.
pub const BUCKET_COUNT: i32 = 100;

/// The hash functions a flag can be bucketed with.
///
/// Every algorithm is a pure function of `(seed, key)`: the same inputs give the
/// same output in every process, which is what keeps rollouts stable across
/// SDK instances holding the same rules.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HashAlgorithm {
    /// MurmurHash3 x86 32-bit over the UTF-8 bytes of the key.
    #[default]
    Murmur3,
    /// Multiplicative rolling hash over UTF-16 code units, started from the seed.
    SeededNatural,
    /// Rotate-and-xor rolling hash over UTF-16 code units, started from the seed.
    XorNatural,
}

impl HashAlgorithm {
    pub fn hash(&self, seed: i32, key: &str) -> i32 {
        match self {
            HashAlgorithm::Murmur3 => murmur3_hash(seed, key),
            HashAlgorithm::SeededNatural => seeded_natural_hash(seed, key),
            HashAlgorithm::XorNatural => xor_natural_hash(seed, key),
        }
    }
}

pub fn murmur3_hash(seed: i32, key: &str) -> i32 {
    // Reading from an in-memory cursor cannot fail.
    murmur3_32(&mut Cursor::new(key.as_bytes()), seed as u32).unwrap_or(0) as i32
}

pub fn seeded_natural_hash(seed: i32, key: &str) -> i32 {
    key.encode_utf16().fold(seed, |h, unit| {
        h.wrapping_mul(31).wrapping_add(i32::from(unit))
    })
}

pub fn xor_natural_hash(seed: i32, key: &str) -> i32 {
    key.encode_utf16()
        .fold(seed, |h, unit| h.rotate_left(5) ^ i32::from(unit))
}

/// Maps a hash onto `1..=100`.
///
/// The remainder is taken before the absolute value, so `i32::MIN` never has to
/// be negated: its remainder is `-48` and it lands in bucket 49.
pub fn bucket(hash: i32) -> i32 {
    (hash % BUCKET_COUNT).abs() + 1
}
