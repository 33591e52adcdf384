//! A `BuildHasher` wrapping XXH3 for the in-process key index.
//!
//! This is strictly an internal performance choice for
//! `HashMap<Vec<u8>, IndexEntry, Xxh3BuildHasher>` and must not be confused
//! with the per-codec `hash64` used for shard routing, which is specified
//! to use FNV-1a / Knuth multiplicative hashing so that shard assignment is
//! stable independent of this crate's internal hashing choice.

use std::hash::{BuildHasher, Hasher};

use xxhash_rust::xxh3::Xxh3;

#[derive(Default, Clone, Copy)]
pub struct Xxh3BuildHasher;

impl BuildHasher for Xxh3BuildHasher {
    type Hasher = Xxh3;

    fn build_hasher(&self) -> Self::Hasher {
        Xxh3::new()
    }
}
