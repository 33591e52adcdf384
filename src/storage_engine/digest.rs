mod xxh3_build_hasher;

pub use xxh3_build_hasher::Xxh3BuildHasher;
