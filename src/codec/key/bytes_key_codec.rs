use std::io;

use crate::codec::{fnv1a_64, KeyCodec};

/// Keys are raw, opaque byte strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct BytesKeyCodec;

impl KeyCodec for BytesKeyCodec {
    type Key = Vec<u8>;

    fn encode(&self, key: &Self::Key) -> Vec<u8> {
        key.clone()
    }

    fn decode(&self, bytes: &[u8]) -> io::Result<Self::Key> {
        Ok(bytes.to_vec())
    }

    fn hash64(&self, key: &Self::Key) -> u64 {
        fnv1a_64(key)
    }
}
