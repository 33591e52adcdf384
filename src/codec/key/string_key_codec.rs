use std::io;

use crate::codec::{fnv1a_64, KeyCodec};

/// Keys are UTF-8 strings, encoded as their raw bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringKeyCodec;

impl KeyCodec for StringKeyCodec {
    type Key = String;

    fn encode(&self, key: &Self::Key) -> Vec<u8> {
        key.as_bytes().to_vec()
    }

    fn decode(&self, bytes: &[u8]) -> io::Result<Self::Key> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn hash64(&self, key: &Self::Key) -> u64 {
        fnv1a_64(key.as_bytes())
    }
}
