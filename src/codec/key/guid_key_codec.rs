use std::io;

use crate::codec::{fnv1a_64, KeyCodec};

/// Keys are 128-bit GUIDs, encoded as their 16-byte little-endian form.
#[derive(Debug, Default, Clone, Copy)]
pub struct GuidKeyCodec;

impl KeyCodec for GuidKeyCodec {
    type Key = u128;

    fn encode(&self, key: &Self::Key) -> Vec<u8> {
        key.to_le_bytes().to_vec()
    }

    fn decode(&self, bytes: &[u8]) -> io::Result<Self::Key> {
        let array: [u8; 16] = bytes
            .try_into()
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "GUID key must be 16 bytes"))?;
        Ok(u128::from_le_bytes(array))
    }

    fn hash64(&self, key: &Self::Key) -> u64 {
        fnv1a_64(&key.to_le_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let codec = GuidKeyCodec;
        let key = 0x0123_4567_89ab_cdef_0011_2233_4455_6677u128;
        assert_eq!(codec.decode(&codec.encode(&key)).unwrap(), key);
    }

    #[test]
    fn rejects_wrong_length() {
        let codec = GuidKeyCodec;
        assert!(codec.decode(&[0u8; 8]).is_err());
    }
}
