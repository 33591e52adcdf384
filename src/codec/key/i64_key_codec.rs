use std::io;

use crate::codec::KeyCodec;

/// Golden-ratio constant for a Knuth multiplicative hash (`2^64 / phi`,
/// rounded to the nearest odd integer).
const KNUTH_MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;

/// Keys are 64-bit signed integers, encoded as their little-endian bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct I64KeyCodec;

impl KeyCodec for I64KeyCodec {
    type Key = i64;

    fn encode(&self, key: &Self::Key) -> Vec<u8> {
        key.to_le_bytes().to_vec()
    }

    fn decode(&self, bytes: &[u8]) -> io::Result<Self::Key> {
        let array: [u8; 8] = bytes
            .try_into()
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "i64 key must be 8 bytes"))?;
        Ok(i64::from_le_bytes(array))
    }

    fn hash64(&self, key: &Self::Key) -> u64 {
        (*key as u64).wrapping_mul(KNUTH_MULTIPLIER)
    }
}
