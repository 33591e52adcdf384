use std::io;

use crate::codec::ValueCodec;

/// Values are passed through unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct BytesValueCodec;

impl ValueCodec for BytesValueCodec {
    type Value = Vec<u8>;

    fn serialize(&self, value: &Self::Value) -> io::Result<Vec<u8>> {
        Ok(value.clone())
    }

    fn deserialize(&self, bytes: &[u8]) -> io::Result<Self::Value> {
        Ok(bytes.to_vec())
    }
}
