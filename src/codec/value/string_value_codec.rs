use std::io;

use crate::codec::ValueCodec;

/// Values are UTF-8 strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringValueCodec;

impl ValueCodec for StringValueCodec {
    type Value = String;

    fn serialize(&self, value: &Self::Value) -> io::Result<Vec<u8>> {
        Ok(value.as_bytes().to_vec())
    }

    fn deserialize(&self, bytes: &[u8]) -> io::Result<Self::Value> {
        String::from_utf8(bytes.to_vec()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let codec = StringValueCodec;
        let value = "hello".to_string();
        assert_eq!(codec.deserialize(&codec.serialize(&value).unwrap()).unwrap(), value);
    }
}
