use std::io;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::ValueCodec;

/// Values are arbitrary types serialized through `serde_json`.
pub struct JsonValueCodec<T> {
    _marker: PhantomData<T>,
}

impl<T> Default for JsonValueCodec<T> {
    fn default() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T> Clone for JsonValueCodec<T> {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl<T: Serialize + DeserializeOwned> ValueCodec for JsonValueCodec<T> {
    type Value = T;

    fn serialize(&self, value: &Self::Value) -> io::Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn deserialize(&self, bytes: &[u8]) -> io::Result<Self::Value> {
        serde_json::from_slice(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
