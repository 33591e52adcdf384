//! Capability traits a `SingleFileStore<KC, VC>` is generic over, plus the
//! built-in codecs it ships with.

use std::io;

mod key;
mod value;

pub use key::bytes_key_codec::BytesKeyCodec;
pub use key::fnv::fnv1a_64;
pub use key::guid_key_codec::GuidKeyCodec;
pub use key::i64_key_codec::I64KeyCodec;
pub use key::string_key_codec::StringKeyCodec;

pub use value::bytes_value_codec::BytesValueCodec;
pub use value::json_value_codec::JsonValueCodec;
pub use value::string_value_codec::StringValueCodec;

/// Encodes/decodes a logical key to/from the raw bytes the log stores, and
/// derives a stable 64-bit hash for shard routing.
///
/// `hash64` must be deterministic across processes and platforms, since it
/// picks which shard file a key lives in; built-in codecs use FNV-1a or a
/// Knuth multiplicative hash rather than this crate's internal XXH3 choice,
/// so that shard assignment never depends on an implementation detail of
/// the in-memory index.
pub trait KeyCodec {
    type Key;

    fn encode(&self, key: &Self::Key) -> Vec<u8>;
    fn decode(&self, bytes: &[u8]) -> io::Result<Self::Key>;
    fn hash64(&self, key: &Self::Key) -> u64;
}

/// Serializes/deserializes a logical value to/from the raw bytes the log
/// stores.
pub trait ValueCodec {
    type Value;

    fn serialize(&self, value: &Self::Value) -> io::Result<Vec<u8>>;
    fn deserialize(&self, bytes: &[u8]) -> io::Result<Self::Value>;
}
