pub mod bytes_key_codec;
pub mod fnv;
pub mod guid_key_codec;
pub mod i64_key_codec;
pub mod string_key_codec;
