pub mod bytes_value_codec;
pub mod json_value_codec;
pub mod string_value_codec;
