mod append_extension;
pub use append_extension::append_extension;

mod parse_buffer_size;
pub use parse_buffer_size::parse_buffer_size;

mod verify_file_existence;
pub use verify_file_existence::verify_file_existence;
