// Framing widths for the on-disk record layout (see `record` module).
pub const LEN_FIELD_SIZE: usize = 4;
pub const OP_FIELD_SIZE: usize = 1;
pub const HEADER_SIZE: usize = LEN_FIELD_SIZE + OP_FIELD_SIZE + LEN_FIELD_SIZE + LEN_FIELD_SIZE;

pub const OP_PUT: u8 = 1;
pub const OP_DEL: u8 = 2;

/// Batched writes are chunked into buffers of at most this many bytes before
/// a single write syscall is issued per chunk.
pub const BATCH_CHUNK_BYTES: usize = 8 * 1024 * 1024;

pub const COMPACTING_SUFFIX: &str = "compacting";
