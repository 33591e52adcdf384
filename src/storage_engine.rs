mod constants;

pub mod record;

mod index_entry;
pub use index_entry::IndexEntry;

pub mod digest;

mod raw_entry_handle;
pub use raw_entry_handle::RawEntryHandle;

mod live_iter;
pub use live_iter::ScanLive;

mod raw_log;
pub use raw_log::{CompactionStats, RawLog};

mod single_file_store;
pub use single_file_store::SingleFileStore;

mod sharded_store;
pub use sharded_store::ShardedStore;
