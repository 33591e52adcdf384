// TODO: Integrate examples in main README

//! # shardkv-store
//!
//! A log-structured, crash-safe, multi-shard key-value storage engine.
//!
//! - **Zero-copy reads** using memory-mapped files.
//! - **Append-only writes** with a self-describing record frame, so a torn
//!   trailing write is detected and truncated on the next open rather than
//!   corrupting the store.
//! - **Typed access** via a small codec layer, so the same engine serves
//!   string, byte, GUID, integer, or JSON-serialized keys and values.
//! - **Sharding** across independent files, for throughput beyond what a
//!   single append-only log can give you.
//!
//! ## Example
//! ```rust
//! use shardkv_store::codec::{BytesValueCodec, StringKeyCodec};
//! use shardkv_store::storage_engine::SingleFileStore;
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("failed to create temp dir");
//! let path = temp_dir.path().join("store.log");
//!
//! let store = SingleFileStore::open(&path, StringKeyCodec, BytesValueCodec, false).unwrap();
//!
//! store.put(&"key1".to_string(), &b"value1".to_vec()).unwrap();
//! store.put(&"key2".to_string(), &b"value2".to_vec()).unwrap();
//!
//! assert_eq!(store.get(&"key1".to_string()).unwrap(), Some(b"value1".to_vec()));
//!
//! store.delete(&"key1".to_string()).unwrap();
//! assert_eq!(store.get(&"key1".to_string()).unwrap(), None);
//! ```
//!
//! ## Sharded example
//! ```rust
//! use shardkv_store::codec::{BytesValueCodec, StringKeyCodec};
//! use shardkv_store::storage_engine::ShardedStore;
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("failed to create temp dir");
//! let base_path = temp_dir.path().join("store.log");
//!
//! let store = ShardedStore::open(&base_path, 4, StringKeyCodec, BytesValueCodec, false).unwrap();
//! store.put(&"alpha".to_string(), &b"one".to_vec()).unwrap();
//! assert_eq!(store.get(&"alpha".to_string()).unwrap(), Some(b"one".to_vec()));
//! ```
//!
//! ## Performance considerations
//! - Reads never take the writer lock; they go through an `Arc`-counted
//!   memory map snapshot instead.
//! - Batch writes amortize the per-call remap/fsync cost over many
//!   records.
//! - Compaction holds the store's shared gate exclusively for its
//!   duration; other callers on that file briefly pause.
//!
//! ## Safety notes
//! - The log file should not be modified by anything other than this
//!   crate while a store has it open.
//! - Call `flush`/`close` (or pass `write_through: true` at open) if the
//!   process may be killed without a clean shutdown.
//!
//! ## License
//! This project is licensed under the Apache-2.0 License.

pub mod codec;
pub mod storage_engine;
pub mod utils;

mod format_bytes;
pub use format_bytes::format_bytes;
