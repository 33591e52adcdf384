//! Generic typed wrapper over [`RawLog`], encoding/decoding at the boundary.

use std::io;
use std::path::Path;
use std::sync::atomic::AtomicBool;

use crate::codec::{KeyCodec, ValueCodec};
use crate::storage_engine::raw_log::{CompactionStats, RawLog};

/// A single append-only log file, typed over a key codec and a value
/// codec. This is the crate's primary entry point for working with one
/// file directly; [`crate::storage_engine::ShardedStore`] composes several
/// of these behind a routing facade.
pub struct SingleFileStore<KC: KeyCodec, VC: ValueCodec> {
    log: RawLog,
    key_codec: KC,
    value_codec: VC,
}

impl<KC: KeyCodec, VC: ValueCodec> SingleFileStore<KC, VC> {
    /// Opens (creating if absent) the file at `path`, recovering its index
    /// from whatever is already on disk. `write_through` requests an
    /// `fsync`/`fdatasync` after every durable write rather than relying on
    /// the OS page cache alone.
    pub fn open(path: impl AsRef<Path>, key_codec: KC, value_codec: VC, write_through: bool) -> io::Result<Self> {
        let log = RawLog::open(path, write_through)?;
        Ok(Self {
            log,
            key_codec,
            value_codec,
        })
    }

    /// Opens an existing file, failing with `ErrorKind::NotFound` if it is
    /// absent rather than silently creating it.
    pub fn open_existing(path: impl AsRef<Path>, key_codec: KC, value_codec: VC, write_through: bool) -> io::Result<Self> {
        let path = path.as_ref();
        crate::utils::verify_file_existence(path)?;
        Self::open(path, key_codec, value_codec, write_through)
    }

    pub fn path(&self) -> &Path {
        self.log.path()
    }

    /// The codec's stable routing hash for `key`, used by
    /// [`crate::storage_engine::ShardedStore`] to pick a shard.
    pub fn key_hash(&self, key: &KC::Key) -> u64 {
        self.key_codec.hash64(key)
    }

    pub fn get(&self, key: &KC::Key) -> io::Result<Option<VC::Value>> {
        let encoded_key = self.key_codec.encode(key);
        match self.log.get(&encoded_key)? {
            Some(handle) => self.value_codec.deserialize(&handle).map(Some),
            None => Ok(None),
        }
    }

    pub fn put(&self, key: &KC::Key, value: &VC::Value) -> io::Result<()> {
        let encoded_key = self.key_codec.encode(key);
        let encoded_value = self.value_codec.serialize(value)?;
        self.log.put(&encoded_key, &encoded_value)
    }

    pub fn delete(&self, key: &KC::Key) -> io::Result<bool> {
        let encoded_key = self.key_codec.encode(key);
        self.log.delete(&encoded_key)
    }

    pub fn put_batch(&self, items: &[(KC::Key, VC::Value)], cancel: Option<&AtomicBool>) -> io::Result<()> {
        let encoded: io::Result<Vec<(Vec<u8>, Vec<u8>)>> = items
            .iter()
            .map(|(k, v)| Ok((self.key_codec.encode(k), self.value_codec.serialize(v)?)))
            .collect();
        self.log.put_batch(&encoded?, cancel)
    }

    pub fn delete_batch(&self, keys: &[KC::Key], cancel: Option<&AtomicBool>) -> io::Result<usize> {
        let encoded: Vec<Vec<u8>> = keys.iter().map(|k| self.key_codec.encode(k)).collect();
        self.log.delete_batch(&encoded, cancel)
    }

    /// Discards existing content and rewrites the file from `items`.
    pub fn seed(&self, items: &[(KC::Key, VC::Value)]) -> io::Result<()> {
        let encoded: io::Result<Vec<(Vec<u8>, Vec<u8>)>> = items
            .iter()
            .map(|(k, v)| Ok((self.key_codec.encode(k), self.value_codec.serialize(v)?)))
            .collect();
        self.log.seed(&encoded?)
    }

    /// Decodes and yields every live key/value pair, snapshotted eagerly.
    pub fn scan_live(&self) -> impl Iterator<Item = io::Result<(KC::Key, VC::Value)>> + '_ {
        self.log.scan_live().map(move |result| {
            let (key_bytes, value_handle) = result?;
            let key = self.key_codec.decode(&key_bytes)?;
            let value = self.value_codec.deserialize(&value_handle)?;
            Ok((key, value))
        })
    }

    pub fn snapshot(&self) -> io::Result<Vec<(KC::Key, VC::Value)>> {
        self.log
            .snapshot()?
            .into_iter()
            .map(|(key_bytes, value_bytes)| {
                let key = self.key_codec.decode(&key_bytes)?;
                let value = self.value_codec.deserialize(&value_bytes)?;
                Ok((key, value))
            })
            .collect()
    }

    pub fn compact(&self, cancel: Option<&AtomicBool>) -> io::Result<CompactionStats> {
        self.log.compact(cancel)
    }

    pub fn estimate_compaction_savings(&self) -> u64 {
        self.log.estimate_compaction_savings()
    }

    pub fn flush(&self) -> io::Result<()> {
        self.log.flush()
    }

    pub fn close(self) -> io::Result<()> {
        self.log.close()
    }

    pub fn get_storage_size(&self) -> u64 {
        self.log.get_storage_size()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{BytesValueCodec, StringKeyCodec};
    use tempfile::tempdir;

    fn open(dir: &tempfile::TempDir) -> SingleFileStore<StringKeyCodec, BytesValueCodec> {
        SingleFileStore::open(dir.path().join("store.log"), StringKeyCodec, BytesValueCodec, false).unwrap()
    }

    #[test]
    fn put_then_get_decodes_through_the_codecs() {
        let dir = tempdir().unwrap();
        let store = open(&dir);
        store.put(&"alpha".to_string(), &b"one".to_vec()).unwrap();
        assert_eq!(store.get(&"alpha".to_string()).unwrap(), Some(b"one".to_vec()));
    }

    #[test]
    fn open_existing_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.log");
        let result: io::Result<SingleFileStore<StringKeyCodec, BytesValueCodec>> =
            SingleFileStore::open_existing(&missing, StringKeyCodec, BytesValueCodec, false);
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn scan_live_yields_decoded_pairs() {
        let dir = tempdir().unwrap();
        let store = open(&dir);
        store
            .put_batch(
                &[
                    ("a".to_string(), b"1".to_vec()),
                    ("b".to_string(), b"2".to_vec()),
                ],
                None,
            )
            .unwrap();

        let mut seen: Vec<(String, Vec<u8>)> = store.scan_live().collect::<io::Result<Vec<_>>>().unwrap();
        seen.sort();
        assert_eq!(
            seen,
            vec![("a".to_string(), b"1".to_vec()), ("b".to_string(), b"2".to_vec())]
        );
    }
}
