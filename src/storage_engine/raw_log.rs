//! The byte-oriented, append-only log underneath `SingleFileStore`.
//!
//! Owns the file handle, the mmap, the in-memory index and the
//! recovery/compaction machinery. Operates entirely on raw `&[u8]`
//! keys/values; `SingleFileStore<KC, VC>` is a thin typed wrapper that
//! encodes/decodes at the boundary.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::storage_engine::constants::*;
use crate::storage_engine::digest::Xxh3BuildHasher;
use crate::storage_engine::index_entry::IndexEntry;
use crate::storage_engine::live_iter::ScanLive;
use crate::storage_engine::raw_entry_handle::{map_region, MappedRegion, RawEntryHandle};
use crate::storage_engine::record::{encode_del, encode_put, try_parse_record};
use crate::utils::append_extension;

type KeyIndex = HashMap<Vec<u8>, IndexEntry, Xxh3BuildHasher>;

/// Before/after byte counts from a `compact()` call.
#[derive(Debug, Clone, Copy)]
pub struct CompactionStats {
    pub before_size: u64,
    pub after_size: u64,
}

impl CompactionStats {
    pub fn bytes_reclaimed(&self) -> u64 {
        self.before_size.saturating_sub(self.after_size)
    }
}

fn cancelled_error() -> io::Error {
    io::Error::new(io::ErrorKind::Interrupted, "operation cancelled")
}

fn invariant_violation(msg: impl Into<String>) -> io::Error {
    io::Error::other(msg.into())
}

fn check_cancelled(cancel: Option<&AtomicBool>) -> io::Result<()> {
    if let Some(flag) = cancel {
        if flag.load(Ordering::Relaxed) {
            return Err(cancelled_error());
        }
    }
    Ok(())
}

pub struct RawLog {
    path: PathBuf,
    write_slot: Mutex<BufWriter<File>>,
    mmap: Mutex<Arc<MappedRegion>>,
    tail_offset: AtomicU64,
    index: RwLock<KeyIndex>,
    gate: RwLock<()>,
    write_through: bool,
}

impl RawLog {
    pub fn open(path: impl AsRef<Path>, write_through: bool) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();

        let recovery_file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&path)?;
        let (index, tail) = Self::recover(&recovery_file, &path)?;
        drop(recovery_file);

        let append_file = open_file_in_append_mode(&path)?;
        let region = map_region(&File::open(&path)?)?;

        Ok(Self {
            path,
            write_slot: Mutex::new(BufWriter::new(append_file)),
            mmap: Mutex::new(Arc::new(region)),
            tail_offset: AtomicU64::new(tail),
            index: RwLock::new(index),
            gate: RwLock::new(()),
            write_through,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Forward-scans the file from offset zero, validating each record's
    /// prefix/suffix `payload_len` pair. The first record that fails any
    /// check — too few trailing bytes, an unrecognised op, a non-zero
    /// `val_len` on a DEL, or a prefix/suffix mismatch — ends the scan: the
    /// file is truncated to the last known-good boundary and recovery
    /// succeeds with whatever was read so far. A DEL whose key has no prior
    /// PUT in this same pass is not inserted into the index as a tombstone.
    fn recover(file: &File, path: &Path) -> io::Result<(KeyIndex, u64)> {
        let region = map_region(file)?;
        let data: &[u8] = &region;

        let mut index: KeyIndex = HashMap::default();
        let mut offset = 0usize;

        while offset < data.len() {
            match try_parse_record(data, offset) {
                Some(parsed) => {
                    let key = data[parsed.key_range()].to_vec();
                    if parsed.is_put() {
                        index.insert(
                            key,
                            IndexEntry::live(parsed.value_start as u64, parsed.value_len as u32),
                        );
                    } else if index.contains_key(&key) {
                        index.insert(key, IndexEntry::tombstone());
                    }
                    offset += parsed.record_len;
                }
                None => {
                    if offset < data.len() {
                        tracing::warn!(
                            path = %path.display(),
                            offset,
                            file_len = data.len(),
                            "truncating log at first invalid or incomplete record"
                        );
                        file.set_len(offset as u64)?;
                        file.sync_all()?;
                    }
                    break;
                }
            }
        }

        tracing::debug!(path = %path.display(), entries = index.len(), tail = offset, "recovery complete");
        Ok((index, offset as u64))
    }

    fn remap(&self) -> io::Result<()> {
        let file = File::open(&self.path)?;
        let region = map_region(&file)?;
        *self.mmap.lock().unwrap() = Arc::new(region);
        Ok(())
    }

    fn append_bytes(&self, bytes: &[u8]) -> io::Result<u64> {
        let offset = {
            let mut writer = self.write_slot.lock().unwrap();
            let offset = self.tail_offset.fetch_add(bytes.len() as u64, Ordering::SeqCst);
            writer.write_all(bytes)?;
            writer.flush()?;
            if self.write_through {
                writer.get_ref().sync_data()?;
            }
            offset
        };
        self.remap()?;
        Ok(offset)
    }

    pub fn get(&self, key: &[u8]) -> io::Result<Option<RawEntryHandle>> {
        let _gate = self.gate.read().unwrap();
        let entry = {
            let index = self.index.read().unwrap();
            match index.get(key) {
                Some(e) if !e.tombstone => *e,
                _ => return Ok(None),
            }
        };

        let region = self.mmap.lock().unwrap().clone();
        let range = entry.range();
        if range.end > region.len() {
            return Err(invariant_violation(format!(
                "index entry for key points past the mapped file (end={}, mapped_len={})",
                range.end,
                region.len()
            )));
        }
        Ok(Some(RawEntryHandle::new(region, range)))
    }

    pub fn put(&self, key: &[u8], value: &[u8]) -> io::Result<()> {
        let _gate = self.gate.read().unwrap();
        let mut buf = Vec::with_capacity(crate::storage_engine::record::encoded_len(key.len(), value.len()));
        encode_put(&mut buf, key, value);

        let value_rel_offset = (LEN_FIELD_SIZE + HEADER_SIZE + key.len()) as u64;
        let record_start = self.append_bytes(&buf)?;

        self.index
            .write()
            .unwrap()
            .insert(key.to_vec(), IndexEntry::live(record_start + value_rel_offset, value.len() as u32));
        Ok(())
    }

    /// Returns `true` if the key was live (and is now tombstoned), `false`
    /// if it was already absent or already deleted — no record is written
    /// in the latter case.
    pub fn delete(&self, key: &[u8]) -> io::Result<bool> {
        let _gate = self.gate.read().unwrap();
        let was_live = matches!(self.index.read().unwrap().get(key), Some(e) if !e.tombstone);
        if !was_live {
            return Ok(false);
        }

        let mut buf = Vec::with_capacity(crate::storage_engine::record::encoded_len(key.len(), 0));
        encode_del(&mut buf, key);
        self.append_bytes(&buf)?;

        self.index.write().unwrap().insert(key.to_vec(), IndexEntry::tombstone());
        Ok(true)
    }

    pub fn put_batch(&self, items: &[(Vec<u8>, Vec<u8>)], cancel: Option<&AtomicBool>) -> io::Result<()> {
        let _gate = self.gate.read().unwrap();
        let mut chunk = Vec::new();
        let mut pending: Vec<(Vec<u8>, u64, u32)> = Vec::new();

        for (key, value) in items {
            check_cancelled(cancel)?;
            let value_rel_offset = (chunk.len() + LEN_FIELD_SIZE + HEADER_SIZE + key.len()) as u64;
            encode_put(&mut chunk, key, value);
            pending.push((key.clone(), value_rel_offset, value.len() as u32));

            if chunk.len() >= BATCH_CHUNK_BYTES {
                self.flush_put_chunk(&mut chunk, &mut pending)?;
            }
        }
        self.flush_put_chunk(&mut chunk, &mut pending)
    }

    fn flush_put_chunk(&self, chunk: &mut Vec<u8>, pending: &mut Vec<(Vec<u8>, u64, u32)>) -> io::Result<()> {
        if chunk.is_empty() {
            return Ok(());
        }
        let base = self.append_bytes(chunk)?;
        let mut index = self.index.write().unwrap();
        for (key, rel_offset, len) in pending.drain(..) {
            index.insert(key, IndexEntry::live(base + rel_offset, len));
        }
        chunk.clear();
        Ok(())
    }

    /// Deletes each key that is currently live, suppressing DEL records for
    /// keys that are absent or already tombstoned — matching the behavior
    /// of a point `delete`. Returns the number of keys actually deleted.
    pub fn delete_batch(&self, keys: &[Vec<u8>], cancel: Option<&AtomicBool>) -> io::Result<usize> {
        let _gate = self.gate.read().unwrap();

        let to_delete: Vec<Vec<u8>> = {
            let index = self.index.read().unwrap();
            keys.iter()
                .filter(|k| matches!(index.get(k.as_slice()), Some(e) if !e.tombstone))
                .cloned()
                .collect()
        };

        let mut chunk = Vec::new();
        let mut pending: Vec<Vec<u8>> = Vec::new();

        for key in &to_delete {
            check_cancelled(cancel)?;
            encode_del(&mut chunk, key);
            pending.push(key.clone());
            if chunk.len() >= BATCH_CHUNK_BYTES {
                self.flush_del_chunk(&mut chunk, &mut pending)?;
            }
        }
        self.flush_del_chunk(&mut chunk, &mut pending)?;
        Ok(to_delete.len())
    }

    fn flush_del_chunk(&self, chunk: &mut Vec<u8>, pending: &mut Vec<Vec<u8>>) -> io::Result<()> {
        if chunk.is_empty() {
            return Ok(());
        }
        self.append_bytes(chunk)?;
        let mut index = self.index.write().unwrap();
        for key in pending.drain(..) {
            index.insert(key, IndexEntry::tombstone());
        }
        chunk.clear();
        Ok(())
    }

    /// Discards all existing content and rewrites the file from `items`, as
    /// if freshly created. Used for bulk-loading a store before it is
    /// otherwise in use.
    pub fn seed(&self, items: &[(Vec<u8>, Vec<u8>)]) -> io::Result<()> {
        {
            let _gate = self.gate.write().unwrap();
            let mut writer = self.write_slot.lock().unwrap();
            let fresh = OpenOptions::new()
                .create(true)
                .read(true)
                .write(true)
                .truncate(true)
                .open(&self.path)?;
            *writer = BufWriter::new(fresh);
            drop(writer);

            self.tail_offset.store(0, Ordering::SeqCst);
            self.index.write().unwrap().clear();
            self.remap()?;
        }
        self.put_batch(items, None)
    }

    /// Snapshots the current live entries eagerly; iteration afterwards
    /// touches no lock, only the mapping captured at call time. The index
    /// snapshot is taken before the region, mirroring `get`: a writer only
    /// ever remaps *after* inserting into the index, so capturing the index
    /// first guarantees every offset it names already lies within whatever
    /// region we capture next.
    pub fn scan_live(&self) -> ScanLive {
        let _gate = self.gate.read().unwrap();
        let entries: Vec<(Vec<u8>, IndexEntry)> = self
            .index
            .read()
            .unwrap()
            .iter()
            .filter(|(_, e)| !e.tombstone)
            .map(|(k, e)| (k.clone(), *e))
            .collect();
        let region = self.mmap.lock().unwrap().clone();

        ScanLive {
            region,
            entries: entries.into_iter(),
        }
    }

    /// Copies every live key/value pair out of the mapped file into owned
    /// memory, as a single consistent point-in-time view. Index before
    /// region, same ordering as `scan_live` and `get`.
    pub fn snapshot(&self) -> io::Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let _gate = self.gate.read().unwrap();
        let entries: Vec<(Vec<u8>, IndexEntry)> = self
            .index
            .read()
            .unwrap()
            .iter()
            .filter(|(_, e)| !e.tombstone)
            .map(|(k, e)| (k.clone(), *e))
            .collect();
        let region = self.mmap.lock().unwrap().clone();

        let mut out = Vec::with_capacity(entries.len());
        for (key, entry) in entries {
            let range = entry.range();
            if range.end > region.len() {
                return Err(invariant_violation(format!(
                    "index entry for key points past the mapped file (end={}, mapped_len={})",
                    range.end,
                    region.len()
                )));
            }
            out.push((key, region[range].to_vec()));
        }
        Ok(out)
    }

    /// Rewrites the file with only the live entries, then atomically
    /// replaces the original. Reopens the file handle, mmap, and index
    /// under the same exclusive gate so no caller ever observes stale
    /// state once `compact` returns.
    pub fn compact(&self, cancel: Option<&AtomicBool>) -> io::Result<CompactionStats> {
        let _gate = self.gate.write().unwrap();
        let before_size = self.tail_offset.load(Ordering::SeqCst);

        let live: Vec<(Vec<u8>, Vec<u8>)> = {
            let region = self.mmap.lock().unwrap().clone();
            let index = self.index.read().unwrap();
            let mut out = Vec::with_capacity(index.len());
            for (key, entry) in index.iter() {
                if entry.tombstone {
                    continue;
                }
                out.push((key.clone(), region[entry.range()].to_vec()));
            }
            out
        };

        let temp_path = append_extension(&self.path, COMPACTING_SUFFIX);
        let mut writer = BufWriter::new(
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&temp_path)?,
        );

        let mut new_index: KeyIndex = HashMap::default();
        let mut new_offset = 0u64;

        for (key, value) in &live {
            if let Err(e) = check_cancelled(cancel) {
                drop(writer);
                let _ = std::fs::remove_file(&temp_path);
                return Err(e);
            }

            let mut buf = Vec::with_capacity(crate::storage_engine::record::encoded_len(key.len(), value.len()));
            encode_put(&mut buf, key, value);
            let value_rel_offset = (LEN_FIELD_SIZE + HEADER_SIZE + key.len()) as u64;

            writer.write_all(&buf)?;
            new_index.insert(key.clone(), IndexEntry::live(new_offset + value_rel_offset, value.len() as u32));
            new_offset += buf.len() as u64;
        }

        writer.flush()?;
        writer.get_ref().sync_all()?;
        drop(writer);

        std::fs::rename(&temp_path, &self.path)?;

        *self.write_slot.lock().unwrap() = BufWriter::new(open_file_in_append_mode(&self.path)?);
        self.tail_offset.store(new_offset, Ordering::SeqCst);
        *self.index.write().unwrap() = new_index;
        self.remap()?;

        tracing::info!(
            path = %self.path.display(),
            before_size,
            after_size = new_offset,
            "compaction complete"
        );

        Ok(CompactionStats {
            before_size,
            after_size: new_offset,
        })
    }

    /// Estimates reclaimable bytes without rewriting the file, by comparing
    /// the live-entry total size against the current file length.
    pub fn estimate_compaction_savings(&self) -> u64 {
        let _gate = self.gate.read().unwrap();
        let live_bytes: u64 = self
            .index
            .read()
            .unwrap()
            .iter()
            .filter(|(_, e)| !e.tombstone)
            .map(|(key, entry)| {
                crate::storage_engine::record::encoded_len(key.len(), entry.value_length as usize) as u64
            })
            .sum();
        self.tail_offset.load(Ordering::SeqCst).saturating_sub(live_bytes)
    }

    pub fn flush(&self) -> io::Result<()> {
        let _gate = self.gate.write().unwrap();
        let mut writer = self.write_slot.lock().unwrap();
        writer.flush()?;
        writer.get_ref().sync_all()
    }

    pub fn close(self) -> io::Result<()> {
        self.flush()
    }

    pub fn get_storage_size(&self) -> u64 {
        self.tail_offset.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.index.read().unwrap().values().filter(|e| !e.tombstone).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Opens `path` for append-mode writing. `OpenOptions::append` already
/// serialises the write position at the OS level; the trailing seek only
/// keeps a freshly opened handle's logical position consistent for callers
/// that inspect it before the first write.
fn open_file_in_append_mode(path: &Path) -> io::Result<File> {
    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .append(true)
        .open(path)?;
    file.seek(SeekFrom::End(0))?;
    Ok(file)
}
