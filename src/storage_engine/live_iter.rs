//! Lazy, zero-copy iteration over a log's live entries.
//!
//! The key/entry list is snapshotted eagerly when `RawLog::scan_live` is
//! called; iterating afterwards touches no lock, only the mapping snapshot
//! captured at that moment.

use std::io;
use std::sync::Arc;
use std::vec::IntoIter;

use crate::storage_engine::index_entry::IndexEntry;
use crate::storage_engine::raw_entry_handle::{MappedRegion, RawEntryHandle};

pub struct ScanLive {
    pub(crate) region: Arc<MappedRegion>,
    pub(crate) entries: IntoIter<(Vec<u8>, IndexEntry)>,
}

impl Iterator for ScanLive {
    type Item = io::Result<(Vec<u8>, RawEntryHandle)>;

    fn next(&mut self) -> Option<Self::Item> {
        let (key, entry) = self.entries.next()?;
        let range = entry.range();
        if range.end > self.region.len() {
            return Some(Err(io::Error::other(format!(
                "index entry for key points past the mapped file (end={}, mapped_len={})",
                range.end,
                self.region.len()
            ))));
        }
        Some(Ok((key, RawEntryHandle::new(self.region.clone(), range))))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.entries.size_hint();
        (0, upper)
    }
}
