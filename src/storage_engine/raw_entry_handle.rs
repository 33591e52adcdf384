//! Zero-copy handle to a value's bytes inside the mapped log file.

use std::ops::{Deref, Range};
use std::sync::Arc;

use memmap2::Mmap;

/// A memory-mapped region of the log file, or the empty placeholder used
/// while the file itself is zero bytes long. Mapping a zero-length file is
/// not portable across platforms, so that case never calls into `mmap` at
/// all.
pub(crate) enum MappedRegion {
    Mapped(Mmap),
    Empty,
}

impl Deref for MappedRegion {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            MappedRegion::Mapped(mmap) => &mmap[..],
            MappedRegion::Empty => &[],
        }
    }
}

/// A live value's bytes, borrowed directly from the mapped log file rather
/// than copied out of it. Cheap to clone: cloning only bumps the backing
/// mapping's reference count, keeping it alive for as long as any handle
/// still points into it.
#[derive(Clone)]
pub struct RawEntryHandle {
    region: Arc<MappedRegion>,
    range: Range<usize>,
}

impl RawEntryHandle {
    pub(crate) fn new(region: Arc<MappedRegion>, range: Range<usize>) -> Self {
        Self { region, range }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.region[self.range.clone()]
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

impl Deref for RawEntryHandle {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl PartialEq<[u8]> for RawEntryHandle {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}

impl PartialEq<&[u8]> for RawEntryHandle {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_slice() == *other
    }
}

impl PartialEq<Vec<u8>> for RawEntryHandle {
    fn eq(&self, other: &Vec<u8>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl std::fmt::Debug for RawEntryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawEntryHandle").field("len", &self.len()).finish()
    }
}

pub(crate) fn map_region(file: &std::fs::File) -> std::io::Result<MappedRegion> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(MappedRegion::Empty);
    }
    let mmap = unsafe { memmap2::MmapOptions::new().map(file)? };
    Ok(MappedRegion::Mapped(mmap))
}
