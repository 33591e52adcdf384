//! A facade over N independent [`SingleFileStore`]s, routing by key hash.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use crate::codec::{KeyCodec, ValueCodec};
use crate::storage_engine::raw_log::CompactionStats;
use crate::storage_engine::single_file_store::SingleFileStore;

/// Opens/creates `shard_count` files named `<base_path>.shard{NN}.log` next
/// to `base_path`, and routes each key to one of them via
/// `hash64(key) mod shard_count`. `shard_count` is a property of how the
/// store was opened, not something recoverable from the files themselves.
pub struct ShardedStore<KC: KeyCodec, VC: ValueCodec> {
    shards: Vec<SingleFileStore<KC, VC>>,
}

fn shard_path(base_path: &Path, index: usize) -> PathBuf {
    let mut name = base_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".shard{index:02}.log"));
    match base_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
        _ => PathBuf::from(name),
    }
}

impl<KC: KeyCodec, VC: ValueCodec> ShardedStore<KC, VC>
where
    KC: Clone + Sync,
    VC: Clone + Sync,
{
    pub fn open(
        base_path: impl AsRef<Path>,
        shard_count: usize,
        key_codec: KC,
        value_codec: VC,
        write_through: bool,
    ) -> io::Result<Self> {
        if shard_count == 0 {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "shard_count must be at least 1"));
        }

        let base_path = base_path.as_ref();
        let shards = (0..shard_count)
            .map(|i| {
                SingleFileStore::open(
                    shard_path(base_path, i),
                    key_codec.clone(),
                    value_codec.clone(),
                    write_through,
                )
            })
            .collect::<io::Result<Vec<_>>>()?;

        Ok(Self { shards })
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard_index_for(&self, key: &KC::Key) -> usize {
        (self.shards[0].key_hash(key) as usize) % self.shards.len()
    }

    fn shard_for(&self, key: &KC::Key) -> &SingleFileStore<KC, VC> {
        &self.shards[self.shard_index_for(key)]
    }

    pub fn get(&self, key: &KC::Key) -> io::Result<Option<VC::Value>> {
        self.shard_for(key).get(key)
    }

    pub fn put(&self, key: &KC::Key, value: &VC::Value) -> io::Result<()> {
        self.shard_for(key).put(key, value)
    }

    pub fn delete(&self, key: &KC::Key) -> io::Result<bool> {
        self.shard_for(key).delete(key)
    }

    /// Groups `items` by destination shard, then dispatches one
    /// `put_batch` per shard concurrently: `std::thread::scope` by
    /// default, or a `rayon` parallel iterator under the `parallel`
    /// feature.
    pub fn put_batch(&self, items: &[(KC::Key, VC::Value)], cancel: Option<&AtomicBool>) -> io::Result<()>
    where
        KC::Key: Clone + Send,
        VC::Value: Clone + Send,
    {
        let mut by_shard: Vec<Vec<(KC::Key, VC::Value)>> = (0..self.shards.len()).map(|_| Vec::new()).collect();
        for (key, value) in items {
            let index = self.shard_index_for(key);
            by_shard[index].push((key.clone(), value.clone()));
        }
        run_sharded(&self.shards, by_shard, |shard, group| shard.put_batch(&group, cancel))
    }

    /// Groups `keys` by destination shard, then dispatches one
    /// `delete_batch` per shard concurrently. Returns the total number of
    /// keys actually deleted across all shards.
    pub fn delete_batch(&self, keys: &[KC::Key], cancel: Option<&AtomicBool>) -> io::Result<usize>
    where
        KC::Key: Clone + Send,
    {
        let mut by_shard: Vec<Vec<KC::Key>> = (0..self.shards.len()).map(|_| Vec::new()).collect();
        for key in keys {
            let index = self.shard_index_for(key);
            by_shard[index].push(key.clone());
        }
        let per_shard = run_sharded(&self.shards, by_shard, |shard, group| shard.delete_batch(&group, cancel))?;
        Ok(per_shard.into_iter().sum())
    }

    /// Runs `compact` on every shard concurrently, collecting each shard's
    /// stats. The first shard-level error (or cancellation) aborts the
    /// whole call.
    pub fn compact_all(&self, cancel: Option<&AtomicBool>) -> io::Result<Vec<CompactionStats>> {
        run_sharded(&self.shards, (0..self.shards.len()).map(|_| ()).collect(), |shard, ()| shard.compact(cancel))
    }

    pub fn flush(&self) -> io::Result<()> {
        for shard in &self.shards {
            shard.flush()?;
        }
        Ok(())
    }

    /// Decodes and yields every live key/value pair across all shards,
    /// each shard's portion snapshotted eagerly in shard order.
    pub fn scan_live(&self) -> impl Iterator<Item = io::Result<(KC::Key, VC::Value)>> + '_ {
        self.shards.iter().flat_map(|shard| shard.scan_live())
    }

    /// Materialises every shard's live key/value pairs into a single
    /// `Vec`, each shard's portion taken as one consistent point-in-time
    /// view.
    pub fn snapshot_all(&self) -> io::Result<Vec<(KC::Key, VC::Value)>> {
        let mut out = Vec::new();
        for shard in &self.shards {
            out.extend(shard.snapshot()?);
        }
        Ok(out)
    }

    pub fn get_storage_size(&self) -> u64 {
        self.shards.iter().map(|s| s.get_storage_size()).sum()
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Runs `f` once per shard, each against its own group from `by_shard`, in
/// parallel: `std::thread::scope` by default, or `rayon` under the
/// `parallel` feature. Returns the per-shard results in shard order, or the
/// first error encountered.
fn run_sharded<KC, VC, G, T, F>(
    shards: &[SingleFileStore<KC, VC>],
    by_shard: Vec<G>,
    f: F,
) -> io::Result<Vec<T>>
where
    KC: KeyCodec + Sync,
    VC: ValueCodec + Sync,
    G: Send,
    T: Send,
    F: Fn(&SingleFileStore<KC, VC>, G) -> io::Result<T> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        shards
            .par_iter()
            .zip(by_shard.into_par_iter())
            .map(|(shard, group)| f(shard, group))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        std::thread::scope(|scope| {
            let handles: Vec<_> = shards
                .iter()
                .zip(by_shard)
                .map(|(shard, group)| scope.spawn(|| f(shard, group)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|_| Err(io::Error::other("shard dispatch thread panicked"))))
                .collect()
        })
    }
}
