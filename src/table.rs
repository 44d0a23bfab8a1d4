//! Table: a fixed number of chains indexed by the rolling hash.

use crate::chain::{Chain, Entry};
use crate::error::TableError;
use crate::hasher;
use core::marker::PhantomData;
use core::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Bucket count used when none is configured.
pub const DEFAULT_TABLE_SIZE: usize = 2000;

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a table, carried by its cursors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct TableId(u64);

impl TableId {
    fn fresh() -> Self {
        TableId(NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Word-count table with a fixed number of buckets.
///
/// Keys are byte strings compared byte for byte; anything that is
/// `AsRef<[u8]>` (`str`, `String`, `[u8]`, `Vec<u8>`) can be looked up. Keys
/// are unique across the whole table: `lookup_or_insert` either bumps
/// the count of the existing entry or appends a new one with count 1 to the
/// tail of its bucket's chain. There is no removal and no resizing.
#[derive(Debug)]
pub struct Table {
    id: TableId,
    size: NonZeroUsize,
    chains: Vec<Chain>,
    len: usize,
    // Bumped on every insertion; outstanding cursors must match it.
    generation: u64,
    _nosend: PhantomData<*mut ()>,
}

impl Table {
    /// Create an empty table with `size` buckets.
    ///
    /// Fails with [`TableError::ZeroSize`] for `size == 0`, and with
    /// [`TableError::Allocation`] if the bucket array cannot be allocated.
    pub fn new(size: usize) -> Result<Self, TableError> {
        let size = NonZeroUsize::new(size).ok_or(TableError::ZeroSize)?;
        let mut chains = Vec::new();
        chains.try_reserve_exact(size.get())?;
        chains.resize_with(size.get(), Chain::new);
        let table = Self {
            id: TableId::fresh(),
            size,
            chains,
            len: 0,
            generation: 0,
            _nosend: PhantomData,
        };
        tracing::debug!(size = size.get(), id = table.id.0, "created table");
        Ok(table)
    }

    pub fn with_default_size() -> Result<Self, TableError> {
        Self::new(DEFAULT_TABLE_SIZE)
    }

    /// Number of buckets.
    pub fn size(&self) -> usize {
        self.size.get()
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bucket index `key` maps to in this table.
    pub fn bucket_of<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> usize {
        hasher::hash(key.as_ref(), self.size)
    }

    /// Find `key` and increment its count, or insert it with count 1.
    ///
    /// On an allocation failure the table is unchanged.
    pub fn lookup_or_insert<K>(&mut self, key: &K) -> Result<&mut Entry, TableError>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        let key = key.as_ref();
        let bucket = self.bucket_of(key);
        match self.chains[bucket].position(key) {
            Some(pos) => {
                let entry = self.chains[bucket].at_mut(pos);
                entry.increment();
                Ok(entry)
            }
            None => {
                let entry = self.chains[bucket].append(key)?;
                self.len += 1;
                self.generation += 1;
                Ok(entry)
            }
        }
    }

    /// Find `key` without inserting or counting.
    pub fn get<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> Option<&Entry> {
        let key = key.as_ref();
        self.chains[self.bucket_of(key)].find(key)
    }

    pub fn contains_key<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Chain stored in bucket `index`, if `index < size`.
    pub fn chain(&self, index: usize) -> Option<&Chain> {
        self.chains.get(index)
    }

    /// Release every entry and the bucket array. Dropping the table does
    /// the same; this form makes the end of its lifetime explicit.
    pub fn destroy(self) {
        drop(self);
    }

    pub(crate) fn id(&self) -> TableId {
        self.id
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Panics if `index >= size`.
    pub(crate) fn chain_at(&self, index: usize) -> &Chain {
        &self.chains[index]
    }
}

impl Drop for Table {
    fn drop(&mut self) {
        tracing::debug!(
            entries = self.len,
            size = self.size.get(),
            id = self.id.0,
            "destroying table"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: a zero-sized table is rejected at construction.
    #[test]
    fn zero_size_rejected() {
        match Table::new(0) {
            Err(TableError::ZeroSize) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    /// Invariant: a new table has `size` empty chains and no entries.
    #[test]
    fn new_table_is_empty() {
        let t = Table::new(16).unwrap();
        assert_eq!(t.size(), 16);
        assert_eq!(t.len(), 0);
        assert!(t.is_empty());
        assert!((0..16).all(|i| t.chain(i).is_some_and(Chain::is_empty)));
        assert!(t.chain(16).is_none());
    }

    #[test]
    fn default_size_is_2000() {
        let t = Table::with_default_size().unwrap();
        assert_eq!(t.size(), DEFAULT_TABLE_SIZE);
    }

    /// Invariant: the first lookup creates count 1; each repeat increments
    /// the same entry without adding a new one.
    #[test]
    fn lookup_inserts_then_increments() {
        let mut t = Table::new(8).unwrap();
        assert_eq!(t.lookup_or_insert("w").unwrap().count(), 1);
        assert_eq!(t.lookup_or_insert("w").unwrap().count(), 2);
        assert_eq!(t.lookup_or_insert("w").unwrap().count(), 3);
        assert_eq!(t.len(), 1);
        assert_eq!(t.get("w").map(Entry::count), Some(3));
    }

    /// Invariant: entries live in the chain their key hashes to, and only
    /// there.
    #[test]
    fn entry_lands_in_its_bucket() {
        let mut t = Table::new(4).unwrap();
        for k in ["a", "b", "c", "dd", "eee"] {
            t.lookup_or_insert(k).unwrap();
        }
        for k in ["a", "b", "c", "dd", "eee"] {
            let home = t.bucket_of(k);
            for i in 0..t.size() {
                let here = t.chain(i).unwrap().find(k.as_bytes()).is_some();
                assert_eq!(here, i == home, "key {k} in bucket {i}");
            }
        }
    }

    /// Invariant: `get` never inserts and never counts.
    #[test]
    fn get_is_read_only() {
        let mut t = Table::new(4).unwrap();
        assert!(t.get("x").is_none());
        assert!(!t.contains_key("x"));
        assert_eq!(t.len(), 0);
        t.lookup_or_insert("x").unwrap();
        let _ = t.get("x");
        let _ = t.get("x");
        assert_eq!(t.get("x").unwrap().count(), 1);
        assert!(t.contains_key("x"));
    }

    /// Invariant: the generation moves on insertion but not on increment.
    #[test]
    fn generation_tracks_insertions_only() {
        let mut t = Table::new(4).unwrap();
        assert_eq!(t.generation(), 0);
        t.lookup_or_insert("a").unwrap();
        assert_eq!(t.generation(), 1);
        t.lookup_or_insert("a").unwrap();
        assert_eq!(t.generation(), 1);
        t.lookup_or_insert("b").unwrap();
        assert_eq!(t.generation(), 2);
    }

    #[test]
    fn tables_get_distinct_ids() {
        let a = Table::new(1).unwrap();
        let b = Table::new(1).unwrap();
        assert_ne!(a.id(), b.id());
    }

    /// Invariant: destroying a fresh table is clean.
    #[test]
    fn create_then_destroy() {
        let t = Table::new(2000).unwrap();
        t.destroy();
        let mut t = Table::new(3).unwrap();
        t.lookup_or_insert("x").unwrap();
        t.destroy();
    }

    /// Invariant: under a single bucket every key shares one chain and keeps
    /// insertion order.
    #[test]
    fn single_bucket_chains_everything() {
        let mut t = Table::new(1).unwrap();
        for k in ["q", "w", "e", "w", "q"] {
            t.lookup_or_insert(k).unwrap();
        }
        let chain = t.chain(0).unwrap();
        let got: Vec<(&[u8], u64)> = chain.iter().map(|e| (e.key(), e.count())).collect();
        assert_eq!(got, [(&b"q"[..], 2), (&b"w"[..], 2), (&b"e"[..], 1)]);
    }

    /// Invariant: an unobtainable bucket array is an allocation error, not a
    /// panic or abort.
    #[test]
    fn oversized_table_is_allocation_error() {
        match Table::new(usize::MAX) {
            Err(TableError::Allocation(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    /// Invariant: keys are bytes; invalid UTF-8 tokens stay distinct and
    /// `str`/`[u8]` lookups of the same bytes hit the same entry.
    #[test]
    fn byte_keys_stay_distinct() {
        let mut t = Table::new(1).unwrap();
        t.lookup_or_insert(b"\xff").unwrap();
        t.lookup_or_insert(b"\xfe").unwrap();
        t.lookup_or_insert(b"\xff").unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.get(b"\xff").map(Entry::count), Some(2));
        assert_eq!(t.get(b"\xfe").map(Entry::count), Some(1));

        t.lookup_or_insert("w").unwrap();
        t.lookup_or_insert(&b"w".to_vec()).unwrap();
        assert_eq!(t.get("w").map(Entry::count), Some(2));
    }
}
