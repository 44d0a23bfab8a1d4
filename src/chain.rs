//! Chain: the insertion-ordered entries of one bucket.

use crate::error::TableError;
use std::borrow::Cow;
use std::collections::TryReserveError;

/// A stored `(key, count)` pair. The key is a byte string and never changes
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    key: Box<[u8]>,
    count: u64,
}

impl Entry {
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// The key as `str`, if it is valid UTF-8.
    pub fn key_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.key).ok()
    }

    /// The key for display, with invalid UTF-8 replaced.
    pub fn key_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.key)
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    #[inline]
    pub(crate) fn increment(&mut self) {
        self.count += 1;
    }
}

/// Entries that hashed to the same bucket, in the order they were first
/// inserted. An empty chain owns no heap storage.
#[derive(Debug, Default)]
pub struct Chain {
    entries: Vec<Entry>,
}

impl Chain {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry whose key equals `key`, scanning in insertion order.
    pub fn find(&self, key: &[u8]) -> Option<&Entry> {
        self.entries.iter().find(|e| *e.key == *key)
    }

    pub(crate) fn position(&self, key: &[u8]) -> Option<usize> {
        self.entries.iter().position(|e| *e.key == *key)
    }

    /// Entry at chain position `pos`.
    pub fn get(&self, pos: usize) -> Option<&Entry> {
        self.entries.get(pos)
    }

    /// Panics if `pos` is out of bounds.
    pub(crate) fn at_mut(&mut self, pos: usize) -> &mut Entry {
        &mut self.entries[pos]
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Append a fresh entry with count 1 at the tail.
    ///
    /// The caller guarantees `key` is not already in this chain. Both the key
    /// copy and the new slot are reserved before anything is committed, so on
    /// error the chain is unchanged.
    pub(crate) fn append(&mut self, key: &[u8]) -> Result<&mut Entry, TableError> {
        self.append_reserving(key, |entries| entries.try_reserve(1))
    }

    fn append_reserving<F>(
        &mut self,
        key: &[u8],
        reserve_slot: F,
    ) -> Result<&mut Entry, TableError>
    where
        F: FnOnce(&mut Vec<Entry>) -> Result<(), TryReserveError>,
    {
        debug_assert!(self.position(key).is_none(), "duplicate key in chain");
        let mut owned = Vec::new();
        owned.try_reserve_exact(key.len())?;
        owned.extend_from_slice(key);
        reserve_slot(&mut self.entries)?;
        self.entries.push(Entry {
            key: owned.into_boxed_slice(),
            count: 1,
        });
        let last = self.entries.len() - 1;
        Ok(&mut self.entries[last])
    }
}

impl core::ops::Index<usize> for Chain {
    type Output = Entry;

    fn index(&self, pos: usize) -> &Entry {
        &self.entries[pos]
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Entry;
    type IntoIter = core::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: a new chain is empty and owns no storage.
    #[test]
    fn new_chain_is_empty() {
        let c = Chain::new();
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert!(c.find(b"x").is_none());
        assert!(c.get(0).is_none());
        assert_eq!(c.entries.capacity(), 0);
    }

    /// Invariant: append creates count 1 at the tail; iteration follows
    /// insertion order.
    #[test]
    fn append_preserves_insertion_order() {
        let mut c = Chain::new();
        for k in ["delta", "alpha", "charlie"] {
            let e = c.append(k.as_bytes()).unwrap();
            assert_eq!(e.key_str(), Some(k));
            assert_eq!(e.count(), 1);
        }
        let keys: Vec<&[u8]> = c.iter().map(Entry::key).collect();
        assert_eq!(keys, [&b"delta"[..], &b"alpha"[..], &b"charlie"[..]]);
        assert_eq!(c.get(1).map(Entry::key), Some(&b"alpha"[..]));
    }

    /// Invariant: find and position agree and never mutate.
    #[test]
    fn find_and_position_agree() {
        let mut c = Chain::new();
        c.append(b"a").unwrap();
        c.append(b"b").unwrap();
        assert_eq!(c.position(b"b"), Some(1));
        assert_eq!(c.find(b"b").map(Entry::count), Some(1));
        assert_eq!(c.position(b"z"), None);
        assert!(c.find(b"z").is_none());
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn increment_in_place() {
        let mut c = Chain::new();
        c.append(b"w").unwrap();
        c.at_mut(0).increment();
        c.at_mut(0).increment();
        assert_eq!(c.find(b"w").unwrap().count(), 3);
    }

    #[test]
    fn empty_key_is_a_valid_key() {
        let mut c = Chain::new();
        c.append(b"").unwrap();
        assert_eq!(c.position(b""), Some(0));
    }

    /// Invariant: keys compare as bytes; distinct invalid UTF-8 keys stay
    /// distinct.
    #[test]
    fn non_utf8_keys_are_distinct() {
        let mut c = Chain::new();
        c.append(b"\xff").unwrap();
        c.append(b"\xfe").unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.position(b"\xfe"), Some(1));
        assert!(c[0].key_str().is_none());
        assert_eq!(c[0].key_lossy(), "\u{fffd}");
    }

    /// Invariant: an append whose slot reservation fails leaves the chain
    /// exactly as it was.
    #[test]
    fn failed_append_leaves_chain_unchanged() {
        let mut c = Chain::new();
        c.append(b"kept").unwrap();
        let before: Vec<Entry> = c.iter().cloned().collect();

        let res = c.append_reserving(b"lost", |entries| entries.try_reserve(usize::MAX));
        match res {
            Err(TableError::Allocation(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(c.len(), 1);
        assert!(c.find(b"lost").is_none());
        let after: Vec<Entry> = c.iter().cloned().collect();
        assert_eq!(before, after);

        // The chain is still usable afterwards.
        c.append(b"next").unwrap();
        assert_eq!(c.position(b"next"), Some(1));
    }
}
