//! Traversal in bucket-then-chain order.
//!
//! A [`Cursor`] is a plain `(bucket, position)` value resolved against the
//! table that produced it. Cursors remember the table's identity and its
//! insertion generation; handing a cursor to another table, or using one
//! after an insertion, panics. Incrementing the count of an existing key does
//! not invalidate cursors.
//!
//! The end sentinel is `bucket == size, position == 0`. It compares equal to
//! every other end sentinel of the same table and is never dereferenceable.

use crate::chain::Entry;
use crate::table::{Table, TableId};
use core::iter::FusedIterator;

#[derive(Copy, Clone, Debug)]
pub struct Cursor {
    table: TableId,
    bucket: usize,
    pos: usize,
    generation: u64,
}

impl Cursor {
    /// Bucket index this cursor points into (`size` for the end sentinel).
    pub fn bucket(&self) -> usize {
        self.bucket
    }

    /// Position within the bucket's chain.
    pub fn position(&self) -> usize {
        self.pos
    }
}

// Generation is a validity stamp, not part of the position.
impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table && self.bucket == other.bucket && self.pos == other.pos
    }
}

impl Eq for Cursor {}

impl Table {
    fn cursor(&self, bucket: usize, pos: usize) -> Cursor {
        Cursor {
            table: self.id(),
            bucket,
            pos,
            generation: self.generation(),
        }
    }

    /// First entry of the lowest non-empty bucket at or after `start`.
    fn first_from(&self, start: usize) -> Cursor {
        (start..self.size())
            .find(|&i| !self.chain_at(i).is_empty())
            .map_or_else(|| self.end(), |i| self.cursor(i, 0))
    }

    fn check(&self, c: &Cursor) {
        assert!(
            c.table == self.id(),
            "cursor used with a table other than the one that produced it"
        );
        assert!(
            c.generation == self.generation(),
            "table was modified while a cursor was outstanding"
        );
    }

    /// Cursor at the first entry, or [`end`](Self::end) when empty.
    pub fn begin(&self) -> Cursor {
        self.first_from(0)
    }

    /// Past-the-end sentinel.
    pub fn end(&self) -> Cursor {
        self.cursor(self.size(), 0)
    }

    pub fn is_end(&self, c: Cursor) -> bool {
        self.check(&c);
        c.bucket == self.size()
    }

    /// Cursor following `c`: the next entry in the same chain, else the head
    /// of the next non-empty chain, else the end sentinel.
    ///
    /// Panics if `c` is the end sentinel or does not belong to this table in
    /// its current state.
    pub fn next(&self, c: Cursor) -> Cursor {
        assert!(!self.is_end(c), "advanced a cursor past the end");
        if c.pos + 1 < self.chain_at(c.bucket).len() {
            self.cursor(c.bucket, c.pos + 1)
        } else {
            self.first_from(c.bucket + 1)
        }
    }

    /// Entry referenced by `c`.
    ///
    /// Panics on the end sentinel and on cursors that do not belong to this
    /// table in its current state.
    pub fn entry(&self, c: Cursor) -> &Entry {
        assert!(!self.is_end(c), "dereferenced the end cursor");
        &self.chain_at(c.bucket)[c.pos]
    }

    /// Borrowing iterator over all entries in cursor order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            table: self,
            cursor: self.begin(),
            remaining: self.len(),
        }
    }
}

/// Iterator over entries in bucket-then-chain order.
pub struct Iter<'a> {
    table: &'a Table,
    cursor: Cursor,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            debug_assert!(self.cursor == self.table.end());
            return None;
        }
        let entry = self.table.entry(self.cursor);
        self.cursor = self.table.next(self.cursor);
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
