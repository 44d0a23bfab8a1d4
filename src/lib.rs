//! wordcount: a word-frequency counter on a fixed-size, separate-chaining
//! hash table.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: count word occurrences with one primary operation,
//!   `lookup_or_insert`, and print the table in a deterministic order.
//! - Layers:
//!   - `hasher`: `h = 31 * h + byte` over the key bytes, wrapping in a
//!     `u64`, reduced modulo the bucket count.
//!   - `Chain`: insertion-ordered entries of one bucket; linear search and
//!     tail append.
//!   - `Table`: a fixed array of chains; owns every entry.
//!   - `Cursor`: `(bucket, position)` values walking the table in ascending
//!     bucket order, then chain order.
//!
//! Constraints
//! - Single-threaded: `Table` is `!Send`/`!Sync`.
//! - Fixed size: no resizing, no rehashing, no removal.
//! - Unique keys: at most one entry per distinct key for the lifetime of the
//!   table. Keys are byte strings; UTF-8 is never required.
//! - Allocation failure is an error value, never a partial insert.
//!
//! Cursor validity
//! - Cursors carry the identity of the table that made them and its
//!   insertion generation. Resolving a cursor against another table, or
//!   after an insertion, panics. Incrementing an existing count keeps
//!   cursors valid.
//! - The borrowing [`Iter`] holds `&Table`, so the borrow checker rules out
//!   insertion while it is alive.
//!
//! Output order
//! - The driver prints entries in cursor order. That order depends on bucket
//!   placement only: it is neither alphabetical nor by frequency.
//!
//! Around the core
//! - `reader`: whitespace tokenizer with per-reader truncation warning.
//! - `count`: reader-to-table pipeline and `"<count> <word>"` output.
//! - `tail`: last-N / from-line-N line selection for the `tail` binary.
//! - `config`, `logging`, `error`: command line, `tracing` setup, error types.

mod chain;
pub mod config;
pub mod count;
mod cursor;
pub mod error;
pub mod hasher;
pub mod logging;
pub mod reader;
mod table;
mod table_proptest;
pub mod tail;

// Public surface
pub use chain::{Chain, Entry};
pub use cursor::{Cursor, Iter};
pub use error::{Error, TableError};
pub use table::{Table, DEFAULT_TABLE_SIZE};
