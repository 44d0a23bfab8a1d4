//! Error taxonomy for the table, the command-line configuration and the
//! drivers built on top of them.

use std::collections::TryReserveError;
use std::io;

/// Failures reported by [`Table`](crate::Table) and [`Chain`](crate::Chain).
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A table needs at least one bucket.
    #[error("table size must be at least 1")]
    ZeroSize,
    /// Backing storage for the bucket array, a chain slot or a key copy
    /// could not be obtained. The structure is left as it was.
    #[error("allocation failed")]
    Allocation(#[from] TryReserveError),
}

/// Rejections raised while parsing argument values. Clap reports them with
/// the offending argument attached.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),
    #[error("must be at least 1")]
    NotPositive,
    #[error("{0} given more than once")]
    Duplicate(&'static str),
}

/// Failures of the line-selection engine behind `tail`.
#[derive(Debug, thiserror::Error)]
pub enum TailError {
    /// 1-based number of the offending line.
    #[error("line {line} is too long")]
    LineTooLong { line: u64 },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Umbrella error for the binaries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("hash table: {0}")]
    Table(#[from] TableError),
    #[error(transparent)]
    Tail(#[from] TailError),
    #[error("i/o: {0}")]
    Io(#[from] io::Error),
}
