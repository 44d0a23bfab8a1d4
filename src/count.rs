//! Word counting pipeline: reader into table, table out as text.

use crate::config::Config;
use crate::error::Error;
use crate::reader::WordReader;
use crate::table::Table;
use std::io::{BufRead, Write};

/// Count every word of `input` into a fresh table sized per `cfg`.
pub fn count_words<R: BufRead>(input: R, cfg: &Config) -> Result<Table, Error> {
    let mut table = Table::new(cfg.table_size)?;
    let mut words = WordReader::new(input, cfg.max_word_len);
    let mut total = 0u64;
    while let Some(word) = words.next_word()? {
        table.lookup_or_insert(&word.text)?;
        total += 1;
    }
    tracing::debug!(words = total, distinct = table.len(), "input counted");
    Ok(table)
}

/// Write one `"<count> <word>\n"` line per entry, in table order. Word
/// bytes are written exactly as read.
pub fn write_counts<W: Write>(table: &Table, out: &mut W) -> std::io::Result<()> {
    for entry in table {
        write!(out, "{} ", entry.count())?;
        out.write_all(entry.key())?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
