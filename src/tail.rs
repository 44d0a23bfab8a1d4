//! Line selection for `tail`: the last N lines, or everything from line N.

use crate::config::TailMode;
use crate::error::TailError;
use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// Longest line accepted by [`last_lines`], excluding the newline.
pub const MAX_LINE: usize = 1024;

/// Write the last `n` lines of `input` to `out`.
///
/// Lines are kept byte-for-byte, including their terminator; a final line
/// without a newline is written as-is. Fails with
/// [`TailError::LineTooLong`] for a line over [`MAX_LINE`] bytes.
pub fn last_lines<R, W>(mut input: R, n: u64, out: &mut W) -> Result<(), TailError>
where
    R: BufRead,
    W: Write,
{
    if n == 0 {
        return Ok(());
    }
    let cap = usize::try_from(n).unwrap_or(usize::MAX);
    let mut ring: VecDeque<Vec<u8>> = VecDeque::new();
    let mut line = Vec::new();
    let mut line_no = 0u64;
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        line_no += 1;
        let body = line.strip_suffix(b"\n").unwrap_or(&line);
        if body.len() > MAX_LINE {
            return Err(TailError::LineTooLong { line: line_no });
        }
        // Once full, the evicted buffer becomes the next read buffer.
        let spare = if ring.len() == cap {
            ring.pop_front().unwrap_or_default()
        } else {
            Vec::new()
        };
        ring.push_back(core::mem::replace(&mut line, spare));
    }
    tracing::debug!(lines = line_no, kept = ring.len(), "tail buffer filled");
    for line in &ring {
        out.write_all(line)?;
    }
    Ok(())
}

/// Write every line of `input` starting at 1-based line `first` to `out`.
/// `first == 0` is treated as 1. Line length is not limited.
pub fn from_line<R, W>(mut input: R, first: u64, out: &mut W) -> Result<(), TailError>
where
    R: BufRead,
    W: Write,
{
    let first = first.max(1);
    let mut line = Vec::new();
    let mut line_no = 0u64;
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        line_no += 1;
        if line_no >= first {
            out.write_all(&line)?;
        }
    }
    Ok(())
}

/// Dispatch on `mode`.
pub fn run<R, W>(input: R, mode: TailMode, out: &mut W) -> Result<(), TailError>
where
    R: BufRead,
    W: Write,
{
    match mode {
        TailMode::Last(n) => last_lines(input, n, out),
        TailMode::From(n) => from_line(input, n, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn last(input: &str, n: u64) -> String {
        let mut out = Vec::new();
        last_lines(Cursor::new(input), n, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn from(input: &str, n: u64) -> String {
        let mut out = Vec::new();
        from_line(Cursor::new(input), n, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn last_n_of_more() {
        assert_eq!(last("1\n2\n3\n4\n5\n", 2), "4\n5\n");
    }

    #[test]
    fn last_n_of_fewer_prints_all() {
        assert_eq!(last("1\n2\n", 10), "1\n2\n");
    }

    #[test]
    fn last_zero_prints_nothing() {
        assert_eq!(last("1\n2\n", 0), "");
    }

    #[test]
    fn unterminated_last_line_kept() {
        assert_eq!(last("a\nb\nc", 2), "b\nc");
    }

    #[test]
    fn ring_wraps_many_times() {
        let input: String = (1..=100).map(|i| format!("{i}\n")).collect();
        assert_eq!(last(&input, 3), "98\n99\n100\n");
    }

    #[test]
    fn overlong_line_rejected() {
        let input = format!("ok\n{}\n", "x".repeat(MAX_LINE + 1));
        let mut out = Vec::new();
        match last_lines(Cursor::new(input), 5, &mut out) {
            Err(TailError::LineTooLong { line: 2 }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn max_length_line_accepted() {
        let line = "y".repeat(MAX_LINE);
        assert_eq!(last(&format!("{line}\n"), 1), format!("{line}\n"));
    }

    #[test]
    fn from_line_skips_prefix() {
        assert_eq!(from("1\n2\n3\n", 2), "2\n3\n");
        assert_eq!(from("1\n2\n3\n", 0), "1\n2\n3\n");
        assert_eq!(from("1\n2\n3\n", 9), "");
    }

    #[test]
    fn from_line_has_no_length_limit() {
        let long = "z".repeat(MAX_LINE * 3);
        assert_eq!(from(&format!("{long}\n"), 1), format!("{long}\n"));
    }

    #[test]
    fn run_dispatches() {
        let mut out = Vec::new();
        run(Cursor::new("a\nb\nc\n"), TailMode::From(3), &mut out).unwrap();
        assert_eq!(out, b"c\n");
    }
}
