//! Whitespace-delimited word reader.
//!
//! Splits a byte stream into maximal runs of non-whitespace bytes. Words
//! longer than the configured maximum are cut to that many bytes; the rest of
//! the word is consumed and discarded. The first cut on a given reader emits
//! a single warning.

use std::borrow::Cow;
use std::io::{self, BufRead};

/// Longest word kept intact by default, in bytes.
pub const MAX_WORD_LEN: usize = 100;

/// The C `isspace` set in the "C" locale.
#[inline]
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// One token read from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// At most `max_len` bytes of the token, exactly as they appeared.
    pub text: Vec<u8>,
    /// Length of the full token in the input, in bytes.
    pub len: usize,
    kept: usize,
}

impl Word {
    pub fn truncated(&self) -> bool {
        self.len > self.kept
    }

    /// The kept bytes for display, with invalid UTF-8 replaced.
    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }
}

pub struct WordReader<R> {
    inner: R,
    max_len: usize,
    warned: bool,
    buf: Vec<u8>,
}

impl<R: BufRead> WordReader<R> {
    /// `max_len` is clamped to at least 1.
    pub fn new(inner: R, max_len: usize) -> Self {
        Self {
            inner,
            max_len: max_len.max(1),
            warned: false,
            buf: Vec::new(),
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Whether this reader has already truncated a word.
    pub fn warned(&self) -> bool {
        self.warned
    }

    /// Next word, or `None` at end of input.
    pub fn next_word(&mut self) -> io::Result<Option<Word>> {
        if !self.skip_space()? {
            return Ok(None);
        }
        self.buf.clear();
        let mut len = 0usize;
        loop {
            let chunk = match self.inner.fill_buf() {
                Ok(c) => c,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if chunk.is_empty() {
                break;
            }
            let run = chunk.iter().position(|&b| is_space(b)).unwrap_or(chunk.len());
            let room = self.max_len - self.buf.len();
            self.buf.extend_from_slice(&chunk[..run.min(room)]);
            len += run;
            let hit_space = run < chunk.len();
            self.inner.consume(run);
            if hit_space {
                break;
            }
        }

        let kept = self.buf.len();
        if len > kept && !self.warned {
            self.warned = true;
            tracing::warn!(max_len = self.max_len, "some words may be shortened");
        }
        Ok(Some(Word {
            text: self.buf.clone(),
            len,
            kept,
        }))
    }

    /// Consume leading whitespace. Returns `false` at end of input.
    fn skip_space(&mut self) -> io::Result<bool> {
        loop {
            let chunk = match self.inner.fill_buf() {
                Ok(c) => c,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if chunk.is_empty() {
                return Ok(false);
            }
            match chunk.iter().position(|&b| !is_space(b)) {
                Some(i) => {
                    self.inner.consume(i);
                    return Ok(true);
                }
                None => {
                    let n = chunk.len();
                    self.inner.consume(n);
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for WordReader<R> {
    type Item = io::Result<Word>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_word().transpose()
    }
}
