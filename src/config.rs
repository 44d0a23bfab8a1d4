//! Command-line configuration for the `wordcount` and `tail` binaries.

use crate::error::ConfigError;
use crate::reader::MAX_WORD_LEN;
use crate::table::DEFAULT_TABLE_SIZE;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Lines printed by `tail` when no count is given.
pub const DEFAULT_TAIL_LINES: u64 = 10;

/// Count whitespace-separated words in FILE (or stdin) and print
/// "<count> <word>" lines in table order.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "wordcount", disable_help_subcommand = true)]
pub struct Config {
    /// Number of hash buckets.
    #[arg(
        short = 's',
        long = "size",
        value_name = "N",
        default_value_t = DEFAULT_TABLE_SIZE,
        value_parser = positive
    )]
    pub table_size: usize,
    /// Longest word kept intact, in bytes.
    #[arg(
        short = 'm',
        long = "max-word",
        value_name = "N",
        default_value_t = MAX_WORD_LEN,
        value_parser = positive
    )]
    pub max_word_len: usize,
    /// Debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
    /// Input file; `-` or nothing reads stdin.
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_size: DEFAULT_TABLE_SIZE,
            max_word_len: MAX_WORD_LEN,
            verbose: false,
            input: None,
        }
    }
}

impl Config {
    /// The file to read, or `None` for stdin.
    pub fn input_path(&self) -> Option<&Path> {
        self.input.as_deref().filter(|p| *p != Path::new("-"))
    }
}

fn positive(s: &str) -> Result<usize, ConfigError> {
    match s.parse::<usize>() {
        Ok(0) => Err(ConfigError::NotPositive),
        Ok(n) => Ok(n),
        Err(_) => Err(ConfigError::InvalidNumber(s.to_string())),
    }
}

/// Which lines `tail` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailMode {
    /// The last `n` lines.
    Last(u64),
    /// Every line from 1-based line `n` on.
    From(u64),
}

/// One positional argument of `tail`: a line count or the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TailArg {
    Count(TailMode),
    File(PathBuf),
}

/// `-N` and `+N` are counts, anything else names the input. A bare `-` is a
/// count with no digits and is rejected. `+0` is read as `+1`.
fn parse_tail_arg(s: &str) -> Result<TailArg, ConfigError> {
    let (sign, digits) = match s.as_bytes().first() {
        Some(&c @ (b'-' | b'+')) => (c, &s[1..]),
        _ => return Ok(TailArg::File(PathBuf::from(s))),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::InvalidNumber(s.to_string()));
    }
    let n: u64 = digits
        .parse()
        .map_err(|_| ConfigError::InvalidNumber(s.to_string()))?;
    Ok(TailArg::Count(if sign == b'+' {
        TailMode::From(n.max(1))
    } else {
        TailMode::Last(n)
    }))
}

/// Print the last N lines (default 10) of FILE or stdin, or with +N every
/// line starting at line N.
#[derive(Debug, Parser)]
#[command(name = "tail", disable_help_subcommand = true)]
struct TailCli {
    /// Debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
    /// `-N` or `+N`, and FILE, in either order.
    #[arg(
        value_name = "-N|+N|FILE",
        value_parser = parse_tail_arg,
        allow_negative_numbers = true
    )]
    args: Vec<TailArg>,
}

impl TailCli {
    fn resolve(self) -> Result<TailConfig, ConfigError> {
        let mut mode = None;
        let mut input = None;
        for arg in self.args {
            match arg {
                TailArg::Count(m) => {
                    if mode.replace(m).is_some() {
                        return Err(ConfigError::Duplicate("line count"));
                    }
                }
                TailArg::File(p) => {
                    if input.replace(p).is_some() {
                        return Err(ConfigError::Duplicate("file name"));
                    }
                }
            }
        }
        Ok(TailConfig {
            mode: mode.unwrap_or(TailMode::Last(DEFAULT_TAIL_LINES)),
            input,
            verbose: self.verbose,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailConfig {
    pub mode: TailMode,
    pub input: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for TailConfig {
    fn default() -> Self {
        Self {
            mode: TailMode::Last(DEFAULT_TAIL_LINES),
            input: None,
            verbose: false,
        }
    }
}

impl TailConfig {
    /// Parse a full argument list, program name first.
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        TailCli::try_parse_from(args)?
            .resolve()
            .map_err(|e| TailCli::command().error(ErrorKind::ArgumentConflict, e))
    }
}
