//! Error types for input parsing and dictionary loading.
//!
//! The correction core itself cannot fail; these cover the text and files
//! fed into it. The binary wraps them in `anyhow` with extra context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Malformed session input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    /// The first non-blank line is not a word count.
    #[error("line {line}: expected dictionary size, found {found:?}")]
    InvalidCount { line: usize, found: String },

    /// Input ended before the announced number of dictionary words.
    #[error("expected {expected} dictionary words, found {found}")]
    TruncatedDictionary { expected: usize, found: usize },
}

/// Failure to read a word list from disk.
#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("failed to read word list {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
