//! Error types for the input-deck codec.

use std::fmt;
use std::io;

/// Errors that can occur while building, parsing, or writing a deck.
#[derive(Debug)]
pub enum DeckError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// A line could not be parsed as `key = value`.
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// Human-readable description of what went wrong.
        reason: String,
    },
    /// A key was set twice.
    DuplicateKey {
        /// The repeated key.
        key: String,
    },
    /// A key contains characters the engine parser does not accept.
    InvalidKey {
        /// The rejected key.
        key: String,
    },
    /// A required key is absent.
    MissingKey {
        /// The absent key.
        key: String,
    },
    /// A value does not have the expected shape.
    InvalidValue {
        /// Key whose value was rejected.
        key: String,
        /// What the caller expected (e.g. `"3 reals"`).
        expected: &'static str,
        /// The value as rendered in the deck.
        found: String,
    },
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MalformedLine { line, reason } => {
                write!(f, "malformed line {line}: {reason}")
            }
            Self::DuplicateKey { key } => write!(f, "duplicate key '{key}'"),
            Self::InvalidKey { key } => write!(f, "invalid key '{key}'"),
            Self::MissingKey { key } => write!(f, "missing key '{key}'"),
            Self::InvalidValue {
                key,
                expected,
                found,
            } => write!(f, "key '{key}': expected {expected}, found '{found}'"),
        }
    }
}

impl std::error::Error for DeckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DeckError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
