//! Error types for lexing and scanning.
//!
//! Only failures that prevent a document from being scanned at all are
//! errors. Tag nesting problems are reported through
//! [`ScanResult::is_balanced`](crate::ScanResult::is_balanced) and
//! [`ScanResult::issues`](crate::ScanResult::issues) instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::lexer::SourcePosition;

/// Character-level input the lexer cannot turn into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A quoted attribute value reached the end of input before its closing quote.
    #[error("unterminated quoted attribute value starting at {position}")]
    UnterminatedQuotedValue {
        /// Where the opening quote was found.
        position: SourcePosition,
    },

    /// A `<!--` comment reached the end of input before `-->`.
    #[error("unterminated comment starting at {position}")]
    UnterminatedComment {
        /// Where the `<!--` was found.
        position: SourcePosition,
    },
}

/// Error type for a document scan.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The token source reported a lexical failure.
    #[error("malformed token stream: {0}")]
    MalformedStream(#[from] LexError),

    /// The document could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// The document that was being read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },
}
