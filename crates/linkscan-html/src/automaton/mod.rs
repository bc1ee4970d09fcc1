//! The tag automaton: a finite-state machine over the lexer's token stream.
//!
//! The automaton tracks just enough context to know which attribute of the
//! current tag it is looking for, and keeps a stack of open tag names to
//! decide whether the document is well balanced.

/// Automaton states and transition function.
pub mod core;
/// The data handed back once a scan completes.
pub mod result;

pub use self::core::{AutomatonState, TagAutomaton, TagOfInterest};
pub use result::{ScanIssue, ScanResult};

use crate::error::ScrapeError;
use crate::lexer::TokenSource;

/// Scan a token stream with a fresh [`TagAutomaton`].
///
/// # Errors
///
/// Returns [`ScrapeError::MalformedStream`] if the token source reports a
/// lexical failure.
pub fn scan<S: TokenSource>(source: S) -> Result<ScanResult, ScrapeError> {
    TagAutomaton::new().scan(source)
}
