//! HTML link extraction and tag balance checking for linkscan.
//!
//! # Scope
//!
//! This crate implements:
//! - **Lexer** - turns markup into a coarse token stream (tag brackets,
//!   slashes, `=`, words, quoted values, free text)
//!   - Comments, DOCTYPE and other declarations are skipped
//!   - `script` and `style` content is a single text token
//!
//! - **Tag Automaton** - a single-pass state machine over that stream
//!   - Collects `<a href>` and `<img src>` values in document order
//!   - Keeps a stack of open tags and reports whether the document is
//!     well balanced
//!
//! - **Scraper** - lexes and scans a whole document from a string or a file
//!
//! # Not Implemented
//!
//! - Implicit tag closing and void-element tables: `<br>` without `</br>`
//!   or `<br/>` leaves the document unbalanced
//! - URL resolution or normalization
//! - Character reference decoding in attribute values

/// Tag automaton and scan results.
pub mod automaton;
/// Lexing and scanning errors.
pub mod error;
/// HTML lexer producing the automaton's token stream.
pub mod lexer;
/// Document-level scraper API.
pub mod scraper;

pub use automaton::{AutomatonState, ScanIssue, ScanResult, TagAutomaton, TagOfInterest, scan};
pub use error::{LexError, ScrapeError};
pub use lexer::{HtmlLexer, SourcePosition, Token, TokenKind, TokenSource, tokenize};
pub use scraper::{HtmlScraper, WebScraper};
