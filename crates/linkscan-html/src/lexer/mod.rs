//! HTML lexer module.
//!
//! Turns raw markup into the flat token stream the tag automaton consumes.
//! The token model is deliberately coarse: tag brackets, slashes, `=`,
//! words, quoted values and free text.

/// HTML lexer state machine implementation.
pub mod core;
/// Helper methods for character consumption and look-ahead.
pub mod helpers;
/// Token types produced by the lexer.
pub mod token;

pub use self::core::HtmlLexer;
pub use token::{SourcePosition, Token, TokenKind};

use crate::error::LexError;

/// A pull-based, forward-only producer of tokens.
///
/// `None` and a [`TokenKind::End`] token both signal the end of the stream.
/// Every iterator of `Result<Token, LexError>` is a token source, which is how
/// [`HtmlLexer`] and hand-built token lists plug into the automaton.
pub trait TokenSource {
    /// Get the next token, a lexical failure, or `None` at the end of the stream.
    fn next_token(&mut self) -> Option<Result<Token, LexError>>;
}

impl<I> TokenSource for I
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    fn next_token(&mut self) -> Option<Result<Token, LexError>> {
        self.next()
    }
}

/// Lex the whole input into a token list ending with [`TokenKind::End`].
///
/// # Errors
///
/// Returns the first [`LexError`] the lexer encounters.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    HtmlLexer::new(input.to_string()).collect()
}
