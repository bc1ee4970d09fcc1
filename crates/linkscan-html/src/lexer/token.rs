use core::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// The classification of a lexical unit.
///
/// The lexer only distinguishes the handful of markers the tag automaton
/// needs: tag brackets, the slash of closing and self-closing tags, the
/// attribute `=`, words (tag and attribute names, unquoted values), quoted
/// attribute values and the free text between tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
pub enum TokenKind {
    /// `<` that starts a tag.
    Open,
    /// `>` that ends a tag.
    Close,
    /// `/` inside a tag.
    Slash,
    /// `=` between an attribute name and its value.
    Equals,
    /// A tag name, an attribute name or an unquoted attribute value.
    Word,
    /// A quoted attribute value, quotes stripped.
    QuotedText,
    /// Free text between tags.
    RawText,
    /// End of the token stream.
    End,
}

/// A classified lexical unit with its literal payload, if any.
///
/// Marker tokens (`Open`, `Close`, `Slash`, `Equals`, `End`) carry no text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    kind: TokenKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl Token {
    /// Create a token of the given kind with an optional payload.
    #[must_use]
    pub const fn new(kind: TokenKind, text: Option<String>) -> Self {
        Self { kind, text }
    }

    /// `<`
    #[must_use]
    pub const fn open() -> Self {
        Self::new(TokenKind::Open, None)
    }

    /// `>`
    #[must_use]
    pub const fn close() -> Self {
        Self::new(TokenKind::Close, None)
    }

    /// `/`
    #[must_use]
    pub const fn slash() -> Self {
        Self::new(TokenKind::Slash, None)
    }

    /// `=`
    #[must_use]
    pub const fn equals() -> Self {
        Self::new(TokenKind::Equals, None)
    }

    /// A word: tag name, attribute name or unquoted value.
    #[must_use]
    pub fn word(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Word, Some(text.into()))
    }

    /// A quoted attribute value. `text` is the value without its quotes.
    #[must_use]
    pub fn quoted_text(text: impl Into<String>) -> Self {
        Self::new(TokenKind::QuotedText, Some(text.into()))
    }

    /// Free text between tags.
    #[must_use]
    pub fn raw_text(text: impl Into<String>) -> Self {
        Self::new(TokenKind::RawText, Some(text.into()))
    }

    /// End of stream.
    #[must_use]
    pub const fn end() -> Self {
        Self::new(TokenKind::End, None)
    }

    /// The kind of this token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The literal payload, if this kind carries one.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The literal payload, or the empty string for marker tokens.
    #[must_use]
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Returns true if this is an end-of-stream token.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self.kind, TokenKind::End)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.text.as_deref()) {
            (TokenKind::Open, _) => write!(f, "OPEN"),
            (TokenKind::Close, _) => write!(f, "CLOSE"),
            (TokenKind::Slash, _) => write!(f, "SLASH"),
            (TokenKind::Equals, _) => write!(f, "EQUALS"),
            (TokenKind::End, _) => write!(f, "EOF"),
            (TokenKind::QuotedText, text) => write!(f, "QuotedText(\"{}\")", text.unwrap_or_default()),
            (TokenKind::Word, text) => write!(f, "Word({})", text.unwrap_or_default()),
            // Show line breaks explicitly so a dump stays one token per line
            (TokenKind::RawText, text) => write!(
                f,
                "RawText({})",
                text.unwrap_or_default().replace('\n', "\\n").replace('\t', "\\t")
            ),
        }
    }
}

/// A 1-based line and column in the lexer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourcePosition {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl SourcePosition {
    /// The position of the first character of the input.
    pub const START: Self = Self { line: 1, column: 1 };
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
