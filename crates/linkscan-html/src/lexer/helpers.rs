//! Helper functions for the HTML lexer.
//!
//! This module contains the input-handling primitives the lexing modes are
//! written in terms of:
//! - Character consumption with line/column tracking
//! - Look-ahead ("the next few characters are")
//! - Character classes used to delimit words and values

use super::core::HtmlLexer;

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HtmlLexer {
    /// Consume the next input character.
    ///
    /// Returns the character at the current position and advances the
    /// position, keeping the line/column counters in step. Returns None at the
    /// end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        if c == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        Some(c)
    }

    /// Peek at a codepoint at the given offset from the current position
    /// without consuming it.
    #[must_use]
    pub(super) fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// Check if the next few characters match the target string exactly.
    #[must_use]
    pub(super) fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// Check if the next few characters match the target string using ASCII
    /// case-insensitive comparison.
    #[must_use]
    pub(super) fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.input[self.current_pos..]
            .get(..target.len())
            .is_some_and(|next| next.eq_ignore_ascii_case(target))
    }

    /// Consume the given string from the input.
    /// Caller must have already verified the characters are present.
    pub(super) fn consume_string(&mut self, target: &str) {
        for _ in target.chars() {
            let _ = self.consume();
        }
    }

    /// Consume characters for as long as `predicate` holds and return them.
    pub(super) fn consume_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut consumed = String::new();
        while let Some(c) = self.peek_codepoint(0) {
            if !predicate(c) {
                break;
            }
            consumed.push(c);
            let _ = self.consume();
        }
        consumed
    }

    /// True when the input is positioned on something that starts markup:
    /// a tag, an end tag, a comment, a declaration or a processing
    /// instruction. A `<` followed by anything else is plain text.
    #[must_use]
    pub(super) fn at_markup_start(&self) -> bool {
        self.peek_codepoint(0) == Some('<')
            && self
                .peek_codepoint(1)
                .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'))
    }

    /// HTML whitespace: tab, line feed, form feed, carriage return, space.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C' | '\r')
    }

    /// Characters that end a tag or attribute name.
    pub(super) const fn is_word_char(input_char: char) -> bool {
        !Self::is_whitespace_char(input_char)
            && !matches!(input_char, '/' | '=' | '>' | '<' | '"' | '\'')
    }

    /// Characters that end an unquoted attribute value.
    pub(super) const fn is_unquoted_value_char(input_char: char) -> bool {
        !Self::is_whitespace_char(input_char) && !matches!(input_char, '>' | '<')
    }
}
