use std::iter::FusedIterator;

use linkscan_common::warning::warn_once;

use super::token::{SourcePosition, Token, TokenKind};
use crate::error::LexError;

/// Elements whose content is lexed as a single run of text up to the
/// matching end tag, so markup inside scripts and stylesheets never reaches
/// the tag automaton.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Longest declaration text quoted back in a warning.
const WARNING_EXCERPT_LEN: usize = 60;

/// Which kind of input the lexer is currently looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LexerMode {
    /// Between tags.
    Text,
    /// Between a `<` and its `>`.
    Tag,
    /// Inside the content of a raw text element; holds the element name.
    RawText(&'static str),
    /// The end token (or an error) has been returned.
    Done,
}

/// What the lexer remembers about the tag it is currently inside.
#[derive(Debug, Default)]
pub(super) struct TagScan {
    /// The first word of the tag.
    pub(super) name: Option<String>,
    /// A `/` came before the tag name.
    pub(super) is_end_tag: bool,
    /// The previous token was `=`, so the next unquoted run is a value.
    pub(super) after_equals: bool,
    /// The previous token was `/`.
    pub(super) last_was_slash: bool,
}

/// A pull-based HTML lexer producing the token stream consumed by the
/// [`TagAutomaton`](crate::TagAutomaton).
///
/// The lexer is an iterator of `Result<Token, LexError>`. It yields exactly
/// one [`TokenKind::End`] token at the end of input and is fused afterwards.
/// After a lexical failure it yields the error once and then ends.
///
/// ```
/// use linkscan_html::{HtmlLexer, Token};
///
/// let tokens: Result<Vec<Token>, _> = HtmlLexer::new(r#"<a href="x">"#.to_string()).collect();
/// assert_eq!(
///     tokens.unwrap(),
///     vec![
///         Token::open(),
///         Token::word("a"),
///         Token::word("href"),
///         Token::equals(),
///         Token::quoted_text("x"),
///         Token::close(),
///         Token::end(),
///     ]
/// );
/// ```
#[derive(Debug)]
pub struct HtmlLexer {
    pub(super) mode: LexerMode,
    pub(super) input: String,
    pub(super) current_pos: usize,
    pub(super) position: SourcePosition,
    pub(super) tag: TagScan,
}

impl HtmlLexer {
    /// Create a new lexer for the given input.
    #[must_use]
    pub fn new(input: String) -> Self {
        Self {
            mode: LexerMode::Text,
            input,
            current_pos: 0,
            position: SourcePosition::START,
            tag: TagScan::default(),
        }
    }

    /// The line and column of the next character to be lexed.
    #[must_use]
    pub const fn position(&self) -> SourcePosition {
        self.position
    }

    /// Lex the next token between tags.
    fn lex_text(&mut self) -> Result<Option<Token>, LexError> {
        let Some(c) = self.peek_codepoint(0) else {
            self.mode = LexerMode::Done;
            return Ok(Some(Token::end()));
        };

        if c == '<' {
            if self.next_few_characters_are("<!--") {
                self.skip_comment()?;
                return Ok(None);
            }
            match self.peek_codepoint(1) {
                Some('!' | '?') => {
                    self.skip_declaration();
                    return Ok(None);
                }
                Some(next) if next.is_ascii_alphabetic() || next == '/' => {
                    let _ = self.consume();
                    self.tag = TagScan::default();
                    self.mode = LexerMode::Tag;
                    return Ok(Some(Token::open()));
                }
                _ => {}
            }
        }

        // A lone `<` is text; consume it before looking for the next markup.
        let mut text = String::new();
        if let Some(first) = self.consume() {
            text.push(first);
        }
        while self.peek_codepoint(0).is_some() && !self.at_markup_start() {
            if let Some(next) = self.consume() {
                text.push(next);
            }
        }

        if text.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(Token::raw_text(text)))
        }
    }

    /// Lex the next token inside a tag.
    fn lex_tag(&mut self) -> Result<Option<Token>, LexError> {
        let _ = self.consume_while(Self::is_whitespace_char);

        let Some(c) = self.peek_codepoint(0) else {
            // End of input inside a tag: the text mode emits the end token and
            // the automaton reports the unterminated tag.
            self.mode = LexerMode::Text;
            return Ok(None);
        };

        let token = match c {
            '>' => {
                let _ = self.consume();
                return Ok(Some(self.finish_tag()));
            }
            '"' | '\'' => self.consume_quoted_value(c)?,
            '<' => {
                // A new tag starts before this one was closed.
                let _ = self.consume();
                self.tag = TagScan::default();
                Token::open()
            }
            _ if self.tag.after_equals => {
                self.tag.after_equals = false;
                Token::word(self.consume_while(Self::is_unquoted_value_char))
            }
            '/' => {
                let _ = self.consume();
                if self.tag.name.is_none() {
                    self.tag.is_end_tag = true;
                }
                Token::slash()
            }
            '=' => {
                let _ = self.consume();
                self.tag.after_equals = true;
                Token::equals()
            }
            _ => {
                let word = self.consume_while(Self::is_word_char);
                if self.tag.name.is_none() {
                    self.tag.name = Some(word.clone());
                }
                Token::word(word)
            }
        };

        self.tag.last_was_slash = token.kind() == TokenKind::Slash;
        Ok(Some(token))
    }

    /// Lex the content of a raw text element up to its end tag.
    fn lex_raw_text(&mut self, element: &str) -> Option<Token> {
        self.mode = LexerMode::Text;

        let end_tag = format!("</{element}");
        let mut text = String::new();
        while !self.at_end_tag(&end_tag) {
            match self.consume() {
                Some(c) => text.push(c),
                None => break,
            }
        }

        if text.trim().is_empty() {
            None
        } else {
            Some(Token::raw_text(text))
        }
    }

    /// True when the input is positioned on `end_tag` (ASCII
    /// case-insensitive) followed by whitespace, `/`, `>` or the end of
    /// input, so `</scripts>` does not end a script.
    fn at_end_tag(&self, end_tag: &str) -> bool {
        self.next_few_characters_are_case_insensitive(end_tag)
            && self
                .peek_codepoint(end_tag.len())
                .is_none_or(|c| Self::is_whitespace_char(c) || matches!(c, '/' | '>'))
    }

    /// The `>` of the current tag was consumed.
    fn finish_tag(&mut self) -> Token {
        self.mode = LexerMode::Text;

        let tag = std::mem::take(&mut self.tag);
        if !tag.is_end_tag && !tag.last_was_slash {
            let raw_text_element = tag.name.as_deref().and_then(|name| {
                RAW_TEXT_ELEMENTS
                    .into_iter()
                    .find(|element| name.eq_ignore_ascii_case(element))
            });
            if let Some(element) = raw_text_element {
                self.mode = LexerMode::RawText(element);
            }
        }

        Token::close()
    }

    /// Consume a quoted attribute value, quotes included, and return its
    /// contents verbatim.
    fn consume_quoted_value(&mut self, quote: char) -> Result<Token, LexError> {
        let start = self.position;
        let _ = self.consume();
        self.tag.after_equals = false;

        let mut value = String::new();
        loop {
            match self.consume() {
                Some(c) if c == quote => return Ok(Token::quoted_text(value)),
                Some(c) => value.push(c),
                None => return Err(LexError::UnterminatedQuotedValue { position: start }),
            }
        }
    }

    /// Skip a `<!-- ... -->` comment.
    fn skip_comment(&mut self) -> Result<(), LexError> {
        let start = self.position;
        self.consume_string("<!--");
        loop {
            if self.next_few_characters_are("-->") {
                self.consume_string("-->");
                return Ok(());
            }
            if self.consume().is_none() {
                return Err(LexError::UnterminatedComment { position: start });
            }
        }
    }

    /// Skip a `<!DOCTYPE ...>`, another `<!...>` declaration or a `<?...>`
    /// processing instruction, up to and including its `>`.
    fn skip_declaration(&mut self) {
        let is_doctype = self.next_few_characters_are_case_insensitive("<!doctype");
        let start = self.position;
        let declaration = self.consume_while(|c| c != '>');
        let _ = self.consume();

        if !is_doctype {
            let excerpt: String = declaration.chars().take(WARNING_EXCERPT_LEN).collect();
            let _ = warn_once(
                "Lexer",
                &format!("skipping markup declaration {excerpt}> at {start}"),
            );
        }
    }
}

impl Iterator for HtmlLexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let step = match self.mode {
                LexerMode::Text => self.lex_text(),
                LexerMode::Tag => self.lex_tag(),
                LexerMode::RawText(element) => Ok(self.lex_raw_text(element)),
                LexerMode::Done => return None,
            };
            match step {
                Ok(Some(token)) => return Some(Ok(token)),
                Ok(None) => {}
                Err(error) => {
                    self.mode = LexerMode::Done;
                    return Some(Err(error));
                }
            }
        }
    }
}

impl FusedIterator for HtmlLexer {}
