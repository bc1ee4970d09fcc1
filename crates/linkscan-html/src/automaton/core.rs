use strum_macros::Display;

use super::result::{ScanIssue, ScanResult};
use crate::error::ScrapeError;
use crate::lexer::{Token, TokenKind, TokenSource};

/// Where the automaton is in recognizing a tag.
///
/// The initial state is [`AutomatonState::Data`]; [`AutomatonState::Done`] is
/// terminal and is entered on the end-of-stream token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AutomatonState {
    /// Outside any tag.
    Data,
    /// Just saw the `<` of a tag.
    TagOpen,
    /// Saw `</`; the next word is the name of a closing tag.
    EndTagOpen,
    /// Inside an opening tag, between attributes.
    BeforeAttributeName,
    /// Read an attribute name; an `=` may follow.
    AfterAttributeName,
    /// Read `=`; the next value token belongs to the last attribute name.
    BeforeAttributeValue,
    /// The end of the stream was reached.
    Done,
}

/// The two kinds of tag whose URLs are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TagOfInterest {
    /// `<a href="...">`
    Anchor,
    /// `<img src="...">`
    Image,
}

impl TagOfInterest {
    /// Classify a tag name, ASCII case-insensitively.
    #[must_use]
    pub fn from_tag_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("a") {
            Some(Self::Anchor)
        } else if name.eq_ignore_ascii_case("img") {
            Some(Self::Image)
        } else {
            None
        }
    }

    /// The attribute holding the URL for this kind of tag.
    #[must_use]
    pub const fn target_attribute(self) -> &'static str {
        match self {
            Self::Anchor => "href",
            Self::Image => "src",
        }
    }
}

/// What the automaton remembers about the opening tag it is reading.
#[derive(Debug)]
struct OpenTag {
    name: String,
    interest: Option<TagOfInterest>,
    /// The last token was a `/` that will make the tag self-closing if `>`
    /// follows immediately.
    self_closing: bool,
    /// The attribute whose value is expected next is the target attribute.
    capture_value: bool,
    /// First target attribute value seen in this tag.
    pending_url: Option<String>,
}

impl OpenTag {
    fn new(name: String) -> Self {
        let interest = TagOfInterest::from_tag_name(&name);
        Self {
            name,
            interest,
            self_closing: false,
            capture_value: false,
            pending_url: None,
        }
    }
}

/// A single-pass, token-driven automaton that collects anchor and image
/// URLs and checks that tags are correctly nested.
///
/// Nesting problems never fail a scan: they clear the balanced flag, are
/// recorded as [`ScanIssue`]s and scanning carries on, so links after a
/// defect are still collected.
///
/// ```
/// use linkscan_html::{TagAutomaton, tokenize};
///
/// let tokens = tokenize(r#"<A HREF="http://x.test">text</A>"#).unwrap();
/// let result = TagAutomaton::new().scan_tokens(tokens);
/// assert_eq!(result.anchor_links(), ["http://x.test"]);
/// assert!(result.image_links().is_empty());
/// assert!(result.is_balanced());
/// ```
#[derive(Debug)]
pub struct TagAutomaton {
    state: AutomatonState,
    current_tag: Option<OpenTag>,
    /// Names of the open, non-self-closing tags, innermost last.
    tag_stack: Vec<String>,
    anchor_links: Vec<String>,
    image_links: Vec<String>,
    balanced: bool,
    issues: Vec<ScanIssue>,
    token_index: usize,
    // When true, the current token is dispatched again in the new state.
    reconsume: bool,
}

impl Default for TagAutomaton {
    fn default() -> Self {
        Self::new()
    }
}

impl TagAutomaton {
    /// Create an automaton in the [`AutomatonState::Data`] state with an
    /// empty tag stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AutomatonState::Data,
            current_tag: None,
            tag_stack: Vec::new(),
            anchor_links: Vec::new(),
            image_links: Vec::new(),
            balanced: true,
            issues: Vec::new(),
            token_index: 0,
            reconsume: false,
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> AutomatonState {
        self.state
    }

    /// The current nesting depth: the number of open tags awaiting their
    /// closing tag.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.tag_stack.len()
    }

    /// Whether no structural violation has been found so far.
    #[must_use]
    pub const fn is_balanced(&self) -> bool {
        self.balanced
    }

    /// Consume every token of `source` and return the result.
    ///
    /// Scanning stops at the first [`TokenKind::End`] token or when the
    /// source is exhausted, whichever comes first.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::MalformedStream`] if the source reports a
    /// lexical failure. No partial result is returned in that case.
    pub fn scan<S: TokenSource>(mut self, mut source: S) -> Result<ScanResult, ScrapeError> {
        while self.state != AutomatonState::Done {
            match source.next_token() {
                Some(token) => self.process_token(&token?),
                None => self.process_token(&Token::end()),
            }
        }
        Ok(self.finish())
    }

    /// Consume an already lexed token list and return the result.
    ///
    /// A list without a [`TokenKind::End`] token is ended as if it had one.
    #[must_use]
    pub fn scan_tokens<I>(mut self, tokens: I) -> ScanResult
    where
        I: IntoIterator<Item = Token>,
    {
        for token in tokens {
            if self.state == AutomatonState::Done {
                break;
            }
            self.process_token(&token);
        }
        self.finish()
    }

    /// Feed one token to the automaton.
    ///
    /// Tokens after the end-of-stream token are ignored.
    pub fn process_token(&mut self, token: &Token) {
        loop {
            self.reconsume = false;
            match self.state {
                AutomatonState::Data => self.handle_data_state(token),
                AutomatonState::TagOpen => self.handle_tag_open_state(token),
                AutomatonState::EndTagOpen => self.handle_end_tag_open_state(token),
                AutomatonState::BeforeAttributeName => {
                    self.handle_before_attribute_name_state(token);
                }
                AutomatonState::AfterAttributeName => {
                    self.handle_after_attribute_name_state(token);
                }
                AutomatonState::BeforeAttributeValue => {
                    self.handle_before_attribute_value_state(token);
                }
                AutomatonState::Done => {}
            }
            if !self.reconsume {
                break;
            }
        }
        self.token_index += 1;
    }

    /// End the scan and return the result.
    ///
    /// If the end-of-stream token has not been processed yet, it is processed
    /// now, with the same consequences for an in-flight tag or a non-empty
    /// tag stack.
    #[must_use]
    pub fn finish(mut self) -> ScanResult {
        if self.state != AutomatonState::Done {
            self.process_token(&Token::end());
        }
        ScanResult {
            anchor_links: self.anchor_links,
            image_links: self.image_links,
            balanced: self.balanced,
            issues: self.issues,
        }
    }

    // =========================================================================
    // State handlers
    // =========================================================================

    fn handle_data_state(&mut self, token: &Token) {
        match token.kind() {
            TokenKind::Open => self.switch_to(AutomatonState::TagOpen),
            TokenKind::End => {
                if !self.tag_stack.is_empty() {
                    let unclosed = self
                        .tag_stack
                        .iter()
                        .map(|name| format!("<{name}>"))
                        .collect::<Vec<_>>()
                        .join(", ");
                    self.structural_violation(format!(
                        "end of stream with unclosed tags: {unclosed}"
                    ));
                }
                self.switch_to(AutomatonState::Done);
            }
            // Free text and stray markers between tags.
            _ => {}
        }
    }

    fn handle_tag_open_state(&mut self, token: &Token) {
        match token.kind() {
            TokenKind::Slash => self.switch_to(AutomatonState::EndTagOpen),
            TokenKind::Word => {
                self.current_tag = Some(OpenTag::new(token.text_or_empty().to_string()));
                self.switch_to(AutomatonState::BeforeAttributeName);
            }
            TokenKind::End => self.end_of_stream_inside_tag(),
            _ => self.switch_to(AutomatonState::Data),
        }
    }

    fn handle_end_tag_open_state(&mut self, token: &Token) {
        match token.kind() {
            TokenKind::Word => {
                self.close_tag(token.text_or_empty());
                self.switch_to(AutomatonState::Data);
            }
            TokenKind::End => self.end_of_stream_inside_tag(),
            _ => self.switch_to(AutomatonState::Data),
        }
    }

    fn handle_before_attribute_name_state(&mut self, token: &Token) {
        match token.kind() {
            TokenKind::Slash => self.with_current_tag(|tag| tag.self_closing = true),
            TokenKind::Close => {
                self.emit_current_tag();
                self.switch_to(AutomatonState::Data);
            }
            TokenKind::Word => {
                let name = token.text_or_empty();
                self.with_current_tag(|tag| {
                    tag.self_closing = false;
                    tag.capture_value = tag
                        .interest
                        .is_some_and(|kind| name.eq_ignore_ascii_case(kind.target_attribute()));
                });
                self.switch_to(AutomatonState::AfterAttributeName);
            }
            TokenKind::Open => self.abandon_current_tag(),
            TokenKind::End => self.end_of_stream_inside_tag(),
            // A value with no attribute name, or a stray `=`.
            TokenKind::Equals | TokenKind::QuotedText | TokenKind::RawText => {
                self.with_current_tag(|tag| tag.self_closing = false);
            }
        }
    }

    fn handle_after_attribute_name_state(&mut self, token: &Token) {
        match token.kind() {
            TokenKind::Equals => self.switch_to(AutomatonState::BeforeAttributeValue),
            // Value without `=`.
            TokenKind::QuotedText => {
                self.record_attribute_value(token.text_or_empty());
                self.switch_to(AutomatonState::BeforeAttributeName);
            }
            TokenKind::Open => self.abandon_current_tag(),
            TokenKind::End => self.end_of_stream_inside_tag(),
            // The attribute has no value.
            TokenKind::Word | TokenKind::Slash | TokenKind::Close | TokenKind::RawText => {
                self.with_current_tag(|tag| tag.capture_value = false);
                self.reconsume_in(AutomatonState::BeforeAttributeName);
            }
        }
    }

    fn handle_before_attribute_value_state(&mut self, token: &Token) {
        match token.kind() {
            TokenKind::QuotedText | TokenKind::Word => {
                self.record_attribute_value(token.text_or_empty());
                self.switch_to(AutomatonState::BeforeAttributeName);
            }
            TokenKind::Equals => {}
            TokenKind::Open => self.abandon_current_tag(),
            TokenKind::End => self.end_of_stream_inside_tag(),
            // `href=>`: the attribute value is empty.
            TokenKind::Slash | TokenKind::Close | TokenKind::RawText => {
                self.with_current_tag(|tag| tag.capture_value = false);
                self.reconsume_in(AutomatonState::BeforeAttributeName);
            }
        }
    }

    // =========================================================================
    // Transition helpers
    // =========================================================================

    const fn switch_to(&mut self, new_state: AutomatonState) {
        self.state = new_state;
    }

    /// Switch state and dispatch the current token again.
    const fn reconsume_in(&mut self, new_state: AutomatonState) {
        self.reconsume = true;
        self.state = new_state;
    }

    fn with_current_tag(&mut self, update: impl FnOnce(&mut OpenTag)) {
        if let Some(tag) = self.current_tag.as_mut() {
            update(tag);
        }
    }

    /// Keep the value if it belongs to the target attribute and nothing was
    /// captured for this tag yet.
    fn record_attribute_value(&mut self, value: &str) {
        self.with_current_tag(|tag| {
            if tag.capture_value && tag.pending_url.is_none() {
                tag.pending_url = Some(value.to_string());
            }
            tag.capture_value = false;
        });
    }

    /// The `>` of an opening tag: push it unless it is self-closing and hand
    /// over its URL.
    fn emit_current_tag(&mut self) {
        let Some(tag) = self.current_tag.take() else {
            return;
        };

        if !tag.self_closing {
            self.tag_stack.push(tag.name);
        }

        match (tag.interest, tag.pending_url) {
            (Some(TagOfInterest::Anchor), Some(url)) => self.anchor_links.push(url),
            (Some(TagOfInterest::Image), Some(url)) => self.image_links.push(url),
            _ => {}
        }
    }

    /// A closing tag must match the innermost open tag.
    fn close_tag(&mut self, name: &str) {
        match self.tag_stack.last() {
            Some(top) if top.eq_ignore_ascii_case(name) => {
                let _ = self.tag_stack.pop();
            }
            Some(top) => {
                let message = format!("closing tag </{name}> does not match open tag <{top}>");
                self.structural_violation(message);
            }
            None => {
                self.structural_violation(format!("closing tag </{name}> with no open tag"));
            }
        }
    }

    /// A `<` arrived before the current opening tag was closed. The tag and
    /// any URL it carried are dropped.
    fn abandon_current_tag(&mut self) {
        if let Some(tag) = self.current_tag.take() {
            self.structural_violation(format!(
                "tag <{}> abandoned by a new tag before it was closed",
                tag.name
            ));
        }
        self.switch_to(AutomatonState::TagOpen);
    }

    fn end_of_stream_inside_tag(&mut self) {
        let message = match self.current_tag.take() {
            Some(tag) => format!("end of stream inside tag <{}>", tag.name),
            None => "end of stream inside a tag".to_string(),
        };
        self.structural_violation(message);
        self.switch_to(AutomatonState::Done);
    }

    fn structural_violation(&mut self, message: String) {
        self.balanced = false;
        self.issues.push(ScanIssue {
            message,
            token_index: self.token_index,
        });
    }
}
