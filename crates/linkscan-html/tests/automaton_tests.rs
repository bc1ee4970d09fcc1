//! Integration tests for the tag automaton, driven by hand-built token streams.

use linkscan_html::{
    AutomatonState, LexError, ScanResult, ScrapeError, SourcePosition, TagAutomaton, Token,
    TokenKind, scan,
};
use strum::IntoEnumIterator;

/// Helper to scan a token list with a fresh automaton
fn scan_tokens(tokens: Vec<Token>) -> ScanResult {
    TagAutomaton::new().scan_tokens(tokens)
}

/// `<name attr="value" ...>` as tokens
fn start_tag(name: &str, attributes: &[(&str, &str)]) -> Vec<Token> {
    let mut tokens = vec![Token::open(), Token::word(name)];
    for (attribute, value) in attributes {
        tokens.push(Token::word(*attribute));
        tokens.push(Token::equals());
        tokens.push(Token::quoted_text(*value));
    }
    tokens.push(Token::close());
    tokens
}

/// `<name attr="value" ... />` as tokens
fn self_closing_tag(name: &str, attributes: &[(&str, &str)]) -> Vec<Token> {
    let mut tokens = start_tag(name, attributes);
    let close = tokens.pop();
    tokens.push(Token::slash());
    tokens.extend(close);
    tokens
}

/// `</name>` as tokens
fn end_tag(name: &str) -> Vec<Token> {
    vec![
        Token::open(),
        Token::slash(),
        Token::word(name),
        Token::close(),
    ]
}

fn document(parts: Vec<Vec<Token>>) -> Vec<Token> {
    let mut tokens: Vec<Token> = parts.into_iter().flatten().collect();
    tokens.push(Token::end());
    tokens
}

#[test]
fn test_single_anchor() {
    let result = scan_tokens(document(vec![
        start_tag("A", &[("HREF", "http://x.test")]),
        vec![Token::raw_text("text")],
        end_tag("A"),
    ]));
    assert_eq!(result.anchor_links(), ["http://x.test"]);
    assert!(result.image_links().is_empty());
    assert!(result.is_balanced());
    assert!(result.issues().is_empty());
}

#[test]
fn test_anchor_left_open_by_mismatched_closer() {
    let result = scan_tokens(document(vec![
        start_tag("DIV", &[]),
        start_tag("A", &[("HREF", "a")]),
        end_tag("DIV"),
    ]));
    assert_eq!(result.anchor_links(), ["a"]);
    assert!(!result.is_balanced());
    assert!(result.issues()[0].message.contains("</DIV>"));
}

#[test]
fn test_empty_stream() {
    let result = scan_tokens(vec![Token::end()]);
    assert!(result.anchor_links().is_empty());
    assert!(result.image_links().is_empty());
    assert!(result.is_balanced());

    let result = scan_tokens(Vec::new());
    assert!(result.is_balanced());
    assert!(result.issues().is_empty());
}

#[test]
fn test_well_formed_nesting_is_balanced() {
    let result = scan_tokens(document(vec![
        start_tag("html", &[]),
        start_tag("body", &[("class", "main")]),
        start_tag("div", &[]),
        start_tag("div", &[]),
        vec![Token::raw_text("inner")],
        end_tag("div"),
        end_tag("div"),
        end_tag("body"),
        end_tag("html"),
    ]));
    assert!(result.is_balanced());
}

#[test]
fn test_crossed_tags_are_unbalanced_after_correct_links() {
    let result = scan_tokens(document(vec![
        start_tag("a", &[("href", "one")]),
        end_tag("a"),
        self_closing_tag("img", &[("src", "one.png")]),
        start_tag("b", &[]),
        start_tag("i", &[]),
        end_tag("b"),
        end_tag("i"),
    ]));
    assert_eq!(result.anchor_links(), ["one"]);
    assert_eq!(result.image_links(), ["one.png"]);
    assert!(!result.is_balanced());
}

#[test]
fn test_self_closing_image_is_not_pushed() {
    let result = scan_tokens(document(vec![
        start_tag("p", &[]),
        self_closing_tag("img", &[("src", "photo.jpg"), ("alt", "A photo")]),
        end_tag("p"),
    ]));
    assert_eq!(result.image_links(), ["photo.jpg"]);
    assert!(result.is_balanced());
}

#[test]
fn test_self_closing_tag_without_attributes() {
    let result = scan_tokens(document(vec![
        vec![Token::open(), Token::word("br"), Token::slash(), Token::close()],
    ]));
    assert!(result.is_balanced());
}

#[test]
fn test_first_href_wins() {
    let result = scan_tokens(document(vec![
        start_tag("a", &[("href", "first"), ("HREF", "second")]),
        end_tag("a"),
    ]));
    assert_eq!(result.anchor_links(), ["first"]);
}

#[test]
fn test_duplicate_links_are_kept_in_document_order() {
    let result = scan_tokens(document(vec![
        start_tag("a", &[("href", "b.html")]),
        end_tag("a"),
        start_tag("a", &[("href", "a.html")]),
        end_tag("a"),
        start_tag("a", &[("href", "b.html")]),
        end_tag("a"),
    ]));
    assert_eq!(result.anchor_links(), ["b.html", "a.html", "b.html"]);
}

#[test]
fn test_values_are_not_normalized() {
    let result = scan_tokens(document(vec![
        start_tag("a", &[("href", "  ../Up Dir/?q=1&amp;r=2#Top ")]),
        end_tag("a"),
    ]));
    assert_eq!(result.anchor_links(), ["  ../Up Dir/?q=1&amp;r=2#Top "]);
}

#[test]
fn test_tags_of_interest_without_target_attribute() {
    let result = scan_tokens(document(vec![
        start_tag("a", &[("name", "top")]),
        end_tag("a"),
        self_closing_tag("img", &[("alt", "nothing")]),
        start_tag("a", &[]),
        end_tag("a"),
    ]));
    assert!(result.anchor_links().is_empty());
    assert!(result.image_links().is_empty());
    assert!(result.is_balanced());
}

#[test]
fn test_target_attribute_belongs_to_its_tag() {
    let result = scan_tokens(document(vec![
        start_tag("a", &[("src", "not-a-link")]),
        end_tag("a"),
        self_closing_tag("img", &[("href", "not-an-image")]),
        start_tag("link", &[("href", "style.css")]),
        end_tag("link"),
    ]));
    assert!(result.anchor_links().is_empty());
    assert!(result.image_links().is_empty());
}

#[test]
fn test_irrelevant_attribute_value_is_not_read_as_attribute_name() {
    // <a title=href href=target.html></a>
    let result = scan_tokens(document(vec![
        vec![
            Token::open(),
            Token::word("a"),
            Token::word("title"),
            Token::equals(),
            Token::word("href"),
            Token::word("href"),
            Token::equals(),
            Token::word("target.html"),
            Token::close(),
        ],
        end_tag("a"),
    ]));
    assert_eq!(result.anchor_links(), ["target.html"]);
    assert!(result.is_balanced());
}

#[test]
fn test_quoted_irrelevant_value_is_skipped() {
    let result = scan_tokens(document(vec![
        start_tag("a", &[("title", "href"), ("href", "x")]),
        end_tag("a"),
    ]));
    assert_eq!(result.anchor_links(), ["x"]);
}

#[test]
fn test_unquoted_value_is_accepted_like_a_quoted_one() {
    let result = scan_tokens(document(vec![vec![
        Token::open(),
        Token::word("img"),
        Token::word("src"),
        Token::equals(),
        Token::word("/images/logo.png"),
        Token::slash(),
        Token::close(),
    ]]));
    assert_eq!(result.image_links(), ["/images/logo.png"]);
    assert!(result.is_balanced());
}

#[test]
fn test_quoted_value_without_equals_is_tolerated() {
    let result = scan_tokens(document(vec![
        vec![
            Token::open(),
            Token::word("a"),
            Token::word("href"),
            Token::quoted_text("loose.html"),
            Token::close(),
        ],
        end_tag("a"),
    ]));
    assert_eq!(result.anchor_links(), ["loose.html"]);
}

#[test]
fn test_valueless_href_does_not_capture_next_attribute() {
    // <a href title="t"></a>
    let result = scan_tokens(document(vec![
        vec![
            Token::open(),
            Token::word("a"),
            Token::word("href"),
            Token::word("title"),
            Token::equals(),
            Token::quoted_text("t"),
            Token::close(),
        ],
        end_tag("a"),
    ]));
    assert!(result.anchor_links().is_empty());
    assert!(result.is_balanced());
}

#[test]
fn test_empty_unquoted_value_before_close() {
    // <a href=></a>
    let result = scan_tokens(document(vec![
        vec![
            Token::open(),
            Token::word("a"),
            Token::word("href"),
            Token::equals(),
            Token::close(),
        ],
        end_tag("a"),
    ]));
    assert!(result.anchor_links().is_empty());
    assert!(result.is_balanced());
}

#[test]
fn test_stray_tokens_inside_tag_are_ignored() {
    let result = scan_tokens(document(vec![
        vec![
            Token::open(),
            Token::word("a"),
            Token::equals(),
            Token::quoted_text("orphan"),
            Token::word("href"),
            Token::equals(),
            Token::quoted_text("kept"),
            Token::close(),
        ],
        end_tag("a"),
    ]));
    assert_eq!(result.anchor_links(), ["kept"]);
    assert!(result.is_balanced());
}

#[test]
fn test_nested_same_name_tags_close_in_lifo_order() {
    let result = scan_tokens(document(vec![
        start_tag("a", &[("href", "outer")]),
        start_tag("a", &[("href", "inner")]),
        end_tag("a"),
        end_tag("a"),
    ]));
    assert_eq!(result.anchor_links(), ["outer", "inner"]);
    assert!(result.is_balanced());

    let result = scan_tokens(document(vec![
        start_tag("div", &[]),
        start_tag("span", &[]),
        start_tag("div", &[]),
        end_tag("div"),
        end_tag("div"),
        end_tag("span"),
    ]));
    assert!(!result.is_balanced());
}

#[test]
fn test_closing_tag_names_compare_case_insensitively() {
    let result = scan_tokens(document(vec![start_tag("DIV", &[]), end_tag("div")]));
    assert!(result.is_balanced());
}

#[test]
fn test_closing_tag_with_empty_stack() {
    let result = scan_tokens(document(vec![
        end_tag("p"),
        self_closing_tag("img", &[("src", "late.png")]),
    ]));
    assert!(!result.is_balanced());
    assert_eq!(result.image_links(), ["late.png"]);
    assert_eq!(result.issues().len(), 1);
    assert!(result.issues()[0].message.contains("no open tag"));
    // OPEN, SLASH, WORD(p): the name revealed the violation
    assert_eq!(result.issues()[0].token_index, 2);
}

#[test]
fn test_unclosed_tag_at_end_of_stream() {
    let result = scan_tokens(document(vec![
        start_tag("html", &[]),
        start_tag("body", &[]),
        end_tag("body"),
    ]));
    assert!(!result.is_balanced());
    assert_eq!(result.issues().len(), 1);
    assert!(result.issues()[0].message.contains("<html>"));
}

#[test]
fn test_end_of_stream_inside_tag_discards_pending_url() {
    let result = scan_tokens(vec![
        Token::open(),
        Token::word("a"),
        Token::word("href"),
        Token::equals(),
        Token::quoted_text("never-closed"),
        Token::end(),
    ]);
    assert!(result.anchor_links().is_empty());
    assert!(!result.is_balanced());
}

#[test]
fn test_end_of_stream_in_every_tag_state_is_an_imbalance() {
    let prefixes: Vec<Vec<Token>> = vec![
        vec![Token::open()],
        vec![Token::open(), Token::slash()],
        vec![Token::open(), Token::word("p")],
        vec![Token::open(), Token::word("p"), Token::word("id")],
        vec![Token::open(), Token::word("p"), Token::word("id"), Token::equals()],
    ];
    for mut tokens in prefixes {
        tokens.push(Token::end());
        let result = scan_tokens(tokens);
        assert!(!result.is_balanced());
    }
}

#[test]
fn test_abandoned_tag_loses_its_url() {
    // <a href="x" <b></b>
    let result = scan_tokens(document(vec![
        vec![
            Token::open(),
            Token::word("a"),
            Token::word("href"),
            Token::equals(),
            Token::quoted_text("x"),
        ],
        start_tag("b", &[]),
        end_tag("b"),
    ]));
    assert!(result.anchor_links().is_empty());
    assert!(!result.is_balanced());
    assert!(result.issues()[0].message.contains("abandoned"));
}

#[test]
fn test_unexpected_token_after_open_resyncs_silently() {
    let unexpected = TokenKind::iter()
        .filter(|kind| !matches!(kind, TokenKind::Slash | TokenKind::Word | TokenKind::End));
    for kind in unexpected {
        let result = scan_tokens(document(vec![
            vec![Token::open(), Token::new(kind, None)],
            start_tag("a", &[("href", "after")]),
            end_tag("a"),
        ]));
        assert_eq!(result.anchor_links(), ["after"], "after {kind}");
        assert!(result.is_balanced(), "after {kind}");
    }
}

#[test]
fn test_open_marker_after_open_marker_resyncs_outside_tags() {
    // `< <a href="x">` reads as free text after the resync.
    let result = scan_tokens(document(vec![
        vec![Token::open()],
        start_tag("a", &[("href", "x")]),
    ]));
    assert!(result.anchor_links().is_empty());
    assert!(result.is_balanced());
    assert!(result.issues().is_empty());
}

#[test]
fn test_open_marker_after_end_tag_open_resyncs_outside_tags() {
    // `</ <a href="x">`
    let result = scan_tokens(document(vec![
        vec![Token::open(), Token::slash()],
        start_tag("a", &[("href", "x")]),
    ]));
    assert!(result.anchor_links().is_empty());
    assert!(result.is_balanced());
}

#[test]
fn test_structural_violations_leave_the_warning_log_alone() {
    linkscan_common::warning::set_quiet(true);
    let result = scan_tokens(document(vec![end_tag("never-opened-elsewhere")]));
    let message = &result.issues()[0].message;
    assert_eq!(message, "closing tag </never-opened-elsewhere> with no open tag");
    assert!(linkscan_common::warning::warn_once("Scraper", message));
}

#[test]
fn test_tokens_after_end_are_ignored() {
    let result = scan_tokens(vec![
        Token::end(),
        Token::open(),
        Token::slash(),
        Token::word("div"),
        Token::close(),
    ]);
    assert!(result.is_balanced());
}

#[test]
fn test_states_follow_the_token_stream() {
    let mut automaton = TagAutomaton::new();
    assert_eq!(automaton.state(), AutomatonState::Data);

    let steps = [
        (Token::raw_text("intro"), AutomatonState::Data),
        (Token::open(), AutomatonState::TagOpen),
        (Token::word("img"), AutomatonState::BeforeAttributeName),
        (Token::word("src"), AutomatonState::AfterAttributeName),
        (Token::equals(), AutomatonState::BeforeAttributeValue),
        (Token::quoted_text("a.png"), AutomatonState::BeforeAttributeName),
        (Token::close(), AutomatonState::Data),
        (Token::open(), AutomatonState::TagOpen),
        (Token::slash(), AutomatonState::EndTagOpen),
        (Token::word("img"), AutomatonState::Data),
        (Token::close(), AutomatonState::Data),
        (Token::end(), AutomatonState::Done),
    ];
    for (token, expected) in steps {
        automaton.process_token(&token);
        assert_eq!(automaton.state(), expected, "after {token}");
    }
    assert_eq!(automaton.depth(), 0);
    assert!(automaton.is_balanced());
}

#[test]
fn test_depth_tracks_nesting() {
    let mut automaton = TagAutomaton::new();
    for token in start_tag("ul", &[]).into_iter().chain(start_tag("li", &[])) {
        automaton.process_token(&token);
    }
    assert_eq!(automaton.depth(), 2);
    for token in end_tag("li") {
        automaton.process_token(&token);
    }
    assert_eq!(automaton.depth(), 1);

    let result = automaton.finish();
    assert!(!result.is_balanced());
}

#[test]
fn test_scan_propagates_lexical_failure() {
    let source = vec![
        Ok(Token::open()),
        Ok(Token::word("a")),
        Err(LexError::UnterminatedQuotedValue {
            position: SourcePosition::START,
        }),
    ];
    let error = scan(source.into_iter()).unwrap_err();
    assert!(matches!(
        error,
        ScrapeError::MalformedStream(LexError::UnterminatedQuotedValue { .. })
    ));
}

#[test]
fn test_scan_ends_exhausted_source() {
    let source: Vec<Result<Token, LexError>> = start_tag("div", &[]).into_iter().map(Ok).collect();
    let result = scan(source.into_iter()).unwrap();
    assert!(!result.is_balanced());
    assert!(result.issues()[0].message.contains("<div>"));
}
