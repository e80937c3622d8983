//! Integration tests for the CSS tokenizer.

use cssdiff_css::tokenizer::{CSSToken, CSSTokenizer, HashType};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<CSSToken> {
    let mut tokenizer = CSSTokenizer::new(input);
    tokenizer.run();
    tokenizer.into_tokens()
}

#[test]
fn test_whitespace() {
    let tokens = tokenize("   \t\n  ");
    assert_eq!(tokens.len(), 2); // whitespace + EOF
    assert!(matches!(tokens[0], CSSToken::Whitespace));
    assert!(matches!(tokens[1], CSSToken::EOF));
}

#[test]
fn test_ident() {
    let tokens = tokenize("color");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], CSSToken::ident("color"));
}

#[test]
fn test_ident_with_hyphen() {
    let tokens = tokenize("nav-item");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        CSSToken::Ident(name) => assert_eq!(name, "nav-item"),
        _ => panic!("Expected Ident token"),
    }
}

#[test]
fn test_ident_with_underscore() {
    let tokens = tokenize("_private");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        CSSToken::Ident(name) => assert_eq!(name, "_private"),
        _ => panic!("Expected Ident token"),
    }
}

#[test]
fn test_class_selector_tokens() {
    // ".foo" is a delim followed by an adjacent ident; the selector parser
    // relies on that adjacency.
    let tokens = tokenize(".foo");
    assert_eq!(tokens.len(), 3);
    assert!(matches!(tokens[0], CSSToken::Delim('.')));
    match &tokens[1] {
        CSSToken::Ident(name) => assert_eq!(name, "foo"),
        _ => panic!("Expected Ident token"),
    }
}

#[test]
fn test_function() {
    let tokens = tokenize("rgb(");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], CSSToken::function("rgb"));
}

#[test]
fn test_at_keyword() {
    let tokens = tokenize("@media");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], CSSToken::at_keyword("media"));
}

#[test]
fn test_hash_id() {
    let tokens = tokenize("#header");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], CSSToken::hash_id("header"));
}

#[test]
fn test_hash_numeric_unrestricted() {
    // #123 starts with a digit, which is NOT an ident-start code point,
    // so it's unrestricted type
    let tokens = tokenize("#123");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        CSSToken::Hash { value, hash_type } => {
            assert_eq!(value, "123");
            assert_eq!(*hash_type, HashType::Unrestricted);
        }
        _ => panic!("Expected Hash token"),
    }
}

#[test]
fn test_string_double_quote() {
    let tokens = tokenize("\"hello world\"");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], CSSToken::string("hello world"));
}

#[test]
fn test_string_single_quote() {
    let tokens = tokenize("'hello'");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        CSSToken::String(value) => assert_eq!(value, "hello"),
        _ => panic!("Expected String token"),
    }
}

#[test]
fn test_bad_string_on_newline() {
    let tokens = tokenize("\"broken\nrest");
    assert!(matches!(tokens[0], CSSToken::BadString));
}

#[test]
fn test_url_unquoted() {
    let tokens = tokenize("url(images/bg.png)");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        CSSToken::Url(value) => assert_eq!(value, "images/bg.png"),
        _ => panic!("Expected Url token"),
    }
}

#[test]
fn test_url_quoted_is_function() {
    // A quoted url argument keeps the function form per the spec
    let tokens = tokenize("url(\"images/bg.png\")");
    match &tokens[0] {
        CSSToken::Function(name) => assert_eq!(name, "url"),
        _ => panic!("Expected Function token"),
    }
}

#[test]
fn test_comment_skipped() {
    let tokens = tokenize("/* a comment */color");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        CSSToken::Ident(name) => assert_eq!(name, "color"),
        _ => panic!("Expected Ident token"),
    }
}

#[test]
fn test_unterminated_comment() {
    let tokens = tokenize("/* never closed");
    assert_eq!(tokens.len(), 1);
    assert!(matches!(tokens[0], CSSToken::EOF));
}

#[test]
fn test_number() {
    let tokens = tokenize("12");
    match tokens[0] {
        CSSToken::Number(value) => assert!((value - 12.0).abs() < f64::EPSILON),
        _ => panic!("Expected Number token"),
    }
}

#[test]
fn test_number_leading_dot() {
    let tokens = tokenize(".5");
    match tokens[0] {
        CSSToken::Number(value) => assert!((value - 0.5).abs() < f64::EPSILON),
        _ => panic!("Expected Number token"),
    }
}

#[test]
fn test_dimension_splits_into_number_and_ident() {
    // The trimmed token set has no dimension token; the unit is tokenized
    // separately and discarded along with the rest of the block.
    let tokens = tokenize("12px");
    assert_eq!(tokens.len(), 3);
    assert!(matches!(tokens[0], CSSToken::Number(_)));
    match &tokens[1] {
        CSSToken::Ident(name) => assert_eq!(name, "px"),
        _ => panic!("Expected Ident token"),
    }
}

#[test]
fn test_escape_in_ident() {
    // \41 is LATIN CAPITAL LETTER A; the whitespace after a hex escape is
    // consumed as part of the escape
    let tokens = tokenize("\\41 b");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        CSSToken::Ident(name) => assert_eq!(name, "Ab"),
        _ => panic!("Expected Ident token"),
    }
}

#[test]
fn test_cdo_cdc() {
    let tokens = tokenize("<!-- -->");
    assert_eq!(tokens.len(), 4);
    assert!(matches!(tokens[0], CSSToken::CDO));
    assert!(matches!(tokens[1], CSSToken::Whitespace));
    assert!(matches!(tokens[2], CSSToken::CDC));
}

#[test]
fn test_punctuation_tokens() {
    let tokens = tokenize("{}[](),:;");
    let expected = [
        CSSToken::LeftBrace,
        CSSToken::RightBrace,
        CSSToken::LeftBracket,
        CSSToken::RightBracket,
        CSSToken::LeftParen,
        CSSToken::RightParen,
        CSSToken::Comma,
        CSSToken::Colon,
        CSSToken::Semicolon,
        CSSToken::EOF,
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn test_delim() {
    let tokens = tokenize("+");
    assert_eq!(tokens[0], CSSToken::delim('+'));
}
