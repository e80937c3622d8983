//! Integration tests for the CSS rule-set parser.

use cssdiff_css::{ParseOutput, parse_css_text};

/// Helper to parse CSS text.
fn parse(css: &str) -> ParseOutput {
    parse_css_text(css)
}

#[test]
fn test_empty_input() {
    let output = parse("");
    assert!(output.stylesheet.rule_sets.is_empty());
    assert!(output.errors.is_empty());
}

#[test]
fn test_whitespace_only_input() {
    let output = parse("  \n\t  ");
    assert!(output.stylesheet.rule_sets.is_empty());
    assert!(output.errors.is_empty());
}

#[test]
fn test_single_rule() {
    let output = parse(".foo { color: red; }");
    assert!(output.errors.is_empty());
    assert_eq!(output.stylesheet.rule_sets.len(), 1);
    assert_eq!(output.stylesheet.rule_sets[0].selectors.len(), 1);
}

#[test]
fn test_selector_list_splits_on_commas() {
    let output = parse(".foo, .bar { color: red; }");
    assert!(output.errors.is_empty());
    assert_eq!(output.stylesheet.rule_sets.len(), 1);
    assert_eq!(output.stylesheet.rule_sets[0].selectors.len(), 2);
}

#[test]
fn test_multiple_rule_sets() {
    let output = parse(".a { } .b { } .c { }");
    assert!(output.errors.is_empty());
    assert_eq!(output.stylesheet.rule_sets.len(), 3);
}

#[test]
fn test_declarations_are_discarded() {
    // Declarations never surface in the model; only the selector list does.
    let output = parse(".a { color: red; margin: 0 auto; font: 12px \"Fira Sans\"; }");
    assert!(output.errors.is_empty());
    assert_eq!(output.stylesheet.rule_sets.len(), 1);
    assert_eq!(output.stylesheet.rule_sets[0].selectors.len(), 1);
}

#[test]
fn test_statement_at_rule_ignored() {
    let output = parse("@import url(base.css); .a { }");
    assert!(output.errors.is_empty());
    assert_eq!(output.stylesheet.rule_sets.len(), 1);
}

#[test]
fn test_non_grouping_at_rule_block_ignored() {
    let output = parse("@font-face { font-family: Fira; src: url(fira.woff2); } .a { }");
    assert!(output.errors.is_empty());
    assert_eq!(output.stylesheet.rule_sets.len(), 1);
}

#[test]
fn test_keyframes_block_ignored() {
    // Keyframe selectors (from/to/percentages) are not rule sets.
    let output = parse("@keyframes spin { from { opacity: 0; } to { opacity: 1; } }");
    assert!(output.errors.is_empty());
    assert!(output.stylesheet.rule_sets.is_empty());
}

#[test]
fn test_media_block_is_descended_into() {
    let output = parse("@media screen and (min-width: 600px) { .inner { } } .outer { }");
    assert!(output.errors.is_empty());
    // Nested rule sets are flattened in document order.
    assert_eq!(output.stylesheet.rule_sets.len(), 2);
    assert_eq!(output.stylesheet.rule_sets[0].selectors.len(), 1);
}

#[test]
fn test_supports_block_is_descended_into() {
    let output = parse("@supports (display: grid) { .grid { } }");
    assert!(output.errors.is_empty());
    assert_eq!(output.stylesheet.rule_sets.len(), 1);
}

#[test]
fn test_nested_grouping_at_rules() {
    let output = parse("@media screen { @supports (display: grid) { .deep { } } }");
    assert!(output.errors.is_empty());
    assert_eq!(output.stylesheet.rule_sets.len(), 1);
}

#[test]
fn test_invalid_selector_is_partial_success() {
    // The broken rule surfaces an error; the healthy rule is kept.
    let output = parse("% { color: red; } .ok { color: blue; }");
    assert_eq!(output.errors.len(), 1);
    assert!(output.errors[0].contains("invalid selector"));

    let with_selectors: Vec<_> = output
        .stylesheet
        .rule_sets
        .iter()
        .filter(|rule_set| !rule_set.selectors.is_empty())
        .collect();
    assert_eq!(with_selectors.len(), 1);
}

#[test]
fn test_invalid_alternative_keeps_the_rest_of_the_list() {
    let output = parse(".good, 123bad { }");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.stylesheet.rule_sets.len(), 1);
    assert_eq!(output.stylesheet.rule_sets[0].selectors.len(), 1);
}

#[test]
fn test_functional_pseudo_class_comma_does_not_split() {
    // The commas inside :is(...) are grouped into the function component
    // value and never reach the selector-list splitter.
    let output = parse(":is(.a, .b) { }");
    assert!(output.errors.is_empty());
    assert_eq!(output.stylesheet.rule_sets.len(), 1);
    assert_eq!(output.stylesheet.rule_sets[0].selectors.len(), 1);
}

#[test]
fn test_eof_inside_rule_prelude_is_an_error() {
    let output = parse(".orphan");
    assert_eq!(output.errors.len(), 1);
    assert!(output.errors[0].contains("unexpected end"));
    assert!(output.stylesheet.rule_sets.is_empty());
}

#[test]
fn test_cdo_cdc_skipped_at_top_level() {
    let output = parse("<!-- .a { } -->");
    assert!(output.errors.is_empty());
    assert_eq!(output.stylesheet.rule_sets.len(), 1);
}

#[test]
fn test_stray_tokens_never_crash() {
    // A stray brace mangles the following prelude into an invalid selector;
    // the document still parses to a stylesheet with the error recorded.
    let output = parse("} .a { }");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.stylesheet.rule_sets.len(), 1);
    assert!(output.stylesheet.rule_sets[0].selectors.is_empty());
}
