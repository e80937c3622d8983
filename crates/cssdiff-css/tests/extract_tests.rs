//! Integration tests for class extraction.

use cssdiff_css::parser::{RuleSet, Stylesheet};
use cssdiff_css::selector::{CompoundSelector, Selector, SimpleSelector};
use cssdiff_css::{parse_css_text, selector_classes, stylesheet_classes};

/// Helper to parse CSS text and extract its deduplicated class set.
fn classes_of(css: &str) -> Vec<String> {
    stylesheet_classes(&parse_css_text(css).stylesheet)
}

#[test]
fn test_classes_in_first_occurrence_order() {
    assert_eq!(classes_of(".foo { } .bar { }"), ["foo", "bar"]);
}

#[test]
fn test_classes_deduplicated_across_rules() {
    assert_eq!(classes_of(".a { } .a .b { }"), ["a", "b"]);
}

#[test]
fn test_classes_from_descendant_chain() {
    // Both ends of the chain contribute.
    assert_eq!(classes_of(".a .b { }"), ["a", "b"]);
}

#[test]
fn test_classes_from_compound() {
    assert_eq!(classes_of(".x.y { }"), ["x", "y"]);
}

#[test]
fn test_classes_from_selector_list() {
    assert_eq!(classes_of(".foo, .bar { color: red; }"), ["foo", "bar"]);
}

#[test]
fn test_classes_inside_media_block() {
    assert_eq!(classes_of("@media screen { .m { } }"), ["m"]);
}

#[test]
fn test_selector_chain_duplicates_before_dedup() {
    // The per-selector walk keeps duplicates; dedup happens at the
    // stylesheet level.
    let output = parse_css_text(".card .card { }");
    assert!(output.errors.is_empty());
    let selector = &output.stylesheet.rule_sets[0].selectors[0];
    let chain: Vec<_> = selector_classes(selector).collect();
    assert_eq!(chain, ["card", "card"]);

    assert_eq!(stylesheet_classes(&output.stylesheet), ["card"]);
}

#[test]
fn test_non_class_selectors_contribute_nothing() {
    assert_eq!(classes_of("div#main:hover { } [href] { }"), Vec::<String>::new());
}

#[test]
fn test_rule_set_without_selectors_contributes_nothing() {
    let stylesheet = Stylesheet {
        rule_sets: vec![RuleSet {
            selectors: Vec::new(),
        }],
    };
    assert_eq!(stylesheet_classes(&stylesheet), Vec::<String>::new());
}

#[test]
fn test_whitespace_only_class_value_is_filtered() {
    // The tokenizer never produces a whitespace ident, but the model is
    // public; a blank class value must not survive extraction.
    let selector = Selector {
        compounds: vec![CompoundSelector {
            simple_selectors: vec![
                SimpleSelector::Class("   ".to_string()),
                SimpleSelector::Class(String::new()),
                SimpleSelector::Class("real".to_string()),
            ],
        }],
        combinators: Vec::new(),
    };
    let stylesheet = Stylesheet {
        rule_sets: vec![RuleSet {
            selectors: vec![selector],
        }],
    };
    assert_eq!(stylesheet_classes(&stylesheet), ["real"]);
}

#[test]
fn test_extraction_is_idempotent() {
    let output = parse_css_text(".a { } .b .c { } @media screen { .d { } }");
    let first = stylesheet_classes(&output.stylesheet);
    let second = stylesheet_classes(&output.stylesheet);
    assert_eq!(first, second);
    assert_eq!(first, ["a", "b", "c", "d"]);
}
