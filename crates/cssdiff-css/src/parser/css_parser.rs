//! CSS rule-set parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
//!
//! "The input to the parsing stage is a stream of tokens from the tokenization
//! stage." Only the structure class extraction needs is retained: rule
//! preludes become selector lists, declaration blocks are consumed as
//! balanced component values and discarded, and grouping at-rules are
//! descended into so the rule sets nested in their blocks are kept.
//!
//! Parsing follows a partial-success policy: a rule that fails to parse
//! surfaces an error message and is dropped, while every other rule in the
//! same document is kept.

use core::fmt;

use crate::selector::{Selector, parse_selector};
use crate::tokenizer::CSSToken;

/// [§ 5.4.7 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
///
/// A component value in a rule prelude or block.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentValue {
    /// A preserved token.
    Token(CSSToken),
    /// A function with its contents.
    Function {
        /// The function name.
        name: String,
        /// The function arguments.
        value: Vec<ComponentValue>,
    },
    /// A simple block.
    Block {
        /// The opening token character.
        token: char,
        /// The block contents.
        value: Vec<ComponentValue>,
    },
}

/// Writes the component value back out as CSS-shaped text, for parse-error
/// messages.
impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => write!(f, "{token}"),
            Self::Function { name, value } => {
                write!(f, "{name}(")?;
                for v in value {
                    write!(f, "{v}")?;
                }
                write!(f, ")")
            }
            Self::Block { token, value } => {
                let (open, close) = match token {
                    '[' => ('[', ']'),
                    '(' => ('(', ')'),
                    _ => ('{', '}'),
                };
                write!(f, "{open}")?;
                for v in value {
                    write!(f, "{v}")?;
                }
                write!(f, "{close}")
            }
        }
    }
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-a-qualified-rule)
///
/// A rule set: the parsed selector list of one qualified rule. The
/// declaration block is consumed and discarded at parse time.
///
/// A rule whose selector list failed to parse entirely has no selectors and
/// contributes nothing downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    /// The selector alternatives of this rule, comma-separated in source.
    pub selectors: Vec<Selector>,
}

/// [§ 5.3.2 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
///
/// A parsed CSS stylesheet: rule sets in document order. Rule sets nested in
/// grouping at-rules (`@media`, `@supports`, ...) are flattened into the same
/// sequence, still in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    /// The rule sets of the stylesheet.
    pub rule_sets: Vec<RuleSet>,
}

/// Everything one parse run produces: the partial stylesheet plus the
/// non-fatal parse-error messages collected along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    /// The successfully parsed rule sets.
    pub stylesheet: Stylesheet,
    /// Human-readable messages for the parts that failed to parse.
    pub errors: Vec<String>,
}

/// At-rules whose block contains a nested rule list worth descending into.
///
/// [CSS Conditional Rules](https://www.w3.org/TR/css-conditional-3/),
/// [CSS Cascade Layers](https://www.w3.org/TR/css-cascade-5/#layering),
/// [CSS Containment](https://www.w3.org/TR/css-contain-3/#container-rule).
/// Everything else (`@keyframes`, `@font-face`, `@import`, ...) is consumed
/// and ignored.
const GROUPING_AT_RULES: &[&str] = &["media", "supports", "layer", "container"];

/// CSS parser
pub struct CSSParser {
    tokens: Vec<CSSToken>,
    position: usize,
    errors: Vec<String>,
}

impl CSSParser {
    /// Create a new parser from a list of tokens.
    #[must_use]
    pub const fn new(tokens: Vec<CSSToken>) -> Self {
        Self {
            tokens,
            position: 0,
            errors: Vec::new(),
        }
    }

    /// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    ///
    /// "To parse a stylesheet from input..."
    ///
    /// Consumes the parser; each token stream is parsed exactly once.
    #[must_use]
    pub fn parse_stylesheet(mut self) -> ParseOutput {
        // "Consume a list of rules from input, with the top-level flag set."
        let rule_sets = self.consume_list_of_rules(true);
        ParseOutput {
            stylesheet: Stylesheet { rule_sets },
            errors: self.errors,
        }
    }

    /// [§ 5.4.1 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
    fn consume_list_of_rules(&mut self, top_level: bool) -> Vec<RuleSet> {
        // "Create an initially empty list of rules."
        let mut rule_sets = Vec::new();

        loop {
            match self.peek() {
                // "<whitespace-token>"
                // "Do nothing."
                Some(CSSToken::Whitespace) => {
                    let _ = self.consume();
                }

                // "<EOF-token>"
                // "Return the list of rules."
                None | Some(CSSToken::EOF) => {
                    return rule_sets;
                }

                // A <}-token> closes the enclosing block when parsing a
                // grouping at-rule's contents.
                Some(CSSToken::RightBrace) if !top_level => {
                    let _ = self.consume();
                    return rule_sets;
                }

                // "<CDO-token>" or "<CDC-token>"
                Some(CSSToken::CDO | CSSToken::CDC) => {
                    if top_level {
                        // "Do nothing."
                        let _ = self.consume();
                    } else if let Some(rule_set) = self.consume_qualified_rule() {
                        rule_sets.push(rule_set);
                    }
                }

                // "<at-keyword-token>"
                // "Reconsume the current input token. Consume an at-rule."
                Some(CSSToken::AtKeyword(_)) => {
                    let nested = self.consume_at_rule();
                    rule_sets.extend(nested);
                }

                // "anything else"
                // "Reconsume the current input token. Consume a qualified rule.
                // If anything is returned, append it to the list of rules."
                Some(_) => {
                    if let Some(rule_set) = self.consume_qualified_rule() {
                        rule_sets.push(rule_set);
                    }
                }
            }
        }
    }

    /// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
    ///
    /// Grouping at-rules return the rule sets nested in their block; every
    /// other at-rule is consumed whole and returns nothing.
    fn consume_at_rule(&mut self) -> Vec<RuleSet> {
        // "Consume the next input token."
        let name = match self.consume() {
            Some(CSSToken::AtKeyword(name)) => name.clone(),
            _ => return Vec::new(),
        };

        loop {
            match self.peek() {
                // "<semicolon-token>"
                // "Return the at-rule."
                Some(CSSToken::Semicolon) => {
                    let _ = self.consume();
                    return Vec::new();
                }

                // "<EOF-token>"
                // "This is a parse error. Return the at-rule."
                None | Some(CSSToken::EOF) => {
                    return Vec::new();
                }

                // "<{-token>"
                // "Consume a simple block and assign it to the at-rule's block."
                Some(CSSToken::LeftBrace) => {
                    if is_grouping_at_rule(&name) {
                        let _ = self.consume(); // {
                        // The block of a grouping at-rule is itself a list of
                        // rules; its closing brace ends that list.
                        return self.consume_list_of_rules(false);
                    }
                    let _ = self.consume_simple_block();
                    return Vec::new();
                }

                // "anything else"
                // "Consume a component value. Append the returned value to the
                // at-rule's prelude." The prelude is irrelevant here.
                Some(_) => {
                    let _ = self.consume_component_value();
                }
            }
        }
    }

    /// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
    fn consume_qualified_rule(&mut self) -> Option<RuleSet> {
        // "Create a new qualified rule with its prelude initially set to an
        // empty list."
        let mut prelude = Vec::new();

        loop {
            match self.peek() {
                // "<EOF-token>"
                // "This is a parse error. Return nothing."
                None | Some(CSSToken::EOF) => {
                    self.errors
                        .push("unexpected end of stylesheet inside a rule".to_string());
                    return None;
                }

                // "<{-token>"
                // The block holds declarations, which this tool discards.
                Some(CSSToken::LeftBrace) => {
                    let _ = self.consume_simple_block();

                    // [§ 5.1 Selector Lists](https://www.w3.org/TR/selectors-4/#selector-list)
                    // "A selector list is a comma-separated list of selectors."
                    let selectors = self.parse_selector_list(&prelude);
                    return Some(RuleSet { selectors });
                }

                // "anything else"
                // "Reconsume the current input token. Consume a component value.
                // Append the returned value to the qualified rule's prelude."
                Some(_) => {
                    if let Some(value) = self.consume_component_value() {
                        prelude.push(value);
                    }
                }
            }
        }
    }

    /// [§ 5.1 Selector Lists](https://www.w3.org/TR/selectors-4/#selector-list)
    ///
    /// Split the prelude at top-level commas and parse each alternative.
    /// An alternative that fails to parse surfaces one error message and is
    /// dropped; the remaining alternatives are kept.
    fn parse_selector_list(&mut self, prelude: &[ComponentValue]) -> Vec<Selector> {
        let mut selectors = Vec::new();

        for alternative in split_selector_list(prelude) {
            match parse_selector(alternative) {
                Some(selector) => selectors.push(selector),
                None => {
                    let text = component_values_to_string(alternative);
                    self.errors
                        .push(format!("invalid selector '{}'", text.trim()));
                }
            }
        }

        selectors
    }

    /// [§ 5.4.8 Consume a simple block](https://www.w3.org/TR/css-syntax-3/#consume-simple-block)
    fn consume_simple_block(&mut self) -> Vec<ComponentValue> {
        let ending_token = match self.consume() {
            Some(CSSToken::LeftBrace) => CSSToken::RightBrace,
            Some(CSSToken::LeftBracket) => CSSToken::RightBracket,
            Some(CSSToken::LeftParen) => CSSToken::RightParen,
            _ => return Vec::new(),
        };

        let mut value = Vec::new();

        loop {
            match self.peek() {
                Some(token) if *token == ending_token => {
                    let _ = self.consume();
                    return value;
                }
                None | Some(CSSToken::EOF) => {
                    return value;
                }
                Some(_) => {
                    if let Some(v) = self.consume_component_value() {
                        value.push(v);
                    }
                }
            }
        }
    }

    /// [§ 5.4.7 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
    fn consume_component_value(&mut self) -> Option<ComponentValue> {
        match self.peek() {
            // "<{-token>", "<[-token>", "<(-token>"
            Some(CSSToken::LeftBrace | CSSToken::LeftBracket | CSSToken::LeftParen) => {
                let token = match self.peek() {
                    Some(CSSToken::LeftBrace) => '{',
                    Some(CSSToken::LeftBracket) => '[',
                    Some(CSSToken::LeftParen) => '(',
                    _ => return None,
                };
                let value = self.consume_simple_block();
                Some(ComponentValue::Block { token, value })
            }

            // "<function-token>"
            Some(CSSToken::Function(_)) => {
                let name = match self.consume() {
                    Some(CSSToken::Function(name)) => name.clone(),
                    _ => return None,
                };
                let mut value = Vec::new();
                loop {
                    match self.peek() {
                        Some(CSSToken::RightParen) => {
                            let _ = self.consume();
                            break;
                        }
                        None | Some(CSSToken::EOF) => break,
                        Some(_) => {
                            if let Some(v) = self.consume_component_value() {
                                value.push(v);
                            }
                        }
                    }
                }
                Some(ComponentValue::Function { name, value })
            }

            // "anything else"
            Some(_) => {
                let token = self.consume()?.clone();
                Some(ComponentValue::Token(token))
            }

            None => None,
        }
    }

    fn consume(&mut self) -> Option<&CSSToken> {
        if self.position < self.tokens.len() {
            let token = &self.tokens[self.position];
            self.position += 1;
            Some(token)
        } else {
            None
        }
    }

    fn peek(&self) -> Option<&CSSToken> {
        self.tokens.get(self.position)
    }
}

/// Whether an at-rule's block should be parsed as a nested rule list.
fn is_grouping_at_rule(name: &str) -> bool {
    GROUPING_AT_RULES
        .iter()
        .any(|grouping| name.eq_ignore_ascii_case(grouping))
}

/// [§ 5.1 Selector Lists](https://www.w3.org/TR/selectors-4/#selector-list)
///
/// Split prelude component values into selector alternatives at top-level
/// commas. Commas nested inside functions or blocks (`:is(.a, .b)`,
/// `[data-x=","]`) are already grouped into a single component value and do
/// not split.
fn split_selector_list(prelude: &[ComponentValue]) -> Vec<&[ComponentValue]> {
    let mut alternatives = Vec::new();
    let mut start = 0;

    for (i, cv) in prelude.iter().enumerate() {
        if matches!(cv, ComponentValue::Token(CSSToken::Comma)) {
            alternatives.push(&prelude[start..i]);
            start = i + 1;
        }
    }

    // The last alternative (after the last comma, or the only one).
    alternatives.push(&prelude[start..]);

    alternatives
}

/// [§ 9 Serialization](https://www.w3.org/TR/css-syntax-3/#serialization)
///
/// Simplified serialization of component values back to source-shaped text,
/// used for parse-error messages.
fn component_values_to_string(values: &[ComponentValue]) -> String {
    let mut s = String::new();
    for value in values {
        s.push_str(&value.to_string());
    }
    s
}
