//! CSS selector model and parsing.
//!
//! This module implements the subset of
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/) that class
//! extraction needs: the structure of compound selectors and the combinators
//! joining them. Matching selectors against a document is out of scope.

use crate::parser::ComponentValue;
use crate::tokenizer::{CSSToken, HashType};

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// A simple selector is a single condition on an element.
///
/// Pseudo-class arguments (`:nth-child(2n+1)`, `:not(.foo)`) and attribute
/// operators/values (`[href^="https"]`) carry no class information for the
/// chain itself, so only the name is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type."
    ///
    /// Examples: `div`, `p`, `span`
    Type(String),

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    ///
    /// Examples: `.highlight`, `.btn`, `.nav-item`
    Class(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// "An ID selector is a hash (#, U+0023) immediately followed by the
    /// ID value, which is an identifier."
    ///
    /// Examples: `#main`, `#header`
    Id(String),

    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    /// "The universal selector is a single asterisk (*)."
    Universal,

    /// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    /// A pseudo-class by name, arguments discarded.
    ///
    /// Examples: `:hover`, `:first-child`, `:nth-child(...)`, `:is(...)`
    PseudoClass(String),

    /// [§ 11 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements)
    /// A pseudo-element by name, arguments discarded.
    ///
    /// Examples: `::before`, `::after`, `::placeholder`
    PseudoElement(String),

    /// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    /// An attribute selector by attribute name, operator and value discarded.
    ///
    /// Examples: `[href]`, `[type=text]`, `[src$=".png"]`
    Attribute(String),
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator, and represents a set of simultaneous
/// conditions on a single element."
///
/// A compound selector with several classes (`.a.b`) holds several `Class`
/// entries in its list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The list of simple selectors that make up this compound selector.
    pub simple_selectors: Vec<SimpleSelector>,
}

impl CompoundSelector {
    /// Every class name in this compound selector, in source order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.simple_selectors.iter().filter_map(|simple| match simple {
            SimpleSelector::Class(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A descendant combinator is whitespace that separates two compound selectors."
    Descendant,

    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// "A child combinator is a greater-than sign (>) that separates two compound
    /// selectors."
    Child,

    /// [§ 16.3 Next-sibling combinator](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators)
    /// "A next-sibling combinator is a plus sign (+) that separates two compound
    /// selectors."
    NextSibling,

    /// [§ 16.4 Subsequent-sibling combinator](https://www.w3.org/TR/selectors-4/#general-sibling-combinators)
    /// "A subsequent-sibling combinator is a tilde (~) that separates two compound
    /// selectors."
    SubsequentSibling,
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// "A complex selector is a chain of one or more compound selectors separated
/// by combinators."
///
/// One alternative from a rule's comma-separated selector list. The chain is
/// an owned sequence in source order (left to right), so walking it is plain
/// iteration over a finite list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Compound selectors in source order, left to right. Never empty.
    pub compounds: Vec<CompoundSelector>,

    /// Combinators joining adjacent compounds.
    ///
    /// Invariant: `combinators.len() == compounds.len() - 1`.
    pub combinators: Vec<Combinator>,
}

/// Parse one selector alternative from a qualified rule's prelude.
///
/// [§ 4 Selector syntax](https://www.w3.org/TR/selectors-4/#syntax)
///
/// The prelude arrives as component values, so functional pseudo-classes and
/// attribute blocks are already grouped: `:is(.a, .b)` is a single function
/// value here, and its inner commas never reach the selector-list splitter.
///
/// Supports:
/// - Type selectors: `div`, `p`, `span`
/// - Class selectors: `.class`, including several per compound (`.a.b`)
/// - ID selectors: `#id` (id-type hashes only; `#123` is rejected)
/// - Universal selector: `*`
/// - Pseudo-classes and pseudo-elements: `:hover`, `:nth-child(2n)`, `::before`
/// - Attribute selectors: `[href]`, `[type=text]`
/// - Combinators: `div p`, `ul > li`, `h1 + p`, `h1 ~ p`
///
/// Returns `None` for anything else (the caller reports a parse error).
#[must_use]
pub fn parse_selector(prelude: &[ComponentValue]) -> Option<Selector> {
    /// Flush the current compound selector into the compounds list.
    /// Returns true if a non-empty compound was flushed.
    fn flush_compound(
        current: &mut Vec<SimpleSelector>,
        compounds: &mut Vec<CompoundSelector>,
    ) -> bool {
        if current.is_empty() {
            return false;
        }
        compounds.push(CompoundSelector {
            simple_selectors: std::mem::take(current),
        });
        true
    }

    let mut compounds: Vec<CompoundSelector> = Vec::new();
    let mut combinators: Vec<Combinator> = Vec::new();
    let mut current: Vec<SimpleSelector> = Vec::new();

    let mut i = 0;
    while i < prelude.len() {
        match &prelude[i] {
            // [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
            // Whitespace completes the current compound; whether it acts as a
            // descendant combinator is decided when the next unit starts.
            ComponentValue::Token(CSSToken::Whitespace) => {
                let _ = flush_compound(&mut current, &mut compounds);
                i += 1;
            }

            // [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
            // [§ 16.3 Next-sibling combinator](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators)
            // [§ 16.4 Subsequent-sibling combinator](https://www.w3.org/TR/selectors-4/#general-sibling-combinators)
            ComponentValue::Token(CSSToken::Delim(c @ ('>' | '+' | '~'))) => {
                let _ = flush_compound(&mut current, &mut compounds);
                // An explicit combinator needs a completed left-hand compound,
                // and at most one combinator between compounds.
                if compounds.len() != combinators.len() + 1 {
                    return None;
                }
                combinators.push(match c {
                    '>' => Combinator::Child,
                    '+' => Combinator::NextSibling,
                    _ => Combinator::SubsequentSibling,
                });
                i += 1;
            }

            // Anything else starts (or extends) a compound selector.
            _ => {
                if current.is_empty() && compounds.len() == combinators.len() + 1 {
                    // The previous compound is complete and no explicit
                    // combinator was consumed, so the separating whitespace
                    // was a descendant combinator.
                    combinators.push(Combinator::Descendant);
                }
                i = parse_simple_selector(prelude, i, &mut current)?;
            }
        }
    }

    // Flush the final compound selector.
    let _ = flush_compound(&mut current, &mut compounds);

    if compounds.is_empty() {
        return None;
    }

    // A trailing combinator (`div >`) leaves the chain unbalanced.
    if compounds.len() != combinators.len() + 1 {
        return None;
    }

    Some(Selector {
        compounds,
        combinators,
    })
}

/// Parse one simple selector starting at `prelude[i]`, appending it to the
/// current compound. Returns the index of the next unconsumed component
/// value, or `None` if the input is not a valid simple selector.
fn parse_simple_selector(
    prelude: &[ComponentValue],
    i: usize,
    current: &mut Vec<SimpleSelector>,
) -> Option<usize> {
    match &prelude[i] {
        // [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
        // "The class selector is given as a full stop (. U+002E) immediately
        // followed by an identifier." The identifier must be adjacent: any
        // whitespace token in between fails the match.
        ComponentValue::Token(CSSToken::Delim('.')) => match prelude.get(i + 1) {
            Some(ComponentValue::Token(CSSToken::Ident(name))) => {
                current.push(SimpleSelector::Class(name.clone()));
                Some(i + 2)
            }
            _ => None,
        },

        // [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
        ComponentValue::Token(CSSToken::Delim('*')) => {
            current.push(SimpleSelector::Universal);
            Some(i + 1)
        }

        // [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
        ComponentValue::Token(CSSToken::Ident(name)) => {
            current.push(SimpleSelector::Type(name.clone()));
            Some(i + 1)
        }

        // [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
        // "An ID selector is a hash immediately followed by the ID value,
        // which is an identifier." Unrestricted hashes (`#123`) are not
        // identifiers and fail the match.
        ComponentValue::Token(CSSToken::Hash { value, hash_type }) => match hash_type {
            HashType::Id => {
                current.push(SimpleSelector::Id(value.clone()));
                Some(i + 1)
            }
            HashType::Unrestricted => None,
        },

        // [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
        // [§ 11 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements)
        ComponentValue::Token(CSSToken::Colon) => {
            let mut j = i + 1;

            // A second colon marks a pseudo-element (`::before`).
            let is_pseudo_element = matches!(
                prelude.get(j),
                Some(ComponentValue::Token(CSSToken::Colon))
            );
            if is_pseudo_element {
                j += 1;
            }

            // The name arrives as a plain ident (`:hover`) or, for functional
            // forms (`:nth-child(...)`, `:is(...)`), as a function component
            // value whose arguments are discarded.
            let name = match prelude.get(j) {
                Some(ComponentValue::Token(CSSToken::Ident(name))) => name.clone(),
                Some(ComponentValue::Function { name, .. }) => name.clone(),
                _ => return None,
            };

            current.push(if is_pseudo_element {
                SimpleSelector::PseudoElement(name)
            } else {
                SimpleSelector::PseudoClass(name)
            });
            Some(j + 1)
        }

        // [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
        // The bracket block arrives pre-grouped; the first non-whitespace
        // value inside must be the attribute name.
        ComponentValue::Block { token: '[', value } => {
            let first = value
                .iter()
                .find(|cv| !matches!(cv, ComponentValue::Token(CSSToken::Whitespace)));
            match first {
                Some(ComponentValue::Token(CSSToken::Ident(name))) => {
                    current.push(SimpleSelector::Attribute(name.clone()));
                    Some(i + 1)
                }
                _ => None,
            }
        }

        // Anything else - unsupported selector syntax.
        _ => None,
    }
}
