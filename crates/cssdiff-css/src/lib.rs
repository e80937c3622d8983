//! CSS tokenizer, rule-set parser, and class-selector extraction for cssdiff.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - The token subset rule-set and selector parsing need
//!   - Comment handling
//!   - Escape sequences
//!
//! - **CSS Parser** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Stylesheet parsing into rule sets with non-fatal error collection
//!   - Selector-list parsing (rule preludes)
//!   - Grouping at-rules (`@media`, `@supports`, `@layer`, `@container`)
//!     descended into for their nested rule sets
//!
//! - **CSS Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, class, ID, and universal selectors
//!   - Compound selectors
//!   - Complex selectors with combinators (descendant, child, sibling)
//!
//! - **Class Extraction**
//!   - Every class-name token of a selector chain, and the deduplicated
//!     class set of a whole stylesheet
//!
//! # Not Implemented
//!
//! - Declaration parsing (blocks are consumed and discarded)
//! - Selector matching and specificity
//! - Namespaces in selectors
//! - `@import` resolution

/// Class-name extraction from parsed selector trees.
pub mod extract;
/// CSS parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// CSS selector model and parsing per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// CSS tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;

// Re-exports for convenience
pub use extract::{selector_classes, stylesheet_classes};
pub use parser::{CSSParser, ComponentValue, ParseOutput, RuleSet, Stylesheet};
pub use selector::{Combinator, CompoundSelector, Selector, SimpleSelector, parse_selector};
pub use tokenizer::{CSSToken, CSSTokenizer, HashType};

/// Tokenize and parse raw CSS text into a stylesheet plus parse errors.
///
/// Convenience entry point tying the tokenizer and parser together; the
/// pipeline crate and tests go through this.
#[must_use]
pub fn parse_css_text(css: &str) -> ParseOutput {
    let mut tokenizer = CSSTokenizer::new(css);
    tokenizer.run();
    CSSParser::new(tokenizer.into_tokens()).parse_stylesheet()
}
