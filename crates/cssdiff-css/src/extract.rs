//! Class-name extraction from parsed selector trees.
//!
//! [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
//!
//! The extraction is a pure function of the tree: walking the same
//! `Stylesheet` twice yields the same classes in the same order.

use std::collections::HashSet;

use crate::parser::Stylesheet;
use crate::selector::Selector;

/// Every class name appearing anywhere in the selector's compound chain, in
/// source order, duplicates included.
///
/// `.card .card` yields `card` twice; deduplication happens at the
/// stylesheet level in [`stylesheet_classes`].
pub fn selector_classes(selector: &Selector) -> impl Iterator<Item = &str> {
    selector
        .compounds
        .iter()
        .flat_map(|compound| compound.classes())
}

/// The deduplicated class names of a whole stylesheet, preserving
/// first-occurrence order.
///
/// Every selector of every rule set contributes; a rule set with no
/// selectors contributes nothing. Empty and whitespace-only values are not
/// valid class names and are skipped.
#[must_use]
pub fn stylesheet_classes(stylesheet: &Stylesheet) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut classes = Vec::new();

    for rule_set in &stylesheet.rule_sets {
        for selector in &rule_set.selectors {
            for class in selector_classes(selector) {
                if class.trim().is_empty() {
                    continue;
                }
                if seen.insert(class.to_owned()) {
                    classes.push(class.to_owned());
                }
            }
        }
    }

    classes
}
