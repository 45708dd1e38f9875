//! Category index derivation.
//!
//! # Invariants
//! - The first entry is always `ALL_CATEGORIES`.
//! - Remaining entries are distinct and in first-seen store order.
//! - Derived fresh on every call; nothing is cached.

use crate::model::quote::Quote;
use std::collections::HashSet;

/// Sentinel category meaning "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// Returns `"all"` followed by each distinct category in first-seen order.
///
/// A stored category spelled exactly like the sentinel is folded into it,
/// since selecting it would already show every quote.
pub fn derive_categories(quotes: &[Quote]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(ALL_CATEGORIES);

    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for quote in quotes {
        if seen.insert(quote.category()) {
            categories.push(quote.category().to_string());
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::{derive_categories, ALL_CATEGORIES};
    use crate::model::quote::Quote;

    fn quote(text: &str, category: &str) -> Quote {
        Quote::new(text, category).unwrap()
    }

    #[test]
    fn empty_store_yields_only_sentinel() {
        assert_eq!(derive_categories(&[]), vec![ALL_CATEGORIES.to_string()]);
    }

    #[test]
    fn keeps_first_seen_order_without_duplicates() {
        let quotes = vec![
            quote("a", "Life"),
            quote("b", "Motivation"),
            quote("c", "Life"),
            quote("d", "life"),
        ];
        assert_eq!(
            derive_categories(&quotes),
            vec!["all", "Life", "Motivation", "life"]
        );
    }

    #[test]
    fn literal_all_category_does_not_duplicate_sentinel() {
        let quotes = vec![quote("a", "all"), quote("b", "Life")];
        assert_eq!(derive_categories(&quotes), vec!["all", "Life"]);
    }
}
