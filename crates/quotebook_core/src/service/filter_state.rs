//! Persisted category filter.
//!
//! # Invariants
//! - Any string is accepted as a selection, including unknown categories.
//! - A selection whose category has no quotes yields an empty list; it is
//!   never reset to `"all"` behind the caller's back.

use crate::model::quote::Quote;
use crate::repo::slot_repo::{RepoResult, SlotRepository, SELECTED_CATEGORY_SLOT};
use crate::service::category_index::ALL_CATEGORIES;
use log::{info, warn};

/// Currently selected category, mirrored in the durable slot.
pub struct FilterState<R: SlotRepository> {
    repo: R,
    selected: String,
}

impl<R: SlotRepository> FilterState<R> {
    /// Restores the persisted selection, defaulting to `"all"`.
    pub fn restore(repo: R) -> Self {
        let selected = match repo.get_slot(SELECTED_CATEGORY_SLOT) {
            Ok(Some(value)) => value,
            Ok(None) => ALL_CATEGORIES.to_string(),
            Err(err) => {
                warn!(
                    "event=filter_restore module=filter status=fallback reason=repo_error error={}",
                    err
                );
                ALL_CATEGORIES.to_string()
            }
        };

        Self { repo, selected }
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Persists and adopts a new selection.
    ///
    /// The in-memory value only changes once the write succeeded.
    pub fn set(&mut self, category: impl Into<String>) -> RepoResult<&str> {
        let category = category.into();
        self.repo.set_slot(SELECTED_CATEGORY_SLOT, &category)?;
        self.selected = category;
        info!(
            "event=filter_set module=filter status=ok is_all={}",
            self.selected == ALL_CATEGORIES
        );
        Ok(&self.selected)
    }
}

/// Returns the quotes visible under `category`, in store order.
pub fn apply_filter(quotes: &[Quote], category: &str) -> Vec<Quote> {
    if category == ALL_CATEGORIES {
        return quotes.to_vec();
    }
    quotes
        .iter()
        .filter(|quote| quote.category() == category)
        .cloned()
        .collect()
}
