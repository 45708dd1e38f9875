//! Presentation port.
//!
//! Core pushes data out through this trait and never renders anything itself.
//! Every method defaults to a no-op so views implement only what they show.

use crate::model::quote::Quote;

/// Display callbacks driven by `QuoteBook`.
pub trait QuoteView: Send {
    /// Category index changed or was first derived.
    fn show_categories(&self, _categories: &[String], _selected: &str) {}

    /// Filtered list for `category`; empty means "no quotes", not an error.
    fn show_quotes(&self, _category: &str, _quotes: &[Quote]) {}

    /// A single quote surfaced by the random path or restored from session.
    fn show_quote(&self, _quote: &Quote) {}

    /// User-facing status line (sync results, import outcome).
    fn notify(&self, _message: &str) {}
}

/// View that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl QuoteView for NullView {}
