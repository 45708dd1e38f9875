//! Quote book: the context object tying store, filter, session and view.
//!
//! # Responsibility
//! - Own one isolated set of quote state; nothing lives in globals.
//! - Sequence every mutation as mutate, save, re-derive, refresh view.
//!
//! # Invariants
//! - The view only ever sees state that is already persisted.
//! - Failed operations leave store, filter and view untouched.

use crate::model::quote::Quote;
use crate::repo::slot_repo::SqliteSlotRepository;
use crate::service::category_index::{derive_categories, ALL_CATEGORIES};
use crate::service::filter_state::{apply_filter, FilterState};
use crate::service::quote_store::{MergeReport, QuoteStore, StoreResult};
use crate::service::session_state::{pick_random, SessionState};
use crate::service::transfer::{decode_quotes, export_quotes};
use crate::service::view::QuoteView;
use log::{info, warn};
use rand::Rng;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Quote book shared between the foreground and the reconciler.
pub type SharedQuoteBook = Arc<Mutex<QuoteBook>>;

/// One running session over a durable and a session slot store.
pub struct QuoteBook {
    store: QuoteStore<SqliteSlotRepository>,
    filter: FilterState<SqliteSlotRepository>,
    session: SessionState<SqliteSlotRepository>,
    view: Box<dyn QuoteView>,
}

impl QuoteBook {
    /// Starts a session: loads quotes, restores the filter, renders the index
    /// and filtered list, then shows the last-viewed quote or a random one.
    ///
    /// # Errors
    /// - `Repo` when the durable quote slot cannot be read; nothing is shown.
    pub fn open(
        durable: SqliteSlotRepository,
        session: SqliteSlotRepository,
        view: Box<dyn QuoteView>,
    ) -> StoreResult<Self> {
        let book = Self {
            store: QuoteStore::load(durable.clone())?,
            filter: FilterState::restore(durable),
            session: SessionState::new(session),
            view,
        };

        book.refresh();
        match book.session.last_viewed() {
            Some(quote) => book.view.show_quote(&quote),
            None => {
                book.show_random_quote(&mut rand::rng());
            }
        }

        info!(
            "event=book_open module=book status=ok count={} filter_is_all={}",
            book.store.len(),
            book.filter.selected() == ALL_CATEGORIES
        );
        Ok(book)
    }

    /// Convenience for `Arc<Mutex<_>>` wrapping.
    pub fn into_shared(self) -> SharedQuoteBook {
        Arc::new(Mutex::new(self))
    }

    /// Adds a user quote and returns it for forwarding to the remote sink.
    pub fn add_quote(&mut self, text: &str, category: &str) -> StoreResult<Quote> {
        let quote = self.store.add(text, category)?;
        self.refresh();
        self.show_random_quote(&mut rand::rng());
        Ok(quote)
    }

    /// Folds candidates into the store, refreshing views when anything changed.
    pub fn merge_quotes(&mut self, candidates: Vec<Quote>) -> StoreResult<MergeReport> {
        let report = self.store.merge(candidates)?;
        if report.changed() {
            self.refresh();
        }
        Ok(report)
    }

    /// Imports a JSON document through the deduplicating merge path.
    pub fn import_json(&mut self, raw: &str) -> StoreResult<MergeReport> {
        let candidates = match decode_quotes(raw) {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!("event=quote_import module=book status=error error={}", err);
                self.view.notify("Error importing quotes: invalid file.");
                return Err(err.into());
            }
        };

        let report = match self.merge_quotes(candidates) {
            Ok(report) => report,
            Err(err) => {
                warn!("event=quote_import module=book status=error error={}", err);
                self.view.notify("Error importing quotes: could not save.");
                return Err(err);
            }
        };
        self.view.notify(&format!(
            "Quotes imported successfully ({} new).",
            report.appended
        ));
        Ok(report)
    }

    /// Pretty JSON document of the whole store.
    pub fn export_json(&self) -> StoreResult<String> {
        Ok(export_quotes(self.store.quotes())?)
    }

    /// Persists a new filter selection and re-renders the filtered list.
    pub fn select_category(&mut self, category: &str) -> StoreResult<String> {
        let selected = self.filter.set(category)?.to_string();
        self.refresh();
        Ok(selected)
    }

    /// Picks a random quote, remembers it for this session and shows it.
    pub fn show_random_quote<G: Rng + ?Sized>(&self, rng: &mut G) -> Option<Quote> {
        let quote = pick_random(self.store.quotes(), rng)?.clone();
        if let Err(err) = self.session.record_viewed(&quote) {
            warn!(
                "event=session_record module=book status=error error={}",
                err
            );
        }
        self.view.show_quote(&quote);
        Some(quote)
    }

    pub fn quotes(&self) -> &[Quote] {
        self.store.quotes()
    }

    pub fn categories(&self) -> Vec<String> {
        derive_categories(self.store.quotes())
    }

    pub fn selected_category(&self) -> &str {
        self.filter.selected()
    }

    /// Quotes visible under the current filter.
    pub fn visible_quotes(&self) -> Vec<Quote> {
        apply_filter(self.store.quotes(), self.filter.selected())
    }

    pub fn last_viewed(&self) -> Option<Quote> {
        self.session.last_viewed()
    }

    pub fn notify(&self, message: &str) {
        self.view.notify(message);
    }

    fn refresh(&self) {
        let selected = self.filter.selected();
        self.view
            .show_categories(&derive_categories(self.store.quotes()), selected);
        self.view
            .show_quotes(selected, &apply_filter(self.store.quotes(), selected));
    }
}
