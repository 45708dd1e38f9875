//! Reconciler: folds the remote collection into the local quote book.
//!
//! # Responsibility
//! - Fetch, map and merge remote items; report the result to the view.
//! - Forward locally added quotes to the remote sink, best-effort.
//!
//! # Invariants
//! - The book lock is never held across a network call.
//! - A reconcile that starts while another is pending is skipped, so merge
//!   identity checks always see a settled store.
//! - Transport failures are logged and reported, never raised, and never
//!   mutate the store.

use crate::model::quote::Quote;
use crate::service::quote_book::SharedQuoteBook;
use crate::sync::remote::{RemoteItem, RemoteQuoteSource};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Result of one reconcile attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Remote contributed `appended` new quotes.
    Synced { appended: usize },
    /// Remote had nothing the store lacked.
    Unchanged,
    /// Another reconcile was still pending.
    Skipped,
    /// Fetch or persistence failed; the store is unchanged.
    Failed(String),
}

/// Single-flight reconciler bound to one quote book and one remote source.
pub struct Reconciler {
    book: SharedQuoteBook,
    remote: Arc<dyn RemoteQuoteSource>,
    in_flight: Mutex<()>,
}

impl Reconciler {
    pub fn new(book: SharedQuoteBook, remote: Arc<dyn RemoteQuoteSource>) -> Self {
        Self {
            book,
            remote,
            in_flight: Mutex::new(()),
        }
    }

    pub fn book(&self) -> &SharedQuoteBook {
        &self.book
    }

    /// Fetches the remote collection and merges novel quotes into the book.
    pub async fn reconcile(&self) -> SyncOutcome {
        let Ok(_in_flight) = self.in_flight.try_lock() else {
            debug!(
                "event=sync_reconcile module=sync status=skipped source={} reason=in_flight",
                self.remote.source_id()
            );
            return SyncOutcome::Skipped;
        };

        let started_at = Instant::now();
        info!(
            "event=sync_reconcile module=sync status=start source={}",
            self.remote.source_id()
        );

        let items = match self.remote.fetch_remote().await {
            Ok(items) => items,
            Err(err) => {
                warn!(
                    "event=sync_reconcile module=sync status=error source={} duration_ms={} error_code=fetch_failed error={}",
                    self.remote.source_id(),
                    started_at.elapsed().as_millis(),
                    err
                );
                self.book
                    .lock()
                    .await
                    .notify("Quote sync failed; will retry on the next interval.");
                return SyncOutcome::Failed(err.to_string());
            }
        };

        let fetched = items.len();
        let candidates = items
            .into_iter()
            .map(RemoteItem::into_quote)
            .collect::<Vec<_>>();

        let mut book = self.book.lock().await;
        match book.merge_quotes(candidates) {
            Ok(report) => {
                info!(
                    "event=sync_reconcile module=sync status=ok source={} duration_ms={} fetched={} appended={}",
                    self.remote.source_id(),
                    started_at.elapsed().as_millis(),
                    fetched,
                    report.appended
                );
                if report.changed() {
                    book.notify(&format!(
                        "Quotes synced with server ({} new).",
                        report.appended
                    ));
                    SyncOutcome::Synced {
                        appended: report.appended,
                    }
                } else {
                    SyncOutcome::Unchanged
                }
            }
            Err(err) => {
                error!(
                    "event=sync_reconcile module=sync status=error source={} duration_ms={} error_code=merge_failed error={}",
                    self.remote.source_id(),
                    started_at.elapsed().as_millis(),
                    err
                );
                SyncOutcome::Failed(err.to_string())
            }
        }
    }

    /// Sends a newly added quote to the remote sink.
    ///
    /// Returns whether the remote accepted it. Failures are logged only; the
    /// local quote stays.
    pub async fn push_local(&self, quote: &Quote) -> bool {
        match self.remote.push_quote(quote).await {
            Ok(()) => {
                info!(
                    "event=sync_push module=sync status=ok source={}",
                    self.remote.source_id()
                );
                true
            }
            Err(err) => {
                warn!(
                    "event=sync_push module=sync status=error source={} error={}",
                    self.remote.source_id(),
                    err
                );
                false
            }
        }
    }
}
