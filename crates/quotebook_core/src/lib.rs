//! Core domain logic for Quotebook.
//! This crate owns the quote store, its persistence and remote reconciliation;
//! presentation and transport are plugged in through ports.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod sync;

pub use config::{ConfigError, QuotebookConfig, SyncConfig};
pub use logging::{default_log_level, init_logging, logging_status, parse_level, LoggingError};
pub use model::quote::{Quote, QuoteValidationError};
pub use repo::slot_repo::{
    RepoError, RepoResult, SlotRepository, SlotScope, SqliteSlotRepository, LAST_VIEWED_SLOT,
    QUOTES_SLOT, SELECTED_CATEGORY_SLOT,
};
pub use service::category_index::{derive_categories, ALL_CATEGORIES};
pub use service::filter_state::{apply_filter, FilterState};
pub use service::quote_book::{QuoteBook, SharedQuoteBook};
pub use service::quote_store::{seed_quotes, MergeReport, QuoteStore, StoreError, StoreResult};
pub use service::session_state::{pick_random, SessionState};
pub use service::transfer::{decode_quotes, export_quotes, FormatError};
pub use service::view::{NullView, QuoteView};
pub use sync::reconciler::{Reconciler, SyncOutcome};
pub use sync::remote::{HttpQuoteSource, RemoteItem, RemoteQuoteSource, TransportError};
pub use sync::scheduler::{start_periodic_sync, SyncHandle, DEFAULT_SYNC_INTERVAL};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
