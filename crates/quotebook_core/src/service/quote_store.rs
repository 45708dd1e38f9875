//! Quote store: the authoritative ordered collection.
//!
//! # Responsibility
//! - Rehydrate the collection from the durable slot, falling back to seed data.
//! - Own every mutation (`add`, `merge`) and persist after each one.
//!
//! # Invariants
//! - Append-only: no operation removes, reorders or mutates an element.
//! - The durable slot equals the in-memory sequence after every successful
//!   mutation; a failed save rolls the mutation back.
//! - A loaded store is never empty.
//! - A slot that cannot be read is an error, never a reason to seed.

use crate::model::quote::{Quote, QuoteValidationError};
use crate::repo::slot_repo::{RepoError, SlotRepository, QUOTES_SLOT};
use crate::service::transfer::{decode_quotes, encode_quotes, FormatError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const SEED_QUOTES: [(&str, &str); 3] = [
    (
        "The only limit to our realization of tomorrow is our doubts of today.",
        "Motivation",
    ),
    (
        "Life is what happens when you're busy making other plans.",
        "Life",
    ),
    ("JavaScript is the language of the web.", "Programming"),
];

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for store and quote-book use-cases.
#[derive(Debug)]
pub enum StoreError {
    /// Input rejected before any mutation.
    Validation(QuoteValidationError),
    /// Malformed JSON on an import or encode path.
    Format(FormatError),
    /// Persistence-layer failure; the mutation was rolled back.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Format(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Format(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<QuoteValidationError> for StoreError {
    fn from(value: QuoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<FormatError> for StoreError {
    fn from(value: FormatError) -> Self {
        Self::Format(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Outcome of folding candidate quotes into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeReport {
    /// Number of candidates appended.
    pub appended: usize,
    /// Store length after the merge.
    pub total: usize,
}

impl MergeReport {
    pub fn changed(&self) -> bool {
        self.appended > 0
    }
}

/// Returns the built-in seed collection.
pub fn seed_quotes() -> Vec<Quote> {
    SEED_QUOTES
        .iter()
        .map(|(text, category)| Quote::trusted(text, category))
        .collect()
}

/// Ordered, append-only quote collection persisted through a slot repository.
pub struct QuoteStore<R: SlotRepository> {
    repo: R,
    quotes: Vec<Quote>,
}

impl<R: SlotRepository> QuoteStore<R> {
    /// Loads the store from the durable slot.
    ///
    /// Absent, unparsable or empty slot contents yield the seed collection.
    /// The seed is not written back until the first mutation.
    ///
    /// # Errors
    /// - `Repo` when the slot cannot be read. Seeding in that case would let
    ///   the next save overwrite whatever the slot really holds.
    pub fn load(repo: R) -> StoreResult<Self> {
        let raw = match repo.get_slot(QUOTES_SLOT) {
            Ok(raw) => raw,
            Err(err) => {
                error!(
                    "event=store_load module=store status=error error_code=read_failed error={}",
                    err
                );
                return Err(err.into());
            }
        };

        let quotes = match raw.map(|raw| decode_quotes(&raw)) {
            Some(Ok(quotes)) if !quotes.is_empty() => {
                info!(
                    "event=store_load module=store status=ok source=slot count={}",
                    quotes.len()
                );
                quotes
            }
            Some(Ok(_)) => {
                warn!("event=store_load module=store status=fallback source=seed reason=empty_slot");
                seed_quotes()
            }
            Some(Err(err)) => {
                warn!(
                    "event=store_load module=store status=fallback source=seed reason=format_error error={}",
                    err
                );
                seed_quotes()
            }
            None => {
                info!("event=store_load module=store status=ok source=seed reason=absent_slot");
                seed_quotes()
            }
        };

        Ok(Self { repo, quotes })
    }

    /// Serializes the whole sequence into the durable slot, overwriting it.
    pub fn save(&self) -> StoreResult<()> {
        let encoded = encode_quotes(&self.quotes)?;
        self.repo.set_slot(QUOTES_SLOT, &encoded)?;
        Ok(())
    }

    /// Validates and appends one quote, then saves.
    ///
    /// # Errors
    /// - `Validation` when either field is blank; nothing is appended.
    /// - `Repo` when the save fails; the append is rolled back.
    pub fn add(&mut self, text: &str, category: &str) -> StoreResult<Quote> {
        let quote = match Quote::new(text, category) {
            Ok(quote) => quote,
            Err(err) => {
                warn!(
                    "event=quote_add module=store status=rejected error_code={:?}",
                    err
                );
                return Err(err.into());
            }
        };

        self.quotes.push(quote.clone());
        if let Err(err) = self.save() {
            self.quotes.pop();
            error!(
                "event=quote_add module=store status=error error_code=save_failed error={}",
                err
            );
            return Err(err);
        }

        info!(
            "event=quote_add module=store status=ok total={}",
            self.quotes.len()
        );
        Ok(quote)
    }

    /// Appends every candidate that is not already the same record as an
    /// existing quote, then saves once.
    ///
    /// Candidates appended earlier in the same call count as existing, so a
    /// batch containing duplicates appends them once. Merging the same batch
    /// twice leaves the store as merging it once.
    pub fn merge(
        &mut self,
        candidates: impl IntoIterator<Item = Quote>,
    ) -> StoreResult<MergeReport> {
        let before = self.quotes.len();
        for candidate in candidates {
            if !self
                .quotes
                .iter()
                .any(|existing| existing.same_record(&candidate))
            {
                self.quotes.push(candidate);
            }
        }

        let appended = self.quotes.len() - before;
        if appended > 0 {
            if let Err(err) = self.save() {
                self.quotes.truncate(before);
                error!(
                    "event=quote_merge module=store status=error error_code=save_failed error={}",
                    err
                );
                return Err(err);
            }
        }

        info!(
            "event=quote_merge module=store status=ok appended={} total={}",
            appended,
            self.quotes.len()
        );
        Ok(MergeReport {
            appended,
            total: self.quotes.len(),
        })
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
