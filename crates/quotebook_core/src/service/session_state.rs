//! Session-scoped view state.
//!
//! # Invariants
//! - Only the random-pick path writes the last-viewed slot.
//! - A malformed snapshot reads as absent.

use crate::model::quote::Quote;
use crate::repo::slot_repo::{SlotRepository, LAST_VIEWED_SLOT};
use crate::service::quote_store::StoreResult;
use crate::service::transfer::FormatError;
use log::warn;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Last-viewed quote snapshot kept in the session slot.
pub struct SessionState<R: SlotRepository> {
    repo: R,
}

impl<R: SlotRepository> SessionState<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the last quote surfaced by the random path in this session.
    pub fn last_viewed(&self) -> Option<Quote> {
        let raw = match self.repo.get_slot(LAST_VIEWED_SLOT) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(
                    "event=session_restore module=session status=error error={}",
                    err
                );
                return None;
            }
        };

        match serde_json::from_str::<Quote>(&raw) {
            Ok(quote) => Some(quote),
            Err(err) => {
                warn!(
                    "event=session_restore module=session status=fallback reason=format_error error={}",
                    err
                );
                None
            }
        }
    }

    pub fn record_viewed(&self, quote: &Quote) -> StoreResult<()> {
        let encoded = serde_json::to_string(quote).map_err(FormatError::from)?;
        self.repo.set_slot(LAST_VIEWED_SLOT, &encoded)?;
        Ok(())
    }
}

/// Picks one quote uniformly at random.
pub fn pick_random<'a, G>(quotes: &'a [Quote], rng: &mut G) -> Option<&'a Quote>
where
    G: Rng + ?Sized,
{
    quotes.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::{pick_random, SessionState};
    use crate::model::quote::Quote;
    use crate::repo::slot_repo::{SlotRepository, SqliteSlotRepository, LAST_VIEWED_SLOT};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn record_then_restore_roundtrips() {
        let session = SessionState::new(SqliteSlotRepository::open_session().unwrap());
        assert_eq!(session.last_viewed(), None);

        let quote = Quote::new("seen", "Life").unwrap();
        session.record_viewed(&quote).unwrap();
        assert_eq!(session.last_viewed(), Some(quote));
    }

    #[test]
    fn malformed_snapshot_reads_as_absent() {
        let repo = SqliteSlotRepository::open_session().unwrap();
        repo.set_slot(LAST_VIEWED_SLOT, "{broken").unwrap();
        let session = SessionState::new(repo);
        assert_eq!(session.last_viewed(), None);
    }

    #[test]
    fn pick_random_returns_member_or_none() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(pick_random(&[], &mut rng).is_none());

        let quotes = vec![
            Quote::new("a", "x").unwrap(),
            Quote::new("b", "y").unwrap(),
        ];
        let picked = pick_random(&quotes, &mut rng).unwrap();
        assert!(quotes.contains(picked));
    }
}
