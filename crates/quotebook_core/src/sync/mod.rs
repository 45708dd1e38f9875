//! Remote reconciliation.
//!
//! # Responsibility
//! - Define the transport port used to fetch and push quotes.
//! - Fold remote quotes into the local book without losing local ones.
//! - Run reconciliation on a cancellable schedule.
//!
//! # Invariants
//! - Local state is the source of truth; remote failures never mutate it.
//! - At most one reconciliation runs at a time per reconciler.

pub mod reconciler;
pub mod remote;
pub mod scheduler;
