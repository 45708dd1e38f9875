//! Domain model for the quote collection.
//!
//! # Responsibility
//! - Define the canonical record stored, filtered and synced by core.
//!
//! # Invariants
//! - A quote is identified by its `(text, category)` tuple; there is no
//!   surrogate id.
//! - Quotes are immutable once constructed.

pub mod quote;
