//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value slot contract the store and filter persist through.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Slot values are opaque text; encoding is the caller's concern.
//! - A write fully replaces the previous value of the slot.

pub mod slot_repo;
