//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate slot repositories into store, filter and session use-cases.
//! - Keep presentation and transport behind injected ports.

pub mod category_index;
pub mod filter_state;
pub mod quote_book;
pub mod quote_store;
pub mod session_state;
pub mod transfer;
pub mod view;
