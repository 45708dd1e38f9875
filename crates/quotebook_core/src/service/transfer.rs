//! JSON encoding of quote sequences for the durable slot and file transfer.
//!
//! # Responsibility
//! - Decode a JSON document into validated quotes.
//! - Encode the store for persistence (compact) and export (pretty).
//!
//! # Invariants
//! - A document whose top-level value is not an array is rejected as a whole.
//! - One invalid element rejects the whole document; partial imports never
//!   happen.

use crate::model::quote::Quote;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Malformed JSON in a slot or an imported document.
#[derive(Debug)]
pub enum FormatError {
    /// Input is not valid JSON, or encoding failed.
    Json(serde_json::Error),
    /// Top-level value is valid JSON but not an array.
    NotAnArray,
    /// Element at `index` is not a valid `{text, category}` record.
    InvalidRecord {
        index: usize,
        source: serde_json::Error,
    },
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid JSON: {err}"),
            Self::NotAnArray => write!(f, "expected a JSON array of quotes"),
            Self::InvalidRecord { index, source } => {
                write!(f, "invalid quote at index {index}: {source}")
            }
        }
    }
}

impl Error for FormatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::NotAnArray => None,
            Self::InvalidRecord { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Decodes a JSON array of quotes, preserving element order.
pub fn decode_quotes(raw: &str) -> Result<Vec<Quote>, FormatError> {
    let Value::Array(items) = serde_json::from_str::<Value>(raw)? else {
        return Err(FormatError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Quote>(item)
                .map_err(|source| FormatError::InvalidRecord { index, source })
        })
        .collect()
}

/// Compact encoding used for the durable slot.
pub fn encode_quotes(quotes: &[Quote]) -> Result<String, FormatError> {
    Ok(serde_json::to_string(quotes)?)
}

/// Human-readable encoding used for exported files.
pub fn export_quotes(quotes: &[Quote]) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(quotes)?)
}
