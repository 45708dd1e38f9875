//! Quote domain model.
//!
//! # Responsibility
//! - Define the `{text, category}` record and its construction rules.
//! - Keep the wire shape identical to the persisted JSON shape.
//!
//! # Invariants
//! - `text` and `category` are trimmed and non-empty.
//! - Two quotes are the same record iff both fields are exactly equal
//!   (case-sensitive, no normalization beyond the construction trim).
//! - Deserialization applies the same validation as `Quote::new`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure for quote construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteValidationError {
    /// `text` is empty after trimming.
    EmptyText,
    /// `category` is empty after trimming.
    EmptyCategory,
}

impl Display for QuoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "quote text cannot be empty"),
            Self::EmptyCategory => write!(f, "quote category cannot be empty"),
        }
    }
}

impl Error for QuoteValidationError {}

/// One quote and its classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "QuoteFields")]
pub struct Quote {
    text: String,
    category: String,
}

/// Unvalidated wire shape; extra fields are ignored.
#[derive(Deserialize)]
struct QuoteFields {
    text: String,
    category: String,
}

impl TryFrom<QuoteFields> for Quote {
    type Error = QuoteValidationError;

    fn try_from(value: QuoteFields) -> Result<Self, Self::Error> {
        Self::new(value.text, value.category)
    }
}

impl Quote {
    /// Creates a quote from raw user input.
    ///
    /// Both fields are trimmed before validation; the stored values are the
    /// trimmed ones.
    ///
    /// # Errors
    /// - `EmptyText` when `text` is blank.
    /// - `EmptyCategory` when `category` is blank.
    pub fn new(
        text: impl AsRef<str>,
        category: impl AsRef<str>,
    ) -> Result<Self, QuoteValidationError> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(QuoteValidationError::EmptyText);
        }
        let category = category.as_ref().trim();
        if category.is_empty() {
            return Err(QuoteValidationError::EmptyCategory);
        }

        Ok(Self {
            text: text.to_string(),
            category: category.to_string(),
        })
    }

    /// Builds a quote from a possibly-missing remote pair, substituting the
    /// given fallbacks for absent or blank fields.
    pub(crate) fn with_fallbacks(
        text: Option<&str>,
        category: Option<&str>,
        text_fallback: &'static str,
        category_fallback: &'static str,
    ) -> Self {
        Self::trusted(
            non_blank(text).unwrap_or(text_fallback),
            non_blank(category).unwrap_or(category_fallback),
        )
    }

    /// Skips validation. Callers must pass trimmed, non-empty values.
    pub(crate) fn trusted(text: &str, category: &str) -> Self {
        debug_assert!(!text.trim().is_empty() && !category.trim().is_empty());
        Self {
            text: text.to_string(),
            category: category.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns whether `other` is the same record.
    pub fn same_record(&self, other: &Quote) -> bool {
        self.text == other.text && self.category == other.category
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
