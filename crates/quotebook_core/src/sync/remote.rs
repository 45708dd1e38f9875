//! Remote quote source contract and HTTP adapter.

use crate::model::quote::Quote;
use async_trait::async_trait;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Text used when a remote item has no usable `title`.
pub const REMOTE_TEXT_FALLBACK: &str = "No text";
/// Category used when a remote item has no usable `body`.
pub const REMOTE_CATEGORY_FALLBACK: &str = "Uncategorized";

/// Transport-level failure talking to the remote collection.
#[derive(Debug)]
pub enum TransportError {
    /// Connection, timeout, or body decoding failure.
    Request(reqwest::Error),
    /// Remote answered with a non-success status code.
    Status(u16),
    /// Remote could not be reached for a reason outside HTTP.
    Unavailable(String),
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Request(err) => write!(f, "request failed: {err}"),
            Self::Status(code) => write!(f, "remote returned status {code}"),
            Self::Unavailable(message) => write!(f, "remote unavailable: {message}"),
        }
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Request(err) => Some(err),
            Self::Status(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        Self::Request(value)
    }
}

/// One item of the remote collection. Fields other than `title` and `body`
/// are ignored, and a `title` or `body` that is not a string counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteItem {
    #[serde(default, deserialize_with = "string_or_absent")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    pub body: Option<String>,
}

fn string_or_absent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

impl RemoteItem {
    /// Maps `title -> text` and `body -> category`, with fixed fallbacks.
    pub fn into_quote(self) -> Quote {
        Quote::with_fallbacks(
            self.title.as_deref(),
            self.body.as_deref(),
            REMOTE_TEXT_FALLBACK,
            REMOTE_CATEGORY_FALLBACK,
        )
    }
}

/// Transport port for the remote quote collection.
#[async_trait]
pub trait RemoteQuoteSource: Send + Sync {
    /// Short identifier used in log events.
    fn source_id(&self) -> &str;

    /// Fetches the full remote collection.
    async fn fetch_remote(&self) -> Result<Vec<RemoteItem>, TransportError>;

    /// Sends one locally added quote to the remote sink.
    async fn push_quote(&self, quote: &Quote) -> Result<(), TransportError>;
}

/// HTTP adapter: `GET endpoint` for the collection, `POST endpoint` for pushes.
pub struct HttpQuoteSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpQuoteSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RemoteQuoteSource for HttpQuoteSource {
    fn source_id(&self) -> &str {
        "http"
    }

    async fn fetch_remote(&self) -> Result<Vec<RemoteItem>, TransportError> {
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let items = response.json::<Vec<RemoteItem>>().await?;
        debug!(
            "event=remote_fetch module=sync status=ok source=http count={}",
            items.len()
        );
        Ok(items)
    }

    async fn push_quote(&self, quote: &Quote) -> Result<(), TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(quote)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        Ok(())
    }
}
