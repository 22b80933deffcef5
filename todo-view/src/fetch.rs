//! Resource fetching.
//!
//! One GET, no retry, no timeout. Non-success statuses fail with the
//! response attached; a cancelled fetch fails with [`CancellationError`],
//! which callers tell apart from [`FetchError`] through [`LoadError`].

use crate::types::TodoItem;
use serde::de::DeserializeOwned;
use thiserror::Error;
use todo_view_core::cancellation::CancellationToken;
use todo_view_core::environment::{HttpClient, HttpResponse, TransportError};

/// A non-success response, kept for inspection
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedResponse {
    /// Final URL of the request
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Vec<(String, String)>,
    /// Unparsed body text
    pub body: String,
}

impl From<HttpResponse> for FailedResponse {
    fn from(response: HttpResponse) -> Self {
        let body = response.text();
        Self {
            url: response.url,
            status: response.status,
            headers: response.headers,
            body,
        }
    }
}

/// The resource could not be fetched
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-2xx status
    #[error("GET {} returned status {}", .0.url, .0.status)]
    Status(FailedResponse),

    /// No response was received
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The body was not the expected JSON
    #[error("could not decode response from {url}: {message}")]
    Decode {
        /// Requested URL
        url: String,
        /// Parser error message
        message: String,
    },
}

impl FetchError {
    /// The failed response, when the server answered
    #[must_use]
    pub const fn response(&self) -> Option<&FailedResponse> {
        match self {
            Self::Status(response) => Some(response),
            Self::Transport(_) | Self::Decode { .. } => None,
        }
    }

    /// The HTTP status, when the server answered with a failure
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.response().map(|response| response.status)
    }
}

/// The fetch was cancelled before it completed
#[derive(Clone, Copy, Debug, Default, Error, PartialEq, Eq)]
#[error("fetch cancelled before completion")]
pub struct CancellationError;

/// Outcome of a failed load: a fetch failure or a cancellation
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The fetch itself failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The fetch was cancelled
    #[error(transparent)]
    Cancelled(#[from] CancellationError),
}

impl LoadError {
    /// Whether this is a cancellation rather than a failure
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

/// Fetch `url` and parse its body as JSON
///
/// The request races `cancel`; if cancellation wins, the request future is
/// dropped and nothing is parsed.
///
/// # Errors
///
/// - [`LoadError::Cancelled`] if `cancel` fires before the response arrives
/// - [`LoadError::Fetch`] with [`FetchError::Status`] for non-2xx responses
/// - [`LoadError::Fetch`] with [`FetchError::Transport`] or [`FetchError::Decode`]
///   when no response arrives or the body does not parse
pub async fn fetch_json<T: DeserializeOwned>(
    client: &dyn HttpClient,
    url: &str,
    cancel: &CancellationToken,
) -> Result<T, LoadError> {
    if cancel.is_cancelled() {
        return Err(CancellationError.into());
    }

    tracing::debug!(url, "Fetching resource");

    let response = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(CancellationError.into()),
        response = client.get(url) => response.map_err(FetchError::from)?,
    };

    if !response.is_success() {
        return Err(FetchError::Status(response.into()).into());
    }

    serde_json::from_slice(&response.body).map_err(|error| {
        FetchError::Decode {
            url: url.to_string(),
            message: error.to_string(),
        }
        .into()
    })
}

/// Fetch the to-do collection from `url`
///
/// # Errors
///
/// See [`fetch_json`].
pub async fn fetch_todos(
    client: &dyn HttpClient,
    url: &str,
    cancel: &CancellationToken,
) -> Result<Vec<TodoItem>, LoadError> {
    fetch_json(client, url, cancel).await
}
