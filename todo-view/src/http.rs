//! `reqwest`-backed [`HttpClient`].

use futures::future::BoxFuture;
use todo_view_core::environment::{HttpClient, HttpResponse, TransportError};

/// Production HTTP client
///
/// Reads the whole body before returning; status handling is left to the
/// caller.
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a client with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a preconfigured `reqwest::Client`
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
        let response = self.client.get(url).send().await?;

        let final_url = response.url().to_string();
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await?;

        Ok(HttpResponse {
            url: final_url,
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, TransportError>> {
        Box::pin(async move {
            self.fetch(url).await.map_err(|error| {
                tracing::debug!(url, %error, "HTTP request failed");
                TransportError {
                    url: url.to_string(),
                    message: error.to_string(),
                }
            })
        })
    }
}
