//! # todo-view Testing
//!
//! Testing utilities and helpers for the todo-view reducer architecture.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use todo_view_testing::{FixedRandom, MockHttpClient};
//!
//! #[tokio::test]
//! async fn loads_on_start() {
//!     let http = MockHttpClient::new().with_json("http://test/todos.json", 200, "[]");
//!     let env = TodoEnvironment::new(Arc::new(http), Arc::new(FixedRandom::new(0)), "http://test/todos.json");
//!     let store = Store::new(TodoState::new(), todo_view_reducer(), env);
//!
//!     store.send(TodoAction::Start).await?;
//! }
//! ```


/// Mock implementations of Environment traits
pub mod mocks {
    use futures::future::BoxFuture;
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Mutex, PoisonError};
    use todo_view_core::environment::{HttpClient, HttpResponse, RandomSource, TransportError};
    use tokio::sync::watch;

    /// Random source that always picks the same index
    ///
    /// The index is clamped to the valid range for the requested length.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_view_testing::mocks::FixedRandom;
    /// use todo_view_core::environment::RandomSource;
    ///
    /// let random = FixedRandom::new(5);
    /// assert_eq!(random.pick_index(10), 5);
    /// assert_eq!(random.pick_index(3), 2);
    /// assert_eq!(random.pick_index(0), 0);
    /// ```
    #[derive(Debug, Clone, Copy)]
    pub struct FixedRandom {
        index: usize,
    }

    impl FixedRandom {
        /// Create a random source that always returns `index`
        #[must_use]
        pub const fn new(index: usize) -> Self {
            Self { index }
        }
    }

    impl RandomSource for FixedRandom {
        fn pick_index(&self, len: usize) -> usize {
            self.index.min(len.saturating_sub(1))
        }
    }

    /// Random source that replays a scripted sequence of indices
    ///
    /// Each pick consumes the next scripted value (clamped to the requested
    /// range). Once the script is exhausted it returns 0. Also records every
    /// requested length, so tests can count how often a pick happened.
    #[derive(Debug, Default)]
    pub struct SequenceRandom {
        script: Mutex<VecDeque<usize>>,
        picks: Mutex<Vec<usize>>,
    }

    impl SequenceRandom {
        /// Create a random source replaying `indices`
        #[must_use]
        pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
            Self {
                script: Mutex::new(indices.into_iter().collect()),
                picks: Mutex::new(Vec::new()),
            }
        }

        /// Lengths passed to every `pick_index` call so far
        #[must_use]
        pub fn picks(&self) -> Vec<usize> {
            self.picks.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }

        /// Number of `pick_index` calls so far
        #[must_use]
        pub fn pick_count(&self) -> usize {
            self.picks.lock().unwrap_or_else(PoisonError::into_inner).len()
        }
    }

    impl RandomSource for SequenceRandom {
        fn pick_index(&self, len: usize) -> usize {
            self.picks.lock().unwrap_or_else(PoisonError::into_inner).push(len);
            let next = self
                .script
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
                .unwrap_or(0);
            next.min(len.saturating_sub(1))
        }
    }

    /// Releases responses held back by a gated [`MockHttpClient`]
    ///
    /// Dropping the gate also releases them.
    #[derive(Debug)]
    pub struct ResponseGate {
        open: watch::Sender<bool>,
    }

    impl ResponseGate {
        /// Let every pending and future request complete
        pub fn release(&self) {
            self.open.send_replace(true);
        }
    }

    /// HTTP client returning canned responses
    ///
    /// Requests for unknown URLs get a `404` with body `not found`.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_view_testing::mocks::MockHttpClient;
    /// use todo_view_core::environment::HttpClient;
    ///
    /// # tokio_test::block_on(async {
    /// let http = MockHttpClient::new().with_json("http://test/a.json", 200, "[]");
    /// let response = http.get("http://test/a.json").await.unwrap();
    /// assert_eq!(response.status, 200);
    /// assert_eq!(http.requests(), vec!["http://test/a.json".to_string()]);
    /// # });
    /// ```
    #[derive(Debug, Default)]
    pub struct MockHttpClient {
        routes: Mutex<HashMap<String, Result<HttpResponse, TransportError>>>,
        requests: Mutex<Vec<String>>,
        gate: Option<watch::Receiver<bool>>,
    }

    impl MockHttpClient {
        /// Create a client with no routes
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Serve `response` for requests to its URL
        #[must_use]
        pub fn with_response(self, response: HttpResponse) -> Self {
            self.routes
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(response.url.clone(), Ok(response));
            self
        }

        /// Serve a JSON body with the given status
        #[must_use]
        pub fn with_json(self, url: &str, status: u16, body: &str) -> Self {
            self.with_response(
                HttpResponse::new(url, status, body).with_header("content-type", "application/json"),
            )
        }

        /// Fail requests to `url` without a response
        #[must_use]
        pub fn with_transport_error(self, url: &str, message: &str) -> Self {
            self.routes.lock().unwrap_or_else(PoisonError::into_inner).insert(
                url.to_string(),
                Err(TransportError {
                    url: url.to_string(),
                    message: message.to_string(),
                }),
            );
            self
        }

        /// Hold every response until the returned gate is released
        #[must_use]
        pub fn gated(mut self) -> (Self, ResponseGate) {
            let (open, rx) = watch::channel(false);
            self.gate = Some(rx);
            (self, ResponseGate { open })
        }

        /// URLs requested so far, in order
        #[must_use]
        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }
    }

    impl HttpClient for MockHttpClient {
        fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, TransportError>> {
            Box::pin(async move {
                self.requests
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(url.to_string());

                if let Some(gate) = &self.gate {
                    let mut gate = gate.clone();
                    // A dropped gate counts as released.
                    let _ = gate.wait_for(|open| *open).await;
                }

                self.routes
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get(url)
                    .cloned()
                    .unwrap_or_else(|| Ok(HttpResponse::new(url, 404, "not found")))
            })
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedRandom, MockHttpClient, ResponseGate, SequenceRandom};
pub use reducer_test::{ReducerTest, assertions};
