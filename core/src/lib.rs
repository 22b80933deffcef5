//! # todo-view Core
//!
//! Core traits and types for the todo-view reducer architecture.
//!
//! A view is modelled as a state machine driven by actions. Business logic
//! lives in pure reducers; side effects are returned as descriptions and run
//! by the store in the runtime crate.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state owned by a store
//! - **Action**: All possible inputs to a reducer (lifecycle, interaction, effect results)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Example
//!
//! ```ignore
//! use todo_view_core::*;
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

pub use smallvec::{SmallVec, smallvec};

pub use effect::Effect;
pub use reducer::Reducer;

/// Cooperative cancellation signals for in-flight effects
pub mod cancellation;

/// Reducer composition utilities
pub mod composition;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Updates state in place
        /// 2. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are cancellable.
pub mod effect {
    use crate::cancellation::CancellationToken;
    use std::future::Future;
    use std::pin::Pin;

    /// Boxed async computation that may produce an action
    pub type EffectFuture<Action> = Pin<Box<dyn Future<Output = Option<Action>> + Send>>;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Async computation owned by a cancellation token
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the
        /// reducer. Once `token` is cancelled the produced action is dropped:
        /// the runtime re-checks the token under the state lock, so an action
        /// that raced the cancellation is neither reduced nor broadcast.
        Cancellable {
            /// Token whose cancellation discards the result
            token: CancellationToken,
            /// The computation
            future: EffectFuture<Action>,
        },

        /// Signal cancellation to whatever is observing the token
        ///
        /// Executed by the runtime while it still holds the state lock, before
        /// `send` returns.
        Cancel(CancellationToken),
    }

    impl<Action> Effect<Action> {
        /// Wrap `future` so its result is discarded once `token` is cancelled
        #[must_use]
        pub fn cancellable<F>(token: CancellationToken, future: F) -> Self
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Cancellable {
                token,
                future: Box::pin(future),
            }
        }
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Cancellable { token, .. } => f
                    .debug_struct("Effect::Cancellable")
                    .field("token", token)
                    .finish_non_exhaustive(),
                Effect::Cancel(token) => f.debug_tuple("Effect::Cancel").field(token).finish(),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter, so tests can substitute deterministic
/// implementations.
pub mod environment {
    use futures::future::BoxFuture;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::{Mutex, PoisonError};
    use thiserror::Error;

    /// Source of uniformly distributed indices
    ///
    /// # Examples
    ///
    /// ```
    /// use todo_view_core::environment::{RandomSource, SeededRandom};
    ///
    /// let random = SeededRandom::new(7);
    /// let index = random.pick_index(3);
    /// assert!(index < 3);
    /// ```
    pub trait RandomSource: Send + Sync {
        /// Pick an index uniformly from `0..len`
        ///
        /// Returns 0 when `len` is 0 or 1.
        fn pick_index(&self, len: usize) -> usize;
    }

    /// Thread-local RNG backed random source
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ThreadRandom;

    impl RandomSource for ThreadRandom {
        fn pick_index(&self, len: usize) -> usize {
            if len <= 1 {
                return 0;
            }
            rand::thread_rng().gen_range(0..len)
        }
    }

    /// Reproducible random source seeded from a `u64`
    #[derive(Debug)]
    pub struct SeededRandom {
        rng: Mutex<StdRng>,
    }

    impl SeededRandom {
        /// Create a random source with the given seed
        #[must_use]
        pub fn new(seed: u64) -> Self {
            Self {
                rng: Mutex::new(StdRng::seed_from_u64(seed)),
            }
        }
    }

    impl RandomSource for SeededRandom {
        fn pick_index(&self, len: usize) -> usize {
            if len <= 1 {
                return 0;
            }
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            rng.gen_range(0..len)
        }
    }

    /// Raw HTTP response as seen by the application
    ///
    /// The body is kept unparsed so failures can be inspected as-is.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct HttpResponse {
        /// Final URL of the request
        pub url: String,
        /// HTTP status code
        pub status: u16,
        /// Response headers in arrival order
        pub headers: Vec<(String, String)>,
        /// Raw body bytes
        pub body: Vec<u8>,
    }

    impl HttpResponse {
        /// Create a response with no headers
        #[must_use]
        pub fn new(url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) -> Self {
            Self {
                url: url.into(),
                status,
                headers: Vec::new(),
                body: body.into(),
            }
        }

        /// Add a header
        #[must_use]
        pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
            self.headers.push((name.into(), value.into()));
            self
        }

        /// Whether the status is in the 2xx range
        #[must_use]
        pub const fn is_success(&self) -> bool {
            self.status >= 200 && self.status < 300
        }

        /// Body decoded as UTF-8, replacing invalid sequences
        #[must_use]
        pub fn text(&self) -> String {
            String::from_utf8_lossy(&self.body).into_owned()
        }
    }

    /// A request never produced a response
    #[derive(Debug, Clone, Error, PartialEq, Eq)]
    #[error("transport error for {url}: {message}")]
    pub struct TransportError {
        /// Requested URL
        pub url: String,
        /// Underlying error message
        pub message: String,
    }

    /// HTTP client abstraction
    ///
    /// Only `GET` is needed; any status code is a successful transport result.
    pub trait HttpClient: Send + Sync {
        /// Issue a single GET request
        ///
        /// # Errors
        ///
        /// Returns [`TransportError`] if no response was received.
        fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, TransportError>>;
    }
}
