//! List container: owns the canonical collection.
//!
//! `Start` kicks off the fetch as an effect and returns immediately; the
//! result comes back as `TodosLoaded` or `FetchFailed`, tagged with the
//! generation of the `Start` that issued it. `Stop` cancels the in-flight
//! fetch through the token kept in state. A cancelled fetch produces no
//! action at all, and a result from any other generation is ignored.

use crate::featured::FeaturedReducer;
use crate::fetch::{LoadError, fetch_todos};
use crate::types::{Phase, TodoAction, TodoState, toggle};
use std::sync::Arc;
use todo_view_core::cancellation::CancellationToken;
use todo_view_core::composition::{CombinedReducer, SharedReducer, combine_reducers};
use todo_view_core::environment::{HttpClient, RandomSource};
use todo_view_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Environment dependencies for the to-do list view
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Client used to fetch the collection
    pub http: Arc<dyn HttpClient>,
    /// Source of featured-item picks
    pub random: Arc<dyn RandomSource>,
    /// URL of the JSON resource
    pub source: String,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(
        http: Arc<dyn HttpClient>,
        random: Arc<dyn RandomSource>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            http,
            random,
            source: source.into(),
        }
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Reducer for the list container
#[derive(Clone, Debug, Default)]
pub struct TodoListReducer;

impl TodoListReducer {
    /// Creates a new `TodoListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Effect that fetches the collection and reports the outcome
    fn load(env: &TodoEnvironment, generation: u64, cancel: CancellationToken) -> Effect<TodoAction> {
        let http = Arc::clone(&env.http);
        let url = env.source.clone();
        let token = cancel.clone();

        Effect::cancellable(token, async move {
            match fetch_todos(http.as_ref(), &url, &cancel).await {
                Ok(todos) => Some(TodoAction::TodosLoaded { generation, todos }),
                Err(LoadError::Fetch(error)) => Some(TodoAction::FetchFailed { generation, error }),
                Err(LoadError::Cancelled(_)) => {
                    tracing::debug!(url = %url, generation, "Fetch cancelled, discarding result");
                    None
                },
            }
        })
    }

    /// Whether a fetch result belongs to the fetch currently in flight
    fn is_current(state: &TodoState, generation: u64) -> bool {
        if state.phase != Phase::Loading {
            tracing::debug!(phase = ?state.phase, "Ignoring late fetch result");
            return false;
        }
        if generation != state.generation {
            tracing::debug!(generation, current = state.generation, "Ignoring stale fetch result");
            return false;
        }
        true
    }
}

impl Reducer for TodoListReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Lifecycle ==========
            TodoAction::Start => {
                if !matches!(state.phase, Phase::Idle | Phase::Stopped) {
                    tracing::debug!(phase = ?state.phase, "Ignoring Start: already started");
                    return SmallVec::new();
                }

                let cancel = CancellationToken::new();
                state.fetch = cancel.clone();
                state.generation = state.generation.wrapping_add(1);
                state.todos.clear();
                state.phase = Phase::Loading;
                state.last_error = None;

                tracing::debug!(source = %env.source, generation = state.generation, "Loading todos");
                smallvec![Self::load(env, state.generation, cancel)]
            },

            TodoAction::Stop => {
                tracing::debug!(phase = ?state.phase, "Stopping");
                state.phase = Phase::Stopped;
                smallvec![Effect::Cancel(state.fetch.clone())]
            },

            // ========== Fetch results ==========
            TodoAction::TodosLoaded { generation, todos } => {
                if !Self::is_current(state, generation) {
                    return SmallVec::new();
                }

                tracing::debug!(count = todos.len(), "Todos loaded");
                state.todos = todos;
                state.phase = Phase::Ready;
                SmallVec::new()
            },

            TodoAction::FetchFailed { generation, error } => {
                if !Self::is_current(state, generation) {
                    return SmallVec::new();
                }

                tracing::warn!(source = %env.source, status = ?error.status(), %error, "Failed to load todos");
                state.last_error = Some(error.to_string());
                state.phase = Phase::Failed;
                SmallVec::new()
            },

            // ========== Interaction ==========
            TodoAction::Toggle { id } => {
                if state.phase != Phase::Ready {
                    tracing::debug!(phase = ?state.phase, %id, "Ignoring Toggle: list not shown");
                    return SmallVec::new();
                }

                state.todos = toggle(&state.todos, &id);
                SmallVec::new()
            },
        }
    }
}

/// The full view reducer: list container, then featured selection
pub type TodoViewReducer = CombinedReducer<TodoState, TodoAction, TodoEnvironment>;

/// Builds the view reducer
///
/// The featured reducer runs second so it observes the collection the
/// container produced for the same action.
#[must_use]
pub fn todo_view_reducer() -> TodoViewReducer {
    let list: SharedReducer<TodoState, TodoAction, TodoEnvironment> = Arc::new(TodoListReducer::new());
    let featured: SharedReducer<TodoState, TodoAction, TodoEnvironment> = Arc::new(FeaturedReducer::new());
    combine_reducers(vec![list, featured])
}
