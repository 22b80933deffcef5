//! Binding between a caller and the view's store.
//!
//! The controller is what a UI layer talks to: lifecycle calls map to
//! `Start`/`Stop`, checkbox changes map to `Toggle`, and the current render
//! model is read back with [`TodoListController::view`].

use crate::container::{TodoEnvironment, TodoViewReducer, todo_view_reducer};
use crate::types::{Phase, TodoAction, TodoId, TodoItem, TodoState};
use crate::view::TodoListView;
use std::time::Duration;
use todo_view_runtime::{EffectHandle, Store, StoreConfig, StoreError};
use tokio::sync::broadcast;

/// Store running the to-do list view
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoViewReducer>;

/// Drives the to-do list view through its store
#[derive(Clone)]
pub struct TodoListController {
    store: TodoStore,
}

impl TodoListController {
    /// Create a controller with default store settings
    #[must_use]
    pub fn new(environment: TodoEnvironment) -> Self {
        Self::with_config(environment, StoreConfig::default())
    }

    /// Create a controller with custom store settings
    #[must_use]
    pub fn with_config(environment: TodoEnvironment, config: StoreConfig) -> Self {
        Self {
            store: Store::with_config(TodoState::new(), todo_view_reducer(), environment, config),
        }
    }

    /// Mount the view: begin fetching
    ///
    /// Returns as soon as the fetch is started.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn start(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(TodoAction::Start).await
    }

    /// Mount the view and wait until the fetch settles
    ///
    /// Returns `TodosLoaded` or `FetchFailed`, whichever the fetch produced.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Timeout`] if the fetch does not settle in time
    /// - [`StoreError::ShutdownInProgress`] if the store is shutting down
    pub async fn load(&self, timeout: Duration) -> Result<TodoAction, StoreError> {
        self.store
            .send_and_wait_for(
                TodoAction::Start,
                |action| {
                    matches!(
                        action,
                        TodoAction::TodosLoaded { .. } | TodoAction::FetchFailed { .. }
                    )
                },
                timeout,
            )
            .await
    }

    /// Forward a checkbox change
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn toggle(&self, id: TodoId) -> Result<(), StoreError> {
        self.store.send(TodoAction::Toggle { id }).await.map(drop)
    }

    /// Unmount the view: cancel any in-flight fetch
    ///
    /// The cancellation is signalled before this returns; it does not wait
    /// for the fetch task to finish.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn stop(&self) -> Result<(), StoreError> {
        self.store.send(TodoAction::Stop).await.map(drop)
    }

    /// Current render model
    pub async fn view(&self) -> TodoListView {
        self.store.state(TodoListView::from_state).await
    }

    /// Current collection
    pub async fn todos(&self) -> Vec<TodoItem> {
        self.store.state(|state| state.todos.clone()).await
    }

    /// Current featured item
    pub async fn featured(&self) -> Option<TodoItem> {
        self.store.state(|state| state.featured_item().cloned()).await
    }

    /// Current lifecycle phase
    pub async fn phase(&self) -> Phase {
        self.store.state(|state| state.phase).await
    }

    /// Observe actions produced by effects
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TodoAction> {
        self.store.subscribe_actions()
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &TodoStore {
        &self.store
    }

    /// Wait for running effects and reject further actions
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
    /// after the configured timeout.
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.store.shutdown_default().await
    }
}

impl std::fmt::Debug for TodoListController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoListController").finish_non_exhaustive()
    }
}
