//! Domain types for the to-do list view.
//!
//! A to-do list is an ordered collection of items fetched once from a JSON
//! resource. The only mutation is flipping an item's `checked` flag, which
//! replaces the collection with a new one in the same order.

use crate::featured::FeaturedSelector;
use crate::fetch::FetchError;
use serde::{Deserialize, Serialize};
use todo_view_core::cancellation::CancellationToken;

/// Identifier of a to-do item
///
/// The resource may use either JSON numbers or strings as ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    /// Numeric id
    Number(i64),
    /// Textual id
    Text(String),
}

impl From<i64> for TodoId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// A single to-do item as served by the resource
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Display text
    pub value: String,
    /// Whether the item is checked
    pub checked: bool,
}

impl TodoItem {
    /// Creates an unchecked item
    #[must_use]
    pub fn new(id: impl Into<TodoId>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            checked: false,
        }
    }

    /// Sets the checked flag
    #[must_use]
    pub const fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

/// Flip `checked` on the item whose id matches
///
/// Returns a new collection of the same length and order. Items with other
/// ids are copied unchanged; an unknown id yields a value-equal copy.
#[must_use]
pub fn toggle(todos: &[TodoItem], id: &TodoId) -> Vec<TodoItem> {
    todos
        .iter()
        .map(|todo| TodoItem {
            checked: if &todo.id == id { !todo.checked } else { todo.checked },
            ..todo.clone()
        })
        .collect()
}

/// Ids of a collection, in order
#[must_use]
pub fn ids(todos: &[TodoItem]) -> Vec<TodoId> {
    todos.iter().map(|todo| todo.id.clone()).collect()
}

/// Lifecycle phase of the list container
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Not started yet
    #[default]
    Idle,
    /// Fetch in flight
    Loading,
    /// Fetch succeeded
    Ready,
    /// Fetch failed
    Failed,
    /// Torn down
    Stopped,
}

/// State of the to-do list view
#[derive(Clone, Debug, Default)]
pub struct TodoState {
    /// Canonical collection, in server order
    pub todos: Vec<TodoItem>,
    /// Featured item selection derived from `todos`
    pub featured: FeaturedSelector,
    /// Lifecycle phase
    pub phase: Phase,
    /// Cancellation for the in-flight fetch
    ///
    /// Starts as an unobserved token so cancelling before any fetch is a no-op.
    pub fetch: CancellationToken,
    /// Bumped on every accepted `Start`; results tagged otherwise are stale
    pub generation: u64,
    /// Last fetch failure, for diagnostics
    pub last_error: Option<String>,
}

impl TodoState {
    /// Creates an empty, idle state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ready state holding `todos`
    #[must_use]
    pub fn with_todos(todos: Vec<TodoItem>) -> Self {
        Self {
            todos,
            phase: Phase::Ready,
            ..Self::default()
        }
    }

    /// Returns the featured item, if any
    #[must_use]
    pub fn featured_item(&self) -> Option<&TodoItem> {
        self.featured.featured(&self.todos)
    }

    /// Returns an item by id
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&TodoItem> {
        self.todos.iter().find(|todo| &todo.id == id)
    }
}

/// Actions driving the to-do list view
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    /// Lifecycle: the view was mounted; begin fetching
    Start,
    /// Effect result: the fetch succeeded
    TodosLoaded {
        /// Generation of the `Start` that issued the fetch
        generation: u64,
        /// Parsed collection, in server order
        todos: Vec<TodoItem>,
    },
    /// Effect result: the fetch failed
    FetchFailed {
        /// Generation of the `Start` that issued the fetch
        generation: u64,
        /// The failure, carrying the response when there was one
        error: FetchError,
    },
    /// Interaction: a checkbox was toggled
    Toggle {
        /// Item to toggle
        id: TodoId,
    },
    /// Lifecycle: the view is being torn down; cancel the fetch
    Stop,
}
