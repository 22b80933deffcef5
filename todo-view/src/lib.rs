//! To-do list view built on the reducer architecture.
//!
//! Fetches a collection of to-do items from a JSON resource, features one of
//! them at random, and lets the caller toggle items locally. Nothing is
//! written back.
//!
//! - [`fetch`]: one GET for the resource, cancellable, failures carry the response
//! - [`container`]: owns the collection; `Start` fetches, `Stop` cancels, `Toggle` flips
//! - [`featured`]: redraws the featured item whenever the id sequence changes
//! - [`view`]: render models for the list and its items
//! - [`controller`]: what a UI layer calls
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use todo_view::{ReqwestHttpClient, TodoEnvironment, TodoListController, TodoViewConfig};
//! use todo_view_core::environment::ThreadRandom;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TodoViewConfig::from_env()?;
//! let env = TodoEnvironment::new(
//!     Arc::new(ReqwestHttpClient::new()),
//!     Arc::new(ThreadRandom),
//!     config.resource_url()?.as_str(),
//! );
//! let controller = TodoListController::with_config(env, config.store_config());
//!
//! controller.load(Duration::from_secs(10)).await?;
//! println!("{}", controller.view().await.render_html());
//!
//! controller.stop().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod container;
pub mod controller;
pub mod featured;
pub mod fetch;
pub mod http;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use config::{ConfigError, TodoViewConfig};
pub use container::{TodoEnvironment, TodoListReducer, TodoViewReducer, todo_view_reducer};
pub use controller::{TodoListController, TodoStore};
pub use featured::{FeaturedReducer, FeaturedSelector};
pub use fetch::{CancellationError, FailedResponse, FetchError, LoadError, fetch_json, fetch_todos};
pub use http::ReqwestHttpClient;
pub use types::{Phase, TodoAction, TodoId, TodoItem, TodoState, toggle};
pub use view::{TodoItemView, TodoListView};
