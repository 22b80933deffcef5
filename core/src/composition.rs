//! Reducer composition utilities
//!
//! [`combine_reducers`] runs several reducers over the same state and action,
//! in order. A later reducer observes every state change made by the earlier
//! ones for the same action, which is how derived state (for example a
//! selection that depends on a collection) is kept in sync with the state it
//! derives from.
//!
//! # Examples
//!
//! ```
//! use todo_view_core::{Effect, Reducer, SmallVec, smallvec};
//! use todo_view_core::composition::combine_reducers;
//! use std::sync::Arc;
//!
//! #[derive(Clone, Default)]
//! struct ListState {
//!     items: Vec<u32>,
//!     total: u32,
//! }
//!
//! #[derive(Clone)]
//! enum ListAction {
//!     Push(u32),
//! }
//!
//! struct ItemsReducer;
//! struct TotalReducer;
//!
//! impl Reducer for ItemsReducer {
//!     type State = ListState;
//!     type Action = ListAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut ListState, action: ListAction, _env: &()) -> SmallVec<[Effect<ListAction>; 4]> {
//!         let ListAction::Push(n) = action;
//!         state.items.push(n);
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! impl Reducer for TotalReducer {
//!     type State = ListState;
//!     type Action = ListAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut ListState, _action: ListAction, _env: &()) -> SmallVec<[Effect<ListAction>; 4]> {
//!         state.total = state.items.iter().sum();
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let combined = combine_reducers(vec![Arc::new(ItemsReducer), Arc::new(TotalReducer)]);
//! let mut state = ListState::default();
//! let _ = combined.reduce(&mut state, ListAction::Push(3), &());
//! let _ = combined.reduce(&mut state, ListAction::Push(4), &());
//! assert_eq!(state.total, 7);
//! ```

use crate::SmallVec;
use crate::effect::Effect;
use crate::reducer::Reducer;
use std::sync::Arc;

/// Shared, thread-safe reducer trait object
pub type SharedReducer<S, A, E> = Arc<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence, and all effects are collected and concatenated.
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<SharedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`]. Cloning is cheap; the reducers are shared.
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<SharedReducer<S, A, E>>,
}

impl<S, A, E> Clone for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    fn clone(&self) -> Self {
        Self {
            reducers: self.reducers.clone(),
        }
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}
