//! # todo-view Runtime
//!
//! Runtime implementation for the todo-view reducer architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, serializes reducer calls, executes effects
//! - **Effect Executor**: Runs effect descriptions and feeds produced actions back
//! - **Action Broadcast**: Lets observers see every action produced by effects
//!
//! ## Example
//!
//! ```ignore
//! use todo_view_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::Start).await?;
//!
//! // Read state
//! let len = store.state(|s| s.todos.len()).await;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use todo_view_core::{effect::Effect, reducer::Reducer};
use tokio::sync::{RwLock, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        ///
        /// Some effects were still running when the timeout elapsed.
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for an action
        ///
        /// Returned by `send_and_wait_for` when the timeout expires before
        /// a matching action is received.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use todo_view_runtime::StoreConfig;
/// use std::time::Duration;
///
/// let config = StoreConfig::default()
///     .with_broadcast_capacity(64)
///     .with_shutdown_timeout(Duration::from_secs(5));
/// assert_eq!(config.broadcast_capacity, 64);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Number of effect-produced actions buffered for slow observers
    pub broadcast_capacity: usize,
    /// Default timeout for graceful shutdown
    pub default_shutdown_timeout: Duration,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(broadcast_capacity: usize, default_shutdown_timeout: Duration) -> Self {
        Self {
            broadcast_capacity,
            default_shutdown_timeout,
        }
    }

    /// Set the action broadcast capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Set the default shutdown timeout
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.default_shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 16,
            default_shutdown_timeout: Duration::from_secs(30),
        }
    }
}

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] to allow waiting for the effects spawned
/// directly by that action. Actions fed back by those effects get their own
/// handles and are not tracked here.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(Action::Start).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a new handle and the tracking context that drives it
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: tx,
        };

        (handle, tracking)
    }

    /// Number of tracked effects still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Wait for all tracked effects to complete
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                // Every tracking context is gone, so nothing can still be running.
                break;
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: effect tracking context passed through effect execution
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    /// Increment the effect counter (effect started)
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Decrement the effect counter (effect completed)
    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: RAII guard that decrements the effect counter on drop
///
/// Keeps the counter correct even if the effect panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicCounterGuard, AtomicUsize, DecrementGuard, Duration, Effect,
        EffectHandle, EffectTracking, Ordering, Reducer, RwLock, StoreConfig, StoreError,
    };
    use todo_view_core::cancellation::CancellationToken;
    use tokio::sync::broadcast;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; reducer calls are serialized by the write lock)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        config: StoreConfig,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        /// Every action produced by an effect is broadcast here once the
        /// reducer has applied it.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default()`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                config,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                action_broadcast,
            }
        }

        /// Number of spawned effects that have not finished
        #[must_use]
        pub fn pending_effects(&self) -> usize {
            self.pending_effects.load(Ordering::Acquire)
        }

        /// Initiate graceful shutdown of the store
        ///
        /// Sets the shutdown flag (rejecting new actions) and waits for pending
        /// effects to complete.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires before all
        /// pending effects complete.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);

            self.shutdown.store(true, Ordering::Release);

            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(10);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    metrics::counter!("store.shutdown.completed").increment(1);
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(pending_effects = pending, "Shutdown timed out");
                    metrics::counter!("store.shutdown.timeout").increment(1);
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tracing::debug!(
                    pending_effects = pending,
                    elapsed_ms = start.elapsed().as_millis(),
                    "Waiting for effects to complete"
                );

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Shut down using the configured default timeout
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
        /// when the timeout elapses.
        pub async fn shutdown_default(&self) -> Result<(), StoreError> {
            self.shutdown(self.config.default_shutdown_timeout).await
        }

        /// Send an action to the store
        ///
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Starts the returned effects (`Cancel` effects run before the lock is released)
        ///
        /// `send()` returns after starting effect execution, not after completion.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        ///
        /// # Panics
        ///
        /// If the reducer panics, the panic propagates to the caller.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError>
        where
            R: Clone,
            E: Clone,
        {
            self.dispatch(action, None).await
        }

        /// Apply an action and start its effects
        ///
        /// An effect-produced action carries the token of the effect that
        /// produced it as `owner`. It is dropped unreduced and unbroadcast if
        /// that token was cancelled by the time the write lock is held; effects
        /// are started under the same lock, so a `Cancel` and the check cannot
        /// interleave. Otherwise it is broadcast after the reducer has applied
        /// it and before its own effects start, so observers always see the
        /// state it produced and see actions in causal order.
        async fn dispatch(
            &self,
            action: A,
            owner: Option<&CancellationToken>,
        ) -> Result<EffectHandle, StoreError>
        where
            R: Clone,
            E: Clone,
        {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!("Processing action");
            metrics::counter!("store.commands.total").increment(1);

            let (handle, tracking) = EffectHandle::new();
            let broadcast = owner.map(|_| action.clone());

            {
                let mut state = self.state.write().await;

                if owner.is_some_and(CancellationToken::is_cancelled) {
                    tracing::debug!("Dropped action from a cancelled effect");
                    metrics::counter!("store.effects.discarded").increment(1);
                    return Ok(handle);
                }

                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                if let Some(action) = broadcast {
                    // No subscribers is fine.
                    let _ = self.action_broadcast.send(action);
                }

                for effect in effects {
                    self.execute_effect(effect, tracking.clone());
                }
            }

            Ok(handle)
        }

        /// Send an action and wait for a matching action produced by its effects
        ///
        /// Subscribes to the action broadcast before sending, so a fast effect
        /// cannot be missed.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: no matching action before the timeout
        /// - [`StoreError::ChannelClosed`]: broadcast channel closed
        /// - [`StoreError::ShutdownInProgress`]: store is shutting down
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            R: Clone,
            E: Clone,
            F: Fn(&A) -> bool,
        {
            let mut rx = self.action_broadcast.subscribe();

            self.send(action).await?;

            tokio::time::timeout(timeout, async {
                loop {
                    match rx.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {},
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Action observer lagged");
                        },
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        },
                    }
                }
            })
            .await
            .map_err(|_| StoreError::Timeout)?
        }

        /// Subscribe to all actions produced by effects
        ///
        /// Each action is broadcast once the reducer has applied it. Actions
        /// sent directly via `send` are not broadcast, nor are effect-produced
        /// actions rejected during shutdown or discarded by a cancelled
        /// `Effect::Cancellable`.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.todos.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Register a spawned effect with both the per-send and the global counters
        fn begin_spawned(&self, tracking: &EffectTracking) -> (DecrementGuard, AtomicCounterGuard) {
            tracking.increment();
            self.pending_effects.fetch_add(1, Ordering::SeqCst);
            (
                DecrementGuard(tracking.clone()),
                AtomicCounterGuard(Arc::clone(&self.pending_effects)),
            )
        }

        /// Feed an effect-produced action back into the store and broadcast it
        async fn feed_back(&self, action: A, owner: &CancellationToken)
        where
            R: Clone,
            E: Clone,
        {
            if let Err(error) = self.dispatch(action, Some(owner)).await {
                tracing::debug!(error = %error, "Dropped effect-produced action");
            }
        }

        /// Execute an effect with tracking
        ///
        /// - `None`: No-op
        /// - `Cancel`: Signals the token immediately
        /// - `Cancellable`: Spawns the computation, feeds back its action if
        ///   `Some` and the token is still live
        ///
        /// Effect tasks that panic are isolated in their spawned task; the
        /// guards still release the counters.
        #[allow(clippy::needless_pass_by_value)] // tracking is cloned into spawned tasks
        fn execute_effect(&self, effect: Effect<A>, tracking: EffectTracking)
        where
            R: Clone,
            E: Clone,
        {
            match effect {
                Effect::None => {
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Cancel(token) => {
                    tracing::trace!("Executing Effect::Cancel");
                    metrics::counter!("store.effects.executed", "type" => "cancel").increment(1);
                    if !token.is_cancelled() {
                        metrics::counter!("store.effects.cancelled").increment(1);
                    }
                    token.cancel();
                },
                Effect::Cancellable { token, future } => {
                    tracing::trace!("Executing Effect::Cancellable");
                    metrics::counter!("store.effects.executed", "type" => "cancellable").increment(1);
                    let guards = self.begin_spawned(&tracking);
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guards = guards;

                        if let Some(action) = future.await {
                            tracing::trace!("Effect::Cancellable produced an action");
                            store.feed_back(action, &token).await;
                        } else {
                            tracing::trace!("Effect::Cancellable completed with no action");
                        }
                    });
                },
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                config: self.config.clone(),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

pub use store::Store;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)] // Test code can use unwrap/panic

    use super::*;
    use todo_view_core::cancellation::CancellationToken;
    use todo_view_core::{SmallVec, smallvec};
    use tokio::sync::Notify;

    #[derive(Debug, Clone)]
    struct TestState {
        value: i32,
        token: CancellationToken,
    }

    impl TestState {
        fn new() -> Self {
            Self {
                value: 0,
                token: CancellationToken::new(),
            }
        }
    }

    #[derive(Debug, Clone)]
    enum TestAction {
        Increment,
        Decrement,
        NoOp,
        ProduceEffect,
        ProducePanickingEffect,
        StartCancellable,
        /// Cancellable work that ignores its token and finishes when released
        StartUncooperative,
        CancelPending,
    }

    /// Releases `StartUncooperative` work
    #[derive(Debug, Clone, Default)]
    struct TestEnv {
        release: Arc<Notify>,
    }

    #[derive(Debug, Clone)]
    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.value += 1;
                    smallvec![Effect::None]
                },
                TestAction::Decrement => {
                    state.value -= 1;
                    smallvec![Effect::None]
                },
                TestAction::NoOp => smallvec![Effect::None],
                TestAction::ProduceEffect => {
                    smallvec![Effect::cancellable(CancellationToken::new(), async {
                        Some(TestAction::Increment)
                    })]
                },
                TestAction::ProducePanickingEffect => {
                    smallvec![Effect::cancellable(CancellationToken::new(), async {
                        let produced: Option<TestAction> = None;
                        assert!(produced.is_some(), "Intentional panic in effect for testing");
                        produced
                    })]
                },
                TestAction::StartCancellable => {
                    let token = CancellationToken::new();
                    state.token = token.clone();
                    smallvec![Effect::cancellable(token.clone(), async move {
                        tokio::select! {
                            biased;
                            () = token.cancelled() => None,
                            () = tokio::time::sleep(Duration::from_millis(50)) => {
                                Some(TestAction::Increment)
                            },
                        }
                    })]
                },
                TestAction::StartUncooperative => {
                    state.token = CancellationToken::new();
                    let release = Arc::clone(&env.release);
                    smallvec![Effect::cancellable(state.token.clone(), async move {
                        release.notified().await;
                        Some(TestAction::Increment)
                    })]
                },
                TestAction::CancelPending => smallvec![Effect::Cancel(state.token.clone())],
            }
        }
    }

    fn store() -> Store<TestState, TestAction, TestEnv, TestReducer> {
        Store::new(TestState::new(), TestReducer, TestEnv::default())
    }

    #[tokio::test]
    async fn test_send_action() {
        let store = store();

        let _ = store.send(TestAction::Increment).await;
        let _ = store.send(TestAction::Increment).await;
        let _ = store.send(TestAction::Decrement).await;
        let _ = store.send(TestAction::NoOp).await;

        assert_eq!(store.state(|s| s.value).await, 1);
    }

    #[tokio::test]
    async fn test_effect_feeds_back() -> Result<(), StoreError> {
        let store = store();

        let mut handle = store.send(TestAction::ProduceEffect).await?;
        handle.wait_with_timeout(Duration::from_secs(1)).await?;

        assert_eq!(store.state(|s| s.value).await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_effect_panic_isolation() -> Result<(), StoreError> {
        let store = store();

        let mut handle = store.send(TestAction::ProducePanickingEffect).await?;
        handle.wait_with_timeout(Duration::from_secs(1)).await?;

        let _ = store.send(TestAction::Increment).await?;
        assert_eq!(store.state(|s| s.value).await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_effect_prevents_feedback() -> Result<(), StoreError> {
        let store = store();
        let mut rx = store.subscribe_actions();

        let mut handle = store.send(TestAction::StartCancellable).await?;
        let _ = store.send(TestAction::CancelPending).await?;

        // The token is signalled before send() returns
        assert!(store.state(|s| s.token.is_cancelled()).await);

        handle.wait_with_timeout(Duration::from_secs(1)).await?;
        assert_eq!(store.state(|s| s.value).await, 0);
        assert!(rx.try_recv().is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_cancellable_effect_feeds_back_while_live() -> Result<(), StoreError> {
        let env = TestEnv::default();
        let store = Store::new(TestState::new(), TestReducer, env.clone());
        let mut rx = store.subscribe_actions();

        let mut handle = store.send(TestAction::StartUncooperative).await?;
        env.release.notify_one();
        handle.wait_with_timeout(Duration::from_secs(1)).await?;

        assert_eq!(store.state(|s| s.value).await, 1);
        assert!(matches!(rx.try_recv(), Ok(TestAction::Increment)));
        Ok(())
    }

    #[tokio::test]
    async fn test_cancelled_result_is_neither_reduced_nor_broadcast() -> Result<(), StoreError> {
        let env = TestEnv::default();
        let store = Store::new(TestState::new(), TestReducer, env.clone());
        let mut rx = store.subscribe_actions();

        // The work ignores its token and still produces an action after the
        // cancel, as a fetch that finished just before `Stop` would.
        let mut handle = store.send(TestAction::StartUncooperative).await?;
        let _ = store.send(TestAction::CancelPending).await?;
        env.release.notify_one();
        handle.wait_with_timeout(Duration::from_secs(1)).await?;

        assert_eq!(store.state(|s| s.value).await, 0);
        assert!(matches!(rx.try_recv(), Err(tokio::sync::broadcast::error::TryRecvError::Empty)));
        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_without_pending_work_is_noop() -> Result<(), StoreError> {
        let store = store();

        let mut handle = store.send(TestAction::CancelPending).await?;
        assert_eq!(handle.pending(), 0);
        handle.wait().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_send_and_wait_for() -> Result<(), StoreError> {
        let store = store();

        let action = store
            .send_and_wait_for(
                TestAction::ProduceEffect,
                |a| matches!(a, TestAction::Increment),
                Duration::from_secs(1),
            )
            .await?;

        assert!(matches!(action, TestAction::Increment));
        Ok(())
    }

    #[tokio::test]
    async fn test_send_and_wait_for_timeout() {
        let store = store();

        let result = store
            .send_and_wait_for(TestAction::NoOp, |_| true, Duration::from_millis(20))
            .await;

        assert!(matches!(result, Err(StoreError::Timeout)));
    }

    #[tokio::test]
    async fn test_shutdown_rejects_new_actions() -> Result<(), StoreError> {
        let store = store();

        store.shutdown(Duration::from_secs(1)).await?;

        let result = store.send(TestAction::Increment).await;
        assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
        Ok(())
    }

    #[tokio::test]
    async fn test_shutdown_waits_for_effects() -> Result<(), StoreError> {
        let store = store();

        let _ = store.send(TestAction::StartCancellable).await?;
        assert_eq!(store.pending_effects(), 1);

        store.shutdown(Duration::from_secs(1)).await?;
        assert_eq!(store.pending_effects(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_shutdown_timeout() {
        let store = Store::with_config(
            TestState::new(),
            TestReducer,
            TestEnv::default(),
            StoreConfig::default().with_shutdown_timeout(Duration::from_millis(1)),
        );

        let _ = store.send(TestAction::StartCancellable).await;
        let result = store.shutdown_default().await;

        assert!(matches!(result, Err(StoreError::ShutdownTimeout(1))));
    }

    #[tokio::test]
    async fn test_store_clone_shares_state() {
        let store1 = store();
        let store2 = store1.clone();

        let _ = store1.send(TestAction::Increment).await;
        assert_eq!(store2.state(|s| s.value).await, 1);
    }
}
