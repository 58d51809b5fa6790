//! # Todomind Runtime
//!
//! Runtime implementation for the Todomind reducer architecture.
//!
//! The [`Store`](store::Store) owns a widget's state, runs every action
//! through the reducer, and drains the feedback actions the reducer asks for
//! before returning. Each `send` therefore runs to completion before the next
//! user event is processed.
//!
//! ## Example
//!
//! ```ignore
//! use todomind_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// Returned when `send()` is called after `shutdown()`.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// A single `send` produced more feedback actions than allowed
        ///
        /// Actions processed before the limit was hit stay applied; the
        /// remaining queued actions are dropped.
        #[error("Feedback limit of {0} actions exceeded")]
        FeedbackLimitExceeded(usize),
    }
}

/// Store configuration
pub mod config {
    /// Default cap on feedback actions drained per `send`
    pub const DEFAULT_MAX_FEEDBACK_ACTIONS: usize = 16;

    /// Configuration for Store behavior
    ///
    /// # Example
    ///
    /// ```
    /// use todomind_runtime::StoreConfig;
    ///
    /// let config = StoreConfig::default().with_max_feedback_actions(4);
    /// assert_eq!(config.max_feedback_actions, 4);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StoreConfig {
        /// Maximum number of `Effect::Send` actions processed for one `send`
        pub max_feedback_actions: usize,
    }

    impl StoreConfig {
        /// Create a new configuration with custom values
        #[must_use]
        pub const fn new(max_feedback_actions: usize) -> Self {
            Self {
                max_feedback_actions,
            }
        }

        /// Set the feedback action limit
        #[must_use]
        pub const fn with_max_feedback_actions(mut self, limit: usize) -> Self {
            self.max_feedback_actions = limit;
            self
        }
    }

    impl Default for StoreConfig {
        fn default() -> Self {
            Self::new(DEFAULT_MAX_FEEDBACK_ACTIONS)
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use crate::config::StoreConfig;
    use crate::error::StoreError;
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use todomind_core::reducer::Reducer;
    use tokio::sync::RwLock;

    /// The Store - runtime coordinator for a reducer
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer type
    ///
    /// Cloning a Store yields another handle onto the same state. Separate
    /// `Store::new` calls never share anything.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        config: StoreConfig,
        shutdown: Arc<AtomicBool>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: std::fmt::Debug,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                config,
                shutdown: Arc::new(AtomicBool::new(false)),
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Queues every `Effect::Send` action and reduces it the same way
        /// 4. Releases the lock once the queue is empty
        ///
        /// # Errors
        ///
        /// - [`StoreError::ShutdownInProgress`] if `shutdown()` was called
        /// - [`StoreError::FeedbackLimitExceeded`] if the reducer kept feeding
        ///   actions back past [`StoreConfig::max_feedback_actions`]
        #[tracing::instrument(skip_all, name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!(?action, "Processing action");
            metrics::counter!("store.actions.total").increment(1);

            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");

            let mut queue = VecDeque::from([action]);
            let mut feedback = 0_usize;

            while let Some(action) = queue.pop_front() {
                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                for effect in effects {
                    let Some(next) = effect.into_action() else {
                        tracing::trace!("Executing Effect::None (no-op)");
                        continue;
                    };

                    feedback += 1;
                    if feedback > self.config.max_feedback_actions {
                        tracing::warn!(
                            limit = self.config.max_feedback_actions,
                            "Feedback limit exceeded, dropping queued actions"
                        );
                        metrics::counter!("store.feedback.limit_exceeded").increment(1);
                        return Err(StoreError::FeedbackLimitExceeded(
                            self.config.max_feedback_actions,
                        ));
                    }

                    tracing::trace!(action = ?next, "Effect::Send queued action");
                    metrics::counter!("store.feedback.total").increment(1);
                    queue.push_back(next);
                }
            }

            tracing::debug!(feedback, "Action processing completed");
            Ok(())
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let remaining = store.state(|s| s.remaining_count()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Stop accepting actions
        ///
        /// Every later `send` fails with [`StoreError::ShutdownInProgress`];
        /// state stays readable until the last handle is dropped.
        pub fn shutdown(&self) {
            if !self.shutdown.swap(true, Ordering::AcqRel) {
                tracing::info!("Store shut down");
                metrics::counter!("store.shutdown.initiated").increment(1);
            }
        }

        /// Returns true once `shutdown()` has been called on any handle
        #[must_use]
        pub fn is_shutdown(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }

        /// The configuration this store was built with
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
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
                config: self.config,
                shutdown: Arc::clone(&self.shutdown),
            }
        }
    }
}

pub use config::StoreConfig;
pub use error::StoreError;
pub use store::Store;
