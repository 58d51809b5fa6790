//! # Todomind Core
//!
//! Core traits and types for the Todomind reducer architecture.
//!
//! UI state is modelled as a pure function
//! `(State, Action, Environment) → (State, Effects)`. A runtime (see the
//! `todomind-runtime` crate) owns the state, feeds actions through the reducer,
//! and executes the returned effects.
//!
//! ## Core Concepts
//!
//! - **State**: Owned domain state for one widget instance
//! - **Action**: All possible inputs to a reducer (commands and events)
//! - **Reducer**: Pure function that mutates state in place and describes effects
//! - **Effect**: Follow-up work described as a value, never executed by the reducer
//! - **Environment**: Injected dependencies (clock) behind traits
//!
//! ## Example
//!
//! ```
//! use todomind_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct FlagState {
//!     on: bool,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum FlagAction {
//!     Flip,
//! }
//!
//! struct FlagReducer;
//!
//! impl Reducer for FlagReducer {
//!     type State = FlagState;
//!     type Action = FlagAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut FlagState,
//!         action: FlagAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<FlagAction>; 4]> {
//!         match action {
//!             FlagAction::Flip => state.on = !state.on,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = FlagState::default();
//! FlagReducer.reduce(&mut state, FlagAction::Flip, &());
//! assert!(state.on);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{smallvec, SmallVec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They hold all behavior and are deterministic, so they are tested without a
/// runtime.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

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
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// Most reducers return no effects, so the inline capacity of the
        /// returned `SmallVec` avoids a heap allocation on the hot path.
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
/// Effects are values returned from reducers and executed by the Store.
pub mod effect {
    /// Effect type - describes follow-up work for the runtime
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    #[derive(Clone, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Feed an action back into the reducer
        ///
        /// The runtime processes it before the originating `send` returns, so
        /// follow-up actions never interleave with the next user event.
        Send(Box<Action>),
    }

    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Send(action) => f.debug_tuple("Effect::Send").field(action).finish(),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Create an effect that dispatches `action` back into the reducer
        #[must_use]
        pub fn send(action: Action) -> Self {
            Effect::Send(Box::new(action))
        }

        /// Returns true for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }

        /// Returns the action this effect feeds back, if any
        #[must_use]
        pub fn into_action(self) -> Option<Action> {
            match self {
                Effect::None => None,
                Effect::Send(action) => Some(*action),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// External dependencies are abstracted behind traits and injected via the
/// Environment parameter, so tests swap them for deterministic doubles.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use todomind_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let earlier = clock.now();
    /// assert!(clock.now() >= earlier);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
