//! Single-page to-do list widget built on the Todomind reducer architecture.
//!
//! Users add free-text tasks, mark them complete, filter by status, and clear
//! completed items. All behavior lives in [`TodoReducer`]; [`TodoView`] is the
//! render model derived from [`TodoState`], and [`input`] turns terminal lines
//! into actions.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use todo::{Filter, Key, TodoAction, TodoEnvironment, TodoReducer, TodoState};
//! use todomind_core::environment::SystemClock;
//! use todomind_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = TodoEnvironment::new(Arc::new(SystemClock));
//! let store = Store::new(TodoState::new(), TodoReducer::new(), env);
//!
//! store.send(TodoAction::SetDraft { text: "Buy milk".to_string() }).await?;
//! store.send(TodoAction::KeyPressed { key: Key::Enter }).await?;
//! store.send(TodoAction::SetFilter { filter: Some(Filter::Active) }).await?;
//!
//! let remaining = store.state(TodoState::remaining_count).await;
//! println!("{remaining} items left");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod input;
pub mod reducer;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{Filter, Key, ParseFilterError, Task, TaskId, TodoAction, TodoState};
pub use view::{Row, TodoView};
