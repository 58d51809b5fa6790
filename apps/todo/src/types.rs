//! Domain types for the to-do list widget.
//!
//! A list is an ordered vector of tasks plus the set of completed task ids,
//! the draft being typed, and the active filter. Tasks are keyed by a stable
//! [`TaskId`] handed out at creation, so removing tasks never shifts the
//! completion set onto the wrong rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use todomind_macros::Action;

/// Stable identifier for a task
///
/// Allocated from a per-list counter and never reused, even after the task
/// is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a `TaskId` from its raw value
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable identifier
    pub id: TaskId,
    /// Trimmed, non-empty description
    pub description: String,
    /// When the task was added
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task
    #[must_use]
    pub const fn new(id: TaskId, description: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            description,
            created_at,
        }
    }
}

/// View selector restricting which tasks are shown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Every task
    #[default]
    All,
    /// Tasks not yet completed
    Active,
    /// Completed tasks
    Completed,
}

impl Filter {
    /// Every filter, in selector order
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Lowercase name used in input and output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Whether a task with the given completion flag passes this filter
    #[must_use]
    pub const fn matches(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }

    /// Word used in the empty-list placeholder (empty for `All`)
    #[must_use]
    pub const fn placeholder_label(self) -> &'static str {
        match self {
            Self::All => "",
            Self::Active | Self::Completed => self.as_str(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a filter name is not recognized
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown filter '{0}' (expected all, active or completed)")]
pub struct ParseFilterError(pub String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseFilterError(name.to_string()))
    }
}

/// Keys the input field reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// Commit key: adds the draft as a task
    Enter,
    /// Any other key
    Char(char),
}

/// State of one to-do list widget
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// Tasks in insertion order
    pub tasks: Vec<Task>,
    /// Ids of completed tasks; every member names a task in `tasks`
    pub completed: BTreeSet<TaskId>,
    /// Text being composed for the next task
    pub draft: String,
    /// Active filter
    pub filter: Filter,
    /// Raw value of the next id to hand out
    pub next_id: u64,
}

impl TodoState {
    /// Creates a new empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty list showing `filter`
    #[must_use]
    pub fn with_filter(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Returns the number of tasks
    #[must_use]
    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    /// Returns the number of completed tasks
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Returns the number of tasks not yet completed
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| !self.is_completed(task.id))
            .count()
    }

    /// Returns a task by id
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Checks if a task exists
    #[must_use]
    pub fn exists(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Checks if a task is marked completed
    #[must_use]
    pub fn is_completed(&self, id: TaskId) -> bool {
        self.completed.contains(&id)
    }

    /// Id of the task at `position` in insertion order
    #[must_use]
    pub fn id_at(&self, position: usize) -> Option<TaskId> {
        self.tasks.get(position).map(|task| task.id)
    }

    /// Tasks passing the active filter, in insertion order
    ///
    /// Recomputed on every call.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(self.is_completed(task.id)))
            .collect()
    }
}

/// Actions representing commands and events for the list
///
/// Commands carry user intent and are validated by the reducer. Events record
/// what changed and are the only actions applied to state; they can also be
/// sent directly to replay a session.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: Replace the draft text
    #[command]
    SetDraft {
        /// New draft text
        text: String,
    },

    /// Command: Append the trimmed draft as a task
    #[command]
    AddTask,

    /// Command: A key was pressed in the input field
    #[command]
    KeyPressed {
        /// The key
        key: Key,
    },

    /// Command: Flip a task's completion
    #[command]
    ToggleCompletion {
        /// Task to toggle
        id: TaskId,
    },

    /// Command: Select a filter (`None` is an unset selection)
    #[command]
    SetFilter {
        /// Filter to show
        filter: Option<Filter>,
    },

    /// Command: Remove every completed task
    #[command]
    ClearCompleted,

    // ========== Events ==========
    /// Event: Draft text changed
    #[event]
    DraftChanged {
        /// New draft text
        text: String,
    },

    /// Event: Task was added (the draft is cleared)
    #[event]
    TaskAdded {
        /// Task identifier
        id: TaskId,
        /// Trimmed description
        description: String,
        /// When the task was added
        created_at: DateTime<Utc>,
    },

    /// Event: Task completion changed
    #[event]
    CompletionToggled {
        /// Task identifier
        id: TaskId,
        /// Whether the task is now completed
        completed: bool,
    },

    /// Event: Active filter changed
    #[event]
    FilterChanged {
        /// Filter now shown
        filter: Filter,
    },

    /// Event: Completed tasks were removed
    #[event]
    CompletedCleared {
        /// Removed task ids, in list order
        removed: Vec<TaskId>,
    },
}
