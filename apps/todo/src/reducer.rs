//! Reducer logic for the to-do list.
//!
//! Commands are checked against the current state and turned into events;
//! events are applied to state. Nothing here can fail: an empty draft or a
//! stale task id simply produces no event.

use crate::types::{Key, Task, TaskId, TodoAction, TodoState};
use std::sync::Arc;
use todomind_core::{effect::Effect, environment::Clock, reducer::Reducer, smallvec, SmallVec};

/// Environment dependencies for the to-do reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for task timestamps
    pub clock: Arc<dyn Clock>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

/// Reducer for the to-do list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Event for `AddTask`, if the trimmed draft has content
    fn add_task(state: &TodoState, env: &TodoEnvironment) -> Option<TodoAction> {
        let description = state.draft.trim();
        if description.is_empty() {
            tracing::debug!("Ignoring AddTask: draft is empty");
            return None;
        }

        Some(TodoAction::TaskAdded {
            id: TaskId::new(state.next_id),
            description: description.to_string(),
            created_at: env.clock.now(),
        })
    }

    /// Event for `ToggleCompletion`, if the task still exists
    fn toggle_completion(state: &TodoState, id: TaskId) -> Option<TodoAction> {
        if !state.exists(id) {
            tracing::debug!(%id, "Ignoring ToggleCompletion: unknown task");
            return None;
        }

        Some(TodoAction::CompletionToggled {
            id,
            completed: !state.is_completed(id),
        })
    }

    /// Event for `ClearCompleted`, if anything is completed
    fn clear_completed(state: &TodoState) -> Option<TodoAction> {
        if state.completed.is_empty() {
            return None;
        }

        let removed = state
            .tasks
            .iter()
            .map(|task| task.id)
            .filter(|id| state.is_completed(*id))
            .collect();

        Some(TodoAction::CompletedCleared { removed })
    }

    /// Applies an event to state
    fn apply_event(state: &mut TodoState, action: &TodoAction) {
        match action {
            TodoAction::DraftChanged { text } => {
                state.draft.clone_from(text);
            },
            TodoAction::TaskAdded {
                id,
                description,
                created_at,
            } => {
                if state.exists(*id) {
                    tracing::debug!(%id, "Skipping TaskAdded: id already present");
                    return;
                }
                let Some(after) = id.get().checked_add(1) else {
                    tracing::debug!(%id, "Skipping TaskAdded: id out of range");
                    return;
                };
                let description = description.trim();
                if description.is_empty() {
                    tracing::debug!(%id, "Skipping TaskAdded: blank description");
                    return;
                }
                state
                    .tasks
                    .push(Task::new(*id, description.to_string(), *created_at));
                state.next_id = state.next_id.max(after);
                state.draft.clear();
            },
            TodoAction::CompletionToggled { id, completed } => {
                if !state.exists(*id) {
                    return;
                }
                if *completed {
                    state.completed.insert(*id);
                } else {
                    state.completed.remove(id);
                }
            },
            TodoAction::FilterChanged { filter } => {
                state.filter = *filter;
            },
            TodoAction::CompletedCleared { removed } => {
                // Only completed tasks may be cleared
                let completed = &mut state.completed;
                state
                    .tasks
                    .retain(|task| !(removed.contains(&task.id) && completed.contains(&task.id)));
                completed.retain(|id| !removed.contains(id));
            },
            // Commands are not applied to state
            TodoAction::SetDraft { .. }
            | TodoAction::AddTask
            | TodoAction::KeyPressed { .. }
            | TodoAction::ToggleCompletion { .. }
            | TodoAction::SetFilter { .. }
            | TodoAction::ClearCompleted => {},
        }
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::trace!(action = action.name(), "Reducing");

        let event = match action {
            // ========== Commands ==========
            TodoAction::SetDraft { text } => Some(TodoAction::DraftChanged { text }),
            TodoAction::AddTask => Self::add_task(state, env),
            TodoAction::KeyPressed { key: Key::Enter } => {
                return smallvec![Effect::send(TodoAction::AddTask)];
            },
            TodoAction::KeyPressed { key: Key::Char(_) } => None,
            TodoAction::ToggleCompletion { id } => Self::toggle_completion(state, id),
            TodoAction::SetFilter { filter: Some(filter) } => {
                Some(TodoAction::FilterChanged { filter })
            },
            TodoAction::SetFilter { filter: None } => {
                tracing::debug!("Ignoring SetFilter: no filter selected");
                None
            },
            TodoAction::ClearCompleted => Self::clear_completed(state),

            // ========== Events ==========
            event => Some(event),
        };

        if let Some(event) = event {
            tracing::debug!(event = event.event_type(), "Applying event");
            Self::apply_event(state, &event);
        }

        SmallVec::new()
    }
}
