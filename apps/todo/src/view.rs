//! Render model derived from [`TodoState`].
//!
//! A `TodoView` is rebuilt from state after every event; it never owns data
//! the state does not already hold.

use crate::types::{Filter, TaskId, TodoState};
use std::fmt;

/// One rendered row of the visible list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// 1-based row number, as the user addresses it
    pub number: usize,
    /// Task behind the row
    pub id: TaskId,
    /// Task description
    pub description: String,
    /// Whether the checkbox is ticked
    pub completed: bool,
}

/// Everything the widget shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoView {
    /// Contents of the input field
    pub draft: String,
    /// Selected filter
    pub filter: Filter,
    /// Visible rows in insertion order
    pub rows: Vec<Row>,
    /// Number of tasks not yet completed, regardless of filter
    pub remaining: usize,
}

impl TodoView {
    /// Builds the view for `state`
    #[must_use]
    pub fn from_state(state: &TodoState) -> Self {
        let rows = state
            .visible_tasks()
            .into_iter()
            .enumerate()
            .map(|(index, task)| Row {
                number: index + 1,
                id: task.id,
                description: task.description.clone(),
                completed: state.is_completed(task.id),
            })
            .collect();

        Self {
            draft: state.draft.clone(),
            filter: state.filter,
            rows,
            remaining: state.remaining_count(),
        }
    }

    /// Row with the given 1-based number
    #[must_use]
    pub fn row(&self, number: usize) -> Option<&Row> {
        number.checked_sub(1).and_then(|index| self.rows.get(index))
    }

    /// The "N items left" label
    #[must_use]
    pub fn remaining_label(&self) -> String {
        format!("{} items left", self.remaining)
    }

    /// Message shown in place of an empty list
    ///
    /// Names the filter, except for `All` where the word is left out.
    #[must_use]
    pub fn placeholder(&self) -> Option<String> {
        self.rows
            .is_empty()
            .then(|| format!("no {} todos", self.filter.placeholder_label()))
    }
}

impl fmt::Display for TodoView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.placeholder() {
            Some(placeholder) => writeln!(f, "  {placeholder}")?,
            None => {
                for row in &self.rows {
                    let mark = if row.completed { 'x' } else { ' ' };
                    writeln!(f, "  {:>2}. [{mark}] {}", row.number, row.description)?;
                }
            },
        }

        write!(f, "{}  |", self.remaining_label())?;
        for filter in Filter::ALL {
            if filter == self.filter {
                write!(f, " [{filter}]")?;
            } else {
                write!(f, " {filter}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Task;
    use todomind_testing::mocks::test_epoch;

    fn state_with(tasks: &[(&str, bool)]) -> TodoState {
        let mut state = TodoState::new();
        for (index, (description, completed)) in tasks.iter().enumerate() {
            let id = TaskId::new(index as u64);
            state
                .tasks
                .push(Task::new(id, (*description).to_string(), test_epoch()));
            if *completed {
                state.completed.insert(id);
            }
        }
        state.next_id = tasks.len() as u64;
        state
    }

    #[test]
    fn rows_are_numbered_from_one() {
        let mut state = state_with(&[("Buy milk", true), ("Walk dog", false), ("Read", false)]);
        state.filter = Filter::Active;

        let view = TodoView::from_state(&state);

        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].number, 1);
        assert_eq!(view.rows[0].description, "Walk dog");
        assert_eq!(view.row(2).map(|r| r.id), Some(TaskId::new(2)));
        assert_eq!(view.row(0), None);
        assert_eq!(view.row(3), None);
    }

    #[test]
    fn remaining_ignores_filter() {
        let mut state = state_with(&[("a", true), ("b", false)]);
        state.filter = Filter::Completed;

        let view = TodoView::from_state(&state);

        assert_eq!(view.remaining, 1);
        assert_eq!(view.remaining_label(), "1 items left");
    }

    #[test]
    fn placeholder_names_filter() {
        let mut state = state_with(&[]);
        assert_eq!(
            TodoView::from_state(&state).placeholder().as_deref(),
            Some("no  todos")
        );

        state.filter = Filter::Active;
        assert_eq!(
            TodoView::from_state(&state).placeholder().as_deref(),
            Some("no active todos")
        );

        state = state_with(&[("a", false)]);
        state.filter = Filter::Completed;
        assert_eq!(
            TodoView::from_state(&state).placeholder().as_deref(),
            Some("no completed todos")
        );
    }

    #[test]
    fn no_placeholder_when_rows_visible() {
        let state = state_with(&[("a", false)]);
        assert_eq!(TodoView::from_state(&state).placeholder(), None);
    }

    #[test]
    fn renders_rows_and_footer() {
        let state = state_with(&[("Buy milk", true), ("Walk dog", false)]);

        let rendered = TodoView::from_state(&state).to_string();

        assert_eq!(
            rendered,
            "   1. [x] Buy milk\n   2. [ ] Walk dog\n1 items left  | [all] active completed"
        );
    }

    #[test]
    fn renders_placeholder() {
        let mut state = state_with(&[]);
        state.filter = Filter::Active;

        let rendered = TodoView::from_state(&state).to_string();

        assert_eq!(rendered, "  no active todos\n0 items left  | all [active] completed");
    }
}
