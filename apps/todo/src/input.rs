//! Terminal input surface.
//!
//! Each line typed at the prompt is one user gesture. Plain text is typed into
//! the input field and committed with Enter; lines starting with `:` operate
//! the list controls. A leading `::` submits the rest of the line as text.

use crate::types::{Filter, Key, ParseFilterError, TodoAction};
use crate::view::TodoView;
use thiserror::Error;

/// Help text listing the controls
pub const HELP: &str = "\
type text and press Enter to add a task
  :toggle N                     tick or untick row N
  :filter all|active|completed  choose which tasks are shown
  :clear                        remove completed tasks
  :list                         show the list again
  :help                         show this help
  :quit                         leave
  ::text                        add a task starting with ':'";

/// A parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Text typed into the field, followed by Enter
    Submit(String),
    /// Select the row with this 1-based number
    Toggle(usize),
    /// Pick a filter; `None` when no filter was named
    Filter(Option<Filter>),
    /// Clear completed tasks
    Clear,
    /// Redraw the list
    List,
    /// Print the help text
    Help,
    /// End the session
    Quit,
}

/// Errors for lines that cannot be understood
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// `:` followed by an unknown control name
    #[error("unknown command ':{0}' (try :help)")]
    UnknownCommand(String),

    /// `:toggle` without a usable row number
    #[error("':toggle' needs a row number, got '{0}'")]
    InvalidRow(String),

    /// `:filter` with an unknown filter name
    #[error(transparent)]
    Filter(#[from] ParseFilterError),
}

/// Parses one input line
///
/// # Errors
///
/// Returns an [`InputError`] for unknown controls, a missing or non-numeric
/// row number, or an unknown filter name.
pub fn parse_line(line: &str) -> Result<Command, InputError> {
    let Some(control) = line.trim_start().strip_prefix(':') else {
        return Ok(Command::Submit(line.to_string()));
    };
    // `::` escapes a task that starts with a colon
    if control.starts_with(':') {
        return Ok(Command::Submit(control.to_string()));
    }

    let mut words = control.split_whitespace();
    let name = words.next().unwrap_or_default();
    let argument = words.next();

    match name.to_ascii_lowercase().as_str() {
        "toggle" | "t" => {
            let raw = argument.unwrap_or_default();
            raw.parse()
                .map(Command::Toggle)
                .map_err(|_| InputError::InvalidRow(raw.to_string()))
        },
        "filter" | "f" => Ok(Command::Filter(argument.map(str::parse::<Filter>).transpose()?)),
        "clear" | "c" => Ok(Command::Clear),
        "list" | "l" => Ok(Command::List),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        _ => Err(InputError::UnknownCommand(name.to_string())),
    }
}

impl Command {
    /// Actions this command dispatches against the list shown in `view`
    ///
    /// Session controls (`List`, `Help`, `Quit`) dispatch nothing. A toggle of
    /// a row that is not on screen dispatches nothing either.
    #[must_use]
    pub fn into_actions(self, view: &TodoView) -> Vec<TodoAction> {
        match self {
            Self::Submit(text) => vec![
                TodoAction::SetDraft { text },
                TodoAction::KeyPressed { key: Key::Enter },
            ],
            Self::Toggle(number) => view
                .row(number)
                .map(|row| TodoAction::ToggleCompletion { id: row.id })
                .into_iter()
                .collect(),
            Self::Filter(filter) => vec![TodoAction::SetFilter { filter }],
            Self::Clear => vec![TodoAction::ClearCompleted],
            Self::List | Self::Help | Self::Quit => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Task, TaskId, TodoState};
    use todomind_testing::mocks::test_epoch;

    #[test]
    fn plain_text_is_submitted_verbatim() {
        assert_eq!(
            parse_line("  Buy milk  "),
            Ok(Command::Submit("  Buy milk  ".to_string()))
        );
        assert_eq!(parse_line(""), Ok(Command::Submit(String::new())));
    }

    #[test]
    fn double_colon_submits_text_starting_with_colon() {
        assert_eq!(
            parse_line("::) call mom"),
            Ok(Command::Submit(":) call mom".to_string()))
        );
        assert_eq!(
            parse_line("  ::toggle 1"),
            Ok(Command::Submit(":toggle 1".to_string()))
        );
        assert_eq!(parse_line(":) call mom"), Err(InputError::UnknownCommand(")".to_string())));
    }

    #[test]
    fn parses_controls() {
        assert_eq!(parse_line(":toggle 2"), Ok(Command::Toggle(2)));
        assert_eq!(parse_line(":t 1"), Ok(Command::Toggle(1)));
        assert_eq!(parse_line(":clear"), Ok(Command::Clear));
        assert_eq!(parse_line(" :LIST"), Ok(Command::List));
        assert_eq!(parse_line(":help"), Ok(Command::Help));
        assert_eq!(parse_line(":q"), Ok(Command::Quit));
    }

    #[test]
    fn parses_filter_selection() {
        assert_eq!(
            parse_line(":filter active"),
            Ok(Command::Filter(Some(Filter::Active)))
        );
        assert_eq!(parse_line(":filter"), Ok(Command::Filter(None)));
        assert_eq!(
            parse_line(":filter done"),
            Err(InputError::Filter(ParseFilterError("done".to_string())))
        );
    }

    #[test]
    fn rejects_bad_controls() {
        assert_eq!(
            parse_line(":toggle two"),
            Err(InputError::InvalidRow("two".to_string()))
        );
        assert_eq!(parse_line(":toggle"), Err(InputError::InvalidRow(String::new())));
        assert_eq!(
            parse_line(":undo"),
            Err(InputError::UnknownCommand("undo".to_string()))
        );
    }

    #[test]
    fn submit_sets_draft_then_presses_enter() {
        let view = TodoView::from_state(&TodoState::new());

        assert_eq!(
            Command::Submit("New Task".to_string()).into_actions(&view),
            vec![
                TodoAction::SetDraft {
                    text: "New Task".to_string()
                },
                TodoAction::KeyPressed { key: Key::Enter },
            ]
        );
    }

    #[test]
    fn toggle_maps_row_to_task_id() {
        let mut state = TodoState::with_filter(Filter::Active);
        state
            .tasks
            .push(Task::new(TaskId::new(0), "a".to_string(), test_epoch()));
        state
            .tasks
            .push(Task::new(TaskId::new(1), "b".to_string(), test_epoch()));
        state.completed.insert(TaskId::new(0));
        let view = TodoView::from_state(&state);

        assert_eq!(
            Command::Toggle(1).into_actions(&view),
            vec![TodoAction::ToggleCompletion { id: TaskId::new(1) }]
        );
        assert!(Command::Toggle(2).into_actions(&view).is_empty());
        assert!(Command::Toggle(0).into_actions(&view).is_empty());
    }

    #[test]
    fn session_controls_dispatch_nothing() {
        let view = TodoView::from_state(&TodoState::new());
        for command in [Command::List, Command::Help, Command::Quit] {
            assert!(command.into_actions(&view).is_empty());
        }
    }
}
