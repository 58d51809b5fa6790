//! Integration tests for the to-do list running in a Store
//!
//! These drive the widget the way the terminal front end does: user gestures
//! go through `Store::send`, reads go through derived views.

use std::sync::Arc;
use todo::input::{parse_line, Command};
use todo::{Filter, Key, TaskId, TodoAction, TodoEnvironment, TodoReducer, TodoState, TodoView};
use todomind_runtime::{Store, StoreError};
use todomind_testing::test_clock;

type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

fn new_store() -> TodoStore {
    let env = TodoEnvironment::new(Arc::new(test_clock()));
    Store::new(TodoState::new(), TodoReducer::new(), env)
}

async fn send_ok(store: &TodoStore, action: TodoAction) {
    assert_eq!(store.send(action).await, Ok(()));
}

async fn type_and_enter(store: &TodoStore, text: &str) {
    send_ok(
        store,
        TodoAction::SetDraft {
            text: text.to_string(),
        },
    )
    .await;
    send_ok(store, TodoAction::KeyPressed { key: Key::Enter }).await;
}

async fn visible(store: &TodoStore) -> Vec<String> {
    store
        .state(|s| {
            s.visible_tasks()
                .iter()
                .map(|task| task.description.clone())
                .collect()
        })
        .await
}

#[tokio::test]
async fn test_enter_adds_task_and_clears_input() {
    let store = new_store();

    type_and_enter(&store, "New Task").await;

    assert_eq!(visible(&store).await, vec!["New Task"]);
    assert_eq!(store.state(|s| s.draft.clone()).await, "");
}

#[tokio::test]
async fn test_whitespace_only_submission_is_ignored() {
    let store = new_store();

    type_and_enter(&store, "   ").await;

    assert_eq!(store.state(TodoState::count).await, 0);
    assert_eq!(store.state(|s| s.draft.clone()).await, "   ");
}

#[tokio::test]
async fn test_end_to_end_filtering() {
    let store = new_store();

    type_and_enter(&store, "Buy milk").await;
    type_and_enter(&store, "Walk dog").await;

    let first = store.state(|s| s.id_at(0)).await;
    assert_eq!(first, Some(TaskId::new(0)));
    send_ok(&store, TodoAction::ToggleCompletion { id: TaskId::new(0) }).await;
    assert_eq!(store.state(TodoState::completed_count).await, 1);

    send_ok(
        &store,
        TodoAction::SetFilter {
            filter: Some(Filter::Active),
        },
    )
    .await;
    assert_eq!(visible(&store).await, vec!["Walk dog"]);
    assert_eq!(store.state(TodoState::remaining_count).await, 1);

    send_ok(
        &store,
        TodoAction::SetFilter {
            filter: Some(Filter::Completed),
        },
    )
    .await;
    assert_eq!(visible(&store).await, vec!["Buy milk"]);

    send_ok(
        &store,
        TodoAction::SetFilter {
            filter: Some(Filter::All),
        },
    )
    .await;
    assert_eq!(visible(&store).await, vec!["Buy milk", "Walk dog"]);
}

#[tokio::test]
async fn test_clear_completed_then_add_keeps_ids_unique() {
    let store = new_store();

    type_and_enter(&store, "a").await;
    type_and_enter(&store, "b").await;
    send_ok(&store, TodoAction::ToggleCompletion { id: TaskId::new(0) }).await;
    send_ok(&store, TodoAction::ClearCompleted).await;
    type_and_enter(&store, "c").await;

    let ids = store
        .state(|s| s.tasks.iter().map(|t| t.id).collect::<Vec<_>>())
        .await;
    assert_eq!(ids, vec![TaskId::new(1), TaskId::new(2)]);
    assert_eq!(store.state(TodoState::completed_count).await, 0);
}

#[tokio::test]
async fn test_terminal_session() {
    let store = new_store();

    for line in ["Buy milk", "Walk dog", ":toggle 1", ":filter completed", ":filter"] {
        let command = parse_line(line);
        assert!(command.is_ok(), "failed to parse {line:?}");
        let Ok(command) = command else { continue };

        let view = store.state(TodoView::from_state).await;
        for action in command.into_actions(&view) {
            assert_eq!(store.send(action).await, Ok(()));
        }
    }

    let view = store.state(TodoView::from_state).await;
    // ":filter" with no name keeps the current selection
    assert_eq!(view.filter, Filter::Completed);
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].description, "Buy milk");
    assert!(view.rows[0].completed);
    assert_eq!(view.remaining_label(), "1 items left");

    let clear = Command::Clear.into_actions(&view);
    assert_eq!(clear, vec![TodoAction::ClearCompleted]);
    for action in clear {
        send_ok(&store, action).await;
    }
    let view = store.state(TodoView::from_state).await;
    assert_eq!(view.placeholder().as_deref(), Some("no completed todos"));
}

#[tokio::test]
async fn test_widgets_are_independent() {
    let first = new_store();
    let second = new_store();

    type_and_enter(&first, "only here").await;

    assert_eq!(first.state(TodoState::count).await, 1);
    assert_eq!(second.state(TodoState::count).await, 0);
}

#[tokio::test]
async fn test_unmounted_widget_rejects_input() {
    let store = new_store();
    type_and_enter(&store, "before").await;

    store.shutdown();

    assert_eq!(
        store.send(TodoAction::ClearCompleted).await,
        Err(StoreError::ShutdownInProgress)
    );
    assert_eq!(store.state(TodoState::count).await, 1);
}
