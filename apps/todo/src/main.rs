//! Interactive terminal front end for the to-do list widget.
//!
//! Reads one gesture per line from stdin, forwards it to the store, and
//! redraws the list. Logs go to stderr so they never mix with the list.

use anyhow::Context;
use std::io::Write;
use std::sync::Arc;
use todo::input::{self, Command};
use todo::{Config, TodoEnvironment, TodoReducer, TodoState, TodoView};
use todomind_core::environment::SystemClock;
use todomind_runtime::Store;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        initial_filter = %config.initial_filter,
        max_feedback_actions = config.max_feedback_actions,
        "Configuration loaded"
    );

    let env = TodoEnvironment::new(Arc::new(SystemClock));
    let store = Store::with_config(
        TodoState::with_filter(config.initial_filter),
        TodoReducer::new(),
        env,
        config.store_config(),
    );

    println!("{}\n", input::HELP);
    println!("{}", store.state(TodoView::from_state).await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", config.prompt);
        std::io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };

        let command = match input::parse_line(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(error) => {
                println!("{error}");
                continue;
            },
        };

        if command == Command::Help {
            println!("{}", input::HELP);
            continue;
        }

        let view = store.state(TodoView::from_state).await;
        for action in command.into_actions(&view) {
            if let Err(error) = store.send(action).await {
                warn!(%error, "Action was not fully processed");
            }
        }

        println!("{}", store.state(TodoView::from_state).await);
    }

    store.shutdown();
    info!("Session ended");
    Ok(())
}
