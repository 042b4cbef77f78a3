//! todo-sync demo binary
//!
//! Loads configuration, restores the stored session and prints the remote
//! todo list.

use anyhow::Context;
use std::time::Duration;
use todo_sync_app::{init_tracing, App, AppConfig};
use todo_sync_auth::providers::NoopIdentityProvider;
use todo_sync_todos::TodoState;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("loading configuration")?;
    init_tracing(&config.log_level).context("initializing logging")?;

    let app = App::from_config(&config, NoopIdentityProvider::new())
        .context("assembling application")?;
    app.bootstrap(REQUEST_TIMEOUT)
        .await
        .context("restoring session and fetching todos")?;

    match app.auth().state(|s| s.user.clone()).await {
        Some(user) => println!("Signed in as {} <{}>", user.name, user.email),
        None => println!("Not signed in"),
    }

    let state = app.todos().state(TodoState::clone).await;
    if let Some(error) = &state.error {
        println!("Could not fetch todos: {error}");
    } else {
        println!(
            "{} todos, {} completed",
            state.count(),
            state.completed_count()
        );
        for todo in &state.todos {
            let mark = if todo.completed { 'x' } else { ' ' };
            println!("  [{mark}] {:>4}  {}", todo.id, todo.text);
        }
    }

    app.shutdown(SHUTDOWN_TIMEOUT)
        .await
        .context("shutting down")?;
    Ok(())
}
