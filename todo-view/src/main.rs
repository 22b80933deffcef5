//! Demo binary: fetch the to-do list once and print it.
//!
//! Reads `TODO_VIEW_BASE_URL` and `TODO_VIEW_RESOURCE` to locate the JSON
//! resource, mounts the view, waits for the fetch to settle, prints the
//! rendered HTML, then unmounts.
//!
//! Run with: cargo run --bin todo-view

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use todo_view::{ReqwestHttpClient, TodoAction, TodoEnvironment, TodoListController, TodoViewConfig};
use todo_view_core::environment::ThreadRandom;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = TodoViewConfig::from_env().context("loading configuration")?;
    let url = config.resource_url().context("resolving resource URL")?;
    info!(%url, "Starting todo view");

    let environment = TodoEnvironment::new(
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(ThreadRandom),
        url.as_str(),
    );
    let controller = TodoListController::with_config(environment, config.store_config());

    match controller.load(LOAD_TIMEOUT).await.context("loading todos")? {
        TodoAction::FetchFailed { error, .. } => {
            warn!(status = ?error.status(), "Fetch failed, rendering empty list");
        },
        _ => {
            let todos = controller.todos().await;
            let checked = todos.iter().filter(|todo| todo.checked).count();
            info!(total = todos.len(), checked, "Todos loaded");
        },
    }

    println!("{}", controller.view().await.render_html());

    controller.stop().await.context("stopping view")?;
    controller.shutdown().await.context("shutting down store")?;

    info!("Done");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_view=info,todo_view_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
