//! `ReqwestHttpClient` against a local one-shot HTTP server.

#![allow(clippy::unwrap_used)] // Test code can use unwrap

use std::sync::Arc;
use std::time::Duration;
use todo_view::{
    FetchError, LoadError, ReqwestHttpClient, TodoAction, TodoEnvironment, TodoId,
    TodoListController, fetch_todos,
};
use todo_view_core::cancellation::CancellationToken;
use todo_view_core::environment::HttpClient;
use todo_view_testing::FixedRandom;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve one canned response on an ephemeral port; returns the base URL
async fn serve_once(status_line: &'static str, content_type: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 2048];
        let _ = socket.read(&mut request).await.unwrap();

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: {content_type}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{addr}/todos.json")
}

#[tokio::test]
async fn reads_status_headers_and_body() {
    let url = serve_once("200 OK", "application/json", "[]").await;

    let response = ReqwestHttpClient::new().get(&url).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.url, url);
    assert_eq!(response.body, b"[]");
    assert!(
        response
            .headers
            .iter()
            .any(|(name, value)| name == "content-type" && value == "application/json")
    );
}

#[tokio::test]
async fn not_found_is_a_response_not_a_transport_error() {
    let url = serve_once("404 Not Found", "text/plain", "nope").await;
    let client = ReqwestHttpClient::new();

    let error = fetch_todos(&client, &url, &CancellationToken::new()).await.unwrap_err();

    let LoadError::Fetch(FetchError::Status(response)) = &error else {
        unreachable!("expected a status failure, got {error:?}");
    };
    assert_eq!(response.status, 404);
    assert_eq!(response.body, "nope");
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    // Bind then drop, so nothing is listening on the port.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let error = ReqwestHttpClient::new()
        .get(&format!("http://{addr}/todos.json"))
        .await
        .unwrap_err();

    assert!(error.url.contains(&addr.port().to_string()));
}

#[tokio::test]
async fn controller_loads_over_http() {
    let url = serve_once(
        "200 OK",
        "application/json",
        r#"[{"id":"a","value":"first","checked":true},{"id":"b","value":"second","checked":false}]"#,
    )
    .await;
    let env = TodoEnvironment::new(Arc::new(ReqwestHttpClient::new()), Arc::new(FixedRandom::new(1)), url);
    let view = TodoListController::new(env);

    let outcome = view.load(Duration::from_secs(5)).await.unwrap();

    assert!(matches!(outcome, TodoAction::TodosLoaded { ref todos, .. } if todos.len() == 2));
    assert_eq!(view.featured().await.map(|todo| todo.id), Some(TodoId::from("b")));
    assert!(view.view().await.render_html().contains("second"));
}
