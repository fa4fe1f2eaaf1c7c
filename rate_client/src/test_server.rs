//! In-process HTTP endpoints for exercising the fetcher.
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use rate_common::net::LATEST_PATH;
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral local port and returns the latest-rates URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}{}", addr, LATEST_PATH)
}

/// Endpoint answering every request with `body` and status 200.
pub async fn serve_body(body: &'static str) -> String {
    serve(Router::new().route(LATEST_PATH, get(move || async move { body }))).await
}

/// Endpoint answering every request with a 500 and no body.
pub async fn serve_server_error() -> String {
    serve(Router::new().route(
        LATEST_PATH,
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    ))
    .await
}

/// URL of a local port nobody listens on.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, LATEST_PATH)
}
