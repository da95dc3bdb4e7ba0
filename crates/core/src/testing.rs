//! In-process stand-in for the validation service, for tests only.

use crate::ClientConfig;
use axum::Router;
use std::sync::Arc;

/// Serve `router` on an ephemeral local port and return its base URL.
pub(crate) async fn spawn_service(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Base URL of a local port with nothing listening on it.
pub(crate) async fn unreachable_service() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub(crate) fn config_for(base_url: &str) -> Arc<ClientConfig> {
    Arc::new(ClientConfig::new(base_url).unwrap())
}
