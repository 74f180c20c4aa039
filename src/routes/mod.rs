//! HTTP route handlers.

pub mod access_points;
pub mod clients;
pub mod index;

use crate::config::AppState;
use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{Method, Request, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use tower_http::services::ServeDir;

/// Access log line: `IP METHOD PATH - STATUS (generation N)`.
fn access_line(addr: SocketAddr, method: &Method, uri: &Uri, status: StatusCode, generation: u64) -> String {
    format!(
        "{} {} {} - {} (generation {})",
        addr.ip(),
        method,
        uri,
        status.as_u16(),
        generation
    )
}

/// Logs every request along with the snapshot generation it was served from.
async fn request_logging(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let generation = state.store.generation();

    let response = next.run(request).await;

    tracing::info!("{}", access_line(addr, &method, &uri, response.status(), generation));
    response
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let public = ServeDir::new(state.public_dir.as_path());

    Router::new()
        .route("/", get(index::handle_index))
        .route("/clients", get(clients::handle_clients))
        .route("/accesspoints", get(access_points::handle_access_points))
        .nest_service("/public", public)
        .layer(middleware::from_fn_with_state(state.clone(), request_logging))
        .with_state(state)
}
