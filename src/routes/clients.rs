//! Client list endpoint.
//!
//! GET /clients?minutes={minutes}
//! Returns clients seen in the last `minutes` minutes (default 60).

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::config::AppState;
use crate::domain::Client;
use crate::filter::RecencyFilter;

/// Query parameters for the clients endpoint.
///
/// Kept as text so a bad value falls back to the default window instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ClientsQuery {
    pub minutes: Option<String>,
}

pub async fn handle_clients(
    State(state): State<AppState>,
    Query(query): Query<ClientsQuery>,
) -> Json<Vec<Client>> {
    let filter = RecencyFilter::from_param(query.minutes.as_deref());
    let snapshot = state.store.current();
    let clients = filter.apply(&snapshot.clients);

    tracing::debug!(
        "Serving {} of {} clients (window {} min, generation {})",
        clients.len(),
        snapshot.clients.len(),
        filter.window_minutes(),
        snapshot.generation
    );

    Json(clients)
}
