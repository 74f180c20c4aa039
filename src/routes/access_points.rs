//! GET /accesspoints

use axum::extract::State;
use axum::Json;

use crate::config::AppState;
use crate::domain::AccessPoint;

pub async fn handle_access_points(State(state): State<AppState>) -> Json<Vec<AccessPoint>> {
    Json(state.store.current_access_points())
}
