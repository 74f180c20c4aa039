//! Landing page.
//!
//! GET /
//! Renders `public/index.html` as a MiniJinja template with snapshot counts.

use std::io::ErrorKind;

use axum::extract::State;
use axum::response::Html;
use minijinja::{context, Environment};

use crate::config::AppState;
use crate::domain::Snapshot;
use crate::error::{AppError, AppResult};

const INDEX_TEMPLATE: &str = "index.html";

pub async fn handle_index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let path = state.index_path();

    let source = match tokio::fs::read_to_string(&path).await {
        Ok(source) => source,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("Template not found: {:?}", path)));
        }
        Err(e) => return Err(e.into()),
    };

    let snapshot = state.store.current();
    Ok(Html(render_index(&source, &snapshot)?))
}

/// Render the landing page template against a snapshot.
pub fn render_index(source: &str, snapshot: &Snapshot) -> AppResult<String> {
    let mut env = Environment::new();
    env.add_template(INDEX_TEMPLATE, source)?;

    let tmpl = env.get_template(INDEX_TEMPLATE)?;
    let rendered = tmpl.render(context! {
        generation => snapshot.generation,
        refreshed_at => snapshot.refreshed_at.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()),
        access_points => snapshot.access_points.len(),
        clients => snapshot.clients.len(),
        associated => snapshot.clients.iter().filter(|c| c.is_associated()).count(),
    })?;

    Ok(rendered)
}
