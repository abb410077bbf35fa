// GET handlers: version, dashboard page/json, snapshots

use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use super::AppState;
use crate::render;
use crate::version::{NAME, VERSION};

/// GET /version: returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /: server-rendered dashboard for the latest view model.
pub(super) async fn dashboard_page_handler(State(state): State<AppState>) -> impl IntoResponse {
    let vm = state.view_rx.borrow().clone();
    Html(render::render_dashboard_page(&vm))
}

/// GET /api/dashboard: latest view model as JSON.
pub(super) async fn dashboard_json_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.view_rx.borrow().clone())
}

/// GET /api/snapshots: latest snapshot per metric kind.
pub(super) async fn snapshots_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.snapshots.all().await)
}
