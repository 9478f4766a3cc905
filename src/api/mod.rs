use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::db::Database;
use crate::lolesports::types::League;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Build the read-only Axum router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/leagues", get(leagues_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// GET /leagues
async fn leagues_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .db
        .find_all::<League>()
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
