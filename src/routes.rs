use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::Uri,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info_span, Instrument};

use crate::error::ApiError;
use crate::state::AppState;
use crate::translation::{TranslationRequest, TranslationResponse};

/// Full application router with its state attached
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(create_routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/pokemon/:name", get(get_shakespearean_pokemon))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_shakespearean_pokemon(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<TranslationResponse>, ApiError> {
    let Path(name) = path.map_err(|rejection| ApiError::validation(rejection.body_text()))?;
    let request_id = state.generate_request_id();
    let span = info_span!("translate", request_id = %request_id, pokemon = %name);

    state
        .translator
        .translate(TranslationRequest { name })
        .instrument(span)
        .await
        .map(Json)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("resource not found: {}", uri.path()))
}
