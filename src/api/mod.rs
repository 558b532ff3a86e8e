pub mod documents;
pub mod errors;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app::AppState;

/// `GET /health`
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// API routes, without cross-cutting HTTP layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/documents", get(documents::list_documents_handler))
        .route("/api/documents/approval", post(documents::approve_documents_handler))
        .route("/api/documents/rejection", post(documents::reject_documents_handler))
        .route("/api/documents/seed", post(documents::seed_documents_handler))
        .with_state(state)
}

/// CORS policy for the single configured front-end origin.
pub fn cors_layer(allowed_origin: &str) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = allowed_origin.parse()?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ]))
}

/// Full application: routes plus request tracing and CORS.
pub fn app(state: AppState, allowed_origin: &str) -> anyhow::Result<Router> {
    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origin)?);

    Ok(router(state).layer(layers))
}
