use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET / - Service banner
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Companies API",
        "version": version,
        "endpoints": {
            "list": "GET /companies/ (public)",
            "get": "GET /companies/:id (public)",
            "create": "POST /companies (basic auth)",
            "update": "PATCH /companies/:id (basic auth)",
            "delete": "DELETE /companies/:id (basic auth)",
            "health": "GET /health (public)"
        }
    }))
}

/// GET /health - Liveness plus a datastore ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.companies.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
