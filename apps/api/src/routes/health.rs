use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// GET /
/// Returns a static status object with the current time and service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
