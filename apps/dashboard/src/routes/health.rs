use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Liveness of the dashboard itself; agent health lives under /api/v1/system.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "hr-phoenix-dashboard"
    }))
}
