use axum::Json;

/// GET / — service banner.
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "rfbridge",
        "status": "running",
    }))
}
