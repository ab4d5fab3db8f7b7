use axum::Json;

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Hello world from SwiftCloud" }))
}

pub async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
