use axum::{debug_handler, Json};
use serde_json::{json, Value};

#[debug_handler]
pub async fn ping() -> Json<Value> {
    Json(json!({ "pong": true }))
}
