//! Response envelope helpers.

use axum::Json;
use serde::Serialize;

/// Wrap a payload in the standard `{success, data}` envelope.
pub fn success<T: Serialize>(data: T) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "success": true, "data": data }))
}
