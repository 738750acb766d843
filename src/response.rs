//! Response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Create envelope: the stored entity's fields flattened next to `success`.
#[derive(Serialize)]
pub struct Created<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<Created<T>>) {
    (StatusCode::OK, Json(Created { success: true, data }))
}

pub fn success_one<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<Vec<T>>) {
    (StatusCode::OK, Json(data))
}

pub fn error_body(code: &str, message: String) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "code": code,
            "message": message
        }
    })
}
