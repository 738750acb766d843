//! Resource handlers: index, create, show. Generic over the model; the store comes from state.

use crate::error::AppError;
use crate::model::Model;
use crate::response::{created, success_many, success_one};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// Body-buffering failures keep their status (413 when the body limit is hit); the rest are 400.
fn json_rejection(e: JsonRejection) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(e.body_text())
    }
}

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("invalid id '{}'", id_str)))
}

/// GET /{base}
pub async fn index<M: Model>(State(state): State<AppState<M>>) -> Result<impl IntoResponse, AppError> {
    let rows = state.store.list_all().await?;
    tracing::debug!(count = rows.len(), "index");
    Ok(success_many(rows))
}

/// POST /{base}
pub async fn create<M: Model>(
    State(state): State<AppState<M>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body.map_err(json_rejection)?;
    let draft = RequestValidator::draft::<M>(body)?;
    let stored = state.store.create(draft).await?;
    tracing::info!(table = M::schema().table, id = stored.id(), "created");
    Ok(created(stored))
}

/// GET /{base}/{id}
pub async fn show<M: Model>(
    State(state): State<AppState<M>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = state.store.get_by_id(id).await?;
    Ok(success_one(row))
}
