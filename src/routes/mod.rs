//! Router assembly: common routes plus one resource nested under its base path.

mod common;
mod resource;

pub use common::{common_routes, common_routes_with_ready};
pub use resource::{resource_routes, Operation, RouteSpec, RESOURCE_ROUTES};

use crate::model::Model;
use crate::response::error_body;
use crate::state::AppState;
use axum::{
    http::{StatusCode, Uri},
    Json, Router,
};
use tower_http::limit::RequestBodyLimitLayer;

async fn not_found(uri: Uri) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(error_body("not_found", format!("no route for {}", uri.path()))),
    )
}

/// Full application router: `/{base_path}` resource routes, health/ready/version, JSON 404 fallback.
pub fn app<M: Model>(base_path: &str, state: AppState<M>, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest(&format!("/{}", base_path.trim_matches('/')), resource_routes(state))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(body_limit))
}
