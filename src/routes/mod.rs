//! Router assembly.

mod common;
mod resource;

pub use common::common_routes;
pub use resource::{api_routes, resource_routes};

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Full application: common and resource routes with CORS, body limit, and request tracing.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
