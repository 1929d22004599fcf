//! Router assembly.

mod common;
mod foo;

pub use common::common_routes;
pub use foo::foo_routes;

use crate::openapi::ApiDoc;
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use tower_http::limit::RequestBodyLimitLayer;
use utoipa::OpenApi;

async fn api_docs() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Full application: common routes, `/api` resources and the OpenAPI document.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .route("/api-docs/openapi.json", get(api_docs))
        .nest("/api", foo_routes(state))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
}
