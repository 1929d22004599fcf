//! Foo resource routes, relative to the `/api` prefix.

use crate::handlers::foo::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn foo_routes(state: AppState) -> Router {
    Router::new()
        .route("/foos", get(list).post(create).put(update))
        .route("/foos/:id", get(read).delete(delete_handler))
        .with_state(state)
}
