//! REST handlers for managing Foo.

use crate::domain::Foo;
use crate::error::AppError;
use crate::pagination::{generate_page_request, generate_pagination_headers, PageParams};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

const ENTITY_NAME: &str = "foo";
const BASE_PATH: &str = "/api/foos";

async fn create_foo(state: &AppState, foo: Foo) -> Result<Response, AppError> {
    if !foo.is_new() {
        return Err(AppError::IdAlreadyPresent { entity: ENTITY_NAME });
    }
    let result = state.foos.save(foo).await?;
    let id = result
        .id
        .ok_or_else(|| AppError::Internal("saved foo has no id".into()))?;
    Ok((
        StatusCode::CREATED,
        [(LOCATION, format!("{}/{}", BASE_PATH, id))],
        state.alerts.entity_created(ENTITY_NAME, &id.to_string()),
        Json(result),
    )
        .into_response())
}

/// POST /foos: create a new foo.
#[utoipa::path(
    post,
    path = "/api/foos",
    tag = "foo",
    request_body = Foo,
    responses(
        (status = 201, description = "Created", body = Foo),
        (status = 400, description = "The foo already has an id")
    )
)]
pub async fn create(State(state): State<AppState>, Json(foo): Json<Foo>) -> Result<Response, AppError> {
    tracing::debug!(%foo, "REST request to save Foo");
    create_foo(&state, foo).await
}

/// PUT /foos: update an existing foo, or create it when it has no id.
#[utoipa::path(
    put,
    path = "/api/foos",
    tag = "foo",
    request_body = Foo,
    responses(
        (status = 200, description = "Updated", body = Foo),
        (status = 201, description = "Created because no id was given", body = Foo)
    )
)]
pub async fn update(State(state): State<AppState>, Json(foo): Json<Foo>) -> Result<Response, AppError> {
    tracing::debug!(%foo, "REST request to update Foo");
    let Some(id) = foo.id else {
        return create_foo(&state, foo).await;
    };
    let result = state.foos.save(foo).await?;
    Ok((
        StatusCode::OK,
        state.alerts.entity_updated(ENTITY_NAME, &id.to_string()),
        Json(result),
    )
        .into_response())
}

/// GET /foos: one page of foos, with pagination headers.
#[utoipa::path(
    get,
    path = "/api/foos",
    tag = "foo",
    params(PageParams),
    responses((status = 200, description = "Page of foos", body = [Foo]))
)]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Response, AppError> {
    let request = generate_page_request(&params);
    tracing::debug!(page = request.page, size = request.size, "REST request to get a page of Foos");
    let page = state.foos.find_all(request).await?;
    let headers = generate_pagination_headers(&page, BASE_PATH, &params);
    Ok((StatusCode::OK, headers, Json(page.content)).into_response())
}

/// GET /foos/:id: the foo with that id.
#[utoipa::path(
    get,
    path = "/api/foos/{id}",
    tag = "foo",
    params(("id" = i64, Path, description = "Foo id")),
    responses(
        (status = 200, description = "Found", body = Foo),
        (status = 404, description = "No foo with that id")
    )
)]
pub async fn read(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Foo>, AppError> {
    tracing::debug!(id, "REST request to get Foo");
    state
        .foos
        .find_one(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(id.to_string()))
}

/// DELETE /foos/:id: delete the foo with that id. Missing ids are not an error.
#[utoipa::path(
    delete,
    path = "/api/foos/{id}",
    tag = "foo",
    params(("id" = i64, Path, description = "Foo id")),
    responses((status = 200, description = "Deleted"))
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response, AppError> {
    tracing::debug!(id, "REST request to delete Foo");
    state.foos.delete(id).await?;
    Ok((StatusCode::OK, state.alerts.entity_deleted(ENTITY_NAME, &id.to_string())).into_response())
}
