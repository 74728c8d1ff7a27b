//! HTTP routes.
//!
//! Every resource gets the same five routes, served by its
//! [`ResourceMediator`]. Errors are rendered by [`AppError`]'s response
//! conversion.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::IntoResponse,
    routing::get,
};
use http::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::{
    author::mediator::AuthorMediator,
    book::mediator::BookMediator,
    config::PaginationConfig,
    error::{AppError, AppResult},
    pagination::{PageParams, PageRequest, paginate},
    resource::ResourceMediator,
};

pub const AUTHORS_PATH: &str = "/autores";
pub const BOOKS_PATH: &str = "/livros";
pub const BOOK_SEARCH_PATH: &str = "/livros/busca";
pub const HEALTH_PATH: &str = "/health";

const ROUTE_NOT_FOUND: &str = "route not found";

/// Shared state of one resource's routes.
struct ResourceState<M> {
    mediator: Arc<M>,
    pagination: PaginationConfig,
}

impl<M> Clone for ResourceState<M> {
    fn clone(&self) -> Self {
        Self {
            mediator: Arc::clone(&self.mediator),
            pagination: self.pagination,
        }
    }
}

#[derive(Debug, Serialize)]
struct Confirmation {
    message: String,
}

/// Builds the application router.
pub fn router(
    author_mediator: Arc<AuthorMediator>,
    book_mediator: Arc<BookMediator>,
    pagination: PaginationConfig,
) -> Router {
    let book_search = Router::new()
        .route(BOOK_SEARCH_PATH, get(list::<BookMediator>))
        .with_state(ResourceState {
            mediator: Arc::clone(&book_mediator),
            pagination,
        });

    Router::new()
        .route(HEALTH_PATH, get(health))
        .merge(resource_router(AUTHORS_PATH, author_mediator, pagination))
        .merge(resource_router(BOOKS_PATH, book_mediator, pagination))
        .merge(book_search)
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
}

fn resource_router<M>(base: &str, mediator: Arc<M>, pagination: PaginationConfig) -> Router
where
    M: ResourceMediator + 'static,
{
    Router::new()
        .route(base, get(list::<M>).post(create::<M>))
        .route(
            &format!("{base}/{{id}}"),
            get(get_one::<M>).put(update::<M>).delete(delete::<M>),
        )
        .with_state(ResourceState {
            mediator,
            pagination,
        })
}

async fn list<M>(
    State(state): State<ResourceState<M>>,
    page: Result<Query<PageParams>, QueryRejection>,
    criteria: Result<Query<M::Criteria>, QueryRejection>,
) -> AppResult<Json<Vec<M::View>>>
where
    M: ResourceMediator + 'static,
{
    let Query(page) = page?;
    let Query(criteria) = criteria?;
    let request = PageRequest::parse(&page, &state.pagination, &state.mediator.schema())?;
    let outcome = state.mediator.list(criteria).await?;
    Ok(Json(paginate(outcome, &request).await?))
}

async fn get_one<M>(
    State(state): State<ResourceState<M>>,
    Path(id): Path<String>,
) -> AppResult<Json<M::View>>
where
    M: ResourceMediator + 'static,
{
    Ok(Json(state.mediator.get(&id).await?))
}

async fn create<M>(
    State(state): State<ResourceState<M>>,
    payload: Result<Json<M::Draft>, JsonRejection>,
) -> AppResult<impl IntoResponse>
where
    M: ResourceMediator + 'static,
{
    let Json(draft) = payload?;
    let record = state.mediator.create(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update<M>(
    State(state): State<ResourceState<M>>,
    Path(id): Path<String>,
    payload: Result<Json<M::Patch>, JsonRejection>,
) -> AppResult<Json<Confirmation>>
where
    M: ResourceMediator + 'static,
{
    let Json(patch) = payload?;
    let message = state.mediator.update(&id, patch).await?;
    Ok(Json(Confirmation { message }))
}

async fn delete<M>(
    State(state): State<ResourceState<M>>,
    Path(id): Path<String>,
) -> AppResult<Json<Confirmation>>
where
    M: ResourceMediator + 'static,
{
    let message = state.mediator.delete(&id).await?;
    Ok(Json(Confirmation { message }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn route_not_found() -> AppError {
    AppError::not_found(ROUTE_NOT_FOUND)
}
