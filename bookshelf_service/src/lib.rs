//! Bookshelf HTTP service.
//!
//! CRUD routes for authors and books, plus a multi-criteria book search that
//! can reference authors by name.

pub mod author;
pub mod book;
pub mod config;
pub mod cursor;
pub mod error;
pub mod pagination;
pub mod resource;
pub mod routes;
pub mod tracing;

use std::sync::Arc;

use axum::Router;
use bookshelf_model::id::IdGenerator;
use tokio::sync::Mutex;

use crate::{
    author::{
        mediator::AuthorMediator,
        query_manager::AuthorQueryManager,
        repository::{AuthorRepositoryArc, memory::MemoryAuthorRepository},
    },
    book::{
        mediator::BookMediator,
        repository::{BookRepositoryArc, memory::MemoryBookRepository},
    },
    config::PaginationConfig,
};

/// Identifier generator shared by every create command.
pub type IdGeneratorArc = Arc<Mutex<IdGenerator>>;

/// Builds the application over the given repositories.
pub fn create_app(
    author_repository: AuthorRepositoryArc,
    book_repository: BookRepositoryArc,
    pagination: PaginationConfig,
) -> Router {
    let id_generator: IdGeneratorArc = Arc::new(Mutex::new(IdGenerator::new()));

    let author_mediator = Arc::new(AuthorMediator::new(
        Arc::clone(&id_generator),
        Arc::clone(&author_repository),
    ));
    let book_mediator = Arc::new(BookMediator::new(
        id_generator,
        book_repository,
        AuthorQueryManager::new(author_repository),
    ));

    routes::router(author_mediator, book_mediator, pagination)
}

/// Builds the application over empty in-memory repositories.
pub fn create_memory_app(pagination: PaginationConfig) -> Router {
    create_app(
        Arc::new(MemoryAuthorRepository::new()),
        Arc::new(MemoryBookRepository::new()),
        pagination,
    )
}
