use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use bookshelf_model::{
    author::AuthorId,
    book::{Book, BookChanges, BookId, Publisher},
};
use bookshelf_query::query::FindOptions;

use crate::error::StoreResult;

/// In-memory repository implementation.
pub mod memory;

/// Book record for update operations.
///
/// Contains optional fields for updating an existing book record.
/// Only provided fields will be updated during the operation.
#[derive(Debug, Default)]
pub struct BookRecordUpdate<'a> {
    /// New title
    pub title: Option<&'a str>,
    /// New publisher
    pub publisher: Option<Publisher>,
    /// New page count
    pub page_count: Option<i32>,
    /// New author reference
    pub author_id: Option<AuthorId>,
}

/// Storage adapter for books.
#[async_trait]
pub trait BookRepository: Debug {
    /// Inserts a new book record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insertion fails.
    async fn insert(&self, record: Book) -> StoreResult<()>;

    /// Updates an existing book record.
    ///
    /// Returns `true` if a record was updated, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MalformedId`](crate::error::StoreError::MalformedId)
    /// if `id` cannot be parsed, or an error if the update fails.
    async fn update(&self, id: &str, update: BookRecordUpdate<'_>) -> StoreResult<bool>;

    /// Deletes a book record.
    ///
    /// Returns `true` if a record was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MalformedId`](crate::error::StoreError::MalformedId)
    /// if `id` cannot be parsed, or an error if the deletion fails.
    async fn delete(&self, id: &str) -> StoreResult<bool>;

    /// Selects a book record by ID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MalformedId`](crate::error::StoreError::MalformedId)
    /// if `id` cannot be parsed, or an error if the selection fails.
    async fn select(&self, id: &str) -> StoreResult<Option<Book>>;

    /// Selects the existing books among `ids`.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection fails.
    async fn select_multiple(&self, ids: &[BookId]) -> StoreResult<Vec<Book>>;

    /// Runs a find.
    ///
    /// # Errors
    ///
    /// Returns an error if the options do not fit the book schema or the
    /// store fails.
    async fn find(&self, options: &FindOptions) -> StoreResult<Vec<Book>>;
}

pub type BookRepositoryArc = Arc<dyn BookRepository + Send + Sync>;

impl<'a> From<&'a BookChanges> for BookRecordUpdate<'a> {
    fn from(changes: &'a BookChanges) -> Self {
        Self {
            title: changes.title.as_deref(),
            publisher: changes.publisher,
            page_count: changes.page_count,
            author_id: changes.author_id,
        }
    }
}
