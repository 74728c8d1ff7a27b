use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use bookshelf_model::author::{Author, AuthorId};
use bookshelf_query::query::FindOptions;

use crate::error::StoreResult;

/// In-memory repository implementation.
pub mod memory;

/// Author record for update operations.
///
/// Only provided fields are changed.
#[derive(Debug, Default)]
pub struct AuthorRecordUpdate<'a> {
    pub name: Option<&'a str>,
}

/// Storage adapter for authors.
///
/// Identifiers arrive as raw strings, implementations report the ones that
/// cannot be parsed as [`StoreError::MalformedId`](crate::error::StoreError::MalformedId).
#[async_trait]
pub trait AuthorRepository: Debug {
    /// Inserts a new author record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insertion fails.
    async fn insert(&self, record: Author) -> StoreResult<()>;

    /// Updates an existing author record.
    ///
    /// Returns `true` if a record was updated, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is malformed or the update fails.
    async fn update(&self, id: &str, update: AuthorRecordUpdate<'_>) -> StoreResult<bool>;

    /// Deletes an author record.
    ///
    /// Returns `true` if a record was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is malformed or the deletion fails.
    async fn delete(&self, id: &str) -> StoreResult<bool>;

    /// Selects an author record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is malformed or the selection fails.
    async fn select(&self, id: &str) -> StoreResult<Option<Author>>;

    /// Selects the author whose name is exactly `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection fails.
    async fn select_by_name(&self, name: &str) -> StoreResult<Option<Author>>;

    /// Selects the existing authors among `ids`.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection fails.
    async fn select_multiple(&self, ids: &[AuthorId]) -> StoreResult<Vec<Author>>;

    /// Runs a find.
    ///
    /// # Errors
    ///
    /// Returns an error if the options do not fit the author schema or the
    /// store fails.
    async fn find(&self, options: &FindOptions) -> StoreResult<Vec<Author>>;
}

pub type AuthorRepositoryArc = Arc<dyn AuthorRepository + Send + Sync>;
