use async_trait::async_trait;
use bookshelf_model::author::{Author, AuthorId};
use bookshelf_query::query::FindOptions;

use crate::{
    author::repository::AuthorRepositoryArc,
    cursor::CursorSource,
    error::{AppResult, StoreResult},
};

#[derive(Debug, Clone)]
pub struct AuthorQueryManager {
    author_repository: AuthorRepositoryArc,
}

impl AuthorQueryManager {
    pub fn new(author_repository: AuthorRepositoryArc) -> Self {
        AuthorQueryManager { author_repository }
    }

    pub async fn query(&self, id: &str) -> StoreResult<Option<Author>> {
        self.author_repository.select(id).await
    }

    pub async fn query_by_name(&self, name: &str) -> StoreResult<Option<Author>> {
        self.author_repository.select_by_name(name).await
    }

    /// Returns the existing authors among `ids`, in the order of `ids`.
    pub async fn query_batch(&self, ids: &[AuthorId]) -> StoreResult<Vec<Author>> {
        self.author_repository.select_multiple(ids).await
    }

    pub async fn exists(&self, id: AuthorId) -> StoreResult<bool> {
        Ok(!self.query_batch(&[id]).await?.is_empty())
    }
}

#[async_trait]
impl CursorSource<Author> for AuthorQueryManager {
    async fn fetch(&self, options: &FindOptions) -> AppResult<Vec<Author>> {
        Ok(self.author_repository.find(options).await?)
    }
}
