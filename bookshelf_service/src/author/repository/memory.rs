use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bookshelf_model::author::{Author, AuthorId};
use bookshelf_query::query::FindOptions;
use tokio::sync::RwLock;

use crate::{
    author::repository::{AuthorRecordUpdate, AuthorRepository},
    error::{StoreError, StoreResult},
};

/// In-memory implementation of the author repository.
#[derive(Debug, Default)]
pub struct MemoryAuthorRepository {
    authors: Arc<RwLock<HashMap<AuthorId, Author>>>,
}

impl MemoryAuthorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new memory author repository with initial data.
    pub fn with_data(authors: Vec<Author>) -> Self {
        Self {
            authors: Arc::new(RwLock::new(
                authors
                    .into_iter()
                    .map(|author| (author.id, author))
                    .collect(),
            )),
        }
    }
}

fn parse_id(id: &str) -> StoreResult<AuthorId> {
    id.parse()
        .map_err(|_| StoreError::MalformedId(id.to_string()))
}

#[async_trait]
impl AuthorRepository for MemoryAuthorRepository {
    async fn insert(&self, record: Author) -> StoreResult<()> {
        self.authors.write().await.insert(record.id, record);
        Ok(())
    }

    async fn update(&self, id: &str, update: AuthorRecordUpdate<'_>) -> StoreResult<bool> {
        let id = parse_id(id)?;
        let mut authors = self.authors.write().await;
        if let Some(author) = authors.get_mut(&id) {
            if let Some(name) = update.name {
                author.name = name.to_string();
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let id = parse_id(id)?;
        Ok(self.authors.write().await.remove(&id).is_some())
    }

    async fn select(&self, id: &str) -> StoreResult<Option<Author>> {
        let id = parse_id(id)?;
        Ok(self.authors.read().await.get(&id).cloned())
    }

    async fn select_by_name(&self, name: &str) -> StoreResult<Option<Author>> {
        let authors = self.authors.read().await;
        Ok(authors
            .values()
            .filter(|author| author.name == name)
            .min_by_key(|author| author.id)
            .cloned())
    }

    async fn select_multiple(&self, ids: &[AuthorId]) -> StoreResult<Vec<Author>> {
        let authors = self.authors.read().await;
        Ok(ids.iter().filter_map(|id| authors.get(id)).cloned().collect())
    }

    async fn find(&self, options: &FindOptions) -> StoreResult<Vec<Author>> {
        options.validate(&Author::get_schema())?;
        let authors = self.authors.read().await;
        Ok(options.apply(authors.values()))
    }
}
