use std::collections::HashMap;

use async_trait::async_trait;
use bookshelf_model::book::{Book, BookView};
use bookshelf_query::query::FindOptions;
use itertools::Itertools;

use crate::{
    author::query_manager::AuthorQueryManager,
    book::repository::BookRepositoryArc,
    cursor::CursorSource,
    error::{AppResult, StoreResult},
};

/// Reads books and populates their authors.
#[derive(Debug, Clone)]
pub struct BookQueryManager {
    book_repository: BookRepositoryArc,
    author_query_manager: AuthorQueryManager,
}

impl BookQueryManager {
    pub fn new(book_repository: BookRepositoryArc, author_query_manager: AuthorQueryManager) -> Self {
        BookQueryManager {
            book_repository,
            author_query_manager,
        }
    }

    pub async fn query(&self, id: &str) -> StoreResult<Option<BookView>> {
        let Some(book) = self.book_repository.select(id).await? else {
            return Ok(None);
        };
        Ok(self.populate(vec![book]).await?.pop())
    }

    /// Replaces author references with `{id, name}` of the referenced
    /// authors, fetched in one batch.
    pub async fn populate(&self, books: Vec<Book>) -> StoreResult<Vec<BookView>> {
        let author_ids = books.iter().map(|book| book.author_id).unique().collect_vec();
        let authors: HashMap<_, _> = self
            .author_query_manager
            .query_batch(&author_ids)
            .await?
            .into_iter()
            .map(|author| (author.id, author))
            .collect();
        Ok(books
            .into_iter()
            .map(|book| {
                let author = authors.get(&book.author_id);
                book.populate(author)
            })
            .collect())
    }
}

#[async_trait]
impl CursorSource<BookView> for BookQueryManager {
    async fn fetch(&self, options: &FindOptions) -> AppResult<Vec<BookView>> {
        let books = self.book_repository.find(options).await?;
        Ok(self.populate(books).await?)
    }
}
