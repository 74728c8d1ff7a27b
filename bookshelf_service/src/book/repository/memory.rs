use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bookshelf_model::book::{Book, BookId};
use bookshelf_query::query::FindOptions;
use tokio::sync::RwLock;

use crate::{
    book::repository::{BookRecordUpdate, BookRepository},
    error::{StoreError, StoreResult},
};

/// In-memory implementation of the book repository.
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    books: Arc<RwLock<HashMap<BookId, Book>>>,
}

impl MemoryBookRepository {
    /// Creates a new empty memory book repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new memory book repository with initial data.
    ///
    /// # Arguments
    ///
    /// * `books` - Initial books to populate the repository with
    pub fn with_data(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(RwLock::new(
                books.into_iter().map(|book| (book.id, book)).collect(),
            )),
        }
    }
}

fn parse_id(id: &str) -> StoreResult<BookId> {
    id.parse()
        .map_err(|_| StoreError::MalformedId(id.to_string()))
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn insert(&self, record: Book) -> StoreResult<()> {
        self.books.write().await.insert(record.id, record);
        Ok(())
    }

    async fn update(&self, id: &str, update: BookRecordUpdate<'_>) -> StoreResult<bool> {
        let id = parse_id(id)?;
        let mut books = self.books.write().await;
        if let Some(book) = books.get_mut(&id) {
            if let Some(title) = update.title {
                book.title = title.to_string();
            }
            if let Some(publisher) = update.publisher {
                book.publisher = publisher;
            }
            if let Some(page_count) = update.page_count {
                book.page_count = Some(page_count);
            }
            if let Some(author_id) = update.author_id {
                book.author_id = author_id;
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let id = parse_id(id)?;
        Ok(self.books.write().await.remove(&id).is_some())
    }

    async fn select(&self, id: &str) -> StoreResult<Option<Book>> {
        let id = parse_id(id)?;
        let books = self.books.read().await;
        Ok(books.get(&id).cloned())
    }

    async fn select_multiple(&self, ids: &[BookId]) -> StoreResult<Vec<Book>> {
        let books = self.books.read().await;
        Ok(ids.iter().filter_map(|id| books.get(id)).cloned().collect())
    }

    async fn find(&self, options: &FindOptions) -> StoreResult<Vec<Book>> {
        options.validate(&Book::get_schema())?;
        let books = self.books.read().await;
        Ok(options.apply(books.values()))
    }
}
