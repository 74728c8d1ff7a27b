use crate::{book::repository::BookRepositoryArc, error::StoreResult};

#[derive(Debug, Clone)]
pub struct DeleteBookCommand {
    book_repository: BookRepositoryArc,
}

impl DeleteBookCommand {
    pub fn new(book_repository: BookRepositoryArc) -> Self {
        DeleteBookCommand { book_repository }
    }

    /// Returns `false` if no book has the given id.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: &str) -> StoreResult<bool> {
        self.book_repository.delete(id).await
    }
}
