use bookshelf_model::book::BookChanges;

use crate::{
    book::repository::{BookRecordUpdate, BookRepositoryArc},
    error::StoreResult,
};

#[derive(Debug, Clone)]
pub struct UpdateBookCommand {
    book_repository: BookRepositoryArc,
}

#[derive(Debug)]
pub struct UpdateBookCommandInput<'a> {
    pub id: &'a str,
    pub changes: &'a BookChanges,
}

impl UpdateBookCommand {
    pub fn new(book_repository: BookRepositoryArc) -> Self {
        UpdateBookCommand { book_repository }
    }

    /// Merges already validated changes into the stored book.
    ///
    /// Returns `false` if no book has the given id.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, input: UpdateBookCommandInput<'_>) -> StoreResult<bool> {
        self.book_repository
            .update(input.id, BookRecordUpdate::from(input.changes))
            .await
    }
}
