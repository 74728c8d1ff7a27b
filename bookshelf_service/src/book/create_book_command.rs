use bookshelf_model::{
    book::{Book, BookDraft, BookId},
    validation::{ValidationError, Violation},
};
use tracing::info;

use crate::{
    IdGeneratorArc,
    author::query_manager::AuthorQueryManager,
    book::repository::BookRepositoryArc,
    error::AppResult,
};

#[derive(Debug, Clone)]
pub struct CreateBookCommand {
    id_generator: IdGeneratorArc,
    book_repository: BookRepositoryArc,
    author_query_manager: AuthorQueryManager,
}

#[derive(Debug)]
pub struct CreateBookCommandInput<'a> {
    pub draft: &'a BookDraft,
}

#[derive(Debug)]
pub struct CreateBookCommandOutput {
    pub book: Book,
}

impl CreateBookCommand {
    pub fn new(
        id_generator: IdGeneratorArc,
        book_repository: BookRepositoryArc,
        author_query_manager: AuthorQueryManager,
    ) -> Self {
        CreateBookCommand {
            id_generator,
            book_repository,
            author_query_manager,
        }
    }

    /// Validates the draft and stores it under a new id.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field is invalid or the referenced
    /// author does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        input: CreateBookCommandInput<'_>,
    ) -> AppResult<CreateBookCommandOutput> {
        let valid = input.draft.validate()?;
        if !self.author_query_manager.exists(valid.author_id).await? {
            return Err(ValidationError::from(Violation::UnknownAuthor(valid.author_id)).into());
        }

        let id = BookId::new(self.id_generator.lock().await.generate());
        let book = Book {
            id,
            title: valid.title,
            publisher: valid.publisher,
            page_count: valid.page_count,
            author_id: valid.author_id,
        };
        self.book_repository.insert(book.clone()).await?;
        info!("created book {}", book.id);

        Ok(CreateBookCommandOutput { book })
    }
}
