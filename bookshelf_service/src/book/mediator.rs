use std::sync::Arc;

use async_trait::async_trait;
use bookshelf_model::{
    book::{Book, BookDraft, BookPatch, BookView},
    validation::{ValidationError, Violation},
};
use bookshelf_query::schema::Schema;
use tracing::info;

use crate::{
    IdGeneratorArc,
    author::query_manager::AuthorQueryManager,
    book::{
        create_book_command::{CreateBookCommand, CreateBookCommandInput},
        delete_book_command::DeleteBookCommand,
        query_manager::BookQueryManager,
        repository::BookRepositoryArc,
        search::{BookFilterCompiler, BookSearchCriteria},
        update_book_command::{UpdateBookCommand, UpdateBookCommandInput},
    },
    cursor::Cursor,
    error::AppResult,
    resource::{ListOutcome, ResourceMediator, require_affected, require_found},
};

pub const BOOK_NOT_FOUND: &str = "book id not found";
pub const BOOK_TO_UPDATE_NOT_FOUND: &str = "book id to update not found";
pub const BOOK_TO_DELETE_NOT_FOUND: &str = "book id to delete not found";
pub const BOOK_UPDATED: &str = "book updated successfully";
pub const BOOK_REMOVED: &str = "book removed successfully";

#[derive(Debug)]
pub struct BookMediator {
    book_query_manager: BookQueryManager,
    author_query_manager: AuthorQueryManager,
    filter_compiler: BookFilterCompiler,
    create_book_command: CreateBookCommand,
    update_book_command: UpdateBookCommand,
    delete_book_command: DeleteBookCommand,
}

impl BookMediator {
    pub fn new(
        id_generator: IdGeneratorArc,
        book_repository: BookRepositoryArc,
        author_query_manager: AuthorQueryManager,
    ) -> Self {
        BookMediator {
            book_query_manager: BookQueryManager::new(
                book_repository.clone(),
                author_query_manager.clone(),
            ),
            filter_compiler: BookFilterCompiler::new(author_query_manager.clone()),
            create_book_command: CreateBookCommand::new(
                id_generator,
                book_repository.clone(),
                author_query_manager.clone(),
            ),
            update_book_command: UpdateBookCommand::new(book_repository.clone()),
            delete_book_command: DeleteBookCommand::new(book_repository),
            author_query_manager,
        }
    }
}

#[async_trait]
impl ResourceMediator for BookMediator {
    type View = BookView;
    type Record = Book;
    type Criteria = BookSearchCriteria;
    type Draft = BookDraft;
    type Patch = BookPatch;

    fn schema(&self) -> Schema {
        Book::get_schema()
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, criteria: BookSearchCriteria) -> AppResult<ListOutcome<BookView>> {
        let source = Arc::new(self.book_query_manager.clone());
        Ok(self
            .filter_compiler
            .compile(&criteria)
            .await?
            .map_or(ListOutcome::Unsatisfiable, |filter| {
                ListOutcome::Deferred(Cursor::new(source, filter))
            }))
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: &str) -> AppResult<BookView> {
        require_found(self.book_query_manager.query(id).await, BOOK_NOT_FOUND)
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, draft: BookDraft) -> AppResult<Book> {
        let output = self
            .create_book_command
            .execute(CreateBookCommandInput { draft: &draft })
            .await?;
        Ok(output.book)
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, id: &str, patch: BookPatch) -> AppResult<String> {
        let changes = patch.validate()?;
        if let Some(author_id) = changes.author_id {
            if !self.author_query_manager.exists(author_id).await? {
                return Err(ValidationError::from(Violation::UnknownAuthor(author_id)).into());
            }
        }
        require_affected(
            self.update_book_command
                .execute(UpdateBookCommandInput {
                    id,
                    changes: &changes,
                })
                .await,
            BOOK_TO_UPDATE_NOT_FOUND,
        )?;
        info!("updated book {id}");
        Ok(BOOK_UPDATED.to_string())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &str) -> AppResult<String> {
        require_affected(
            self.delete_book_command.execute(id).await,
            BOOK_TO_DELETE_NOT_FOUND,
        )?;
        info!("deleted book {id}");
        Ok(BOOK_REMOVED.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    use bookshelf_model::{
        author::{Author, AuthorId},
        book::BookId,
        id::{Id, IdGenerator},
    };
    use bookshelf_query::query::FindOptions;
    use tokio::sync::Mutex;

    use crate::{
        author::repository::{AuthorRecordUpdate, AuthorRepository, memory::MemoryAuthorRepository},
        book::repository::{BookRecordUpdate, BookRepository, memory::MemoryBookRepository},
        error::{AppError, StoreError, StoreResult},
    };

    use super::*;

    /// Counts finds issued against the wrapped repository.
    #[derive(Debug, Default)]
    struct CountingBookRepository {
        inner: MemoryBookRepository,
        finds: AtomicUsize,
    }

    #[async_trait]
    impl BookRepository for CountingBookRepository {
        async fn insert(&self, record: Book) -> StoreResult<()> {
            self.inner.insert(record).await
        }

        async fn update(&self, id: &str, update: BookRecordUpdate<'_>) -> StoreResult<bool> {
            self.inner.update(id, update).await
        }

        async fn delete(&self, id: &str) -> StoreResult<bool> {
            self.inner.delete(id).await
        }

        async fn select(&self, id: &str) -> StoreResult<Option<Book>> {
            self.inner.select(id).await
        }

        async fn select_multiple(&self, ids: &[BookId]) -> StoreResult<Vec<Book>> {
            self.inner.select_multiple(ids).await
        }

        async fn find(&self, options: &FindOptions) -> StoreResult<Vec<Book>> {
            self.finds.fetch_add(1, AtomicOrdering::SeqCst);
            self.inner.find(options).await
        }
    }

    /// Author store that is always down.
    #[derive(Debug)]
    struct UnavailableAuthorRepository;

    fn unavailable<T>() -> StoreResult<T> {
        Err(StoreError::Unavailable("down".into()))
    }

    #[async_trait]
    impl AuthorRepository for UnavailableAuthorRepository {
        async fn insert(&self, _record: Author) -> StoreResult<()> {
            unavailable()
        }

        async fn update(&self, _id: &str, _update: AuthorRecordUpdate<'_>) -> StoreResult<bool> {
            unavailable()
        }

        async fn delete(&self, _id: &str) -> StoreResult<bool> {
            unavailable()
        }

        async fn select(&self, _id: &str) -> StoreResult<Option<Author>> {
            unavailable()
        }

        async fn select_by_name(&self, _name: &str) -> StoreResult<Option<Author>> {
            unavailable()
        }

        async fn select_multiple(&self, _ids: &[AuthorId]) -> StoreResult<Vec<Author>> {
            unavailable()
        }

        async fn find(&self, _options: &FindOptions) -> StoreResult<Vec<Author>> {
            unavailable()
        }
    }

    struct Fixture {
        mediator: BookMediator,
        books: Arc<CountingBookRepository>,
        author: Author,
    }

    fn fixture() -> Fixture {
        let author = Author {
            id: AuthorId::new(Id::generate()),
            name: "Robert Martin".into(),
        };
        let authors = Arc::new(MemoryAuthorRepository::with_data(vec![author.clone()]));
        let books = Arc::new(CountingBookRepository::default());
        let mediator = BookMediator::new(
            Arc::new(Mutex::new(IdGenerator::new())),
            books.clone(),
            AuthorQueryManager::new(authors),
        );
        Fixture {
            mediator,
            books,
            author,
        }
    }

    fn draft(author: &Author, title: &str, page_count: Option<i64>) -> BookDraft {
        BookDraft {
            title: Some(title.into()),
            publisher: Some("Alura".into()),
            page_count,
            author_ref: Some(author.id.to_string()),
        }
    }

    async fn run(outcome: ListOutcome<BookView>) -> Vec<BookView> {
        match outcome {
            ListOutcome::Deferred(cursor) => cursor.exec().await.unwrap(),
            ListOutcome::Unsatisfiable => Vec::new(),
        }
    }

    #[tokio::test]
    async fn crud() {
        let Fixture {
            mediator, author, ..
        } = fixture();
        let book = mediator
            .create(draft(&author, "Clean Code", Some(431)))
            .await
            .unwrap();
        assert_eq!(book.author_id, author.id);

        let id = book.id.to_string();
        let view = mediator.get(&id).await.unwrap();
        assert_eq!(view.title, "Clean Code");
        assert_eq!(view.author.as_ref().unwrap().name, "Robert Martin");

        let message = mediator
            .update(
                &id,
                BookPatch {
                    page_count: Some(464),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(message, BOOK_UPDATED);
        assert_eq!(mediator.get(&id).await.unwrap().page_count, Some(464));

        assert_eq!(mediator.delete(&id).await.unwrap(), BOOK_REMOVED);
        assert!(matches!(
            mediator.get(&id).await,
            Err(AppError::NotFound(message)) if message == BOOK_NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn malformed_ids() {
        let Fixture { mediator, .. } = fixture();
        assert!(matches!(
            mediator.get("123").await,
            Err(AppError::NotFound(message)) if message == BOOK_NOT_FOUND
        ));
        assert!(matches!(
            mediator.update("123", BookPatch::default()).await,
            Err(AppError::NotFound(message)) if message == BOOK_TO_UPDATE_NOT_FOUND
        ));
        assert!(matches!(
            mediator.delete("123").await,
            Err(AppError::NotFound(message)) if message == BOOK_TO_DELETE_NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn create_validation() {
        let Fixture {
            mediator, author, ..
        } = fixture();
        for page_count in [9, 5001] {
            assert!(matches!(
                mediator
                    .create(draft(&author, "Clean Code", Some(page_count)))
                    .await,
                Err(AppError::Validation(_))
            ));
        }
        assert!(
            mediator
                .create(draft(&author, "Clean Code", Some(5000)))
                .await
                .is_ok()
        );

        let unknown = Author {
            id: AuthorId::new(Id::generate()),
            name: "Nobody".into(),
        };
        let err = mediator
            .create(draft(&unknown, "Clean Code", None))
            .await
            .unwrap_err();
        match err {
            AppError::Validation(err) => {
                assert!(err.contains(&Violation::UnknownAuthor(unknown.id)));
            }
            err => panic!("unexpected error: {err}"),
        }

        let err = mediator
            .create(BookDraft {
                author_ref: Some("not-an-id".into()),
                ..draft(&author, "Clean Code", None)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_to_unknown_author() {
        let Fixture {
            mediator, author, ..
        } = fixture();
        let book = mediator
            .create(draft(&author, "Clean Code", None))
            .await
            .unwrap();
        let result = mediator
            .update(
                &book.id.to_string(),
                BookPatch {
                    author_ref: Some(AuthorId::new(Id::generate()).to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(
            mediator
                .get(&book.id.to_string())
                .await
                .unwrap()
                .author
                .unwrap()
                .id,
            author.id
        );
    }

    #[tokio::test]
    async fn list_unknown_author_skips_storage() {
        let Fixture {
            mediator,
            books,
            author,
        } = fixture();
        mediator
            .create(draft(&author, "Clean Code", None))
            .await
            .unwrap();

        let outcome = mediator
            .list(BookSearchCriteria {
                author_name: Some("Nobody".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(matches!(outcome, ListOutcome::Unsatisfiable));
        assert!(run(outcome).await.is_empty());
        assert_eq!(books.finds.load(AtomicOrdering::SeqCst), 0);
    }

    #[tokio::test]
    async fn list_is_lazy() {
        let Fixture {
            mediator,
            books,
            author,
        } = fixture();
        for (title, pages) in [
            ("Clean Code", Some(431)),
            ("Clean Architecture", Some(90)),
            ("Refactoring", Some(448)),
        ] {
            mediator
                .create(draft(&author, title, pages))
                .await
                .unwrap();
        }

        let outcome = mediator
            .list(BookSearchCriteria {
                title: Some("clean".into()),
                min_pages: Some("100".into()),
                author_name: Some("Robert Martin".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(books.finds.load(AtomicOrdering::SeqCst), 0);

        let found = run(outcome).await;
        assert_eq!(books.finds.load(AtomicOrdering::SeqCst), 1);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Clean Code");
        assert_eq!(found[0].author.as_ref().unwrap().id, author.id);
    }

    #[tokio::test]
    async fn author_lookup_failure_propagates() {
        let authors = AuthorQueryManager::new(Arc::new(UnavailableAuthorRepository));
        let books = Arc::new(CountingBookRepository::default());
        let criteria = BookSearchCriteria {
            title: Some("clean".into()),
            author_name: Some("Robert Martin".into()),
            ..Default::default()
        };

        let compiled = BookFilterCompiler::new(authors.clone())
            .compile(&criteria)
            .await;
        assert!(matches!(compiled, Err(AppError::Internal(_))));

        let mediator = BookMediator::new(
            Arc::new(Mutex::new(IdGenerator::new())),
            books.clone(),
            authors,
        );
        let err = mediator.list(criteria).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        let envelope = err.render();
        assert_eq!(envelope.status, 500);
        assert_eq!(envelope.message, "internal server error");
        assert_eq!(books.finds.load(AtomicOrdering::SeqCst), 0);
    }
}
