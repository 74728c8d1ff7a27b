use crate::{author::repository::AuthorRepositoryArc, error::StoreResult};

#[derive(Debug, Clone)]
pub struct DeleteAuthorCommand {
    author_repository: AuthorRepositoryArc,
}

impl DeleteAuthorCommand {
    pub fn new(author_repository: AuthorRepositoryArc) -> Self {
        DeleteAuthorCommand { author_repository }
    }

    /// Deletes the author, leaving books that reference it untouched.
    ///
    /// Returns `false` if no author has the given id.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: &str) -> StoreResult<bool> {
        self.author_repository.delete(id).await
    }
}
