use crate::{
    author::repository::{AuthorRecordUpdate, AuthorRepositoryArc},
    error::StoreResult,
};

#[derive(Debug, Clone)]
pub struct UpdateAuthorCommand {
    author_repository: AuthorRepositoryArc,
}

#[derive(Debug)]
pub struct UpdateAuthorCommandInput<'a> {
    pub id: &'a str,
    pub name: Option<&'a str>,
}

impl UpdateAuthorCommand {
    pub fn new(author_repository: AuthorRepositoryArc) -> Self {
        UpdateAuthorCommand { author_repository }
    }

    /// Returns `false` if no author has the given id.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, input: UpdateAuthorCommandInput<'_>) -> StoreResult<bool> {
        self.author_repository
            .update(input.id, AuthorRecordUpdate { name: input.name })
            .await
    }
}
