use bookshelf_model::author::{Author, AuthorDraft, AuthorId};
use tracing::info;

use crate::{IdGeneratorArc, author::repository::AuthorRepositoryArc, error::AppResult};

#[derive(Debug, Clone)]
pub struct CreateAuthorCommand {
    id_generator: IdGeneratorArc,
    author_repository: AuthorRepositoryArc,
}

#[derive(Debug)]
pub struct CreateAuthorCommandInput<'a> {
    pub draft: &'a AuthorDraft,
}

#[derive(Debug)]
pub struct CreateAuthorCommandOutput {
    pub author: Author,
}

impl CreateAuthorCommand {
    pub fn new(id_generator: IdGeneratorArc, author_repository: AuthorRepositoryArc) -> Self {
        CreateAuthorCommand {
            id_generator,
            author_repository,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        input: CreateAuthorCommandInput<'_>,
    ) -> AppResult<CreateAuthorCommandOutput> {
        let name = input.draft.validate()?;
        let id = AuthorId::new(self.id_generator.lock().await.generate());

        let author = Author { id, name };
        self.author_repository.insert(author.clone()).await?;
        info!("created author {}", author.id);

        Ok(CreateAuthorCommandOutput { author })
    }
}
