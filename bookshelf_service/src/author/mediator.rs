use std::sync::Arc;

use async_trait::async_trait;
use bookshelf_model::author::{Author, AuthorDraft, AuthorPatch};
use bookshelf_query::{filter::Filter, schema::Schema};
use serde::Deserialize;
use tracing::info;

use crate::{
    IdGeneratorArc,
    author::{
        create_author_command::{CreateAuthorCommand, CreateAuthorCommandInput},
        delete_author_command::DeleteAuthorCommand,
        query_manager::AuthorQueryManager,
        repository::AuthorRepositoryArc,
        update_author_command::{UpdateAuthorCommand, UpdateAuthorCommandInput},
    },
    cursor::Cursor,
    error::AppResult,
    resource::{ListOutcome, ResourceMediator, require_affected, require_found},
};

pub const AUTHOR_NOT_FOUND: &str = "author id not found";
pub const AUTHOR_TO_UPDATE_NOT_FOUND: &str = "author id to update not found";
pub const AUTHOR_TO_DELETE_NOT_FOUND: &str = "author id to delete not found";
pub const AUTHOR_UPDATED: &str = "author updated successfully";
pub const AUTHOR_REMOVED: &str = "author removed successfully";

/// Authors are listed without criteria.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AuthorListCriteria {}

#[derive(Debug)]
pub struct AuthorMediator {
    author_query_manager: AuthorQueryManager,
    create_author_command: CreateAuthorCommand,
    update_author_command: UpdateAuthorCommand,
    delete_author_command: DeleteAuthorCommand,
}

impl AuthorMediator {
    pub fn new(id_generator: IdGeneratorArc, author_repository: AuthorRepositoryArc) -> Self {
        AuthorMediator {
            author_query_manager: AuthorQueryManager::new(author_repository.clone()),
            create_author_command: CreateAuthorCommand::new(
                id_generator,
                author_repository.clone(),
            ),
            update_author_command: UpdateAuthorCommand::new(author_repository.clone()),
            delete_author_command: DeleteAuthorCommand::new(author_repository),
        }
    }
}

#[async_trait]
impl ResourceMediator for AuthorMediator {
    type View = Author;
    type Record = Author;
    type Criteria = AuthorListCriteria;
    type Draft = AuthorDraft;
    type Patch = AuthorPatch;

    fn schema(&self) -> Schema {
        Author::get_schema()
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, _criteria: AuthorListCriteria) -> AppResult<ListOutcome<Author>> {
        Ok(ListOutcome::Deferred(Cursor::new(
            Arc::new(self.author_query_manager.clone()),
            Filter::all(),
        )))
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: &str) -> AppResult<Author> {
        require_found(self.author_query_manager.query(id).await, AUTHOR_NOT_FOUND)
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, draft: AuthorDraft) -> AppResult<Author> {
        let output = self
            .create_author_command
            .execute(CreateAuthorCommandInput { draft: &draft })
            .await?;
        Ok(output.author)
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, id: &str, patch: AuthorPatch) -> AppResult<String> {
        let name = patch.validate()?;
        require_affected(
            self.update_author_command
                .execute(UpdateAuthorCommandInput {
                    id,
                    name: name.as_deref(),
                })
                .await,
            AUTHOR_TO_UPDATE_NOT_FOUND,
        )?;
        info!("updated author {id}");
        Ok(AUTHOR_UPDATED.to_string())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &str) -> AppResult<String> {
        require_affected(
            self.delete_author_command.execute(id).await,
            AUTHOR_TO_DELETE_NOT_FOUND,
        )?;
        info!("deleted author {id}");
        Ok(AUTHOR_REMOVED.to_string())
    }
}
