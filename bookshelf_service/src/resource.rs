//! Uniform contract shared by the author and book mediators.

use async_trait::async_trait;
use bookshelf_query::schema::Schema;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    cursor::Cursor,
    error::{AppError, AppResult, StoreError, StoreResult},
};

/// Result of a list operation.
#[derive(Debug)]
pub enum ListOutcome<T> {
    /// A query that has not been executed yet.
    Deferred(Cursor<T>),
    /// No document can match, storage was not queried.
    Unsatisfiable,
}

/// CRUD operations over one kind of resource.
///
/// Malformed and unknown identifiers are both reported as
/// [`AppError::NotFound`](crate::error::AppError::NotFound).
#[async_trait]
pub trait ResourceMediator: Send + Sync {
    /// Entity returned by `get` and `list`.
    type View: Serialize + Send + 'static;
    /// Entity returned by `create`.
    type Record: Serialize + Send;
    /// Loosely typed list criteria, read from the query string.
    type Criteria: DeserializeOwned + Send;
    type Draft: DeserializeOwned + Send;
    type Patch: DeserializeOwned + Send;

    /// Schema of the fields lists can be sorted by.
    fn schema(&self) -> Schema;

    async fn list(&self, criteria: Self::Criteria) -> AppResult<ListOutcome<Self::View>>;

    async fn get(&self, id: &str) -> AppResult<Self::View>;

    async fn create(&self, draft: Self::Draft) -> AppResult<Self::Record>;

    /// Applies a partial update and returns a confirmation message.
    async fn update(&self, id: &str, patch: Self::Patch) -> AppResult<String>;

    /// Deletes the resource and returns a confirmation message.
    async fn delete(&self, id: &str) -> AppResult<String>;
}

/// Unifies malformed and unknown identifiers into [`AppError::NotFound`]
/// with the given message. Other store errors pass through.
pub fn require_found<T>(result: StoreResult<Option<T>>, message: &str) -> AppResult<T> {
    match result {
        Ok(Some(value)) => Ok(value),
        Ok(None) | Err(StoreError::MalformedId(_)) => Err(AppError::not_found(message)),
        Err(err) => Err(err.into()),
    }
}

/// Like [`require_found`], for operations reporting whether a document was
/// affected.
pub fn require_affected(result: StoreResult<bool>, message: &str) -> AppResult<()> {
    require_found(result.map(|affected| affected.then_some(())), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found() {
        assert_eq!(require_found(Ok(Some(1)), "x").unwrap(), 1);
        for result in [Ok(None), Err(StoreError::MalformedId("42".into()))] {
            assert!(matches!(
                require_found::<i32>(result, "author id not found"),
                Err(AppError::NotFound(message)) if message == "author id not found"
            ));
        }
        assert!(matches!(
            require_affected(Err(StoreError::Unavailable("down".into())), "x"),
            Err(AppError::Internal(_))
        ));
        assert!(matches!(
            require_affected(Ok(false), "book id to delete not found"),
            Err(AppError::NotFound(_))
        ));
    }
}
