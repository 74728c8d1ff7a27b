//! Lazy query handles.
//!
//! A [`Cursor`] describes a find that has not run yet. Builders only adjust
//! the options, storage is read once by [`Cursor::exec`].

use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use async_trait::async_trait;
use bookshelf_query::{filter::Filter, ordering::Ordering, query::FindOptions};

use crate::error::AppResult;

/// Executes finds for a cursor.
#[async_trait]
pub trait CursorSource<T>: Send + Sync {
    /// Runs the find described by `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    async fn fetch(&self, options: &FindOptions) -> AppResult<Vec<T>>;
}

pub type CursorSourceArc<T> = Arc<dyn CursorSource<T>>;

pub struct Cursor<T> {
    source: CursorSourceArc<T>,
    options: FindOptions,
}

impl<T> Cursor<T> {
    pub fn new(source: CursorSourceArc<T>, filter: Filter) -> Self {
        Self {
            source,
            options: FindOptions::new(filter),
        }
    }

    #[must_use]
    pub fn sort(mut self, ordering: Ordering) -> Self {
        self.options.ordering = ordering;
        self
    }

    #[must_use]
    pub fn skip(mut self, skip: usize) -> Self {
        self.options.skip = skip;
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.options.limit = Some(limit);
        self
    }

    pub fn options(&self) -> &FindOptions {
        &self.options
    }

    /// Runs the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub async fn exec(self) -> AppResult<Vec<T>> {
        self.source.fetch(&self.options).await
    }
}

impl<T> Debug for Cursor<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    use super::*;

    #[derive(Default)]
    struct CountingSource {
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl CursorSource<i64> for CountingSource {
        async fn fetch(&self, options: &FindOptions) -> AppResult<Vec<i64>> {
            self.fetches.fetch_add(1, AtomicOrdering::SeqCst);
            Ok((0..20)
                .skip(options.skip)
                .take(options.limit.unwrap_or(usize::MAX))
                .collect())
        }
    }

    #[tokio::test]
    async fn builders_are_lazy() {
        let source = Arc::new(CountingSource::default());
        let cursor = Cursor::new(source.clone(), Filter::all())
            .sort(Ordering::parse("id:-1").unwrap())
            .skip(5)
            .limit(3);
        assert_eq!(source.fetches.load(AtomicOrdering::SeqCst), 0);
        assert_eq!(cursor.options().skip, 5);
        assert_eq!(cursor.options().limit, Some(3));
        assert_eq!(cursor.options().ordering.to_string(), "id:-1");

        assert_eq!(cursor.exec().await.unwrap(), vec![5, 6, 7]);
        assert_eq!(source.fetches.load(AtomicOrdering::SeqCst), 1);
    }
}
