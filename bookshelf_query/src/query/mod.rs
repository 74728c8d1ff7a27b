//! # Query
//!
//! Options of a find that has not been executed yet, and their in-memory
//! evaluation.

use std::cmp;

use itertools::Itertools;

use crate::{
    filter::Filter,
    ordering::Ordering,
    query::error::QueryResult,
    schema::{Schema, SchemaMapped},
};

pub mod error;

/// Everything needed to run a find against a collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FindOptions {
    pub filter: Filter,
    pub ordering: Ordering,
    pub skip: usize,
    pub limit: Option<usize>,
}

impl FindOptions {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    /// # Errors
    ///
    /// Returns an error if the filter or the ordering does not fit the
    /// schema.
    pub fn validate(&self, schema: &Schema) -> QueryResult<()> {
        self.filter.validate(schema)?;
        self.ordering.validate(schema)?;
        Ok(())
    }

    /// Filters, sorts and slices items.
    ///
    /// Incomparable values keep their relative order.
    pub fn apply<'a, T, I>(&self, items: I) -> Vec<T>
    where
        T: SchemaMapped + Clone + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let matched = items
            .into_iter()
            .filter(|item| self.filter.evaluate(*item));
        let sorted: Vec<&T> = if self.ordering.is_empty() {
            matched.collect()
        } else {
            matched
                .sorted_by(|a, b| {
                    self.ordering
                        .evaluate(*a, *b)
                        .unwrap_or(cmp::Ordering::Equal)
                })
                .collect()
        };
        sorted
            .into_iter()
            .skip(self.skip)
            .take(self.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}
