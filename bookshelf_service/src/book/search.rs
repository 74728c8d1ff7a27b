//! Book search filter compiler.
//!
//! Loosely typed query criteria are checked, the author name criterion is
//! resolved to an author reference, and the result is compiled into a
//! [`Filter`]. When the author name matches nobody no filter is produced,
//! since no book can match.

use bookshelf_model::{author::AuthorId, book::Book};
use bookshelf_query::filter::{Filter, error::FilterResult};
use serde::Deserialize;
use tracing::debug;

use crate::{
    author::query_manager::AuthorQueryManager,
    error::{AppError, AppResult},
};

pub const DEFAULT_MIN_PAGES: i64 = 0;
pub const DEFAULT_MAX_PAGES: i64 = 5000;

/// Raw search criteria, as read from the query string.
///
/// Empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSearchCriteria {
    #[serde(alias = "editora")]
    pub publisher: Option<String>,
    #[serde(alias = "titulo")]
    pub title: Option<String>,
    #[serde(alias = "minPaginas")]
    pub min_pages: Option<String>,
    #[serde(alias = "maxPaginas")]
    pub max_pages: Option<String>,
    #[serde(alias = "nomeAutor")]
    pub author_name: Option<String>,
}

/// Checked search criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSearch {
    pub publisher: Option<String>,
    pub title: Option<String>,
    pub min_pages: Option<i64>,
    pub max_pages: Option<i64>,
    pub author_name: Option<String>,
}

/// Constraint contributed by the author name criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorReference {
    /// No author name was given.
    Any,
    Resolved(AuthorId),
}

#[derive(Debug, Clone)]
pub struct BookFilterCompiler {
    author_query_manager: AuthorQueryManager,
}

impl BookSearch {
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if a page bound is not an integer.
    pub fn parse(criteria: &BookSearchCriteria) -> AppResult<Self> {
        Ok(Self {
            publisher: present(&criteria.publisher).map(ToString::to_string),
            title: present(&criteria.title).map(ToString::to_string),
            min_pages: parse_pages("minPages", &criteria.min_pages, f64::ceil)?,
            max_pages: parse_pages("maxPages", &criteria.max_pages, f64::floor)?,
            author_name: present(&criteria.author_name).map(ToString::to_string),
        })
    }

    /// Builds the filter for these criteria and a resolved author reference.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern cannot be compiled.
    pub fn compile(&self, reference: AuthorReference) -> FilterResult<Filter> {
        let mut filter = Filter::all();
        if let Some(publisher) = &self.publisher {
            filter.add_conjunction(Filter::pattern(Book::PUBLISHER_FIELD, publisher)?);
        }
        if let Some(title) = &self.title {
            filter.add_conjunction(Filter::pattern(Book::TITLE_FIELD, title)?);
        }
        if self.min_pages.is_some() || self.max_pages.is_some() {
            filter.add_conjunction(Filter::range(
                Book::PAGE_COUNT_FIELD,
                self.min_pages.unwrap_or(DEFAULT_MIN_PAGES),
                self.max_pages.unwrap_or(DEFAULT_MAX_PAGES),
            ));
        }
        if let AuthorReference::Resolved(author_id) = reference {
            filter.add_conjunction(Filter::equal(
                Book::AUTHOR_REF_FIELD,
                author_id.to_string(),
            ));
        }
        Ok(filter)
    }
}

impl BookFilterCompiler {
    pub fn new(author_query_manager: AuthorQueryManager) -> Self {
        BookFilterCompiler {
            author_query_manager,
        }
    }

    /// Compiles criteria into a filter.
    ///
    /// Returns `None` if no book can match. The only storage access is the
    /// author lookup by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the criteria are malformed or the author lookup
    /// fails.
    #[tracing::instrument(skip(self))]
    pub async fn compile(&self, criteria: &BookSearchCriteria) -> AppResult<Option<Filter>> {
        let search = BookSearch::parse(criteria)?;
        self.resolve_author_reference(search.author_name.as_deref())
            .await?
            .map(|reference| search.compile(reference))
            .transpose()
            .map_err(AppError::from)
    }

    /// Looks up the author whose name is exactly `name`.
    ///
    /// Returns `None` if a name was given and no author has it.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub async fn resolve_author_reference(
        &self,
        name: Option<&str>,
    ) -> AppResult<Option<AuthorReference>> {
        let Some(name) = name else {
            return Ok(Some(AuthorReference::Any));
        };
        let author = self.author_query_manager.query_by_name(name).await?;
        if author.is_none() {
            debug!("no author named `{name}`, search is unsatisfiable");
        }
        Ok(author.map(|author| AuthorReference::Resolved(author.id)))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Page bounds are numbers. Fractional bounds are rounded inwards by `round`,
/// since page counts are whole.
fn parse_pages(
    name: &str,
    value: &Option<String>,
    round: fn(f64) -> f64,
) -> AppResult<Option<i64>> {
    present(value)
        .map(|value| {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|pages| pages.is_finite())
                .map(|pages| round(pages) as i64)
                .ok_or_else(|| AppError::bad_request(format!("invalid {name} `{value}`")))
        })
        .transpose()
}
