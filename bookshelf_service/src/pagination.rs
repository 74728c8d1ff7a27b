//! Page, limit and sort stage applied to list results.

use bookshelf_query::{
    ordering::{Ordering, OrderingDirection, OrderingTerm},
    schema::Schema,
};
use serde::Deserialize;

use crate::{
    config::PaginationConfig,
    error::{AppError, AppResult},
    resource::ListOutcome,
};

pub const DEFAULT_SORT: &str = "id:-1";

/// Raw pagination query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    #[serde(alias = "limite")]
    pub limit: Option<String>,
    #[serde(alias = "pagina")]
    pub page: Option<String>,
    #[serde(alias = "ordenacao")]
    pub sort: Option<String>,
}

/// A checked page request.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub limit: usize,
    pub page: usize,
    pub ordering: Ordering,
}

impl PageRequest {
    /// Parses raw parameters, filling in defaults for absent ones.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the limit or page is not a
    /// positive integer, or the sort is not `field:1` or `field:-1` on an
    /// orderable field of `schema`.
    pub fn parse(
        params: &PageParams,
        config: &PaginationConfig,
        schema: &Schema,
    ) -> AppResult<Self> {
        let limit = match present(params.limit.as_deref()) {
            Some(limit) => positive("limit", limit)?.min(config.max_limit),
            None => config.default_limit,
        };
        let page = match present(params.page.as_deref()) {
            Some(page) => positive("page", page)?,
            None => 1,
        };
        let ordering = parse_sort(present(params.sort.as_deref()).unwrap_or(DEFAULT_SORT), schema)?;
        Ok(Self {
            limit,
            page,
            ordering,
        })
    }

    pub fn skip(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Runs one page of a list outcome.
///
/// # Errors
///
/// Returns an error if executing the cursor fails.
pub async fn paginate<T>(outcome: ListOutcome<T>, request: &PageRequest) -> AppResult<Vec<T>> {
    match outcome {
        ListOutcome::Deferred(cursor) => {
            cursor
                .sort(request.ordering.clone())
                .skip(request.skip())
                .limit(request.limit)
                .exec()
                .await
        }
        ListOutcome::Unsatisfiable => Ok(Vec::new()),
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn positive(name: &str, value: &str) -> AppResult<usize> {
    value
        .parse::<usize>()
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| AppError::bad_request(format!("invalid {name} `{value}`")))
}

fn parse_sort(source: &str, schema: &Schema) -> AppResult<Ordering> {
    let invalid = || AppError::bad_request(format!("invalid sort `{source}`"));
    let (name, direction) = source.split_once(':').ok_or_else(invalid)?;
    let direction = match direction.trim() {
        "1" => OrderingDirection::Ascending,
        "-1" => OrderingDirection::Descending,
        _ => return Err(invalid()),
    };
    let ordering = Ordering::new(vec![OrderingTerm {
        name: name.trim().to_string(),
        direction,
    }]);
    ordering.validate(schema).map_err(|_| invalid())?;
    Ok(ordering)
}
