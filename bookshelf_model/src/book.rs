use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use bookshelf_query::{
    schema::{FieldSchema, Schema, SchemaMapped, ValueType},
    value::Value,
};
use serde::{Deserialize, Serialize, Serializer};

use crate::{
    author::{Author, AuthorId},
    id::{Id, ParseIdError},
    validation::{ValidationResult, Violation, Violations, required},
};

pub const MIN_PAGE_COUNT: i64 = 10;
pub const MAX_PAGE_COUNT: i64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub Id);

/// Publishers a book may be released by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Publisher {
    CasaDoCodigo,
    Alura,
    DeusEBom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub publisher: Publisher,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i32>,
    #[serde(rename = "authorRef")]
    pub author_id: AuthorId,
}

/// Author fields embedded into a populated book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorSummary {
    pub id: AuthorId,
    pub name: String,
}

/// A book with its author reference replaced by the author itself.
///
/// `author` is `None` when the reference dangles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookView {
    pub id: BookId,
    pub title: String,
    pub publisher: Publisher,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i32>,
    pub author: Option<AuthorSummary>,
}

/// Payload used to create a book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    #[serde(alias = "titulo")]
    pub title: Option<String>,
    #[serde(alias = "editora")]
    pub publisher: Option<String>,
    #[serde(alias = "numeroPaginas")]
    pub page_count: Option<i64>,
    #[serde(alias = "autor")]
    pub author_ref: Option<String>,
}

/// Partial payload used to update a book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(alias = "titulo")]
    pub title: Option<String>,
    #[serde(alias = "editora")]
    pub publisher: Option<String>,
    #[serde(alias = "numeroPaginas")]
    pub page_count: Option<i64>,
    #[serde(alias = "autor")]
    pub author_ref: Option<String>,
}

/// Book fields that passed validation, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBook {
    pub title: String,
    pub publisher: Publisher,
    pub page_count: Option<i32>,
    pub author_id: AuthorId,
}

/// Validated subset of book fields to change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub publisher: Option<Publisher>,
    pub page_count: Option<i32>,
    pub author_id: Option<AuthorId>,
}

impl BookId {
    pub fn new<T: Into<Id>>(id: T) -> Self {
        Self(id.into())
    }
}

impl Display for BookId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for BookId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<Id> for BookId {
    fn from(id: Id) -> Self {
        Self(id)
    }
}

impl Publisher {
    pub const ALL: [Self; 3] = [Self::CasaDoCodigo, Self::Alura, Self::DeusEBom];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CasaDoCodigo => "Casa do Código",
            Self::Alura => "Alura",
            Self::DeusEBom => "Deus é bom e o diabo n presta",
        }
    }
}

impl Display for Publisher {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Publisher {
    type Err = Violation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|publisher| publisher.as_str() == s)
            .ok_or_else(|| Violation::InvalidPublisher(s.to_string()))
    }
}

impl Serialize for Publisher {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl Book {
    pub const ID_FIELD: &'static str = "id";
    pub const TITLE_FIELD: &'static str = "title";
    pub const PUBLISHER_FIELD: &'static str = "publisher";
    pub const PAGE_COUNT_FIELD: &'static str = "pageCount";
    pub const AUTHOR_REF_FIELD: &'static str = "authorRef";

    pub fn get_schema() -> Schema {
        Schema::new([
            (Self::ID_FIELD, FieldSchema::new_ordered(ValueType::String)),
            (
                Self::TITLE_FIELD,
                FieldSchema::new_ordered(ValueType::String),
            ),
            (Self::PUBLISHER_FIELD, FieldSchema::new(ValueType::String)),
            (
                Self::PAGE_COUNT_FIELD,
                FieldSchema::new_ordered(ValueType::Integer),
            ),
            (Self::AUTHOR_REF_FIELD, FieldSchema::new(ValueType::String)),
        ])
    }

    /// Replaces the author reference with the given author, if any.
    pub fn populate(self, author: Option<&Author>) -> BookView {
        BookView {
            id: self.id,
            title: self.title,
            publisher: self.publisher,
            page_count: self.page_count,
            author: author.map(|author| AuthorSummary {
                id: author.id,
                name: author.name.clone(),
            }),
        }
    }
}

impl SchemaMapped for Book {
    fn get_field(&self, name: &str) -> Value {
        match name {
            Self::ID_FIELD => self.id.to_string().into(),
            Self::TITLE_FIELD => self.title.clone().into(),
            Self::PUBLISHER_FIELD => self.publisher.as_str().into(),
            Self::PAGE_COUNT_FIELD => self.page_count.into(),
            Self::AUTHOR_REF_FIELD => self.author_id.to_string().into(),
            _ => Value::Null,
        }
    }
}

impl BookDraft {
    /// Checks every field of the draft.
    ///
    /// Whether the referenced author exists is left to the caller, which owns
    /// the author collection.
    ///
    /// # Errors
    ///
    /// Returns every violation found.
    pub fn validate(&self) -> ValidationResult<ValidBook> {
        let mut violations = Violations::default();
        let title = violations.check(required(Book::TITLE_FIELD, self.title.as_deref()));
        let publisher = violations.check(
            required(Book::PUBLISHER_FIELD, self.publisher.as_deref())
                .and_then(|publisher| publisher.parse::<Publisher>()),
        );
        let page_count = violations.check(page_count(self.page_count));
        let author_id = violations.check(
            required(Book::AUTHOR_REF_FIELD, self.author_ref.as_deref())
                .and_then(|author_ref| author_reference(&author_ref)),
        );
        violations.finish(|| {
            Some(ValidBook {
                title: title?,
                publisher: publisher?,
                page_count: page_count?,
                author_id: author_id?,
            })
        })
    }
}

impl BookPatch {
    /// Checks the fields present in the patch.
    ///
    /// # Errors
    ///
    /// Returns every violation found.
    pub fn validate(&self) -> ValidationResult<BookChanges> {
        let mut violations = Violations::default();
        let title = self
            .title
            .as_deref()
            .map(|title| violations.check(required(Book::TITLE_FIELD, Some(title))));
        let publisher = self
            .publisher
            .as_deref()
            .map(|publisher| {
                violations.check(
                    required(Book::PUBLISHER_FIELD, Some(publisher))
                        .and_then(|publisher| publisher.parse::<Publisher>()),
                )
            });
        let page_count = self
            .page_count
            .map(|count| violations.check(page_count(Some(count))).flatten());
        let author_id = self
            .author_ref
            .as_deref()
            .map(|author_ref| {
                violations.check(
                    required(Book::AUTHOR_REF_FIELD, Some(author_ref))
                        .and_then(|author_ref| author_reference(&author_ref)),
                )
            });
        violations.finish(|| {
            Some(BookChanges {
                title: title.map_or(Some(None), |title| title.map(Some))?,
                publisher: publisher.map_or(Some(None), |publisher| publisher.map(Some))?,
                page_count: page_count.map_or(Some(None), |count| count.map(Some))?,
                author_id: author_id.map_or(Some(None), |author_id| author_id.map(Some))?,
            })
        })
    }
}

impl BookChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.publisher.is_none()
            && self.page_count.is_none()
            && self.author_id.is_none()
    }
}

fn page_count(count: Option<i64>) -> Result<Option<i32>, Violation> {
    match count {
        None => Ok(None),
        Some(count) if (MIN_PAGE_COUNT..=MAX_PAGE_COUNT).contains(&count) => {
            i32::try_from(count)
                .map(Some)
                .map_err(|_| Violation::PageCountOutOfRange(count))
        }
        Some(count) => Err(Violation::PageCountOutOfRange(count)),
    }
}

fn author_reference(value: &str) -> Result<AuthorId, Violation> {
    value
        .parse()
        .map_err(|_| Violation::InvalidReference {
            field: Book::AUTHOR_REF_FIELD,
            value: value.to_string(),
        })
}
