use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use bookshelf_query::{
    schema::{FieldSchema, Schema, SchemaMapped, ValueType},
    value::Value,
};
use serde::{Deserialize, Serialize};

use crate::{
    id::{Id, ParseIdError},
    validation::{ValidationResult, Violation, Violations, required},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(pub Id);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
}

/// Payload used to create an author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDraft {
    #[serde(alias = "nome")]
    pub name: Option<String>,
}

/// Partial payload used to update an author.
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPatch {
    #[serde(alias = "nome")]
    pub name: Option<String>,
}

impl AuthorId {
    pub fn new<T: Into<Id>>(id: T) -> Self {
        Self(id.into())
    }
}

impl Display for AuthorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AuthorId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<Id> for AuthorId {
    fn from(id: Id) -> Self {
        Self(id)
    }
}

impl Author {
    pub const ID_FIELD: &'static str = "id";
    pub const NAME_FIELD: &'static str = "name";

    pub fn get_schema() -> Schema {
        Schema::new([
            (Self::ID_FIELD, FieldSchema::new_ordered(ValueType::String)),
            (
                Self::NAME_FIELD,
                FieldSchema::new_ordered(ValueType::String),
            ),
        ])
    }
}

impl SchemaMapped for Author {
    fn get_field(&self, name: &str) -> Value {
        match name {
            Self::ID_FIELD => self.id.to_string().into(),
            Self::NAME_FIELD => self.name.clone().into(),
            _ => Value::Null,
        }
    }
}

impl AuthorDraft {
    /// Checks the draft and returns the name to store.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is missing or blank.
    pub fn validate(&self) -> ValidationResult<String> {
        let mut violations = Violations::default();
        let name = violations.check(required_name(self.name.as_deref()));
        violations.finish(|| name)
    }
}

impl AuthorPatch {
    /// Checks the fields present in the patch.
    ///
    /// # Errors
    ///
    /// Returns an error if a present name is blank.
    pub fn validate(&self) -> ValidationResult<Option<String>> {
        let mut violations = Violations::default();
        let name = match self.name.as_deref() {
            Some(name) => violations.check(required_name(Some(name))).map(Some),
            None => Some(None),
        };
        violations.finish(|| name)
    }
}

fn required_name(name: Option<&str>) -> Result<String, Violation> {
    required(Author::NAME_FIELD, name)
}
