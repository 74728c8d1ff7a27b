//! # Filter
//!
//! Document filters in the shape of a document store query: an implicit
//! conjunction of per-field constraints. An empty conjunction matches every
//! document.

use std::fmt::{self, Display, Formatter};

use itertools::Itertools;
use regex::{Regex, RegexBuilder};

use crate::schema::{Schema, SchemaMapped, ValueType};
use crate::value::Value;
use error::{FilterError, FilterResult};

pub mod error;

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Conjunction(Vec<Filter>),
    Pattern(String, Pattern),
    Range { name: String, gte: i64, lte: i64 },
    Equal(String, Value),
}

/// Case-insensitive substring pattern.
///
/// The source is matched literally, regex metacharacters carry no meaning.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Filter {
    /// Creates a filter that matches every document.
    pub const fn all() -> Self {
        Self::Conjunction(Vec::new())
    }

    /// Case-insensitive substring match on a string field.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern cannot be compiled.
    pub fn pattern<N: Into<String>>(name: N, source: &str) -> FilterResult<Self> {
        Ok(Self::Pattern(name.into(), Pattern::case_insensitive(source)?))
    }

    /// Inclusive range on an integer field.
    pub fn range<N: Into<String>>(name: N, gte: i64, lte: i64) -> Self {
        Self::Range {
            name: name.into(),
            gte,
            lte,
        }
    }

    pub fn equal<N: Into<String>, V: Into<Value>>(name: N, value: V) -> Self {
        Self::Equal(name.into(), value.into())
    }

    /// Number of field constraints.
    pub fn len(&self) -> usize {
        match self {
            Self::Conjunction(parts) => parts.iter().map(Filter::len).sum(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn add_conjunction(&mut self, other: Self) {
        match self {
            Self::Conjunction(filters) => {
                filters.push(other);
            }
            _ => {
                *self = Self::Conjunction(vec![self.clone(), other]);
            }
        }
    }

    /// Finds the first constraint on the named field.
    pub fn get(&self, field: &str) -> Option<&Self> {
        match self {
            Self::Conjunction(parts) => parts.iter().find_map(|part| part.get(field)),
            Self::Pattern(name, _) | Self::Range { name, .. } | Self::Equal(name, _) => {
                (name == field).then_some(self)
            }
        }
    }

    pub fn evaluate<T>(&self, item: &T) -> bool
    where
        T: SchemaMapped,
    {
        match self {
            Self::Conjunction(parts) => parts.iter().all(|part| part.evaluate(item)),
            Self::Pattern(name, pattern) => item
                .get_field(name)
                .as_str()
                .is_some_and(|value| pattern.is_match(value)),
            Self::Range { name, gte, lte } => item
                .get_field(name)
                .as_integer()
                .is_some_and(|value| *gte <= value && value <= *lte),
            Self::Equal(name, value) => &item.get_field(name) == value,
        }
    }

    /// Checks every constraint against the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is unknown or its type does not fit the
    /// constraint.
    pub fn validate(&self, schema: &Schema) -> FilterResult<()> {
        let check = |name: &str, expected: ValueType| -> FilterResult<()> {
            let field = schema
                .get_field(name)
                .ok_or_else(|| FilterError::UnknownMember(name.to_string()))?;
            if field.value_type == expected {
                Ok(())
            } else {
                Err(FilterError::InvalidType {
                    name: name.to_string(),
                    expected: field.value_type,
                    actual: expected,
                })
            }
        };
        match self {
            Self::Conjunction(parts) => parts.iter().try_for_each(|part| part.validate(schema)),
            Self::Pattern(name, _) => check(name, ValueType::String),
            Self::Range { name, .. } => check(name, ValueType::Integer),
            Self::Equal(name, value) => match value.value_type() {
                Some(value_type) => check(name, value_type),
                None if schema.get_field(name).is_some() => Ok(()),
                None => Err(FilterError::UnknownMember(name.clone())),
            },
        }
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::all()
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conjunction(parts) => {
                write!(f, "{{{}}}", parts.iter().map(ToString::to_string).join(", "))
            }
            Self::Pattern(name, pattern) => write!(f, "{name}: {pattern}"),
            Self::Range { name, gte, lte } => write!(f, "{name}: {{$gte: {gte}, $lte: {lte}}}"),
            Self::Equal(name, value) => write!(f, "{name}: {value}"),
        }
    }
}

impl Pattern {
    /// # Errors
    ///
    /// Returns an error if the escaped source exceeds the regex size limits.
    pub fn case_insensitive(source: &str) -> FilterResult<Self> {
        let regex = RegexBuilder::new(&regex::escape(source))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/i", self.source)
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::schema::BookItem;

    use super::*;

    #[test]
    fn empty_matches_everything() {
        let filter = Filter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.to_string(), "{}");
        assert!(filter.evaluate(&BookItem::new("1", "Clean Code", "Alura", None)));
    }

    #[test]
    fn modify() {
        let mut filter = Filter::all();
        filter.add_conjunction(Filter::pattern("title", "clean").unwrap());
        filter.add_conjunction(Filter::range("pageCount", 100, 5000));
        assert_eq!(filter.len(), 2);
        assert_eq!(
            filter.to_string(),
            "{title: /clean/i, pageCount: {$gte: 100, $lte: 5000}}"
        );
        assert_eq!(
            filter.get("pageCount"),
            Some(&Filter::range("pageCount", 100, 5000))
        );
        assert!(filter.get("publisher").is_none());

        let mut filter = Filter::equal("authorRef", "a1");
        filter.add_conjunction(Filter::range("pageCount", 0, 10));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn evaluate() {
        let book = BookItem::new("1", "Clean Code", "Casa do Código", Some(431));

        assert!(Filter::pattern("title", "CLEAN").unwrap().evaluate(&book));
        assert!(Filter::pattern("publisher", "código").unwrap().evaluate(&book));
        assert!(!Filter::pattern("title", "rust").unwrap().evaluate(&book));

        assert!(Filter::range("pageCount", 431, 431).evaluate(&book));
        assert!(!Filter::range("pageCount", 0, 430).evaluate(&book));
        let unpaged = BookItem::new("2", "Untitled", "Alura", None);
        assert!(!Filter::range("pageCount", 0, 5000).evaluate(&unpaged));

        let mut filter = Filter::equal("authorRef", "a1");
        filter.add_conjunction(Filter::pattern("title", "code").unwrap());
        assert!(filter.evaluate(&book));
        filter.add_conjunction(Filter::pattern("title", "ruby").unwrap());
        assert!(!filter.evaluate(&book));
    }

    #[test]
    fn pattern_is_literal() {
        let book = BookItem::new("1", "C++ Primer", "Alura", None);
        assert!(Filter::pattern("title", "c++").unwrap().evaluate(&book));
        assert!(!Filter::pattern("title", "c.+r").unwrap().evaluate(&book));
    }

    #[test]
    fn validate_schema() {
        let schema = BookItem::get_schema();
        assert!(Filter::pattern("title", "x").unwrap().validate(&schema).is_ok());
        assert!(Filter::range("pageCount", 0, 1).validate(&schema).is_ok());
        assert!(Filter::equal("authorRef", "a1").validate(&schema).is_ok());
        assert_eq!(
            Filter::range("title", 0, 1).validate(&schema),
            Err(FilterError::InvalidType {
                name: "title".into(),
                expected: ValueType::String,
                actual: ValueType::Integer,
            })
        );
        assert_eq!(
            Filter::pattern("isbn", "x").unwrap().validate(&schema),
            Err(FilterError::UnknownMember("isbn".into()))
        );
    }
}
