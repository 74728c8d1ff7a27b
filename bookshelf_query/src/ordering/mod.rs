use std::{
    cmp,
    collections::BTreeSet,
    fmt::{self, Display, Formatter},
};

use itertools::Itertools;

use crate::schema::{Schema, SchemaMapped};

use self::error::{OrderingError, OrderingResult};

pub mod error;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ordering {
    pub terms: Vec<OrderingTerm>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingTerm {
    pub name: String,
    pub direction: OrderingDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingDirection {
    Ascending,
    Descending,
}

impl Ordering {
    pub fn new(terms: Vec<OrderingTerm>) -> Self {
        Ordering { terms }
    }

    /// Parses comma separated `field:direction` terms.
    ///
    /// Direction is `1`/`asc` or `-1`/`desc` and defaults to ascending.
    ///
    /// # Errors
    ///
    /// Returns an error for empty names, unknown directions and fields that
    /// appear more than once.
    pub fn parse(source: &str) -> OrderingResult<Ordering> {
        let mut terms = Vec::new();
        let mut term_names = BTreeSet::new();
        for part in source.split(',').map(str::trim).filter(|part| !part.is_empty()) {
            let (name, direction) = match part.split_once(':') {
                Some((name, direction)) => (
                    name.trim(),
                    direction.trim().parse::<OrderingDirection>()?,
                ),
                None => (part, OrderingDirection::Ascending),
            };
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(OrderingError::InvalidTermFormat(part.to_string()));
            }
            if !term_names.insert(name.to_string()) {
                return Err(OrderingError::DuplicateField(name.to_string()));
            }
            terms.push(OrderingTerm {
                name: name.to_string(),
                direction,
            });
        }
        Ok(Ordering { terms })
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn evaluate<T>(&self, lhs: &T, rhs: &T) -> Option<cmp::Ordering>
    where
        T: SchemaMapped,
    {
        for term in &self.terms {
            let a = lhs.get_field(&term.name);
            let b = rhs.get_field(&term.name);
            match a.partial_cmp(&b)? {
                cmp::Ordering::Equal => {}
                ordering => {
                    return Some(match term.direction {
                        OrderingDirection::Ascending => ordering,
                        OrderingDirection::Descending => ordering.reverse(),
                    });
                }
            }
        }
        Some(cmp::Ordering::Equal)
    }

    /// # Errors
    ///
    /// Returns an error if a term names a field missing from the schema or a
    /// field that cannot be ordered.
    pub fn validate(&self, schema: &Schema) -> OrderingResult<()> {
        for term in &self.terms {
            let field = schema
                .get_field(&term.name)
                .ok_or_else(|| OrderingError::UnknownMember(term.name.clone()))?;
            if !field.ordered {
                return Err(OrderingError::UnorderedField(term.name.clone()));
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for OrderingDirection {
    type Err = OrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" | "asc" => Ok(Self::Ascending),
            "-1" | "desc" => Ok(Self::Descending),
            _ => Err(OrderingError::InvalidDirection(s.to_string())),
        }
    }
}

impl Display for Ordering {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.terms.iter().map(ToString::to_string).join(","))
    }
}

impl Display for OrderingTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.direction)
    }
}

impl Display for OrderingDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            OrderingDirection::Ascending => f.write_str("1"),
            OrderingDirection::Descending => f.write_str("-1"),
        }
    }
}
