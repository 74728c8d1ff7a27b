//! # Id
//!
//! Semi-globally unique and sortable identifiers.

use std::{
    fmt::{self, Debug, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Unexpected};
use thiserror::Error;
use ulid::{Generator, Ulid};

/// A semi-globally unique and sortable identifier.
///
/// Based on ULID, rendered as 26 Crockford base32 characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u128);

/// Errors that can occur when parsing an `Id` from a string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIdError {
    /// The string is not a valid ID format.
    #[error("invalid id string `{0}`")]
    InvalidString(String),
}

/// Generates monotonically increasing ids.
pub struct IdGenerator {
    generator: Generator,
}

impl Id {
    /// Creates a new ID from a 128-bit integer.
    #[must_use]
    pub const fn new(id: u128) -> Self {
        Self(id)
    }

    /// Generates a new random sortable ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().0)
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&Ulid(self.0), f)
    }
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_str(s)
            .map(From::from)
            .map_err(|_| ParseIdError::InvalidString(s.to_string()))
    }
}

impl From<Ulid> for Id {
    fn from(ulid: Ulid) -> Self {
        Self(ulid.0)
    }
}

impl From<Id> for u128 {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let value = String::deserialize(deserializer)?;
        value
            .parse::<Self>()
            .map_err(|_| D::Error::invalid_value(Unexpected::Str(value.as_str()), &"Id"))
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            generator: Generator::new(),
        }
    }

    /// Generates the next id.
    ///
    /// Falls back to a fresh random id if the monotonic sequence within the
    /// current millisecond is exhausted.
    pub fn generate(&mut self) -> Id {
        self.generator
            .generate()
            .map_or_else(|_| Id::generate(), Id::from)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for IdGenerator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generate() {
        const N: usize = 10;

        let mut g = IdGenerator::new();
        let ids: Vec<_> = (0..N).map(|_| g.generate()).collect();
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), N);
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));

        for id in ids {
            let decoded: Id = id.to_string().parse().unwrap();
            assert_eq!(decoded, id);
        }
    }

    #[test]
    fn parse_invalid() {
        assert_eq!(
            "42".parse::<Id>(),
            Err(ParseIdError::InvalidString("42".into()))
        );
        assert!("not-an-identifier-at-all!!".parse::<Id>().is_err());
    }

    #[test]
    fn serde() {
        let id = Id::generate();
        let js = serde_json::to_string(&id).unwrap();
        assert_eq!(js, format!(r#""{id}""#));
        assert_eq!(serde_json::from_str::<Id>(&js).unwrap(), id);
        assert!(serde_json::from_str::<Id>(r#""xyz""#).is_err());
    }
}
