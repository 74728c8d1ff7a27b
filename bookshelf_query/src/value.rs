use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter, Write},
};

use crate::schema::ValueType;

/// Document field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Missing or unset field.
    Null,
    /// Integer value.
    Integer(i64),
    /// String value.
    String(String),
}

impl Value {
    /// Gets the value type.
    pub const fn value_type(&self) -> Option<ValueType> {
        match self {
            Self::Null => None,
            Self::Integer(_) => Some(ValueType::Integer),
            Self::String(_) => Some(ValueType::String),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(value) = self {
            Some(value)
        } else {
            None
        }
    }

    pub const fn as_integer(&self) -> Option<i64> {
        if let Self::Integer(value) = self {
            Some(*value)
        } else {
            None
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Integer(value) => value.fmt(f),
            Self::String(value) => {
                f.write_char('"')?;
                value.fmt(f)?;
                f.write_char('"')
            }
        }
    }
}

/// Null sorts before every other value, mirroring document stores.
/// Values of different types are incomparable.
impl PartialOrd<Self> for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Null, _) => Some(Ordering::Less),
            (_, Self::Null) => Some(Ordering::Greater),
            (Self::Integer(lhs), Self::Integer(rhs)) => lhs.partial_cmp(rhs),
            (Self::String(lhs), Self::String(rhs)) => lhs.partial_cmp(rhs),
            _ => None,
        }
    }
}

macro_rules! impl_from_integer {
    ( $( $source:ty ),* $(,)? ) => {
        $(impl From<$source> for Value {
            fn from(value: $source) -> Self {
                Value::Integer(value.into())
            }
        })*
    };
}
impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
