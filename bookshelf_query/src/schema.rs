use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};

use crate::value::Value;

/// Flat document schema, used to check filters and orderings against the
/// fields a record actually exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Schema fields.
    pub fields: BTreeMap<String, FieldSchema>,
}

/// Field schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    /// Value type.
    pub value_type: ValueType,
    /// Whether the field can be used for ordering.
    pub ordered: bool,
}

/// Value type for schema validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// Integer value.
    Integer,
    /// String value.
    String,
}

/// Trait for records whose fields can be read by name.
pub trait SchemaMapped {
    /// Gets field value by name.
    fn get_field(&self, name: &str) -> Value;
}

impl Schema {
    pub fn new<I, N>(fields: I) -> Self
    where
        I: IntoIterator<Item = (N, FieldSchema)>,
        N: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, field)| (name.into(), field))
                .collect(),
        }
    }

    /// Gets field schema by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }
}

impl FieldSchema {
    /// Creates a new field schema.
    pub const fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            ordered: false,
        }
    }

    /// Creates a new ordered field schema.
    pub const fn new_ordered(value_type: ValueType) -> Self {
        Self {
            value_type,
            ordered: true,
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
