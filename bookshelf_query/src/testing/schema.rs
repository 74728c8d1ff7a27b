use crate::schema::{FieldSchema, Schema, SchemaMapped, ValueType};
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct BookItem {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub page_count: Option<i32>,
    pub author_ref: String,
}

impl BookItem {
    pub fn new(id: &str, title: &str, publisher: &str, page_count: Option<i32>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            publisher: publisher.into(),
            page_count,
            author_ref: "a1".into(),
        }
    }

    pub fn get_schema() -> Schema {
        Schema::new([
            ("id", FieldSchema::new_ordered(ValueType::String)),
            ("title", FieldSchema::new_ordered(ValueType::String)),
            ("publisher", FieldSchema::new(ValueType::String)),
            ("pageCount", FieldSchema::new_ordered(ValueType::Integer)),
            ("authorRef", FieldSchema::new(ValueType::String)),
        ])
    }
}

impl SchemaMapped for BookItem {
    fn get_field(&self, name: &str) -> Value {
        match name {
            "id" => self.id.as_str().into(),
            "title" => self.title.as_str().into(),
            "publisher" => self.publisher.as_str().into(),
            "pageCount" => self.page_count.into(),
            "authorRef" => self.author_ref.as_str().into(),
            _ => Value::Null,
        }
    }
}
