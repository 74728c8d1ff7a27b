//! # Bookshelf query
//!
//! Storage-agnostic query primitives: field values, schemas, document
//! filters, orderings and the options a lazy find carries until it is
//! executed.

pub mod filter;
pub mod ordering;
pub mod query;
pub mod schema;
pub mod value;

#[cfg(test)]
pub(crate) mod testing;
