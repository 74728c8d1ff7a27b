//! Model definitions for the bookshelf service.
//!
//! Authors and books, their identifiers, the payloads used to create and
//! update them, and the validation rules applied before anything is written.

/// Author model definitions.
pub mod author;
/// Book model definitions.
pub mod book;
/// Sortable identifiers.
pub mod id;
/// Write-time validation errors.
pub mod validation;
