//! Book management.
//!
//! Provides CRUD operations and multi-criteria search for books:
//! - Command handlers for create, update, and delete operations
//! - Query manager that populates book authors
//! - Search filter compiler
//! - Repository abstraction for data persistence

/// Book creation command handler.
pub mod create_book_command;

/// Book deletion command handler.
pub mod delete_book_command;

/// Resource mediator for books.
pub mod mediator;

/// Book query manager for data retrieval.
pub mod query_manager;

/// Book repository abstraction and implementations.
pub mod repository;

/// Search criteria and filter compilation.
pub mod search;

/// Book update command handler.
pub mod update_book_command;
