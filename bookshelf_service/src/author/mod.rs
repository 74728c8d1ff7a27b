//! Author management.
//!
//! Commands for create, update and delete, a query manager for reads, and the
//! mediator exposing them through the uniform resource contract.

/// Author creation command handler.
pub mod create_author_command;

/// Author deletion command handler.
pub mod delete_author_command;

/// Resource mediator for authors.
pub mod mediator;

/// Author query manager for data retrieval.
pub mod query_manager;

/// Author repository abstraction and implementations.
pub mod repository;

/// Author update command handler.
pub mod update_author_command;
