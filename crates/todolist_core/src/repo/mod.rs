//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract consumed by the item service.
//! - Isolate SQLite query details from business orchestration.
//!
//! # Invariants
//! - Repository writes enforce item validation before persistence.
//! - Repository APIs return semantic errors (`NotFound`,
//!   `DuplicateDescription`) in addition to DB transport errors.

pub mod todo_repo;
