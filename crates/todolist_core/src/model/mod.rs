//! Todo item domain model.
//!
//! # Responsibility
//! - Define the persisted entity and its creation input.
//! - Define the transfer shape exchanged across the service boundary.
//!
//! # Invariants
//! - Every persisted item is identified by a store-assigned `TodoId`.
//! - Description uniqueness is compared through `description_key`.

pub mod todo_dto;
pub mod todo_item;
