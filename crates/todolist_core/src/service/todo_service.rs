//! Todo item lifecycle service.
//!
//! # Responsibility
//! - Provide list/get/create/update/complete entry points over DTOs.
//! - Enforce description uniqueness and the one-way completion transition.
//!
//! # Invariants
//! - No two items share a description under case-insensitive comparison.
//! - `update` uses full replacement semantics and excludes the item itself
//!   from the uniqueness check.
//! - Completing an already completed item is a conflict, not a no-op.
//! - The service performs no I/O besides repository calls.
//!
//! Checks and writes are separate repository calls; serializing concurrent
//! writers is left to the caller holding the connection and to the
//! description-key unique index.

use crate::model::todo_dto::TodoItemDto;
use crate::model::todo_item::TodoId;
use crate::repo::todo_repo::{RepoError, TodoRepository};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Which rule a conflicting request violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    /// Another item already uses this description (case-insensitive).
    DuplicateDescription(String),
    /// The item is already completed.
    AlreadyCompleted(TodoId),
}

impl Display for ConflictKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateDescription(description) => write!(
                f,
                "a todo item with the description `{description}` already exists"
            ),
            Self::AlreadyCompleted(id) => {
                write!(f, "todo item {id} is already marked as complete")
            }
        }
    }
}

/// Service error for todo use-cases.
#[derive(Debug)]
pub enum TodoServiceError {
    /// Referenced item does not exist.
    NotFound(TodoId),
    /// Uniqueness or state-transition rule violated.
    Conflict(ConflictKind),
    /// Persistence-layer failure, passed through unchanged.
    Repo(RepoError),
}

impl Display for TodoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "todo item not found: {id}"),
            Self::Conflict(kind) => write!(f, "{kind}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TodoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TodoServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::DuplicateDescription(description) => {
                Self::Conflict(ConflictKind::DuplicateDescription(description))
            }
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, TodoServiceError>;

/// Item service facade over repository implementations.
pub struct TodoService<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all items as DTOs in repository order.
    pub fn list(&self) -> ServiceResult<Vec<TodoItemDto>> {
        let items = self.repo.list_items()?;
        Ok(items.into_iter().map(TodoItemDto::from).collect())
    }

    /// Gets one item by id.
    pub fn get_by_id(&self, id: TodoId) -> ServiceResult<TodoItemDto> {
        self.repo
            .get_item(id)?
            .map(TodoItemDto::from)
            .ok_or(TodoServiceError::NotFound(id))
    }

    /// Creates an item and returns the input DTO carrying the assigned id.
    ///
    /// # Contract
    /// - Rejects a description already used by any item (case-insensitive).
    /// - `is_completed` is taken from the DTO.
    /// - Performs exactly one repository write.
    pub fn create(&self, dto: TodoItemDto) -> ServiceResult<TodoItemDto> {
        if self.repo.find_by_description(&dto.description)?.is_some() {
            return Err(TodoServiceError::Conflict(
                ConflictKind::DuplicateDescription(dto.description),
            ));
        }

        let new_item = dto.to_new_item();
        let id = self.repo.create_item(&new_item)?;
        Ok(TodoItemDto::from(new_item.into_item(id)))
    }

    /// Replaces description and completion flag of an existing item.
    ///
    /// The DTO's own `id` is ignored.
    pub fn update(&self, id: TodoId, dto: &TodoItemDto) -> ServiceResult<()> {
        if !self.repo.item_exists(id)? {
            return Err(TodoServiceError::NotFound(id));
        }

        if let Some(existing) = self.repo.find_by_description(&dto.description)? {
            if existing.id != id {
                return Err(TodoServiceError::Conflict(
                    ConflictKind::DuplicateDescription(dto.description.clone()),
                ));
            }
        }

        self.repo.update_item(&dto.to_item(id))?;
        Ok(())
    }

    /// Completes a pending item.
    pub fn mark_complete(&self, id: TodoId) -> ServiceResult<()> {
        let mut item = self
            .repo
            .get_item(id)?
            .ok_or(TodoServiceError::NotFound(id))?;

        if !item.complete() {
            return Err(TodoServiceError::Conflict(ConflictKind::AlreadyCompleted(
                id,
            )));
        }

        self.repo.update_item(&item)?;
        Ok(())
    }
}
