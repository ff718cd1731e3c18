//! Todo item entity.
//!
//! # Responsibility
//! - Define the canonical persisted record for one todo item.
//! - Expose the one-way completion state machine.
//!
//! # Invariants
//! - `id` is assigned by the store on creation and never changes afterwards.
//! - `description` is never empty or whitespace-only.
//! - `is_completed` only moves from `false` to `true` through completion.
//! - Descriptions compare case-insensitively through `description_key`, a
//!   context-free uppercase mapping.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identifier of a todo item.
pub type TodoId = i64;

/// Completion state derived from `TodoItem::is_completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionState {
    /// Created and still open.
    Pending,
    /// Completed. Terminal.
    Completed,
}

/// Validation errors for todo item write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    EmptyDescription,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "todo description cannot be empty"),
        }
    }
}

impl Error for TodoValidationError {}

/// Persisted todo item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoId,
    pub description: String,
    pub is_completed: bool,
}

impl TodoItem {
    /// Checks write-path invariants before persistence.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        validate_description(&self.description)
    }

    /// Returns the completion state of this item.
    pub fn status(&self) -> CompletionState {
        if self.is_completed {
            CompletionState::Completed
        } else {
            CompletionState::Pending
        }
    }

    /// Moves a pending item to `Completed`.
    ///
    /// Returns `false` and leaves the item untouched when it is already
    /// completed; completion never fires twice.
    pub fn complete(&mut self) -> bool {
        match self.status() {
            CompletionState::Pending => {
                self.is_completed = true;
                true
            }
            CompletionState::Completed => false,
        }
    }

    /// Key used for case-insensitive description comparison.
    pub fn description_key(&self) -> String {
        description_key(&self.description)
    }
}

/// Creation input for a todo item whose id is not yet assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodoItem {
    pub description: String,
    pub is_completed: bool,
}

impl NewTodoItem {
    /// Creates a pending item input.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            is_completed: false,
        }
    }

    /// Checks write-path invariants before persistence.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        validate_description(&self.description)
    }

    /// Attaches the store-assigned id.
    pub fn into_item(self, id: TodoId) -> TodoItem {
        TodoItem {
            id,
            description: self.description,
            is_completed: self.is_completed,
        }
    }
}

/// Normalizes a description for case-insensitive equality.
///
/// The key is the full uppercase mapping of every char. Uppercasing has no
/// context rules, so `"ΟΔΟΣ"`, `"οδοσ"` and `"οδος"` share one key.
/// Surrounding whitespace is kept.
pub fn description_key(description: &str) -> String {
    description.to_uppercase()
}

fn validate_description(description: &str) -> Result<(), TodoValidationError> {
    if description.trim().is_empty() {
        return Err(TodoValidationError::EmptyDescription);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{description_key, CompletionState, NewTodoItem, TodoItem, TodoValidationError};

    #[test]
    fn complete_fires_once() {
        let mut item = NewTodoItem::new("Buy milk").into_item(1);
        assert_eq!(item.status(), CompletionState::Pending);

        assert!(item.complete());
        assert_eq!(item.status(), CompletionState::Completed);

        assert!(!item.complete());
        assert!(item.is_completed);
    }

    #[test]
    fn validate_rejects_blank_description() {
        let item = TodoItem {
            id: 1,
            description: "   ".to_string(),
            is_completed: false,
        };
        assert_eq!(item.validate(), Err(TodoValidationError::EmptyDescription));
        assert_eq!(
            NewTodoItem::new("").validate(),
            Err(TodoValidationError::EmptyDescription)
        );
    }

    #[test]
    fn description_key_ignores_case_only() {
        assert_eq!(description_key("Buy MILK"), description_key("buy milk"));
        assert_ne!(description_key("buy milk "), description_key("buy milk"));
        assert_eq!(description_key("äpfel"), "ÄPFEL");
    }

    #[test]
    fn description_key_matches_greek_sigma_forms() {
        assert_eq!(description_key("ΟΔΟΣ"), description_key("οδοσ"));
        assert_eq!(description_key("ΟΔΟΣ"), description_key("οδος"));
    }
}
