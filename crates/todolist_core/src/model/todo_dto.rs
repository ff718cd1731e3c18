//! Transfer shape for the service boundary.
//!
//! # Responsibility
//! - Mirror `TodoItem` fields for callers without exposing the entity.
//! - Provide total mappings between entity and transfer shapes.
//!
//! # Invariants
//! - JSON field names are camelCase (`isCompleted`).
//! - Absent `id` / `isCompleted` in input default to `0` / `false`.

use crate::model::todo_item::{NewTodoItem, TodoId, TodoItem};
use serde::{Deserialize, Serialize};

/// Data-transfer shape for one todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItemDto {
    /// Store id. Ignored on input; `0` until the item is persisted.
    #[serde(default)]
    pub id: TodoId,
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl TodoItemDto {
    /// Maps this transfer value into creation input, dropping `id`.
    pub fn to_new_item(&self) -> NewTodoItem {
        NewTodoItem {
            description: self.description.clone(),
            is_completed: self.is_completed,
        }
    }

    /// Maps this transfer value onto the entity stored under `id`.
    pub fn to_item(&self, id: TodoId) -> TodoItem {
        TodoItem {
            id,
            description: self.description.clone(),
            is_completed: self.is_completed,
        }
    }
}

impl From<&TodoItem> for TodoItemDto {
    fn from(item: &TodoItem) -> Self {
        Self {
            id: item.id,
            description: item.description.clone(),
            is_completed: item.is_completed,
        }
    }
}

impl From<TodoItem> for TodoItemDto {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            description: item.description,
            is_completed: item.is_completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TodoItemDto;

    #[test]
    fn serializes_with_camel_case_fields() {
        let dto = TodoItemDto {
            id: 7,
            description: "Walk dog".to_string(),
            is_completed: true,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["description"], "Walk dog");
        assert_eq!(json["isCompleted"], true);
    }

    #[test]
    fn missing_id_and_completion_default() {
        let dto: TodoItemDto = serde_json::from_str(r#"{"description":"Read"}"#).unwrap();
        assert_eq!(dto.id, 0);
        assert!(!dto.is_completed);
    }

    #[test]
    fn missing_description_is_rejected() {
        let result: Result<TodoItemDto, _> = serde_json::from_str(r#"{"isCompleted":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn to_item_uses_given_id() {
        let dto = TodoItemDto {
            id: 99,
            description: "Pay rent".to_string(),
            is_completed: false,
        };
        let item = dto.to_item(3);
        assert_eq!(item.id, 3);
        assert_eq!(item.description, "Pay rent");
    }
}
