//! Todo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the lookup and write APIs over `todo_items` storage.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `validate()` before SQL mutations.
//! - `description_key` is written alongside `description` on every write.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::todo_item::{description_key, NewTodoItem, TodoId, TodoItem, TodoValidationError};
use rusqlite::{ffi, params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TODO_SELECT_SQL: &str = "SELECT
    id,
    description,
    is_completed
FROM todo_items";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for todo persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TodoValidationError),
    Db(DbError),
    NotFound(TodoId),
    /// Another row already holds the same description key.
    DuplicateDescription(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "todo item not found: {id}"),
            Self::DuplicateDescription(description) => {
                write!(f, "todo description already stored: `{description}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateDescription(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<TodoValidationError> for RepoError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface consumed by the item service.
pub trait TodoRepository {
    /// Returns all items in insertion order.
    fn list_items(&self) -> RepoResult<Vec<TodoItem>>;
    fn get_item(&self, id: TodoId) -> RepoResult<Option<TodoItem>>;
    /// Case-insensitive exact match on `description`.
    fn find_by_description(&self, description: &str) -> RepoResult<Option<TodoItem>>;
    fn item_exists(&self, id: TodoId) -> RepoResult<bool>;
    /// Persists a new item and returns the store-assigned id.
    fn create_item(&self, item: &NewTodoItem) -> RepoResult<TodoId>;
    /// Replaces all stored fields of the item with the same id.
    fn update_item(&self, item: &TodoItem) -> RepoResult<()>;
}

/// SQLite-backed todo repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn list_items(&self) -> RepoResult<Vec<TodoItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_todo_row(row)?);
        }

        Ok(items)
    }

    fn get_item(&self, id: TodoId) -> RepoResult<Option<TodoItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_todo_row(row)?));
        }

        Ok(None)
    }

    fn find_by_description(&self, description: &str) -> RepoResult<Option<TodoItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} WHERE description_key = ?1;"))?;

        let mut rows = stmt.query([description_key(description)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_todo_row(row)?));
        }

        Ok(None)
    }

    fn item_exists(&self, id: TodoId) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row("SELECT 1 FROM todo_items WHERE id = ?1;", [id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    fn create_item(&self, item: &NewTodoItem) -> RepoResult<TodoId> {
        item.validate()?;

        self.conn
            .execute(
                "INSERT INTO todo_items (
                    description,
                    description_key,
                    is_completed
                ) VALUES (?1, ?2, ?3);",
                params![
                    item.description.as_str(),
                    description_key(&item.description),
                    bool_to_int(item.is_completed),
                ],
            )
            .map_err(|err| map_write_error(err, &item.description))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_item(&self, item: &TodoItem) -> RepoResult<()> {
        item.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE todo_items
                 SET
                    description = ?1,
                    description_key = ?2,
                    is_completed = ?3,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?4;",
                params![
                    item.description.as_str(),
                    item.description_key(),
                    bool_to_int(item.is_completed),
                    item.id,
                ],
            )
            .map_err(|err| map_write_error(err, &item.description))?;

        if changed == 0 {
            return Err(RepoError::NotFound(item.id));
        }

        Ok(())
    }
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<TodoItem> {
    let id: TodoId = row.get("id")?;

    let is_completed = match row.get::<_, i64>("is_completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_completed value `{other}` in todo_items.is_completed (id={id})"
            )));
        }
    };

    let item = TodoItem {
        id,
        description: row.get("description")?,
        is_completed,
    };
    item.validate().map_err(|err| {
        RepoError::InvalidData(format!("{err} in todo_items.description (id={id})"))
    })?;
    Ok(item)
}

fn map_write_error(err: rusqlite::Error, description: &str) -> RepoError {
    if is_unique_violation(&err) {
        return RepoError::DuplicateDescription(description.to_string());
    }
    err.into()
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
