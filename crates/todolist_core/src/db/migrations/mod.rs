//! SQLite migration registry and executor.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Pending migrations apply in one transaction and the last applied version
//!   is mirrored to `PRAGMA user_version`.
//! - A migration's `after` step runs inside the same transaction, right after
//!   its SQL batch.

use crate::db::{DbError, DbResult};
use crate::model::todo_item::description_key;
use rusqlite::{params, Connection, Transaction};

#[derive(Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
    after: Option<fn(&Transaction<'_>) -> DbResult<()>>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("0001_todo_items.sql"),
        after: None,
    },
    Migration {
        version: 2,
        sql: include_str!("0002_rekey_descriptions.sql"),
        after: Some(rekey_descriptions),
    },
];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS
        .iter()
        .filter(|migration| migration.version > current_version)
    {
        tx.execute_batch(migration.sql)?;
        if let Some(after) = migration.after {
            after(&tx)?;
        }
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    Ok(())
}

/// Recomputes every stored `description_key` with the current key function
/// and restores the unique index over it.
fn rekey_descriptions(tx: &Transaction<'_>) -> DbResult<()> {
    let rows = {
        let mut stmt = tx.prepare("SELECT id, description FROM todo_items;")?;
        let mapped = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;
        mapped.collect::<rusqlite::Result<Vec<_>>>()?
    };

    let mut update = tx.prepare("UPDATE todo_items SET description_key = ?1 WHERE id = ?2;")?;
    for (id, description) in &rows {
        update.execute(params![description_key(description), id])?;
    }

    tx.execute_batch(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_todo_items_description_key
            ON todo_items (description_key);",
    )?;
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
