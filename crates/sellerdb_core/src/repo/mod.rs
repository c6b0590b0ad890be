//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define the data access contracts for departments and sellers.
//! - Keep SQL text, parameter binding and row mapping inside this boundary.
//!
//! # Invariants
//! - Write paths validate entities before any SQL mutation.
//! - Every failure is reported as [`DataAccessError`].
//! - Statements and row cursors are scoped to the call that opened them.

pub mod department_repo;
pub mod error;
pub mod hydration;
pub mod seller_repo;

pub use error::{DataAccessError, DataAccessResult};

use crate::db::migrations::{current_version, latest_version};
use rusqlite::Connection;

/// Rejects connections that were not opened through `db::open_db*`.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    table: &'static str,
) -> DataAccessResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version != expected_version {
        return Err(DataAccessError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(DataAccessError::MissingRequiredTable(table));
    }

    Ok(())
}
