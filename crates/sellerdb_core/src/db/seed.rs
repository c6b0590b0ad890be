//! Demo data set for local runs and examples.

use super::DbResult;
use log::info;
use rusqlite::Connection;

const SEED_SQL: &str = include_str!("seed.sql");

/// Loads four departments and six sellers when both tables are empty.
///
/// Returns `true` when rows were inserted, `false` when the database already
/// held data and was left untouched. The load runs in one transaction.
pub fn seed_demo_data(conn: &mut Connection) -> DbResult<bool> {
    let existing: i64 = conn.query_row(
        "SELECT (SELECT COUNT(*) FROM department) + (SELECT COUNT(*) FROM seller);",
        [],
        |row| row.get(0),
    )?;
    if existing > 0 {
        info!("event=db_seed module=db status=skipped existing_rows={existing}");
        return Ok(false);
    }

    let tx = conn.transaction()?;
    tx.execute_batch(SEED_SQL)?;
    tx.commit()?;

    info!("event=db_seed module=db status=ok");
    Ok(true)
}
