//! Department repository contract and SQLite implementation.
//!
//! # Invariants
//! - `find_all` is ordered by name ascending.
//! - Deleting a department still referenced by sellers fails on the
//!   foreign key and is reported as a store fault.

use crate::model::department::{Department, DepartmentId};
use crate::repo::error::{log_failure, DataAccessError, DataAccessResult};
use crate::repo::ensure_connection_ready;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for department CRUD operations.
pub trait DepartmentRepository {
    /// Inserts the department and stores the generated id back into it.
    fn insert(&self, department: &mut Department) -> DataAccessResult<DepartmentId>;
    /// Overwrites the name of the department with a matching id.
    fn update(&self, department: &Department) -> DataAccessResult<()>;
    fn delete_by_id(&self, id: DepartmentId) -> DataAccessResult<()>;
    /// Returns `None` when no department has this id.
    fn find_by_id(&self, id: DepartmentId) -> DataAccessResult<Option<Department>>;
    fn find_all(&self) -> DataAccessResult<Vec<Department>>;
}

/// SQLite-backed department repository.
pub struct SqliteDepartmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> DataAccessResult<Self> {
        ensure_connection_ready(conn, "department")?;
        Ok(Self { conn })
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    fn insert(&self, department: &mut Department) -> DataAccessResult<DepartmentId> {
        let id = insert_department(self.conn, department)
            .map_err(|err| log_failure("department_insert", err))?;
        department.id = Some(id);
        info!("event=department_insert module=repo status=ok department_id={id}");
        Ok(id)
    }

    fn update(&self, department: &Department) -> DataAccessResult<()> {
        let id = update_department(self.conn, department)
            .map_err(|err| log_failure("department_update", err))?;
        info!("event=department_update module=repo status=ok department_id={id}");
        Ok(())
    }

    fn delete_by_id(&self, id: DepartmentId) -> DataAccessResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM department WHERE Id = ?1;", [id])
            .map_err(|err| log_failure("department_delete", err.into()))?;
        if changed == 0 {
            return Err(log_failure(
                "department_delete",
                DataAccessError::NoRowsAffected("department delete"),
            ));
        }
        info!("event=department_delete module=repo status=ok department_id={id}");
        Ok(())
    }

    fn find_by_id(&self, id: DepartmentId) -> DataAccessResult<Option<Department>> {
        let department = self
            .conn
            .query_row(
                "SELECT Id, Name FROM department WHERE Id = ?1;",
                [id],
                department_from_row,
            )
            .optional()
            .map_err(|err| log_failure("department_find_by_id", err.into()))?;
        debug!(
            "event=department_find_by_id module=repo status=ok department_id={id} found={}",
            department.is_some()
        );
        Ok(department)
    }

    fn find_all(&self) -> DataAccessResult<Vec<Department>> {
        let departments = select_departments(self.conn)
            .map_err(|err| log_failure("department_find_all", err.into()))?;
        debug!(
            "event=department_find_all module=repo status=ok rows={}",
            departments.len()
        );
        Ok(departments)
    }
}

fn insert_department(
    conn: &Connection,
    department: &Department,
) -> DataAccessResult<DepartmentId> {
    department.validate()?;
    let changed = conn.execute(
        "INSERT INTO department (Name) VALUES (?1);",
        [department.name.as_str()],
    )?;
    if changed == 0 {
        return Err(DataAccessError::NoRowsAffected("department insert"));
    }
    Ok(conn.last_insert_rowid())
}

fn update_department(conn: &Connection, department: &Department) -> DataAccessResult<DepartmentId> {
    let id = department
        .id
        .ok_or(DataAccessError::MissingId("department.id"))?;
    department.validate()?;
    let changed = conn.execute(
        "UPDATE department SET Name = ?1 WHERE Id = ?2;",
        params![department.name.as_str(), id],
    )?;
    if changed == 0 {
        return Err(DataAccessError::NoRowsAffected("department update"));
    }
    Ok(id)
}

fn select_departments(conn: &Connection) -> rusqlite::Result<Vec<Department>> {
    let mut stmt = conn.prepare("SELECT Id, Name FROM department ORDER BY Name;")?;
    let departments = stmt
        .query_map([], department_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(departments)
}

fn department_from_row(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department::with_id(row.get("Id")?, row.get::<_, String>("Name")?))
}
