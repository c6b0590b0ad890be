//! Seller repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over `seller` with the owning department joined in.
//! - Hydrate joined rows into sellers that share department instances.
//!
//! # Invariants
//! - Read paths always join `department`; a seller is never returned
//!   without its department.
//! - Multi-row reads build each distinct department once per call
//!   (see [`HydrationCache`]).
//! - List results are ordered by seller name ascending. Order among equal
//!   names is unspecified.

use crate::model::department::{Department, DepartmentId};
use crate::model::seller::{Seller, SellerId};
use crate::repo::error::{log_failure, DataAccessError, DataAccessResult};
use crate::repo::ensure_connection_ready;
use crate::repo::hydration::HydrationCache;
use chrono::NaiveDate;
use log::{debug, info};
use rusqlite::{params, Connection, Row, Rows};
use std::rc::Rc;

const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

const SELLER_SELECT_SQL: &str = "SELECT
    seller.*,
    department.Name AS DepName
FROM seller
INNER JOIN department ON seller.DepartmentId = department.Id";

/// Repository interface for seller CRUD operations.
pub trait SellerRepository {
    /// Inserts the seller and stores the generated id back into it.
    ///
    /// Requires `seller.department.id`.
    fn insert(&self, seller: &mut Seller) -> DataAccessResult<SellerId>;
    /// Overwrites every column of the seller matched by `seller.id`.
    fn update(&self, seller: &Seller) -> DataAccessResult<()>;
    fn delete_by_id(&self, id: SellerId) -> DataAccessResult<()>;
    /// Returns `None` when no seller has this id.
    fn find_by_id(&self, id: SellerId) -> DataAccessResult<Option<Seller>> {
        let seller =
            select_seller(self.conn, id).map_err(|err| log_failure("seller_find_by_id", err))?;
        debug!(
            "event=seller_find_by_id module=repo status=ok seller_id={id} found={}",
            seller.is_some()
        );
        Ok(seller)
    }

    fn find_all(&self) -> DataAccessResult<Vec<Seller>> {
        let sellers = select_sellers(self.conn, None)
            .map_err(|err| log_failure("seller_find_all", err))?;
        debug!(
            "event=seller_find_all module=repo status=ok rows={}",
            sellers.len()
        );
        Ok(sellers)
    }

    fn find_by_department(&self, department: &Department) -> DataAccessResult<Vec<Seller>> {
        let department_id = department
            .id
            .ok_or(DataAccessError::MissingId("department.id"))
            .map_err(|err| log_failure("seller_find_by_department", err))?;
        let sellers = select_sellers(self.conn, Some(department_id))
            .map_err(|err| log_failure("seller_find_by_department", err))?;
        debug!(
            "event=seller_find_by_department module=repo status=ok department_id={department_id} rows={}",
            sellers.len()
        );
        Ok(sellers)
    }
}

fn select_seller(conn: &Connection, id: SellerId) -> DataAccessResult<Option<Seller>> {
    let mut stmt = conn.prepare(&format!("{SELLER_SELECT_SQL} WHERE seller.Id = ?1;"))?;
    let mut rows = stmt.query([id])?;

    let seller = match rows.next()? {
        Some(row) => {
            let department = Rc::new(department_from_row(row)?);
            Some(seller_from_row(row, department)?)
        }
        None => None,
    };
    Ok(seller)
}

/// Lists sellers by name, all of them or only those of `department_id`.
fn select_sellers(
    conn: &Connection,
    department_id: Option<DepartmentId>,
) -> DataAccessResult<Vec<Seller>> {
    match department_id {
        Some(department_id) => {
            let mut stmt = conn.prepare(&format!(
                "{SELLER_SELECT_SQL}
                 WHERE seller.DepartmentId = ?1
                 ORDER BY seller.Name;"
            ))?;
            let rows = stmt.query([department_id])?;
            hydrate_sellers(rows)
        }
        None => {
            let mut stmt = conn.prepare(&format!("{SELLER_SELECT_SQL} ORDER BY seller.Name;"))?;
            let rows = stmt.query([])?;
            hydrate_sellers(rows)
        }
    }
}

/// Turns joined seller/department rows into sellers, in row order.
///
/// Rows naming the same `DepartmentId` receive clones of one `Rc`, so the
/// department columns are only decoded the first time an id is seen.
fn hydrate_sellers(mut rows: Rows<'_>) -> DataAccessResult<Vec<Seller>> {
    let mut cache = HydrationCache::new();
    let mut sellers = Vec::new();

    while let Some(row) = rows.next()? {
        let department_id: DepartmentId = row.get("DepartmentId")?;
        let department =
            cache.get_or_try_insert_with(department_id, || department_from_row(row))?;
        sellers.push(seller_from_row(row, department)?);
    }

    Ok(sellers)
}

fn insert_seller(conn: &Connection, seller: &Seller) -> DataAccessResult<SellerId> {
    seller.validate()?;
    let department_id = seller
        .department
        .id
        .ok_or(DataAccessError::MissingId("seller.department.id"))?;

    let changed = conn.execute(
        "INSERT INTO seller (Name, Email, BirthDate, BaseSalary, DepartmentId)
         VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            seller.name.as_str(),
            seller.email.as_str(),
            seller.birth_date.format(BIRTH_DATE_FORMAT).to_string(),
            seller.base_salary,
            department_id,
        ],
    )?;
    if changed == 0 {
        return Err(DataAccessError::NoRowsAffected("seller insert"));
    }

    Ok(conn.last_insert_rowid())
}

fn update_seller(conn: &Connection, seller: &Seller) -> DataAccessResult<SellerId> {
    let id = seller.id.ok_or(DataAccessError::MissingId("seller.id"))?;
    seller.validate()?;
    let department_id = seller
        .department
        .id
        .ok_or(DataAccessError::MissingId("seller.department.id"))?;

    let changed = conn.execute(
        "UPDATE seller
         SET
            Name = ?1,
            Email = ?2,
            BirthDate = ?3,
            BaseSalary = ?4,
            DepartmentId = ?5
         WHERE Id = ?6;",
        params![
            seller.name.as_str(),
            seller.email.as_str(),
            seller.birth_date.format(BIRTH_DATE_FORMAT).to_string(),
            seller.base_salary,
            department_id,
            id,
        ],
    )?;
    if changed == 0 {
        return Err(DataAccessError::NoRowsAffected("seller update"));
    }

    Ok(id)
}

fn department_from_row(row: &Row<'_>) -> DataAccessResult<Department> {
    Ok(Department::with_id(
        row.get("DepartmentId")?,
        row.get::<_, String>("DepName")?,
    ))
}

fn seller_from_row(row: &Row<'_>, department: Rc<Department>) -> DataAccessResult<Seller> {
    let birth_date_text: String = row.get("BirthDate")?;
    let birth_date =
        NaiveDate::parse_from_str(&birth_date_text, BIRTH_DATE_FORMAT).map_err(|_| {
            DataAccessError::InvalidData(format!(
                "invalid date `{birth_date_text}` in seller.BirthDate"
            ))
        })?;

    Ok(Seller {
        id: Some(row.get("Id")?),
        name: row.get("Name")?,
        email: row.get("Email")?,
        birth_date,
        base_salary: row.get("BaseSalary")?,
        department,
    })
}
