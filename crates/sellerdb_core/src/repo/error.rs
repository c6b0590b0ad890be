//! Error type shared by every repository operation.
//!
//! # Invariants
//! - Store faults are never split by cause: constraint violations, I/O and
//!   malformed statements all surface as `Db` carrying the original message.
//! - "Not found" on reads is `Ok(None)` / an empty list, never an error.

use crate::db::DbError;
use crate::model::department::DepartmentValidationError;
use crate::model::seller::SellerValidationError;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DataAccessResult<T> = Result<T, DataAccessError>;

/// Failure of a data access call.
#[derive(Debug)]
pub enum DataAccessError {
    /// Underlying SQLite fault.
    Db(DbError),
    /// A mutation matched zero rows.
    NoRowsAffected(&'static str),
    /// The operation needs an identifier the entity does not carry.
    MissingId(&'static str),
    /// Seller state rejected before reaching the store.
    InvalidSeller(SellerValidationError),
    /// Department state rejected before reaching the store.
    InvalidDepartment(DepartmentValidationError),
    /// Connection schema is not at the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Persisted row cannot be decoded.
    InvalidData(String),
}

impl Display for DataAccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NoRowsAffected(operation) => {
                write!(f, "unexpected error: no rows affected by {operation}")
            }
            Self::MissingId(field) => write!(f, "`{field}` must be set for this operation"),
            Self::InvalidSeller(err) => write!(f, "{err}"),
            Self::InvalidDepartment(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for DataAccessError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidSeller(err) => Some(err),
            Self::InvalidDepartment(err) => Some(err),
            Self::NoRowsAffected(_)
            | Self::MissingId(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for DataAccessError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for DataAccessError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<SellerValidationError> for DataAccessError {
    fn from(value: SellerValidationError) -> Self {
        Self::InvalidSeller(value)
    }
}

impl From<DepartmentValidationError> for DataAccessError {
    fn from(value: DepartmentValidationError) -> Self {
        Self::InvalidDepartment(value)
    }
}

/// Logs a failed repository call and hands the error back unchanged.
pub(crate) fn log_failure(event: &'static str, err: DataAccessError) -> DataAccessError {
    error!("event={event} module=repo status=error error={err}");
    err
}
