//! Data access layer for sellers and the departments they belong to.
//!
//! Repositories borrow one SQLite connection opened through [`db::open_db`]
//! or [`db::open_db_in_memory`] and are built by the caller; there is no
//! global factory.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{open_db, open_db_in_memory, seed_demo_data, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::department::{Department, DepartmentId, DepartmentValidationError};
pub use model::seller::{Seller, SellerId, SellerValidationError};
pub use repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
pub use repo::hydration::HydrationCache;
pub use repo::seller_repo::{SellerRepository, SqliteSellerRepository};
pub use repo::{DataAccessError, DataAccessResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
