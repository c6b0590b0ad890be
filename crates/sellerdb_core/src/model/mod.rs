//! Domain model for departments and the sellers that belong to them.
//!
//! # Invariants
//! - Entities are identified by store-generated integer ids.
//! - A seller always references exactly one department.

pub mod department;
pub mod seller;
