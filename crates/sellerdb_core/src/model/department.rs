//! Department domain model.
//!
//! # Invariants
//! - Equality and hashing use `id` only; two departments with the same id
//!   are the same department regardless of the name they carry.
//! - A department without `id` has not been persisted yet.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Store-generated department identifier.
pub type DepartmentId = i64;

/// Organizational unit that sellers belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    /// `None` until the store assigns one on insert.
    pub id: Option<DepartmentId>,
    pub name: String,
}

/// Write-time validation failure for [`Department`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentValidationError {
    BlankName,
}

impl Display for DepartmentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "department name must not be blank"),
        }
    }
}

impl Error for DepartmentValidationError {}

impl Department {
    /// Creates an unsaved department.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn with_id(id: DepartmentId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Id-only handle, enough to link a seller to an existing department.
    pub fn reference(id: DepartmentId) -> Self {
        Self::with_id(id, String::new())
    }

    /// Checks the department can be written to the store.
    pub fn validate(&self) -> Result<(), DepartmentValidationError> {
        if self.name.trim().is_empty() {
            return Err(DepartmentValidationError::BlankName);
        }
        Ok(())
    }
}

impl PartialEq for Department {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Department {}

impl Hash for Department {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "Department{{id={id}, name='{}'}}", self.name),
            None => write!(f, "Department{{id=null, name='{}'}}", self.name),
        }
    }
}
