//! Seller domain model.
//!
//! # Invariants
//! - Every seller links to exactly one department.
//! - The department is shared through `Rc`; sellers hydrated by one query
//!   that point at the same department id hold the same allocation.

use crate::model::department::Department;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Store-generated seller identifier.
pub type SellerId = i64;

/// Sales person attached to a department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    /// `None` until the store assigns one on insert.
    pub id: Option<SellerId>,
    pub name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub base_salary: f64,
    pub department: Rc<Department>,
}

/// Write-time validation failure for [`Seller`].
#[derive(Debug, Clone, PartialEq)]
pub enum SellerValidationError {
    /// `BaseSalary` is a REAL column; NaN and infinities cannot round-trip.
    NonFiniteBaseSalary(f64),
}

impl Display for SellerValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteBaseSalary(value) => {
                write!(f, "base salary must be a finite amount, got {value}")
            }
        }
    }
}

impl Error for SellerValidationError {}

impl Seller {
    /// Creates an unsaved seller.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        birth_date: NaiveDate,
        base_salary: f64,
        department: impl Into<Rc<Department>>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            birth_date,
            base_salary,
            department: department.into(),
        }
    }

    /// Checks the seller can be written to the store.
    ///
    /// Field contents are otherwise left to the store; department linkage
    /// is checked by the repository, which needs the id.
    pub fn validate(&self) -> Result<(), SellerValidationError> {
        if !self.base_salary.is_finite() {
            return Err(SellerValidationError::NonFiniteBaseSalary(self.base_salary));
        }
        Ok(())
    }
}

impl Display for Seller {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = self
            .id
            .map_or_else(|| "null".to_string(), |id| id.to_string());
        write!(
            f,
            "Seller{{id={id}, name='{}', email='{}', birthDate={}, baseSalary={:.2}, department={}}}",
            self.name, self.email, self.birth_date, self.base_salary, self.department
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Seller, SellerValidationError};
    use crate::model::department::Department;
    use chrono::NaiveDate;

    fn sample() -> Seller {
        Seller::new(
            "Bob",
            "bob@x.com",
            NaiveDate::from_ymd_opt(1998, 3, 4).unwrap(),
            2000.0,
            Department::reference(2),
        )
    }

    #[test]
    fn valid_seller_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn accepts_empty_email_and_negative_salary() {
        let mut seller = sample();
        seller.email = String::new();
        seller.base_salary = -5.0;
        assert!(seller.validate().is_ok());
    }

    #[test]
    fn rejects_non_finite_salary() {
        let mut seller = sample();
        seller.base_salary = f64::NAN;
        assert!(matches!(
            seller.validate(),
            Err(SellerValidationError::NonFiniteBaseSalary(_))
        ));

        seller.base_salary = f64::INFINITY;
        assert_eq!(
            seller.validate(),
            Err(SellerValidationError::NonFiniteBaseSalary(f64::INFINITY))
        );
    }

    #[test]
    fn display_includes_department() {
        let mut seller = sample();
        seller.id = Some(7);
        let rendered = seller.to_string();
        assert!(rendered.starts_with("Seller{id=7, name='Bob'"));
        assert!(rendered.contains("birthDate=1998-03-04"));
        assert!(rendered.contains("baseSalary=2000.00"));
        assert!(rendered.contains("department=Department{id=2, name=''}"));
    }
}
