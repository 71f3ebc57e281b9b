//! Employee domain model.
//!
//! # Invariants
//! - `branch_id` references a branch row; SQLite enforces it with
//!   `foreign_keys=ON`.
//! - `branch_name` is read-only: filled from the referenced branch on reads
//!   and never written.

use super::pick;
use super::validation::{require_branch, require_text, ValidationError};
use super::{BranchId, RecordId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const ENTITY: &str = "employee";

/// Stored employee row joined with its branch name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Employee {
    pub id: RecordId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub email: String,
    pub position: String,
    pub branch_id: BranchId,
    /// `None` when the referenced branch row is gone.
    #[serde(default)]
    pub branch_name: Option<String>,
}

/// Payload for creating an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeeCreate {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub email: String,
    pub position: String,
    pub branch_id: BranchId,
}

impl EmployeeCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(ENTITY, "name", &self.name)?;
        require_text(ENTITY, "phone", &self.phone)?;
        require_text(ENTITY, "email", &self.email)?;
        require_text(ENTITY, "position", &self.position)?;
        require_branch(ENTITY, self.branch_id)?;
        Ok(())
    }
}

/// Payload for updating an employee; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub branch_id: Option<BranchId>,
}

impl EmployeeUpdate {
    pub fn merge(&self, current: &Employee) -> EmployeeCreate {
        EmployeeCreate {
            name: pick(&self.name, &current.name),
            date_of_birth: self.date_of_birth.unwrap_or(current.date_of_birth),
            phone: pick(&self.phone, &current.phone),
            email: pick(&self.email, &current.email),
            position: pick(&self.position, &current.position),
            branch_id: self.branch_id.unwrap_or(current.branch_id),
        }
    }
}

impl From<EmployeeCreate> for EmployeeUpdate {
    fn from(value: EmployeeCreate) -> Self {
        Self {
            name: Some(value.name),
            date_of_birth: Some(value.date_of_birth),
            phone: Some(value.phone),
            email: Some(value.email),
            position: Some(value.position),
            branch_id: Some(value.branch_id),
        }
    }
}
