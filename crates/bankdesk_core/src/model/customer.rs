//! Customer domain model.

use super::pick;
use super::validation::{require_branch, require_text, ValidationError};
use super::{BranchId, RecordId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const ENTITY: &str = "customer";

/// Stored customer row joined with its home branch name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Customer {
    pub id: RecordId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub branch_id: BranchId,
    #[serde(default)]
    pub branch_name: Option<String>,
}

/// Payload for creating a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerCreate {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub branch_id: BranchId,
}

impl CustomerCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(ENTITY, "name", &self.name)?;
        require_text(ENTITY, "phone", &self.phone)?;
        require_text(ENTITY, "email", &self.email)?;
        require_text(ENTITY, "address", &self.address)?;
        require_branch(ENTITY, self.branch_id)?;
        Ok(())
    }
}

/// Payload for updating a customer; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub branch_id: Option<BranchId>,
}

impl CustomerUpdate {
    pub fn merge(&self, current: &Customer) -> CustomerCreate {
        CustomerCreate {
            name: pick(&self.name, &current.name),
            date_of_birth: self.date_of_birth.unwrap_or(current.date_of_birth),
            phone: pick(&self.phone, &current.phone),
            email: pick(&self.email, &current.email),
            address: pick(&self.address, &current.address),
            branch_id: self.branch_id.unwrap_or(current.branch_id),
        }
    }
}

impl From<CustomerCreate> for CustomerUpdate {
    fn from(value: CustomerCreate) -> Self {
        Self {
            name: Some(value.name),
            date_of_birth: Some(value.date_of_birth),
            phone: Some(value.phone),
            email: Some(value.email),
            address: Some(value.address),
            branch_id: Some(value.branch_id),
        }
    }
}
