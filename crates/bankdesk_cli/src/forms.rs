//! Raw form input and presentation-layer validation.
//!
//! # Responsibility
//! - Hold field values exactly as typed (all optional strings).
//! - Turn them into typed create/update payloads, enforcing the form rules:
//!   required fields present, ISO dates, numeric branch ids.
//!
//! # Invariants
//! - Every value is trimmed before it is checked or stored.
//! - A full save requires every required field; a partial update only checks
//!   the fields that were supplied.

use bankdesk_core::{
    BranchCreate, BranchId, BranchUpdate, ContactCreate, ContactUpdate, CustomerCreate,
    CustomerUpdate, EmployeeCreate, EmployeeUpdate,
};
use chrono::NaiveDate;
use clap::Args;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    MissingFields,
    InvalidDate(String),
    InvalidBranchId(String),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields => write!(f, "All fields are required"),
            Self::InvalidDate(_) => write!(f, "Invalid date format. Use YYYY-MM-DD"),
            Self::InvalidBranchId(value) => {
                write!(f, "Branch ID must be a positive number, got `{value}`")
            }
        }
    }
}

impl Error for FormError {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct BranchForm {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
}

impl BranchForm {
    pub fn to_create(&self) -> Result<BranchCreate, FormError> {
        Ok(BranchCreate {
            name: required(&self.name)?,
            address: required(&self.address)?,
            city: required(&self.city)?,
            state: required(&self.state)?,
            postal_code: required(&self.postal_code)?,
        })
    }

    pub fn to_update(&self) -> Result<BranchUpdate, FormError> {
        Ok(BranchUpdate {
            name: supplied(&self.name)?,
            address: supplied(&self.address)?,
            city: supplied(&self.city)?,
            state: supplied(&self.state)?,
            postal_code: supplied(&self.postal_code)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct EmployeeForm {
    #[arg(long)]
    pub name: Option<String>,
    /// Date of birth, YYYY-MM-DD.
    #[arg(long)]
    pub date_of_birth: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    #[arg(long)]
    pub branch_id: Option<String>,
}

impl EmployeeForm {
    pub fn to_create(&self) -> Result<EmployeeCreate, FormError> {
        let name = required(&self.name)?;
        let date_of_birth = required(&self.date_of_birth)?;
        let phone = required(&self.phone)?;
        let email = required(&self.email)?;
        let position = required(&self.position)?;
        let branch_id = required(&self.branch_id)?;

        Ok(EmployeeCreate {
            name,
            date_of_birth: parse_date(&date_of_birth)?,
            phone,
            email,
            position,
            branch_id: parse_branch_id(&branch_id)?,
        })
    }

    pub fn to_update(&self) -> Result<EmployeeUpdate, FormError> {
        Ok(EmployeeUpdate {
            name: supplied(&self.name)?,
            date_of_birth: supplied(&self.date_of_birth)?
                .map(|value| parse_date(&value))
                .transpose()?,
            phone: supplied(&self.phone)?,
            email: supplied(&self.email)?,
            position: supplied(&self.position)?,
            branch_id: supplied(&self.branch_id)?
                .map(|value| parse_branch_id(&value))
                .transpose()?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct CustomerForm {
    #[arg(long)]
    pub name: Option<String>,
    /// Date of birth, YYYY-MM-DD.
    #[arg(long)]
    pub date_of_birth: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub branch_id: Option<String>,
}

impl CustomerForm {
    pub fn to_create(&self) -> Result<CustomerCreate, FormError> {
        let name = required(&self.name)?;
        let date_of_birth = required(&self.date_of_birth)?;
        let phone = required(&self.phone)?;
        let email = required(&self.email)?;
        let address = required(&self.address)?;
        let branch_id = required(&self.branch_id)?;

        Ok(CustomerCreate {
            name,
            date_of_birth: parse_date(&date_of_birth)?,
            phone,
            email,
            address,
            branch_id: parse_branch_id(&branch_id)?,
        })
    }

    pub fn to_update(&self) -> Result<CustomerUpdate, FormError> {
        Ok(CustomerUpdate {
            name: supplied(&self.name)?,
            date_of_birth: supplied(&self.date_of_birth)?
                .map(|value| parse_date(&value))
                .transpose()?,
            phone: supplied(&self.phone)?,
            email: supplied(&self.email)?,
            address: supplied(&self.address)?,
            branch_id: supplied(&self.branch_id)?
                .map(|value| parse_branch_id(&value))
                .transpose()?,
        })
    }
}

/// Contact form: only the name is required.
///
/// Blank optional fields are unset on add; on update a supplied blank value
/// clears the stored one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct ContactForm {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

impl ContactForm {
    pub fn to_create(&self) -> Result<ContactCreate, FormError> {
        Ok(ContactCreate {
            name: required(&self.name)?,
            gender: optional(&self.gender),
            phone: optional(&self.phone),
            email: optional(&self.email),
            address: optional(&self.address),
        })
    }

    pub fn to_update(&self) -> Result<ContactUpdate, FormError> {
        Ok(ContactUpdate {
            name: supplied(&self.name)?,
            gender: clearable(&self.gender),
            phone: clearable(&self.phone),
            email: clearable(&self.email),
            address: clearable(&self.address),
        })
    }
}

fn required(value: &Option<String>) -> Result<String, FormError> {
    optional(value).ok_or(FormError::MissingFields)
}

/// Absent stays absent; present-but-blank is an error.
fn supplied(value: &Option<String>) -> Result<Option<String>, FormError> {
    match value {
        None => Ok(None),
        Some(_) => required(value).map(Some),
    }
}

/// Absent stays absent; present-but-blank clears.
fn clearable(value: &Option<String>) -> Option<Option<String>> {
    value.as_ref().map(|_| optional(value))
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

fn parse_date(value: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| FormError::InvalidDate(value.to_string()))
}

fn parse_branch_id(value: &str) -> Result<BranchId, FormError> {
    match value.parse::<BranchId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(FormError::InvalidBranchId(value.to_string())),
    }
}
