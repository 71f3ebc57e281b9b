//! Write-side validation shared by every entity payload.

use super::BranchId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation errors raised before a payload reaches SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty after trimming.
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    /// A branch reference is not a positive row id.
    InvalidBranchReference { entity: &'static str, value: BranchId },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { entity, field } => {
                write!(f, "{entity}.{field} is required")
            }
            Self::InvalidBranchReference { entity, value } => {
                write!(f, "{entity}.branch_id must be a positive id, got {value}")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { entity, field });
    }
    Ok(())
}

pub(crate) fn require_branch(
    entity: &'static str,
    branch_id: BranchId,
) -> Result<(), ValidationError> {
    if branch_id <= 0 {
        return Err(ValidationError::InvalidBranchReference {
            entity,
            value: branch_id,
        });
    }
    Ok(())
}
