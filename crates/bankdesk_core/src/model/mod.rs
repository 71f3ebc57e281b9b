//! Typed entity records for the bank and contact schemas.
//!
//! # Responsibility
//! - Define one stored record, one create payload and one update payload per
//!   entity.
//! - Reject unknown fields at the deserialization boundary.
//!
//! # Invariants
//! - Record ids are assigned by the storage engine and never reassigned.
//! - Update payloads merge onto the stored record; omitted fields keep their
//!   stored value.

pub mod branch;
pub mod contact;
pub mod customer;
pub mod employee;
pub mod validation;

/// Engine-assigned row identifier shared by every entity table.
pub type RecordId = i64;

/// Opaque reference to a row in `branches`.
pub type BranchId = RecordId;

/// Takes the supplied change, or the stored value when the change is absent.
pub(crate) fn pick(change: &Option<String>, current: &str) -> String {
    change.clone().unwrap_or_else(|| current.to_string())
}
