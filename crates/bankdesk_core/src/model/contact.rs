//! Contact domain model for the address-book schema.
//!
//! # Invariants
//! - Only `name` is required.
//! - `created_at` is set by storage at insert and never rewritten.

use super::pick;
use super::validation::{require_text, ValidationError};
use super::RecordId;
use serde::{Deserialize, Deserializer, Serialize};

const ENTITY: &str = "contact";

/// Stored contact row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Contact {
    pub id: RecordId,
    pub name: String,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Payload for creating a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactCreate {
    pub name: String,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl ContactCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(ENTITY, "name", &self.name)
    }
}

/// Payload for updating a contact.
///
/// Optional columns take a double option: `None` keeps the stored value,
/// `Some(None)` clears it, `Some(Some(v))` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub address: Option<Option<String>>,
}

impl ContactUpdate {
    pub fn merge(&self, current: &Contact) -> ContactCreate {
        ContactCreate {
            name: pick(&self.name, &current.name),
            gender: pick_nullable(&self.gender, &current.gender),
            phone: pick_nullable(&self.phone, &current.phone),
            email: pick_nullable(&self.email, &current.email),
            address: pick_nullable(&self.address, &current.address),
        }
    }
}

/// A full payload rewrites every column, clearing the ones it leaves unset.
impl From<ContactCreate> for ContactUpdate {
    fn from(value: ContactCreate) -> Self {
        Self {
            name: Some(value.name),
            gender: Some(value.gender),
            phone: Some(value.phone),
            email: Some(value.email),
            address: Some(value.address),
        }
    }
}

fn pick_nullable(change: &Option<Option<String>>, current: &Option<String>) -> Option<String> {
    match change {
        Some(value) => value.clone(),
        None => current.clone(),
    }
}

/// A key present in the payload, even as `null`, is a change.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
