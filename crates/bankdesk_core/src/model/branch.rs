//! Branch domain model.
//!
//! # Invariants
//! - Every text field is required on save.
//! - `id` is assigned by storage at creation.

use super::validation::{require_text, ValidationError};
use super::{pick, RecordId};
use serde::{Deserialize, Serialize};

const ENTITY: &str = "branch";

/// Stored branch row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Branch {
    pub id: RecordId,
    /// Display key; lists are sorted by it.
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// Payload for creating a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BranchCreate {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl BranchCreate {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            city: city.into(),
            state: state.into(),
            postal_code: postal_code.into(),
        }
    }

    /// Checks every required field is non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(ENTITY, "name", &self.name)?;
        require_text(ENTITY, "address", &self.address)?;
        require_text(ENTITY, "city", &self.city)?;
        require_text(ENTITY, "state", &self.state)?;
        require_text(ENTITY, "postal_code", &self.postal_code)?;
        Ok(())
    }
}

/// Payload for updating a branch; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BranchUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

impl BranchUpdate {
    /// Produces the full row to write, taking omitted fields from `current`.
    pub fn merge(&self, current: &Branch) -> BranchCreate {
        BranchCreate {
            name: pick(&self.name, &current.name),
            address: pick(&self.address, &current.address),
            city: pick(&self.city, &current.city),
            state: pick(&self.state, &current.state),
            postal_code: pick(&self.postal_code, &current.postal_code),
        }
    }
}

impl From<BranchCreate> for BranchUpdate {
    fn from(value: BranchCreate) -> Self {
        Self {
            name: Some(value.name),
            address: Some(value.address),
            city: Some(value.city),
            state: Some(value.state),
            postal_code: Some(value.postal_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Branch, BranchCreate, BranchUpdate};

    fn elm_street() -> Branch {
        Branch {
            id: 1,
            name: "Elm St".to_string(),
            address: "123 Elm".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            postal_code: "62704".to_string(),
        }
    }

    #[test]
    fn merge_keeps_omitted_fields() {
        let update = BranchUpdate {
            state: Some("IN".to_string()),
            ..BranchUpdate::default()
        };
        let merged = update.merge(&elm_street());
        assert_eq!(
            merged,
            BranchCreate::new("Elm St", "123 Elm", "Springfield", "IN", "62704")
        );
    }

    #[test]
    fn validate_rejects_blank_postal_code() {
        let err = BranchCreate::new("Elm St", "123 Elm", "Springfield", "IL", " ")
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "branch.postal_code is required");
    }

    #[test]
    fn create_payload_rejects_unknown_and_missing_fields() {
        let unknown = serde_json::from_str::<BranchCreate>(
            r#"{"name":"a","address":"b","city":"c","state":"d","postal_code":"e","zip":"f"}"#,
        );
        assert!(unknown.is_err());

        let missing = serde_json::from_str::<BranchCreate>(r#"{"name":"a","address":"b"}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn update_payload_treats_missing_fields_as_unchanged() {
        let update: BranchUpdate =
            serde_json::from_str(r#"{"city":"Peoria"}"#).expect("partial update should parse");
        assert_eq!(update.city.as_deref(), Some("Peoria"));
        assert!(update.name.is_none());
    }
}
