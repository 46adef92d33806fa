//! Request inputs and view contexts for the pet pages.

use crate::db::handlers::PetFilter;
use crate::db::models::{
    owners::Owner,
    pet_types::PetType,
    pets::PetDetails,
};
use crate::errors::{Error, Result};
use crate::names::{join_owner_name, split_owner_name};
use crate::records::PetRecord;
use crate::types::OwnerId;
use crate::validation::{is_valid_age, parse_age, required};
use serde::{Deserialize, Serialize};

/// Form body shared by `POST /create` and `POST /edit/{id}`.
///
/// Every field is optional at the extractor level so that a missing field is reported as invalid
/// input (400) rather than an extractor rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetForm {
    pub pet_name: Option<String>,
    pub age: Option<String>,
    pub owner_name: Option<String>,
    pub type_id: Option<String>,
}

impl PetForm {
    /// Check presence of every field and the age, then split the owner name.
    ///
    /// An age that is valid but wider than the `BIGINT` age column cannot be stored; like any
    /// other storage failure it is reported as an internal error rather than invalid input.
    pub fn validate(&self) -> Result<PetRecord> {
        let pet_name = required(self.pet_name.as_deref());
        let age = self.age.as_deref().filter(|raw| is_valid_age(raw));
        let owner_name = required(self.owner_name.as_deref());
        let type_id = required(self.type_id.as_deref()).and_then(|raw| raw.parse().ok()).filter(|id: &i32| *id > 0);

        match (pet_name, age, owner_name, type_id) {
            (Some(pet_name), Some(age), Some(owner_name), Some(type_id)) => Ok(PetRecord {
                pet_name: pet_name.to_string(),
                age: parse_age(age).ok_or_else(|| anyhow::anyhow!("Age {} does not fit the age column", age.trim()))?,
                owner: split_owner_name(owner_name),
                type_id,
            }),
            _ => Err(Error::invalid_input()),
        }
    }
}

/// Query string of `GET /search`. Absent or empty terms do not filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub pet_name: Option<String>,
    pub type_name: Option<String>,
}

impl From<&SearchQuery> for PetFilter {
    fn from(query: &SearchQuery) -> Self {
        PetFilter {
            pet_name: query.pet_name.clone(),
            type_name: query.type_name.clone(),
        }
    }
}

/// An owner as offered in the edit form
#[derive(Debug, Clone, Serialize)]
pub struct OwnerOption {
    pub owner_id: OwnerId,
    pub full_name: String,
}

impl From<Owner> for OwnerOption {
    fn from(owner: Owner) -> Self {
        Self {
            owner_id: owner.owner_id,
            full_name: join_owner_name(&owner.first_name, &owner.last_name),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IndexView {
    pub pets: Vec<PetDetails>,
    pub search: SearchQuery,
}

#[derive(Debug, Serialize)]
pub struct CreateView {
    pub pet_types: Vec<PetType>,
}

#[derive(Debug, Serialize)]
pub struct EditView {
    pub pet: PetDetails,
    pub owner_name: String,
    pub owners: Vec<OwnerOption>,
    pub pet_types: Vec<PetType>,
}

#[derive(Debug, Serialize)]
pub struct DeleteView {
    pub pet: PetDetails,
}
