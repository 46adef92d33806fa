//! Database models for pets.

use crate::types::{OwnerId, PetId, PetTypeId};
use serde::{Deserialize, Serialize};

/// Database representation of a pet row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pet {
    pub pet_id: PetId,
    pub pet_name: String,
    pub age: i64,
    pub owner_id: OwnerId,
    pub type_id: PetTypeId,
}

/// A pet joined with its owner's name and its type name, as shown in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PetDetails {
    pub pet_id: PetId,
    pub pet_name: String,
    pub age: i64,
    pub owner_id: OwnerId,
    pub first_name: String,
    pub last_name: String,
    pub type_id: PetTypeId,
    pub type_name: String,
}

/// Request to create a new pet
#[derive(Debug, Clone)]
pub struct PetCreateDBRequest {
    pub pet_name: String,
    pub age: i64,
    pub owner_id: OwnerId,
    pub type_id: PetTypeId,
}

/// Request to update an existing pet. Every column is replaced.
#[derive(Debug, Clone)]
pub struct PetUpdateDBRequest {
    pub pet_name: String,
    pub age: i64,
    pub owner_id: OwnerId,
    pub type_id: PetTypeId,
}

pub type PetDBResponse = Pet;
