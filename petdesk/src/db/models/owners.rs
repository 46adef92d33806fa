//! Database models for owners.

use crate::types::OwnerId;
use serde::{Deserialize, Serialize};

/// Database representation of an owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Owner {
    pub owner_id: OwnerId,
    pub first_name: String,
    pub last_name: String,
}

/// Request to create a new owner
#[derive(Debug, Clone)]
pub struct OwnerCreateDBRequest {
    pub first_name: String,
    pub last_name: String,
}

pub type OwnerDBResponse = Owner;
