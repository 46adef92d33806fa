//! Database models for pet types.

use crate::types::PetTypeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PetType {
    pub type_id: PetTypeId,
    pub type_name: String,
}
