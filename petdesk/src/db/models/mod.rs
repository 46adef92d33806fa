//! Database record models matching table schemas.
//!
//! - [`owners`]: people who own pets
//! - [`pet_types`]: reference list of pet categories
//! - [`pets`]: pet rows plus the joined listing projection

pub mod owners;
pub mod pet_types;
pub mod pets;
