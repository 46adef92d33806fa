//! Repository implementations for database access.
//!
//! Each repository wraps a borrowed SQLx connection and exposes strongly-typed operations that
//! return models from [`crate::db::models`]:
//!
//! - [`Owners`]: owner lookup by name, creation and listing
//! - [`PetTypes`]: read-only access to pet type reference data
//! - [`Pets`]: pet CRUD plus the joined, filterable listing; implements [`Repository`]

pub mod owners;
pub mod pet_types;
pub mod pets;
pub mod repository;

pub use owners::Owners;
pub use pet_types::PetTypes;
pub use pets::{PetFilter, Pets};
pub use repository::Repository;
