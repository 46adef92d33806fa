//! Common identifier types.
//!
//! All entity identifiers are PostgreSQL `SERIAL` keys, wrapped in type aliases so signatures
//! say which table an id belongs to:
//!
//! - [`OwnerId`]: owner identifier
//! - [`PetId`]: pet identifier
//! - [`PetTypeId`]: pet type identifier

pub type OwnerId = i32;
pub type PetId = i32;
pub type PetTypeId = i32;

/// Parse a raw path segment into a [`PetId`].
///
/// Anything that is not a plain integer yields `None`, which callers treat the same way as an id
/// with no matching row.
pub fn parse_pet_id(raw: &str) -> Option<PetId> {
    raw.trim().parse().ok()
}
