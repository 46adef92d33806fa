//! Owner name splitting.
//!
//! Owners are stored as a first/last name pair but entered as one free-text field. The split is
//! lossy: everything after the first whitespace becomes the last name, so `"Mary Ann Smith"` is
//! stored as `Mary` / `Ann Smith` and a double-barrelled first name cannot be expressed.

use serde::Serialize;

/// An owner name decomposed into the two stored columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerName {
    pub first_name: String,
    pub last_name: String,
}

/// Split a free-text owner name on its first whitespace.
///
/// Single-token names get an empty last name. Leading whitespace of the remainder is dropped so
/// `"Jane   Doe"` still yields `Doe`.
pub fn split_owner_name(raw: &str) -> OwnerName {
    let trimmed = raw.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => OwnerName {
            first_name: first.to_string(),
            last_name: rest.trim_start().to_string(),
        },
        None => OwnerName {
            first_name: trimmed.to_string(),
            last_name: String::new(),
        },
    }
}

/// The name as a single display string, the inverse of [`split_owner_name`] for well-formed
/// input.
pub fn join_owner_name(first_name: &str, last_name: &str) -> String {
    if last_name.is_empty() {
        first_name.to_string()
    } else {
        format!("{first_name} {last_name}")
    }
}
