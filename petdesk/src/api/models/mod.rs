//! Typed request inputs and view contexts.

pub mod pets;
