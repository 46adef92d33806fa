//! HTTP layer: route handlers and the data structures they exchange.
//!
//! - **[`handlers`]**: Axum route handlers
//! - **[`models`]**: typed form/query inputs and view contexts
//!
//! # Routes
//!
//! | Route | Method | Purpose |
//! |---|---|---|
//! | `/` | GET | list all pets |
//! | `/search` | GET | list pets filtered by `pet_name` / `type_name` |
//! | `/create` | GET, POST | creation form / create |
//! | `/edit/{id}` | GET, POST | edit form / update |
//! | `/delete/{id}` | GET, POST | confirmation / delete |
//!
//! Successful writes redirect to `/` with `303 See Other`.

pub mod handlers;
pub mod models;
