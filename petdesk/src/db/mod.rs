//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL and is the only place
//! that issues SQL. It follows the Repository pattern:
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (api::handlers, records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - parameterized queries)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - row structs)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │  PostgreSQL │
//! └─────────────┘
//! ```
//!
//! Repositories borrow a single `PgConnection`. Callers acquire one from the shared pool for the
//! duration of an operation and release it by dropping it; nothing here opens a transaction, so
//! every statement commits on its own.
//!
//! ```ignore
//! use petdesk::db::handlers::PetTypes;
//!
//! let mut conn = pool.acquire().await?;
//! let types = PetTypes::new(&mut conn).list().await?;
//! ```
//!
//! # Migrations
//!
//! Migrations live in `migrations/` and are applied at startup through [`crate::migrator`].

pub mod errors;
pub mod handlers;
pub mod models;
