//! HTTP request handlers.
//!
//! - [`pets`]: the listing, search, create, edit and delete pages
//! - [`static_assets`]: fallback serving of embedded files such as the stylesheet

pub mod pets;
pub mod static_assets;
