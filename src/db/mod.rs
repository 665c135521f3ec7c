//! Database abstraction layer.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Per-query row records (genes, alleles, pairs, guidelines, change log)
//! - `repository`: Trait definitions for data access
//! - `sqlite`: sqlx/SQLite implementation of the traits

mod error;
mod models;
mod repository;
pub mod sqlite;


pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
