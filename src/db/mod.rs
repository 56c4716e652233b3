//! Database abstraction layer.
//!
//! Trait-based data access so the handlers never name a storage backend.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `filter`: Precedence of the optional list filters
//! - `models`: The Todo entity, its enumerations, filters and patches
//! - `repository`: Trait definitions for data access
//! - `update`: Patch merging for partial updates
//! - `sqlite`: SQLx-backed implementation

mod error;
mod filter;
mod models;
mod repository;
pub mod sqlite;
mod update;

#[cfg(test)]
mod models_test;

pub use error::{DbError, DbResult};
pub use filter::{FilterBranch, FilterColumn, Presence};
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
pub use update::{ResolvedUpdate, UpdatedField, resolve_update};
