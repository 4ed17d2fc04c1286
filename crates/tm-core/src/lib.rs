//! tm-core - Core library for Tidemark
//!
//! This crate provides the migration definition types, the immutable
//! version-ordered [`MigrationSet`], the directory loader, checksums, and
//! configuration parsing shared by every other Tidemark crate.

pub mod checksum;
pub mod config;
pub mod error;
pub mod loader;
pub mod migration;
pub mod sql_utils;

pub use checksum::{compute_checksum, is_current_checksum};
pub use config::{Config, DbType, Dialect};
pub use error::{CoreError, CoreResult};
pub use loader::load_migrations;
pub use migration::{MigrationDefinition, MigrationSet, MigrationSetBuilder, Version, MAX_VERSION};
