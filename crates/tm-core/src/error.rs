//! Error types for tm-core

use thiserror::Error;

/// Core error type for Tidemark
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Two migrations registered with the same version
    #[error("[E003] Duplicate migration version {version}: '{existing}' and '{duplicate}'")]
    DuplicateVersion {
        version: u32,
        existing: String,
        duplicate: String,
    },

    /// E004: Migration version outside the accepted range
    #[error("[E004] Invalid migration version {version} for '{name}': versions must be between 1 and 2147483647")]
    InvalidVersion { version: u32, name: String },

    /// E005: Migrations directory does not exist
    #[error("[E005] Migrations directory not found: {path}")]
    MigrationDirNotFound { path: String },

    /// E006: A `.sql` file in the migrations directory has an unparseable name
    #[error(
        "[E006] Invalid migration file name '{path}': expected '<version>_<name>.sql' or 'V<version>__<name>.sql'"
    )]
    InvalidMigrationFileName { path: String },

    /// E007: IO error
    #[error("[E007] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E008: IO error with file path context
    #[error("[E008] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E009: YAML parse error
    #[error("[E009] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
